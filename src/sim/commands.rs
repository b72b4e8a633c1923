//! Player commands
//!
//! Everything the player can ask for between ticks: launching a rocket,
//! researching ordnance, and spending score on the buildings. A refused
//! command returns an error and leaves the round untouched. With
//! `Tuning::sandbox` set, the resource checks are skipped.

use glam::Vec2;

use super::director::Director;
use super::ordnance::{Engine, Warhead};
use super::world::GamePhase;
use crate::error::CommandError;

/// Shield for every standing building
pub const SHIELD_COST: i64 = 25;
/// Heal every building by one
pub const RENOVATE_COST: i64 = 70;
/// Raise every building's max HP by one
pub const MODERNIZE_COST: i64 = 130;
/// One more HP on every shield handed out afterwards
pub const SHIELD_RESEARCH_COST: i64 = 100;

impl Director {
    /// Launch a player rocket at `(x, y)` with the selected loadout
    pub fn fire_player_rocket(&mut self, x: f32, y: f32) -> Result<(), CommandError> {
        self.ensure_running()?;
        let sandbox = self.tuning().sandbox;
        let nuclear = self.armory().selected_warhead().is_nuclear();

        if !sandbox {
            if self.ledger().remaining_rockets() == 0 {
                return Err(CommandError::NoRocketsLeft);
            }
            let cooldown = self.ledger().nuclear_cooldown();
            if nuclear && cooldown > 0 {
                return Err(CommandError::NuclearCoolingDown { seconds: cooldown });
            }
        }

        if nuclear {
            if !sandbox {
                let seconds = self.tuning().nuclear_cooldown_secs;
                self.world_mut().ledger.start_nuclear_cooldown(seconds);
            }
            log::debug!("Nuclear launch at ({x}, {y})");
        }

        let rocket = self.generate_player_rocket(Vec2::new(x, y));
        self.spawn(rocket.into());
        self.world_mut().ledger.spend_rocket();
        Ok(())
    }

    /// Buy the next engine tier. It joins the catalog but is not selected.
    pub fn research_engine(&mut self) -> Result<(), CommandError> {
        self.ensure_running()?;
        let tier = self
            .armory()
            .next_engine_tier()
            .ok_or(CommandError::FullyResearched)?;
        self.charge(tier.cost().unwrap_or(0))?;
        self.world_mut().armory.add_engine(Engine::new(tier, 0.0, 0.0));
        log::info!("Researched {} engine", tier.as_str());
        Ok(())
    }

    /// Buy the next warhead tier. It joins the catalog but is not selected.
    pub fn research_warhead(&mut self) -> Result<(), CommandError> {
        self.ensure_running()?;
        let tier = self
            .armory()
            .next_warhead_tier()
            .ok_or(CommandError::FullyResearched)?;
        self.charge(tier.cost().unwrap_or(0))?;
        self.world_mut().armory.add_warhead(Warhead::new(tier, 0, 0));
        log::info!("Researched {} warhead", tier.as_str());
        Ok(())
    }

    /// Put a fresh shield on every building, replacing any current one
    pub fn purchase_shield(&mut self) -> Result<(), CommandError> {
        self.ensure_running()?;
        self.charge(SHIELD_COST)?;
        let count = self.buildings().len();
        let shields: Vec<_> = (0..count).map(|_| self.generate_shield()).collect();
        for (building, shield) in self.buildings_mut().iter_mut().zip(shields) {
            building.activate_shield(shield);
        }
        log::info!(
            "Shields up on {count} buildings ({} HP)",
            self.ledger().shield_research()
        );
        Ok(())
    }

    pub fn renovate_all(&mut self) -> Result<(), CommandError> {
        self.ensure_running()?;
        self.charge(RENOVATE_COST)?;
        self.buildings_mut().iter_mut().for_each(|b| b.renovate());
        log::info!("Renovated all buildings");
        Ok(())
    }

    pub fn modernize_all(&mut self) -> Result<(), CommandError> {
        self.ensure_running()?;
        self.charge(MODERNIZE_COST)?;
        self.buildings_mut().iter_mut().for_each(|b| b.modernize());
        log::info!("Modernized all buildings");
        Ok(())
    }

    /// Raise the HP of shields bought from now on. Shields already up keep
    /// their strength.
    pub fn upgrade_shield_research(&mut self) -> Result<(), CommandError> {
        self.ensure_running()?;
        self.charge(SHIELD_RESEARCH_COST)?;
        self.world_mut().ledger.upgrade_shield_research();
        log::info!("Shield research now {}", self.ledger().shield_research());
        Ok(())
    }

    pub fn select_engine(&mut self, index: usize) -> Result<(), CommandError> {
        self.ensure_running()?;
        if self.world_mut().armory.select_engine(index) {
            Ok(())
        } else {
            Err(CommandError::UnknownSelection { index })
        }
    }

    pub fn select_warhead(&mut self, index: usize) -> Result<(), CommandError> {
        self.ensure_running()?;
        if self.world_mut().armory.select_warhead(index) {
            Ok(())
        } else {
            Err(CommandError::UnknownSelection { index })
        }
    }

    fn ensure_running(&self) -> Result<(), CommandError> {
        match self.phase() {
            GamePhase::Running => Ok(()),
            GamePhase::GameOver => Err(CommandError::GameOver),
        }
    }

    /// Deduct `cost` from the score, refusing if it is not covered
    fn charge(&mut self, cost: i64) -> Result<(), CommandError> {
        let score = self.ledger().score();
        if !self.tuning().sandbox && score < cost {
            return Err(CommandError::InsufficientScore { cost, score });
        }
        self.score(-cost);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Tuning;
    use crate::consts::*;
    use crate::sim::building::Building;
    use crate::sim::movable::Movable;

    fn director() -> Director {
        let buildings = vec![
            Building::new(1, 3, Vec2::new(50.0, ARENA_HEIGHT - BUILDING_H)),
            Building::new(2, 4, Vec2::new(400.0, ARENA_HEIGHT - BUILDING_H)),
        ];
        Director::with_buildings(Tuning::quiet(), buildings)
    }

    fn rich(score: i64) -> Director {
        let mut d = director();
        d.score(score);
        d
    }

    #[test]
    fn test_fire_spends_a_rocket() {
        let mut d = director();
        d.fire_player_rocket(300.0, 200.0).unwrap();
        assert_eq!(d.ledger().remaining_rockets(), 29);

        let Movable::Rocket(rocket) = &d.movables()[0] else {
            panic!("expected a rocket");
        };
        assert!(rocket.is_friendly());
        assert_eq!(rocket.course().start, Vec2::new(400.0, ARENA_HEIGHT - ROCKET_H / 2.0));
        assert_eq!(rocket.course().target, Vec2::new(300.0, 200.0));
    }

    #[test]
    fn test_fire_without_rockets_is_refused() {
        let tuning = Tuning {
            starting_rockets: 0,
            ..Tuning::quiet()
        };
        let mut d = Director::with_buildings(tuning, Vec::new());
        assert_eq!(d.fire_player_rocket(1.0, 1.0), Err(CommandError::NoRocketsLeft));
        assert!(d.movables().is_empty());
    }

    #[test]
    fn test_nuclear_cooldown_blocks_second_launch() {
        let mut d = rich(1000);
        for _ in 0..3 {
            d.research_warhead().unwrap();
        }
        d.select_warhead(3).unwrap();
        assert!(d.armory().selected_warhead().is_nuclear());

        d.fire_player_rocket(400.0, 100.0).unwrap();
        assert_eq!(d.ledger().nuclear_cooldown(), 60);
        assert_eq!(
            d.fire_player_rocket(400.0, 100.0),
            Err(CommandError::NuclearCoolingDown { seconds: 60 })
        );
        assert_eq!(d.movables().len(), 1);
    }

    #[test]
    fn test_research_ladder() {
        let mut d = rich(130);
        d.research_engine().unwrap();
        d.research_engine().unwrap();
        assert_eq!(d.ledger().score(), 0);
        assert_eq!(d.armory().engines().len(), 3);
        assert_eq!(d.armory().selected_engine().name, "Small");
        assert_eq!(d.research_engine(), Err(CommandError::FullyResearched));
    }

    #[test]
    fn test_unaffordable_research_changes_nothing() {
        let mut d = rich(20);
        assert_eq!(
            d.research_warhead(),
            Err(CommandError::InsufficientScore { cost: 25, score: 20 })
        );
        assert_eq!(d.armory().warheads().len(), 1);
        assert_eq!(d.ledger().score(), 20);
    }

    #[test]
    fn test_shields_for_every_building() {
        let mut d = rich(125);
        d.upgrade_shield_research().unwrap();
        d.purchase_shield().unwrap();
        assert!(d.buildings().iter().all(|b| b.shield().map(|s| s.max_hp()) == Some(2)));
        assert_eq!(d.ledger().score(), 0);
    }

    #[test]
    fn test_renovate_and_modernize() {
        let mut d = rich(200);
        d.buildings_mut()[0].hit(2);
        d.renovate_all().unwrap();
        assert_eq!(d.buildings()[0].cur_hp(), 2);
        assert_eq!(d.buildings()[1].cur_hp(), 4);

        d.modernize_all().unwrap();
        assert_eq!(d.buildings()[0].max_hp(), 4);
        assert_eq!(d.buildings()[0].cur_hp(), 2);
    }

    #[test]
    fn test_unknown_selection() {
        let mut d = director();
        assert_eq!(d.select_engine(1), Err(CommandError::UnknownSelection { index: 1 }));
        assert!(d.select_warhead(0).is_ok());
    }

    #[test]
    fn test_sandbox_skips_checks() {
        let tuning = Tuning {
            sandbox: true,
            starting_rockets: 0,
            ..Tuning::quiet()
        };
        let mut d = Director::with_buildings(tuning, Vec::new());
        d.research_warhead().unwrap();
        assert_eq!(d.ledger().score(), -25);
        d.fire_player_rocket(10.0, 10.0).unwrap();
        assert_eq!(d.movables().len(), 1);
    }

    #[test]
    fn test_commands_refused_after_game_over() {
        let mut d = rich(500);
        d.buildings_mut()[0].hit(10);
        d.buildings_mut()[1].hit(10);
        assert!(!d.tick());
        assert_eq!(d.fire_player_rocket(1.0, 1.0), Err(CommandError::GameOver));
        assert_eq!(d.research_engine(), Err(CommandError::GameOver));
        assert_eq!(d.select_engine(0), Err(CommandError::GameOver));
        assert_eq!(d.select_warhead(0), Err(CommandError::GameOver));
    }

    #[test]
    fn test_research_landing_on_multiple_resupplies() {
        let mut d = rich(35);
        let rockets = d.ledger().remaining_rockets();
        d.research_warhead().unwrap();
        assert_eq!(d.ledger().score(), 10);
        assert_eq!(d.ledger().remaining_rockets(), rockets + RESUPPLY_ROCKETS);
    }

    #[test]
    fn test_sandbox_nuke_skips_cooldown() {
        let tuning = Tuning {
            sandbox: true,
            ..Tuning::quiet()
        };
        let mut d = Director::with_buildings(tuning, Vec::new());
        for _ in 0..3 {
            d.research_warhead().unwrap();
        }
        d.select_warhead(3).unwrap();

        d.fire_player_rocket(400.0, 100.0).unwrap();
        d.fire_player_rocket(400.0, 100.0).unwrap();
        assert_eq!(d.ledger().nuclear_cooldown(), 0);
        assert_eq!(d.movables().len(), 2);
    }
}
