//! World state
//!
//! The live collections and the counters the player spends. Only the
//! director mutates any of it; everything else reads.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::building::Building;
use super::explosion::Explosion;
use super::movable::{Movable, MovableKind};
use super::ordnance::Armory;
use crate::consts::{RESUPPLY_EVERY, RESUPPLY_ROCKETS};

/// Current phase of the round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// At least one building stands
    Running,
    /// Every building is gone
    GameOver,
}

/// Score and the resources it buys
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ledger {
    score: i64,
    remaining_rockets: u32,
    /// Seconds until a nuclear rocket may fly again
    nuclear_cooldown: u32,
    /// HP of every shield handed out from now on
    shield_research: i32,
}

impl Ledger {
    pub fn new(starting_rockets: u32) -> Self {
        Self {
            score: 0,
            remaining_rockets: starting_rockets,
            nuclear_cooldown: 0,
            shield_research: 1,
        }
    }

    pub fn score(&self) -> i64 {
        self.score
    }

    pub fn remaining_rockets(&self) -> u32 {
        self.remaining_rockets
    }

    pub fn nuclear_cooldown(&self) -> u32 {
        self.nuclear_cooldown
    }

    pub fn shield_research(&self) -> i32 {
        self.shield_research
    }

    /// Add (or spend) score. Landing on a multiple of ten, in either
    /// direction, resupplies the player. Returns the rockets granted.
    pub fn award(&mut self, delta: i64) -> u32 {
        if delta == 0 {
            return 0;
        }
        self.score += delta;
        if self.score.rem_euclid(RESUPPLY_EVERY) != 0 {
            return 0;
        }
        self.remaining_rockets = self.remaining_rockets.saturating_add(RESUPPLY_ROCKETS);
        RESUPPLY_ROCKETS
    }

    pub(crate) fn spend_rocket(&mut self) {
        self.remaining_rockets = self.remaining_rockets.saturating_sub(1);
    }

    pub(crate) fn start_nuclear_cooldown(&mut self, seconds: u32) {
        self.nuclear_cooldown = seconds;
    }

    /// One second passes on the nuclear clock
    pub(crate) fn cool_down(&mut self) {
        self.nuclear_cooldown = self.nuclear_cooldown.saturating_sub(1);
    }

    pub(crate) fn upgrade_shield_research(&mut self) {
        self.shield_research += 1;
    }
}

/// Everything on the field, in stable insertion order
#[derive(Debug, Clone)]
pub struct World {
    pub(crate) buildings: Vec<Building>,
    pub(crate) movables: Vec<Movable>,
    pub(crate) explosions: Vec<Explosion>,
    pub(crate) armory: Armory,
    pub(crate) ledger: Ledger,
    next_id: u32,
}

impl World {
    pub fn new(starting_rockets: u32) -> Self {
        Self {
            buildings: Vec::new(),
            movables: Vec::new(),
            explosions: Vec::new(),
            armory: Armory::new(),
            ledger: Ledger::new(starting_rockets),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Make sure future IDs never collide with `id`
    pub(crate) fn reserve_ids_through(&mut self, id: u32) {
        self.next_id = self.next_id.max(id.saturating_add(1));
    }

    pub fn buildings(&self) -> &[Building] {
        &self.buildings
    }

    pub fn movables(&self) -> &[Movable] {
        &self.movables
    }

    pub fn explosions(&self) -> &[Explosion] {
        &self.explosions
    }

    pub fn armory(&self) -> &Armory {
        &self.armory
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }
}

/// Plain view of one building
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BuildingView {
    pub id: u32,
    pub position: Vec2,
    pub cur_hp: i32,
    pub max_hp: i32,
    pub shield_hp: Option<i32>,
}

/// Plain view of one movable
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovableView {
    pub id: u32,
    pub kind: MovableKind,
    pub position: Vec2,
    pub angle: i32,
    pub hostile: bool,
}

/// Plain view of one blast
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExplosionView {
    pub id: u32,
    pub center: Vec2,
    pub radius: u32,
    pub ttl: i32,
}

/// Serializable picture of the world after a tick, for presentation layers
/// and determinism checks
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub tick: u64,
    pub phase: GamePhase,
    pub ledger: Ledger,
    pub selected_engine: String,
    pub selected_warhead: String,
    pub buildings: Vec<BuildingView>,
    pub movables: Vec<MovableView>,
    pub explosions: Vec<ExplosionView>,
}

impl Snapshot {
    pub(crate) fn capture(world: &World, tick: u64, phase: GamePhase) -> Self {
        Self {
            tick,
            phase,
            ledger: world.ledger.clone(),
            selected_engine: world.armory.selected_engine().name.clone(),
            selected_warhead: world.armory.selected_warhead().name.clone(),
            buildings: world
                .buildings
                .iter()
                .map(|b| BuildingView {
                    id: b.id,
                    position: b.position(),
                    cur_hp: b.cur_hp(),
                    max_hp: b.max_hp(),
                    shield_hp: b.shield().map(|s| s.cur_hp()),
                })
                .collect(),
            movables: world
                .movables
                .iter()
                .map(|m| MovableView {
                    id: m.id(),
                    kind: m.kind(),
                    position: m.position(),
                    angle: m.angle(),
                    hostile: m.is_hostile(),
                })
                .collect(),
            explosions: world
                .explosions
                .iter()
                .map(|e| ExplosionView {
                    id: e.id,
                    center: e.center(),
                    radius: e.radius(),
                    ttl: e.ttl(),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_tenth_point_resupplies() {
        let mut ledger = Ledger::new(0);
        for _ in 0..9 {
            assert_eq!(ledger.award(1), 0);
        }
        assert_eq!(ledger.award(1), RESUPPLY_ROCKETS);
        assert_eq!(ledger.remaining_rockets(), 10);
        assert_eq!(ledger.score(), 10);
    }

    #[test]
    fn test_spending_onto_a_multiple_resupplies() {
        let mut ledger = Ledger::new(0);
        ledger.award(35);
        let rockets = ledger.remaining_rockets();
        assert_eq!(ledger.award(-25), RESUPPLY_ROCKETS);
        assert_eq!(ledger.score(), 10);
        assert_eq!(ledger.remaining_rockets(), rockets + RESUPPLY_ROCKETS);
    }

    #[test]
    fn test_only_landing_on_a_multiple_counts() {
        let mut ledger = Ledger::new(0);
        ledger.award(7);
        // 7 -> 32 skips past 10, 20 and 30
        assert_eq!(ledger.award(25), 0);
        assert_eq!(ledger.award(8), RESUPPLY_ROCKETS);
        assert_eq!(ledger.award(-5), 0);
        assert_eq!(ledger.award(0), 0);
    }

    #[test]
    fn test_entity_ids_are_unique() {
        let mut world = World::new(30);
        let a = world.next_entity_id();
        let b = world.next_entity_id();
        assert_ne!(a, b);
    }

    #[test]
    fn test_cooldown_saturates() {
        let mut ledger = Ledger::new(0);
        ledger.start_nuclear_cooldown(1);
        ledger.cool_down();
        ledger.cool_down();
        assert_eq!(ledger.nuclear_cooldown(), 0);
    }
}
