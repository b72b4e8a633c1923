//! Simulation director
//!
//! Owns the world, the seeded RNG and the deferred spawn queues, and runs the
//! fixed per-tick algorithm:
//!
//! 1. Flush queued movables and blasts into the world (then roll for a new
//!    hostile and run the nuclear clock)
//! 2. Test each movable against every blast; a lethal hit scores, detonates
//!    and removes it
//! 3. Advance every survivor by its own movement law
//! 4. Drop movables that died in 2 or 3
//! 5. Grow and age blasts, dropping burnt-out ones
//! 6. Drop destroyed buildings; none left ends the round
//!
//! Anything spawned while 2-3 iterate goes into the queues and joins the
//! world at the start of the next tick.

use std::rc::Rc;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::aircraft::{Jet, Ufo};
use super::building::{Building, Shield};
use super::explosion::Explosion;
use super::meteor::Meteor;
use super::movable::Movable;
use super::ordnance::{Armory, Engine, Warhead};
use super::rocket::Rocket;
use super::world::{GamePhase, Ledger, Snapshot, World};
use crate::consts::*;
use crate::error::PlacementError;
use crate::settings::Tuning;

/// Samples per building before a layout is abandoned
const PLACEMENT_ATTEMPTS: usize = 256;
/// Fresh layouts tried before falling back to even spacing
const PLACEMENT_LAYOUTS: usize = 64;

pub struct Director {
    tuning: Tuning,
    rng: Pcg32,
    world: World,
    pending_movables: Vec<Movable>,
    pending_explosions: Vec<Explosion>,
    phase: GamePhase,
    time_ticks: u64,
}

impl Director {
    /// Start a round: seed the RNG and place the buildings
    pub fn new(tuning: Tuning) -> Result<Self, PlacementError> {
        let mut director = Self::with_buildings(tuning, Vec::new());
        let buildings = director.generate_buildings(director.tuning.building_count)?;
        director.world.buildings = buildings;
        log::info!(
            "Round start: {} buildings, seed {:#x}",
            director.world.buildings.len(),
            director.tuning.seed
        );
        Ok(director)
    }

    /// Start a round over a fixed set of buildings
    pub fn with_buildings(tuning: Tuning, buildings: Vec<Building>) -> Self {
        let mut world = World::new(tuning.starting_rockets);
        for building in &buildings {
            world.reserve_ids_through(building.id);
        }
        world.buildings = buildings;
        Self {
            rng: Pcg32::seed_from_u64(tuning.seed),
            tuning,
            world,
            pending_movables: Vec::new(),
            pending_explosions: Vec::new(),
            phase: GamePhase::Running,
            time_ticks: 0,
        }
    }

    // --- Read access ---

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn buildings(&self) -> &[Building] {
        &self.world.buildings
    }

    pub fn movables(&self) -> &[Movable] {
        &self.world.movables
    }

    pub fn explosions(&self) -> &[Explosion] {
        &self.world.explosions
    }

    pub fn armory(&self) -> &Armory {
        &self.world.armory
    }

    pub fn ledger(&self) -> &Ledger {
        &self.world.ledger
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn time_ticks(&self) -> u64 {
        self.time_ticks
    }

    /// Movables spawned this tick, joining the world next tick
    pub fn pending_movables(&self) -> &[Movable] {
        &self.pending_movables
    }

    /// Blasts spawned this tick, joining the world next tick
    pub fn pending_explosions(&self) -> &[Explosion] {
        &self.pending_explosions
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.world, self.time_ticks, self.phase)
    }

    // --- Crate-internal hooks for movables and commands ---

    pub(crate) fn buildings_mut(&mut self) -> &mut [Building] {
        &mut self.world.buildings
    }

    pub(crate) fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Bernoulli roll on the simulation RNG
    pub(crate) fn roll(&mut self, chance: f64) -> bool {
        if chance.is_nan() || chance <= 0.0 {
            return false;
        }
        if chance >= 1.0 {
            return true;
        }
        self.rng.random_bool(chance)
    }

    /// Uniform integer in `[low, high)`, or `low` for an empty range
    fn sample(&mut self, low: i32, high: i32) -> i32 {
        if high <= low {
            low
        } else {
            self.rng.random_range(low..high)
        }
    }

    // --- Scoring ---

    /// Add (or with a negative delta, spend) score
    pub fn score(&mut self, delta: i64) {
        let granted = self.world.ledger.award(delta);
        if granted > 0 {
            log::info!(
                "Score {}: resupplied {} rockets",
                self.world.ledger.score(),
                granted
            );
        }
    }

    // --- Spawning ---

    /// Place `count` buildings along the ground line without overlap
    pub fn generate_buildings(&mut self, count: usize) -> Result<Vec<Building>, PlacementError> {
        let width = self.tuning.arena_width;
        // x is drawn from [1, high)
        let high = (width - BUILDING_W).round() as i32;
        if count > 0 {
            let span = (count - 1) as f32 * BUILDING_W;
            if high <= 1 || 1.0 + span > (high - 1) as f32 {
                return Err(PlacementError::ArenaTooNarrow { count, width });
            }
        }

        let xs = match (0..PLACEMENT_LAYOUTS).find_map(|_| self.try_layout(count, high)) {
            Some(xs) => xs,
            None => {
                log::warn!("Random placement of {count} buildings kept colliding, spacing evenly");
                let step = if count > 1 {
                    (high - 2) as f32 / (count - 1) as f32
                } else {
                    0.0
                };
                (0..count).map(|i| 1.0 + (i as f32 * step).floor()).collect()
            }
        };

        let ground = self.tuning.arena_height - BUILDING_H;
        Ok(xs
            .into_iter()
            .map(|x| {
                let max_hp = self.sample(3, 6);
                let id = self.world.next_entity_id();
                Building::new(id, max_hp, Vec2::new(x, ground))
            })
            .collect())
    }

    fn try_layout(&mut self, count: usize, high: i32) -> Option<Vec<f32>> {
        let mut xs: Vec<f32> = Vec::with_capacity(count);
        for _ in 0..count {
            let x = (0..PLACEMENT_ATTEMPTS)
                .map(|_| self.sample(1, high) as f32)
                .find(|x| xs.iter().all(|other| (x - other).abs() >= BUILDING_W))?;
            xs.push(x);
        }
        Some(xs)
    }

    /// Enemy engine: a copy of a random catalog engine, slowed down and
    /// sometimes given extra thrust
    fn generate_enemy_engine(&mut self) -> Engine {
        let pick = self.sample(0, self.world.armory.engines().len() as i32) as usize;
        let mut engine = self.world.armory.engines()[pick].clone();
        engine.speed *= self.tuning.enemy_speed_factor;
        if self.roll(self.tuning.enemy_boost_chance) {
            engine.speed_rate = self.tuning.enemy_boost_rate;
        }
        engine
    }

    fn generate_enemy_warhead(&mut self) -> Rc<Warhead> {
        let pick = self.sample(0, self.world.armory.warheads().len() as i32) as usize;
        Rc::clone(&self.world.armory.warheads()[pick])
    }

    /// Player rocket from the launch pad toward `target`, using the
    /// selected engine and warhead
    pub fn generate_player_rocket(&mut self, target: Vec2) -> Rocket {
        let engine = self.world.armory.selected_engine().clone();
        let warhead = Rc::clone(self.world.armory.selected_warhead());
        let start = Vec2::new(
            self.tuning.arena_width / 2.0,
            self.tuning.arena_height - ROCKET_H / 2.0,
        );
        let id = self.world.next_entity_id();
        Rocket::new(id, engine, warhead, start, target, true)
    }

    /// Enemy rocket aimed at a random point on the ground. Without an origin
    /// it enters from a random point along the top edge.
    pub fn generate_enemy_rocket(&mut self, origin: Option<Vec2>) -> Rocket {
        let engine = self.generate_enemy_engine();
        let warhead = self.generate_enemy_warhead();
        let width = self.tuning.arena_width;
        let height = self.tuning.arena_height;

        let start = origin.unwrap_or_else(|| {
            let x = self.sample(1, (width - 1.0).round() as i32);
            Vec2::new(x as f32, ROCKET_H / 2.0)
        });
        let target = Vec2::new(
            self.sample(1, (width - ROCKET_W).round() as i32) as f32,
            (height - ROCKET_H).round(),
        );

        let id = self.world.next_entity_id();
        log::debug!("Enemy rocket {id} ({}) from {start} to {target}", warhead.name);
        Rocket::new(id, engine, warhead, start, target, false)
    }

    /// Meteor from a random point on the top edge. Ultra solid meteors take
    /// two hits.
    pub fn generate_meteor(&mut self, ultra_solid: bool) -> Meteor {
        let x = self.sample(1, (self.tuning.arena_width - METEOR_W).round() as i32);
        let hp = if ultra_solid { 2 } else { 1 };
        let id = self.world.next_entity_id();
        log::debug!("Meteor {id} at x={x} (hp {hp})");
        Meteor::new(
            id,
            Vec2::new(x as f32, 1.0),
            self.tuning.arena_height - METEOR_H,
            hp,
        )
    }

    /// Start/target X for an edge-to-edge patrol, direction chosen at random
    fn patrol_route(&mut self) -> (Vec2, f32) {
        let far = (self.tuning.arena_width - 2.0).round();
        let (start_x, target_x) = if self.sample(0, 2) == 1 {
            (far, 2.0)
        } else {
            (1.0, far)
        };
        let y = self.sample(1, (self.tuning.arena_height * 0.2).round() as i32);
        (Vec2::new(start_x, y as f32), target_x)
    }

    pub fn generate_ufo(&mut self) -> Ufo {
        let hp = self.sample(2, 4);
        let (start, target_x) = self.patrol_route();
        let engine = self.generate_enemy_engine();
        let id = self.world.next_entity_id();
        log::debug!("Ufo {id} from {start} (hp {hp})");
        Ufo::new(id, start, target_x, hp, engine)
    }

    pub fn generate_jet(&mut self) -> Jet {
        let (start, target_x) = self.patrol_route();
        let engine = self.generate_enemy_engine();
        let rockets = self.sample(2, 5) as u32;
        let id = self.world.next_entity_id();
        log::debug!("Jet {id} from {start} carrying {rockets} rockets");
        Jet::new(id, start, target_x, engine, rockets)
    }

    /// Queue a blast for the next tick. Blasts wider than the arena are
    /// nuclear: instant and placed as given. Others are nudged back inside
    /// the arena and grow over time. Returns the blast id.
    pub fn generate_explosion(&mut self, center: Vec2, radius: u32, damage: i32) -> u32 {
        let id = self.world.next_entity_id();
        let explosion = if radius as f32 > self.tuning.arena_width {
            log::debug!("Nuclear blast {id} at {center}");
            Explosion::new(id, center, radius, damage, INSTANT_BLAST_TTL)
        } else {
            let center = contain_blast(
                center,
                radius as f32,
                self.tuning.arena_width,
                self.tuning.arena_height,
            );
            Explosion::new(id, center, radius, damage, STANDARD_BLAST_TTL)
        };
        self.pending_explosions.push(explosion);
        id
    }

    /// Shield at the current research level
    pub fn generate_shield(&self) -> Shield {
        Shield::new(self.world.ledger.shield_research())
    }

    /// Defer a movable to the start of the next tick
    pub fn queue_movable(&mut self, movable: Movable) {
        self.pending_movables.push(movable);
    }

    /// Put a movable straight into the world. Only valid between ticks.
    pub fn spawn(&mut self, movable: Movable) {
        self.world.movables.push(movable);
    }

    // --- Tick ---

    /// Run one tick. Returns whether any building still stands; once it
    /// returns false the round is over and further ticks do nothing.
    pub fn tick(&mut self) -> bool {
        if self.phase == GamePhase::GameOver {
            return false;
        }
        self.time_ticks += 1;

        self.flush_queues();
        self.roll_hostile_spawn();
        self.run_nuclear_clock();

        self.move_elements();
        self.check_explosions();
        let standing = self.check_buildings();

        log::trace!(
            "Tick {}: {} movables, {} blasts, {} buildings",
            self.time_ticks,
            self.world.movables.len(),
            self.world.explosions.len(),
            self.world.buildings.len()
        );
        standing
    }

    fn flush_queues(&mut self) {
        self.world.movables.append(&mut self.pending_movables);
        self.world.explosions.append(&mut self.pending_explosions);
    }

    fn roll_hostile_spawn(&mut self) {
        if !self.roll(self.tuning.hostile_spawn_chance) {
            return;
        }
        let hostile: Movable = match self.sample(0, 4) {
            0 => self.generate_enemy_rocket(None).into(),
            1 => {
                let ultra_solid = self.sample(0, 2) == 0;
                self.generate_meteor(ultra_solid).into()
            }
            2 => self.generate_ufo().into(),
            _ => self.generate_jet().into(),
        };
        self.world.movables.push(hostile);
    }

    fn run_nuclear_clock(&mut self) {
        if self.time_ticks % self.tuning.ticks_per_second() == 0 {
            self.world.ledger.cool_down();
        }
    }

    /// Steps 2-4: blast hits, movement, removal
    fn move_elements(&mut self) {
        let movables = std::mem::take(&mut self.world.movables);
        let mut survivors = Vec::with_capacity(movables.len());

        for mut movable in movables {
            if self.resolve_blasts(&mut movable) {
                continue;
            }
            if movable.advance(self) {
                survivors.push(movable);
            }
        }

        // Nothing should land here mid-tick, but keep it if it does
        survivors.append(&mut self.world.movables);
        self.world.movables = survivors;
    }

    /// Test `movable` against every live blast. Returns true if it died.
    fn resolve_blasts(&mut self, movable: &mut Movable) -> bool {
        for index in 0..self.world.explosions.len() {
            let explosion = &self.world.explosions[index];
            if !movable.caught_in(explosion) || !movable.get_hit(explosion) {
                continue;
            }
            if movable.is_hostile() {
                self.score(1);
            }
            movable.explode(self, None);
            return true;
        }
        false
    }

    /// Step 5: grow each blast once, then age it
    fn check_explosions(&mut self) {
        self.world.explosions.retain_mut(|explosion| {
            explosion.advance_radius();
            explosion.age()
        });
    }

    /// Step 6
    fn check_buildings(&mut self) -> bool {
        self.world.buildings.retain(|b| {
            if !b.is_ok() {
                log::info!("Building {} destroyed", b.id);
            }
            b.is_ok()
        });

        if self.world.buildings.is_empty() {
            log::info!(
                "All buildings destroyed after {} ticks, final score {}",
                self.time_ticks,
                self.world.ledger.score()
            );
            self.phase = GamePhase::GameOver;
            return false;
        }
        true
    }
}

/// Push a blast centre inward so the whole circle sits inside the arena,
/// with a 2px margin
pub fn contain_blast(mut center: Vec2, radius: f32, width: f32, height: f32) -> Vec2 {
    if center.x - radius < 0.0 {
        center.x = radius + 2.0;
    } else if center.x + radius > width {
        center.x = width - radius - 2.0;
    }

    if center.y - radius < 0.0 {
        center.y = radius + 2.0;
    } else if center.y + radius > height {
        center.y = height - radius - 2.0;
    }
    center
}
