//! Airspace Commander - a tick-driven aerial defence simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, collisions, explosions, world state)
//! - `settings`: Data-driven tuning, loadable from JSON
//! - `error`: Typed failures for commands, config and placement
//!
//! Rendering, input wiring and timers are left to whatever embeds the
//! [`sim::Director`].

pub mod error;
pub mod settings;
pub mod sim;

pub use error::{CommandError, ConfigError, PlacementError};
pub use settings::Tuning;

/// Game configuration constants
pub mod consts {
    /// Tick interval of the reference timer (25 ticks per second)
    pub const TICK_MS: u32 = 40;

    /// Default play area
    pub const ARENA_WIDTH: f32 = 800.0;
    pub const ARENA_HEIGHT: f32 = 600.0;

    /// Footprints (pixels)
    pub const BUILDING_W: f32 = 100.0;
    pub const BUILDING_H: f32 = 100.0;
    pub const SHIELD_W: f32 = 20.0;
    pub const SHIELD_H: f32 = 20.0;
    pub const ROCKET_W: f32 = 30.0;
    pub const ROCKET_H: f32 = 30.0;
    pub const METEOR_W: f32 = 30.0;
    pub const METEOR_H: f32 = 30.0;
    pub const UFO_W: f32 = 70.0;
    pub const UFO_H: f32 = 40.0;
    pub const JET_W: f32 = 70.0;
    pub const JET_H: f32 = 40.0;

    /// TTL that marks an instant (nuclear) explosion
    pub const INSTANT_BLAST_TTL: i32 = 2;
    /// TTL of a standard growing blast (~3.2s at 40ms ticks)
    pub const STANDARD_BLAST_TTL: i32 = 80;

    /// Blast left behind by a downed Ufo or Jet
    pub const AIRCRAFT_BLAST_RADIUS: u32 = 50;
    pub const AIRCRAFT_BLAST_DAMAGE: i32 = 1;

    /// Meteors fall at a fixed rate (pixels/tick) and always deal 1 damage
    pub const METEOR_SPEED: f32 = 3.0;
    pub const METEOR_IMPACT_DAMAGE: i32 = 1;

    /// Jets move faster than their engine would suggest
    pub const JET_SPEED_MULTIPLIER: f32 = 1.5;

    /// Every this many points the player is resupplied
    pub const RESUPPLY_EVERY: i64 = 10;
    pub const RESUPPLY_ROCKETS: u32 = 10;
}
