//! Simulation tuning
//!
//! Everything that shapes a round but is not a rule of the simulation itself:
//! arena size, spawn odds, enemy handicaps, starting stock. Loaded from JSON so
//! a runner can rebalance without recompiling.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// Data-driven round configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Arena ===
    /// Play area width (pixels)
    pub arena_width: f32,
    /// Play area height (pixels); the ground line is at the bottom
    pub arena_height: f32,
    /// Buildings placed at round start
    pub building_count: usize,

    // === Determinism ===
    /// Seed for the simulation RNG
    pub seed: u64,
    /// Interval of one tick, used to turn cooldown seconds into ticks
    pub tick_ms: u32,

    // === Hostiles ===
    /// Per-tick chance that a new hostile appears
    pub hostile_spawn_chance: f64,
    /// Per-tick chance that a live jet with stock launches a rocket
    pub jet_fire_chance: f64,
    /// Speed multiplier applied to every enemy engine
    pub enemy_speed_factor: f32,
    /// Chance an enemy engine gets boosted acceleration
    pub enemy_boost_chance: f64,
    /// Acceleration given to boosted enemy engines
    pub enemy_boost_rate: f32,

    // === Player ===
    pub starting_rockets: u32,
    /// Seconds before another nuclear rocket may be fired
    pub nuclear_cooldown_secs: u32,
    /// Skip every resource check (rockets, score, cooldown)
    pub sandbox: bool,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            arena_width: ARENA_WIDTH,
            arena_height: ARENA_HEIGHT,
            building_count: 4,

            seed: 0x5eed_a1c0,
            tick_ms: TICK_MS,

            hostile_spawn_chance: 21.0 / 1000.0,
            jet_fire_chance: 20.0 / 900.0,
            enemy_speed_factor: 0.3,
            enemy_boost_chance: 0.1,
            enemy_boost_rate: 2.0,

            starting_rockets: 30,
            nuclear_cooldown_secs: 60,
            sandbox: false,
        }
    }
}

impl Tuning {
    /// Tuning for scripted scenarios: nothing spawns on its own and jets hold fire
    pub fn quiet() -> Self {
        Self {
            hostile_spawn_chance: 0.0,
            jet_fire_chance: 0.0,
            ..Self::default()
        }
    }

    /// Ticks that make up one cooldown second
    pub fn ticks_per_second(&self) -> u64 {
        u64::from((1000 / self.tick_ms.max(1)).max(1))
    }

    /// Parse tuning from a JSON string; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load tuning from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path.as_ref())?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.as_ref().display());
        Ok(tuning)
    }

    /// Load tuning from a JSON file, falling back to defaults on any failure
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(path.as_ref()) {
            Ok(tuning) => tuning,
            Err(err) => {
                log::warn!("Using default tuning ({err})");
                Self::default()
            }
        }
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
