//! Error types
//!
//! Nothing in a tick can fail. Errors only come from player commands that are
//! refused, configuration loading, and building placement.

use thiserror::Error;

/// Why a player command was refused. A refused command never changes state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("no rockets left")]
    NoRocketsLeft,

    #[error("nuclear launch cooling down ({seconds}s left)")]
    NuclearCoolingDown { seconds: u32 },

    #[error("costs {cost} points, only {score} available")]
    InsufficientScore { cost: i64, score: i64 },

    #[error("research ladder is already complete")]
    FullyResearched,

    #[error("no catalog entry at index {index}")]
    UnknownSelection { index: usize },

    #[error("round is over")]
    GameOver,
}

/// Failure loading a [`crate::Tuning`] file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Building placement could not fit the requested footprints
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlacementError {
    #[error("cannot fit {count} buildings into an arena {width} wide")]
    ArenaTooNarrow { count: usize, width: f32 },
}
