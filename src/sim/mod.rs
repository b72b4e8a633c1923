//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (insertion order)
//! - No rendering or platform dependencies

pub mod aircraft;
pub mod building;
pub mod collision;
pub mod commands;
pub mod director;
pub mod explosion;
pub mod meteor;
pub mod movable;
pub mod ordnance;
pub mod rocket;
pub mod world;

pub use aircraft::{Jet, Ufo};
pub use building::{Building, Shield};
pub use collision::{Rect, rect_circle_intersects, rect_intersects};
pub use director::{Director, contain_blast};
pub use explosion::Explosion;
pub use meteor::Meteor;
pub use movable::{Course, Movable, MovableKind};
pub use ordnance::{Armory, Engine, EngineTier, Warhead, WarheadTier};
pub use rocket::Rocket;
pub use world::{GamePhase, Ledger, Snapshot, World};
