//! Area-damage blasts
//!
//! A blast never damages buildings. It only catches movables, and each movable
//! decides what a hit means to it.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::INSTANT_BLAST_TTL;

/// A blast, identified by a unique id so per-blast hit bookkeeping never
/// confuses two blasts with the same shape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Explosion {
    pub id: u32,
    center: Vec2,
    radius: u32,
    max_radius: u32,
    damage: i32,
    ttl: i32,
}

impl Explosion {
    /// Build a blast. A TTL of [`INSTANT_BLAST_TTL`] starts at full radius;
    /// anything else starts at radius 1 and grows.
    pub fn new(id: u32, center: Vec2, radius: u32, damage: i32, ttl: i32) -> Self {
        let start = if ttl == INSTANT_BLAST_TTL { radius } else { 1 };
        Self {
            id,
            center,
            radius: start,
            max_radius: radius,
            damage,
            ttl,
        }
    }

    pub fn center(&self) -> Vec2 {
        self.center
    }

    /// Current radius, no side effects
    pub fn radius(&self) -> u32 {
        self.radius
    }

    pub fn max_radius(&self) -> u32 {
        self.max_radius
    }

    pub fn damage(&self) -> i32 {
        self.damage
    }

    pub fn ttl(&self) -> i32 {
        self.ttl
    }

    pub fn set_ttl(&mut self, ttl: i32) {
        self.ttl = ttl;
    }

    /// Grow by one step toward max radius and return the new radius.
    /// Called once per tick by the director.
    pub fn advance_radius(&mut self) -> u32 {
        if self.radius < self.max_radius {
            self.radius += 1;
        }
        self.radius
    }

    /// Age by one tick; returns false once the blast has burnt out
    pub fn age(&mut self) -> bool {
        self.ttl -= 1;
        self.ttl > 0
    }
}
