//! Everything that flies
//!
//! The variant set is closed: rockets, meteors, UFOs and jets. Each variant
//! owns its movement law; this module only dispatches and holds the pieces
//! every variant shares.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::aircraft::{Jet, Ufo};
use super::building::Building;
use super::collision::{Rect, rect_circle_intersects, rect_intersects};
use super::director::Director;
use super::explosion::Explosion;
use super::meteor::Meteor;
use super::rocket::Rocket;
use crate::consts::*;

/// Where a movable is, where it came from and where it is heading.
/// Arrival is judged by distance from the start, not by position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub position: Vec2,
    pub start: Vec2,
    pub target: Vec2,
}

impl Course {
    pub fn new(start: Vec2, target: Vec2) -> Self {
        Self {
            position: start,
            start,
            target,
        }
    }

    /// Straight-line length of the whole trip
    pub fn target_distance(&self) -> f32 {
        self.start.distance(self.target)
    }

    /// Straight-line distance covered so far
    pub fn travelled(&self) -> f32 {
        self.position.distance(self.start)
    }

    pub fn arrived(&self) -> bool {
        self.travelled() >= self.target_distance()
    }
}

/// Variant tag, doubling as the dimension table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MovableKind {
    Rocket,
    Meteor,
    Ufo,
    Jet,
}

impl MovableKind {
    pub fn size(&self) -> Vec2 {
        match self {
            MovableKind::Rocket => Vec2::new(ROCKET_W, ROCKET_H),
            MovableKind::Meteor => Vec2::new(METEOR_W, METEOR_H),
            MovableKind::Ufo => Vec2::new(UFO_W, UFO_H),
            MovableKind::Jet => Vec2::new(JET_W, JET_H),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MovableKind::Rocket => "rocket",
            MovableKind::Meteor => "meteor",
            MovableKind::Ufo => "ufo",
            MovableKind::Jet => "jet",
        }
    }
}

#[derive(Debug, Clone)]
pub enum Movable {
    Rocket(Rocket),
    Meteor(Meteor),
    Ufo(Ufo),
    Jet(Jet),
}

impl Movable {
    pub fn kind(&self) -> MovableKind {
        match self {
            Movable::Rocket(_) => MovableKind::Rocket,
            Movable::Meteor(_) => MovableKind::Meteor,
            Movable::Ufo(_) => MovableKind::Ufo,
            Movable::Jet(_) => MovableKind::Jet,
        }
    }

    pub fn id(&self) -> u32 {
        match self {
            Movable::Rocket(r) => r.id,
            Movable::Meteor(m) => m.id,
            Movable::Ufo(u) => u.id,
            Movable::Jet(j) => j.id,
        }
    }

    pub fn course(&self) -> &Course {
        match self {
            Movable::Rocket(r) => r.course(),
            Movable::Meteor(m) => m.course(),
            Movable::Ufo(u) => u.course(),
            Movable::Jet(j) => j.course(),
        }
    }

    pub fn position(&self) -> Vec2 {
        self.course().position
    }

    pub fn size(&self) -> Vec2 {
        self.kind().size()
    }

    pub fn is_destroyed(&self) -> bool {
        match self {
            Movable::Rocket(r) => r.is_destroyed(),
            Movable::Meteor(m) => m.is_destroyed(),
            Movable::Ufo(u) => u.is_destroyed(),
            Movable::Jet(j) => j.is_destroyed(),
        }
    }

    /// Display rotation in degrees
    pub fn angle(&self) -> i32 {
        match self {
            Movable::Rocket(r) => r.angle(),
            Movable::Jet(j) => j.angle(),
            Movable::Meteor(_) | Movable::Ufo(_) => 0,
        }
    }

    /// Shooting this down earns a point
    pub fn is_hostile(&self) -> bool {
        match self {
            Movable::Rocket(r) => !r.is_friendly(),
            _ => true,
        }
    }

    /// Box used against buildings, centred on the position
    pub fn building_hitbox(&self) -> Rect {
        Rect::centered(self.position(), self.size())
    }

    /// Box used against blasts, anchored at the position
    pub fn blast_hitbox(&self) -> Rect {
        Rect::anchored(self.position(), self.size())
    }

    pub fn strikes(&self, building: &Building) -> bool {
        rect_intersects(&self.building_hitbox(), &building.footprint())
    }

    pub fn caught_in(&self, explosion: &Explosion) -> bool {
        rect_circle_intersects(
            &self.blast_hitbox(),
            explosion.center(),
            explosion.radius() as f32,
        )
    }

    /// Advance one tick. `false` means the director should drop this movable;
    /// any blast or score it leaves behind has already been queued.
    pub fn advance(&mut self, director: &mut Director) -> bool {
        match self {
            Movable::Rocket(r) => r.advance(director),
            Movable::Meteor(m) => m.advance(director),
            Movable::Ufo(u) => u.advance(director),
            Movable::Jet(j) => j.advance(director),
        }
    }

    /// Detonate, optionally against the building at `building` in the world
    pub fn explode(&mut self, director: &mut Director, building: Option<usize>) {
        match self {
            Movable::Rocket(r) => r.explode(director, building),
            Movable::Meteor(m) => m.explode(director, building),
            Movable::Ufo(u) => u.explode(director),
            Movable::Jet(j) => j.explode(director),
        }
    }

    /// Apply a blast. `true` means the movable died from this hit and should
    /// be removed now.
    pub fn get_hit(&mut self, explosion: &Explosion) -> bool {
        match self {
            Movable::Rocket(r) => r.get_hit(explosion),
            Movable::Meteor(m) => m.get_hit(explosion),
            Movable::Ufo(u) => u.get_hit(explosion),
            Movable::Jet(j) => j.get_hit(explosion),
        }
    }
}

impl From<Rocket> for Movable {
    fn from(rocket: Rocket) -> Self {
        Movable::Rocket(rocket)
    }
}

impl From<Meteor> for Movable {
    fn from(meteor: Meteor) -> Self {
        Movable::Meteor(meteor)
    }
}

impl From<Ufo> for Movable {
    fn from(ufo: Ufo) -> Self {
        Movable::Ufo(ufo)
    }
}

impl From<Jet> for Movable {
    fn from(jet: Jet) -> Self {
        Movable::Jet(jet)
    }
}

/// Index of the first building overlapping `movable_box`
pub(crate) fn first_struck(movable_box: &Rect, buildings: &[Building]) -> Option<usize> {
    buildings
        .iter()
        .position(|b| rect_intersects(movable_box, &b.footprint()))
}
