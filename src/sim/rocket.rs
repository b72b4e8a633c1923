//! Rockets, friendly and enemy
//!
//! Velocity is split along the start→target line using Manhattan weights
//! (`|dx| + |dy|` normalises the direction), so diagonal shots are slower than
//! axis-aligned ones of the same engine. Acceleration uses the same weights.

use std::rc::Rc;

use glam::Vec2;

use super::collision::Rect;
use super::director::Director;
use super::explosion::Explosion;
use super::movable::{Course, MovableKind, first_struck};
use super::ordnance::{Engine, Warhead};

#[derive(Debug, Clone)]
pub struct Rocket {
    pub id: u32,
    course: Course,
    velocity: Vec2,
    friendly: bool,
    destroyed: bool,
    engine: Engine,
    warhead: Rc<Warhead>,
}

impl Rocket {
    pub fn new(
        id: u32,
        engine: Engine,
        warhead: Rc<Warhead>,
        start: Vec2,
        target: Vec2,
        friendly: bool,
    ) -> Self {
        let course = Course::new(start, target);
        let velocity = heading(&course) * engine.speed;
        Self {
            id,
            course,
            velocity,
            friendly,
            destroyed: false,
            engine,
            warhead,
        }
    }

    pub fn course(&self) -> &Course {
        &self.course
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn warhead(&self) -> &Rc<Warhead> {
        &self.warhead
    }

    pub fn is_friendly(&self) -> bool {
        self.friendly
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Nose direction in degrees, 0 pointing up the screen
    pub fn angle(&self) -> i32 {
        let degrees = self.velocity.y.atan2(self.velocity.x).to_degrees();
        degrees.round() as i32 - 90
    }

    /// Accelerate along the course by the engine's rate
    pub fn change_speed(&mut self) {
        self.velocity += heading(&self.course) * (self.engine.speed_rate / 100.0);
    }

    pub fn advance(&mut self, director: &mut Director) -> bool {
        if self.destroyed {
            self.explode(director, None);
            return false;
        }

        if !self.friendly {
            let hitbox = Rect::centered(self.course.position, MovableKind::Rocket.size());
            if let Some(struck) = first_struck(&hitbox, director.buildings()) {
                if self.warhead.is_nuclear() {
                    // An enemy nuke flattens every building, with no blast
                    for index in 0..director.buildings().len() {
                        self.explode(director, Some(index));
                    }
                } else {
                    self.explode(director, Some(struck));
                }
                return false;
            }
        }

        self.change_speed();

        if self.course.arrived() {
            self.course.position = self.course.target;
            self.explode(director, None);
            return false;
        }

        self.course.position += self.velocity;
        true
    }

    /// Damage `building` if given, then leave a blast. Enemy nuclear warheads
    /// never leave a blast.
    pub fn explode(&mut self, director: &mut Director, building: Option<usize>) {
        if let Some(index) = building {
            if let Some(b) = director.buildings_mut().get_mut(index) {
                b.hit(self.warhead.damage);
            }
        }

        if !self.warhead.is_nuclear() || self.friendly {
            director.generate_explosion(
                self.course.position,
                self.warhead.radius,
                self.warhead.damage,
            );
        }
    }

    /// Friendly rockets shrug off blasts; enemy rockets die on any hit
    pub fn get_hit(&mut self, _explosion: &Explosion) -> bool {
        if self.friendly {
            return false;
        }
        self.destroyed = true;
        true
    }
}

/// Unit step toward the target under Manhattan weighting
fn heading(course: &Course) -> Vec2 {
    let delta = course.target - course.start;
    let weight = delta.x.abs() + delta.y.abs();
    if weight == 0.0 {
        Vec2::ZERO
    } else {
        delta / weight
    }
}
