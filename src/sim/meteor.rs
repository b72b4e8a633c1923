//! Falling meteors
//!
//! Meteors carry no warhead. They dent whatever building they land on and
//! leave no blast; one that reaches the ground in a gap just vanishes.

use glam::Vec2;

use super::collision::Rect;
use super::director::Director;
use super::explosion::Explosion;
use super::movable::{Course, MovableKind, first_struck};
use crate::consts::{METEOR_IMPACT_DAMAGE, METEOR_SPEED};

#[derive(Debug, Clone)]
pub struct Meteor {
    pub id: u32,
    course: Course,
    velocity: Vec2,
    max_hp: i32,
    cur_hp: i32,
    /// Blasts already applied, so a lingering blast only hurts once
    already_hit: Vec<u32>,
}

impl Meteor {
    pub fn new(id: u32, start: Vec2, target_y: f32, max_hp: i32) -> Self {
        Self {
            id,
            course: Course::new(start, Vec2::new(start.x, target_y)),
            velocity: Vec2::new(0.0, METEOR_SPEED),
            max_hp,
            cur_hp: max_hp,
            already_hit: Vec::new(),
        }
    }

    pub fn course(&self) -> &Course {
        &self.course
    }

    pub fn max_hp(&self) -> i32 {
        self.max_hp
    }

    pub fn cur_hp(&self) -> i32 {
        self.cur_hp
    }

    pub fn is_destroyed(&self) -> bool {
        self.cur_hp <= 0
    }

    pub fn advance(&mut self, director: &mut Director) -> bool {
        if self.is_destroyed() {
            return false;
        }

        let hitbox = Rect::centered(self.course.position, MovableKind::Meteor.size());
        if let Some(struck) = first_struck(&hitbox, director.buildings()) {
            self.explode(director, Some(struck));
            return false;
        }

        if self.course.arrived() {
            return false;
        }

        self.course.position += self.velocity;
        true
    }

    /// Impact damage only; a meteor never leaves a blast
    pub fn explode(&mut self, director: &mut Director, building: Option<usize>) {
        if let Some(index) = building {
            if let Some(b) = director.buildings_mut().get_mut(index) {
                b.hit(METEOR_IMPACT_DAMAGE);
            }
        }
    }

    pub fn get_hit(&mut self, explosion: &Explosion) -> bool {
        if !self.already_hit.contains(&explosion.id) {
            self.cur_hp -= explosion.damage();
            self.already_hit.push(explosion.id);
        }
        self.is_destroyed()
    }
}
