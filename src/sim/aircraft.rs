//! UFOs and jets
//!
//! Both fly a horizontal patrol from one edge to the other and accelerate
//! toward their target every tick. Neither is removed in the middle of a
//! collision scan: a lethal hit only marks them, and the next `advance` turns
//! the mark into a blast and a point for the player.

use glam::Vec2;

use super::director::Director;
use super::explosion::Explosion;
use super::movable::{Course, MovableKind};
use super::ordnance::Engine;
use crate::consts::*;

/// Horizontal flight shared by UFOs and jets
#[derive(Debug, Clone)]
pub struct Patrol {
    course: Course,
    dx: f32,
    engine: Engine,
}

impl Patrol {
    pub fn new(start: Vec2, target_x: f32, engine: Engine, speed_multiplier: f32) -> Self {
        let speed = engine.speed * speed_multiplier;
        let dx = if start.x < target_x { speed } else { -speed };
        Self {
            course: Course::new(start, Vec2::new(target_x, start.y)),
            dx,
            engine,
        }
    }

    pub fn course(&self) -> &Course {
        &self.course
    }

    pub fn dx(&self) -> f32 {
        self.dx
    }

    fn change_speed(&mut self) {
        let accel = self.engine.speed_rate / 100.0;
        if self.course.position.x < self.course.target.x {
            self.dx += accel;
        } else {
            self.dx -= accel;
        }
    }

    /// One tick of flight; false once the far edge is reached
    fn fly(&mut self) -> bool {
        self.change_speed();

        if self.course.arrived() {
            return false;
        }

        let x = self.course.position.x;
        let target = self.course.target.x;
        if x > target && x + self.dx < target {
            self.course.position.x = target;
        } else {
            self.course.position.x += self.dx;
        }
        true
    }

    /// Blast left behind when shot down, centred on the airframe
    fn wreck(&self, director: &mut Director, kind: MovableKind) {
        let center = self.course.position + kind.size() / 2.0;
        director.generate_explosion(center, AIRCRAFT_BLAST_RADIUS, AIRCRAFT_BLAST_DAMAGE);
        director.score(1);
    }
}

/// Armoured saucer, takes several blasts to bring down
#[derive(Debug, Clone)]
pub struct Ufo {
    pub id: u32,
    patrol: Patrol,
    cur_hp: i32,
    already_hit: Vec<u32>,
}

impl Ufo {
    pub fn new(id: u32, start: Vec2, target_x: f32, hp: i32, engine: Engine) -> Self {
        Self {
            id,
            patrol: Patrol::new(start, target_x, engine, 1.0),
            cur_hp: hp,
            already_hit: Vec::new(),
        }
    }

    pub fn course(&self) -> &Course {
        self.patrol.course()
    }

    pub fn cur_hp(&self) -> i32 {
        self.cur_hp
    }

    pub fn is_destroyed(&self) -> bool {
        self.cur_hp <= 0
    }

    pub fn advance(&mut self, director: &mut Director) -> bool {
        if self.is_destroyed() {
            self.explode(director);
            return false;
        }
        self.patrol.fly()
    }

    pub fn explode(&mut self, director: &mut Director) {
        self.patrol.wreck(director, MovableKind::Ufo);
    }

    /// Each blast counts once. Never reports death here.
    pub fn get_hit(&mut self, explosion: &Explosion) -> bool {
        if !self.already_hit.contains(&explosion.id) {
            self.cur_hp -= explosion.damage();
            self.already_hit.push(explosion.id);
        }
        false
    }
}

/// Fast bomber that drops enemy rockets along its route
#[derive(Debug, Clone)]
pub struct Jet {
    pub id: u32,
    patrol: Patrol,
    destroyed: bool,
    rockets_left: u32,
}

impl Jet {
    pub fn new(id: u32, start: Vec2, target_x: f32, engine: Engine, rockets: u32) -> Self {
        Self {
            id,
            patrol: Patrol::new(start, target_x, engine, JET_SPEED_MULTIPLIER),
            destroyed: false,
            rockets_left: rockets,
        }
    }

    pub fn course(&self) -> &Course {
        self.patrol.course()
    }

    pub fn rockets_left(&self) -> u32 {
        self.rockets_left
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// 0 flying left, 180 flying right
    pub fn angle(&self) -> i32 {
        if self.patrol.dx() < 0.0 { 0 } else { 180 }
    }

    pub fn advance(&mut self, director: &mut Director) -> bool {
        if self.destroyed {
            self.explode(director);
            return false;
        }

        if !self.patrol.fly() {
            return false;
        }

        if self.rockets_left > 0 && director.roll(director.tuning().jet_fire_chance) {
            let origin = self.course().position + Vec2::new(JET_W / 3.0, JET_H / 2.0);
            let rocket = director.generate_enemy_rocket(Some(origin));
            director.queue_movable(rocket.into());
            self.rockets_left -= 1;
        }
        true
    }

    pub fn explode(&mut self, director: &mut Director) {
        self.patrol.wreck(director, MovableKind::Jet);
    }

    /// One hit is always lethal, but removal waits for the next `advance`
    pub fn get_hit(&mut self, _explosion: &Explosion) -> bool {
        self.destroyed = true;
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Tuning;
    use crate::sim::movable::Movable;
    use crate::sim::ordnance::EngineTier;

    fn engine(speed: f32, rate: f32) -> Engine {
        let mut e = Engine::new(EngineTier::Small, 0.0, 0.0);
        e.speed = speed;
        e.speed_rate = rate;
        e
    }

    fn quiet_director() -> Director {
        Director::with_buildings(Tuning::quiet(), Vec::new())
    }

    #[test]
    fn test_patrol_direction() {
        let right = Patrol::new(Vec2::new(1.0, 50.0), 798.0, engine(3.0, 0.0), 1.0);
        assert_eq!(right.dx(), 3.0);
        let left = Patrol::new(Vec2::new(798.0, 50.0), 2.0, engine(3.0, 0.0), 1.0);
        assert_eq!(left.dx(), -3.0);
        let jet = Patrol::new(Vec2::new(1.0, 50.0), 798.0, engine(3.0, 0.0), JET_SPEED_MULTIPLIER);
        assert_eq!(jet.dx(), 4.5);
    }

    #[test]
    fn test_patrol_accelerates_toward_target() {
        let mut left = Patrol::new(Vec2::new(798.0, 50.0), 2.0, engine(3.0, 50.0), 1.0);
        left.fly();
        assert_eq!(left.dx(), -3.5);
        assert_eq!(left.course().position, Vec2::new(794.5, 50.0));
    }

    #[test]
    fn test_patrol_clamps_leftward_overshoot() {
        let mut left = Patrol::new(Vec2::new(10.0, 50.0), 2.0, engine(5.0, 0.0), 1.0);
        assert!(left.fly());
        assert_eq!(left.course().position.x, 5.0);
        assert!(left.fly());
        assert_eq!(left.course().position.x, 2.0);
        assert!(!left.fly());
    }

    #[test]
    fn test_ufo_patrol_ends_without_blast() {
        let mut director = quiet_director();
        let mut ufo = Ufo::new(1, Vec2::new(1.0, 40.0), 30.0, 2, engine(10.0, 0.0));
        let mut ticks = 0;
        while ufo.advance(&mut director) {
            ticks += 1;
            assert!(ticks < 20);
        }
        assert!(director.pending_explosions().is_empty());
        assert_eq!(director.ledger().score(), 0);
    }

    #[test]
    fn test_ufo_absorbs_each_blast_once() {
        let mut ufo = Ufo::new(1, Vec2::new(1.0, 40.0), 798.0, 2, engine(1.0, 0.0));
        let blast = Explosion::new(5, Vec2::new(1.0, 40.0), 50, 1, STANDARD_BLAST_TTL);
        assert!(!ufo.get_hit(&blast));
        assert!(!ufo.get_hit(&blast));
        assert_eq!(ufo.cur_hp(), 1);
        assert!(!ufo.is_destroyed());

        let other = Explosion::new(6, Vec2::new(1.0, 40.0), 50, 1, STANDARD_BLAST_TTL);
        assert!(!ufo.get_hit(&other));
        assert!(ufo.is_destroyed());
    }

    #[test]
    fn test_downed_ufo_wrecks_on_next_advance() {
        let mut director = quiet_director();
        let mut ufo = Ufo::new(1, Vec2::new(100.0, 100.0), 798.0, 1, engine(1.0, 0.0));
        let blast = Explosion::new(5, Vec2::new(100.0, 100.0), 50, 1, STANDARD_BLAST_TTL);
        ufo.get_hit(&blast);

        assert!(!ufo.advance(&mut director));
        assert_eq!(director.ledger().score(), 1);
        let wreck = &director.pending_explosions()[0];
        assert_eq!(wreck.center(), Vec2::new(135.0, 120.0));
        assert_eq!(wreck.max_radius(), AIRCRAFT_BLAST_RADIUS);
    }

    #[test]
    fn test_jet_dies_to_one_hit_but_reports_survival() {
        let mut director = quiet_director();
        let mut jet = Jet::new(1, Vec2::new(100.0, 100.0), 798.0, engine(1.0, 0.0), 2);
        let blast = Explosion::new(5, Vec2::new(100.0, 100.0), 50, 1, STANDARD_BLAST_TTL);

        assert!(!jet.get_hit(&blast));
        assert!(jet.is_destroyed());
        assert!(!jet.advance(&mut director));
        assert_eq!(director.ledger().score(), 1);
        assert_eq!(director.pending_explosions().len(), 1);
    }

    #[test]
    fn test_jet_angle() {
        let right = Jet::new(1, Vec2::new(1.0, 10.0), 798.0, engine(1.0, 0.0), 2);
        assert_eq!(right.angle(), 180);
        let left = Jet::new(1, Vec2::new(798.0, 10.0), 2.0, engine(1.0, 0.0), 2);
        assert_eq!(left.angle(), 0);
    }

    #[test]
    fn test_jet_launches_exactly_its_stock() {
        let tuning = Tuning {
            jet_fire_chance: 1.0,
            ..Tuning::quiet()
        };
        let mut director = Director::with_buildings(tuning, Vec::new());
        let mut jet = Jet::new(1, Vec2::new(1.0, 50.0), 798.0, engine(1.0, 0.0), 3);

        for _ in 0..50 {
            assert!(jet.advance(&mut director));
        }
        assert_eq!(jet.rockets_left(), 0);

        let rockets: Vec<_> = director
            .pending_movables()
            .iter()
            .filter_map(|m| match m {
                Movable::Rocket(r) => Some(r),
                _ => None,
            })
            .collect();
        assert_eq!(rockets.len(), 3);
        assert!(rockets.iter().all(|r| !r.is_friendly()));
    }
}
