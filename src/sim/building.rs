//! Defended buildings and their shields

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use crate::consts::{BUILDING_H, BUILDING_W};

/// Energy shield owned by a single building
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shield {
    max_hp: i32,
    cur_hp: i32,
}

impl Shield {
    pub fn new(max_hp: i32) -> Self {
        Self {
            max_hp,
            cur_hp: max_hp,
        }
    }

    pub fn max_hp(&self) -> i32 {
        self.max_hp
    }

    pub fn cur_hp(&self) -> i32 {
        self.cur_hp
    }

    pub fn is_up(&self) -> bool {
        self.cur_hp > 0
    }

    /// Absorb damage; HP bottoms out at zero
    pub fn hit(&mut self, damage: i32) {
        self.cur_hp = (self.cur_hp - damage).max(0);
    }
}

/// A building on the ground line
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Building {
    pub id: u32,
    max_hp: i32,
    cur_hp: i32,
    shield: Option<Shield>,
    /// Top-left corner
    position: Vec2,
}

impl Building {
    pub fn new(id: u32, max_hp: i32, position: Vec2) -> Self {
        Self {
            id,
            max_hp,
            cur_hp: max_hp,
            shield: None,
            position,
        }
    }

    pub fn max_hp(&self) -> i32 {
        self.max_hp
    }

    pub fn cur_hp(&self) -> i32 {
        self.cur_hp
    }

    pub fn shield(&self) -> Option<&Shield> {
        self.shield.as_ref()
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn footprint(&self) -> Rect {
        Rect::new(self.position.x, self.position.y, BUILDING_W, BUILDING_H)
    }

    /// Still standing
    pub fn is_ok(&self) -> bool {
        self.cur_hp > 0
    }

    /// Take damage. An active shield soaks all of it; otherwise HP drops and
    /// may go below zero.
    pub fn hit(&mut self, damage: i32) {
        match self.shield.as_mut() {
            Some(shield) if shield.is_up() => shield.hit(damage),
            _ => self.cur_hp -= damage,
        }
    }

    /// Heal one point, never past max
    pub fn renovate(&mut self) {
        if self.cur_hp < self.max_hp {
            self.cur_hp += 1;
        }
    }

    /// Raise max HP by one without healing
    pub fn modernize(&mut self) {
        self.max_hp += 1;
    }

    /// Install a shield, discarding any previous one
    pub fn activate_shield(&mut self, shield: Shield) {
        self.shield = Some(shield);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn building(max_hp: i32) -> Building {
        Building::new(1, max_hp, Vec2::ZERO)
    }

    #[test]
    fn test_three_hits_destroy() {
        let mut b = building(3);
        b.hit(1);
        b.hit(1);
        assert!(b.is_ok());
        b.hit(1);
        assert!(!b.is_ok());
        assert_eq!(b.cur_hp(), 0);
    }

    #[test]
    fn test_overkill_goes_negative() {
        let mut b = building(3);
        b.hit(5);
        assert_eq!(b.cur_hp(), -2);
        assert!(!b.is_ok());
    }

    #[test]
    fn test_shield_absorbs_damage() {
        let mut b = building(4);
        b.activate_shield(Shield::new(3));
        b.hit(2);
        assert_eq!(b.cur_hp(), 4);
        assert_eq!(b.shield().unwrap().cur_hp(), 1);
    }

    #[test]
    fn test_shield_clamps_at_zero_then_building_takes_hits() {
        let mut b = building(4);
        b.activate_shield(Shield::new(5));
        b.hit(8);
        assert_eq!(b.shield().unwrap().cur_hp(), 0);
        assert_eq!(b.cur_hp(), 4);

        b.hit(1);
        assert_eq!(b.cur_hp(), 3);
    }

    #[test]
    fn test_shield_replacement_does_not_stack() {
        let mut b = building(4);
        b.activate_shield(Shield::new(3));
        b.hit(1);
        b.activate_shield(Shield::new(2));
        let shield = b.shield().unwrap();
        assert_eq!(shield.max_hp(), 2);
        assert_eq!(shield.cur_hp(), 2);
    }

    #[test]
    fn test_renovate_heals_one_up_to_max() {
        let mut b = building(3);
        b.hit(2);
        b.renovate();
        assert_eq!(b.cur_hp(), 2);
        b.renovate();
        b.renovate();
        assert_eq!(b.cur_hp(), 3);
    }

    #[test]
    fn test_modernize_raises_max_only() {
        let mut b = building(3);
        b.modernize();
        assert_eq!(b.max_hp(), 4);
        assert_eq!(b.cur_hp(), 3);
        b.renovate();
        assert_eq!(b.cur_hp(), 4);
    }

    proptest! {
        #[test]
        fn prop_unshielded_hit_subtracts(hp in 1i32..20, dmg in 0i32..30) {
            let mut b = building(hp);
            b.hit(dmg);
            prop_assert_eq!(b.cur_hp(), hp - dmg);
        }

        #[test]
        fn prop_shield_never_negative(
            shield_hp in 0i32..20,
            hits in proptest::collection::vec(0i32..10, 0..8),
        ) {
            let mut shield = Shield::new(shield_hp);
            for dmg in hits {
                shield.hit(dmg);
                prop_assert!(shield.cur_hp() >= 0);
            }
        }
    }
}
