//! Engines, warheads and the player's armory
//!
//! Engines are cloned for every unit that flies on one, because enemy units
//! tweak their copy. Warheads never change after construction and are shared.

use std::rc::Rc;

use serde::{Deserialize, Serialize};

/// Engine tiers, in research order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineTier {
    Small,
    Medium,
    Large,
}

impl EngineTier {
    pub const LADDER: [EngineTier; 3] = [EngineTier::Small, EngineTier::Medium, EngineTier::Large];

    pub fn as_str(&self) -> &'static str {
        match self {
            EngineTier::Small => "Small",
            EngineTier::Medium => "Medium",
            EngineTier::Large => "Large",
        }
    }

    /// Base (speed, speed rate) before bonuses
    fn base(&self) -> (f32, f32) {
        match self {
            EngineTier::Small => (10.0, 0.0),
            EngineTier::Medium => (15.0, 0.0),
            EngineTier::Large => (20.0, 10.0),
        }
    }

    /// Research cost, `None` for the starting tier
    pub fn cost(&self) -> Option<i64> {
        match self {
            EngineTier::Small => None,
            EngineTier::Medium => Some(50),
            EngineTier::Large => Some(80),
        }
    }
}

/// A rocket or aircraft engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Engine {
    pub tier: EngineTier,
    pub name: String,
    /// Initial speed (pixels/tick)
    pub speed: f32,
    /// Acceleration, in hundredths of a pixel per tick²
    pub speed_rate: f32,
}

impl Engine {
    pub fn new(tier: EngineTier, extra_speed: f32, extra_rate: f32) -> Self {
        let (speed, rate) = tier.base();
        Self {
            tier,
            name: tier.as_str().to_string(),
            speed: speed + extra_speed,
            speed_rate: rate + extra_rate,
        }
    }
}

/// Warhead tiers, in research order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WarheadTier {
    Small,
    Medium,
    Large,
    Nuclear,
}

impl WarheadTier {
    pub const LADDER: [WarheadTier; 4] = [
        WarheadTier::Small,
        WarheadTier::Medium,
        WarheadTier::Large,
        WarheadTier::Nuclear,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WarheadTier::Small => "Small",
            WarheadTier::Medium => "Medium",
            WarheadTier::Large => "Large",
            WarheadTier::Nuclear => "Nuclear",
        }
    }

    /// Base (damage, blast radius) before bonuses
    fn base(&self) -> (i32, u32) {
        match self {
            WarheadTier::Small => (1, 30),
            WarheadTier::Medium => (1, 40),
            WarheadTier::Large => (1, 50),
            // Wider than any arena: always an instant, unclamped blast
            WarheadTier::Nuclear => (5, 10_000),
        }
    }

    pub fn cost(&self) -> Option<i64> {
        match self {
            WarheadTier::Small => None,
            WarheadTier::Medium => Some(25),
            WarheadTier::Large => Some(75),
            WarheadTier::Nuclear => Some(150),
        }
    }
}

/// Payload carried by a rocket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Warhead {
    pub tier: WarheadTier,
    pub name: String,
    pub damage: i32,
    pub radius: u32,
}

impl Warhead {
    pub fn new(tier: WarheadTier, extra_damage: i32, extra_radius: u32) -> Self {
        let (damage, radius) = tier.base();
        Self {
            tier,
            name: tier.as_str().to_string(),
            damage: damage + extra_damage,
            radius: radius + extra_radius,
        }
    }

    pub fn is_nuclear(&self) -> bool {
        self.tier == WarheadTier::Nuclear
    }
}

/// Researched catalog plus the player's current loadout
#[derive(Debug, Clone)]
pub struct Armory {
    engines: Vec<Engine>,
    warheads: Vec<Rc<Warhead>>,
    selected_engine: usize,
    selected_warhead: usize,
}

impl Default for Armory {
    fn default() -> Self {
        Self::new()
    }
}

impl Armory {
    /// Starting catalog: the smallest engine and warhead, both selected
    pub fn new() -> Self {
        Self {
            engines: vec![Engine::new(EngineTier::Small, 0.0, 0.0)],
            warheads: vec![Rc::new(Warhead::new(WarheadTier::Small, 0, 0))],
            selected_engine: 0,
            selected_warhead: 0,
        }
    }

    pub fn engines(&self) -> &[Engine] {
        &self.engines
    }

    pub fn warheads(&self) -> &[Rc<Warhead>] {
        &self.warheads
    }

    pub fn selected_engine(&self) -> &Engine {
        &self.engines[self.selected_engine]
    }

    pub fn selected_warhead(&self) -> &Rc<Warhead> {
        &self.warheads[self.selected_warhead]
    }

    /// Select an available engine; returns false for an unknown index
    pub fn select_engine(&mut self, index: usize) -> bool {
        if index < self.engines.len() {
            self.selected_engine = index;
            true
        } else {
            false
        }
    }

    pub fn select_warhead(&mut self, index: usize) -> bool {
        if index < self.warheads.len() {
            self.selected_warhead = index;
            true
        } else {
            false
        }
    }

    /// Next engine tier on the research ladder
    pub fn next_engine_tier(&self) -> Option<EngineTier> {
        EngineTier::LADDER.get(self.engines.len()).copied()
    }

    pub fn next_warhead_tier(&self) -> Option<WarheadTier> {
        WarheadTier::LADDER.get(self.warheads.len()).copied()
    }

    pub(crate) fn add_engine(&mut self, engine: Engine) {
        self.engines.push(engine);
    }

    pub(crate) fn add_warhead(&mut self, warhead: Warhead) {
        self.warheads.push(Rc::new(warhead));
    }

    pub fn has_nuclear(&self) -> bool {
        self.warheads.iter().any(|w| w.is_nuclear())
    }
}
