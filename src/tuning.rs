//! Data-driven ability balance
//!
//! Every ability shares the same gauge state machine; they differ only in
//! the numbers below.

use serde::{Deserialize, Serialize};

use crate::sim::Ability;

/// How an activation spends the gauge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpendMode {
    /// One charge per activation, cooldown starts after `shots` activations
    Burst { shots: u32 },
    /// One charge per activation, cooldown starts immediately
    Discrete,
    /// Charge drains one per tick after activation
    Drain,
}

/// Static configuration for one ability gauge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GaugeConfig {
    pub initial_charge: u32,
    pub max_charge: u32,
    /// Ticks before the gauge refills once emptied
    pub cooldown: u32,
    /// Minimum score before the gauge can refill
    pub unlock_score: u64,
    /// Score deducted per activation
    pub cost: u64,
    pub mode: SpendMode,
}

pub const RAPID_BEAM: GaugeConfig = GaugeConfig {
    initial_charge: 5,
    max_charge: 5,
    cooldown: 100,
    unlock_score: 0,
    cost: 0,
    mode: SpendMode::Burst { shots: 5 },
};

pub const SPREAD_BEAM: GaugeConfig = GaugeConfig {
    initial_charge: 1,
    max_charge: 1,
    cooldown: 200,
    unlock_score: 0,
    cost: 0,
    mode: SpendMode::Discrete,
};

pub const SHIELD: GaugeConfig = GaugeConfig {
    initial_charge: 0,
    max_charge: 400,
    cooldown: 800,
    unlock_score: 50,
    cost: 50,
    mode: SpendMode::Drain,
};

pub const GRAVITY: GaugeConfig = GaugeConfig {
    initial_charge: 0,
    max_charge: 400,
    cooldown: 1200,
    unlock_score: 200,
    cost: 200,
    mode: SpendMode::Drain,
};

/// Look up the gauge configuration for an ability
pub const fn gauge_config(ability: Ability) -> GaugeConfig {
    match ability {
        Ability::RapidBeam => RAPID_BEAM,
        Ability::SpreadBeam => SPREAD_BEAM,
        Ability::Shield => SHIELD,
        Ability::Gravity => GRAVITY,
    }
}
