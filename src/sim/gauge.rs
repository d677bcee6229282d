//! Ability gauges and the score currency
//!
//! One gauge state machine drives every ability. Score is both the reward
//! for collisions and the price of the defensive abilities, so the gauge
//! spends it directly on activation.

use serde::{Deserialize, Serialize};

use crate::tuning::{GaugeConfig, SpendMode, gauge_config};

/// The four special abilities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Ability {
    RapidBeam,
    SpreadBeam,
    Shield,
    Gravity,
}

impl Ability {
    pub const ALL: [Ability; 4] = [
        Ability::RapidBeam,
        Ability::SpreadBeam,
        Ability::Shield,
        Ability::Gravity,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Non-negative score, also spent as currency
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreCounter {
    value: u64,
}

impl ScoreCounter {
    pub fn new(value: u64) -> Self {
        Self { value }
    }

    #[inline]
    pub fn value(&self) -> u64 {
        self.value
    }

    pub fn award(&mut self, points: u64) {
        self.value = self.value.saturating_add(points);
    }

    /// Deduct `cost` if affordable; leaves the score untouched otherwise
    pub fn try_spend(&mut self, cost: u64) -> bool {
        match self.value.checked_sub(cost) {
            Some(rest) => {
                self.value = rest;
                true
            }
            None => false,
        }
    }
}

/// Cooldown and charge bookkeeping for one ability
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityGauge {
    pub ability: Ability,
    config: GaugeConfig,
    charge: u32,
    cooldown: u32,
    /// Shots fired in the current burst window (burst mode only)
    burst_fired: u32,
    spending: bool,
}

impl AbilityGauge {
    pub fn new(ability: Ability) -> Self {
        Self::with_config(ability, gauge_config(ability))
    }

    pub fn with_config(ability: Ability, config: GaugeConfig) -> Self {
        Self {
            ability,
            config,
            charge: config.initial_charge,
            cooldown: 0,
            burst_fired: 0,
            spending: false,
        }
    }

    pub fn config(&self) -> &GaugeConfig {
        &self.config
    }

    #[inline]
    pub fn charge(&self) -> u32 {
        self.charge
    }

    #[inline]
    pub fn max_charge(&self) -> u32 {
        self.config.max_charge
    }

    #[inline]
    pub fn cooldown(&self) -> u32 {
        self.cooldown
    }

    #[inline]
    pub fn is_spending(&self) -> bool {
        self.spending
    }

    /// Whether an activation would succeed with `score` and no live instance
    pub fn is_ready(&self, score: u64) -> bool {
        self.precondition(score, false)
    }

    /// Advance cooldown, refill and drain by one tick
    pub fn tick(&mut self, score: u64) {
        if self.charge == 0 && self.cooldown > 0 {
            self.cooldown -= 1;
        }
        if self.cooldown == 0 && self.burst_fired == 0 && score >= self.config.unlock_score {
            self.charge = self.config.max_charge;
        }
        if self.spending {
            self.charge = self.charge.saturating_sub(1);
            if self.charge == 0 {
                self.spending = false;
            }
        }
    }

    /// Try to activate the ability.
    ///
    /// `occupied` reports whether an instance of the ability's entity is
    /// already live. Returns false without touching the gauge or the score
    /// when any precondition fails.
    pub fn try_activate(&mut self, score: &mut ScoreCounter, occupied: bool) -> bool {
        if !self.precondition(score.value(), occupied) || !score.try_spend(self.config.cost) {
            return false;
        }

        match self.config.mode {
            SpendMode::Burst { shots } => {
                self.charge = self.charge.saturating_sub(1);
                self.burst_fired += 1;
                if self.burst_fired >= shots {
                    self.burst_fired = 0;
                    self.cooldown = self.config.cooldown;
                }
            }
            SpendMode::Discrete => {
                self.charge = self.charge.saturating_sub(1);
                self.cooldown = self.config.cooldown;
            }
            SpendMode::Drain => {
                self.spending = true;
                self.cooldown = self.config.cooldown;
            }
        }
        log::debug!(
            "{:?} activated (charge {}, cooldown {})",
            self.ability,
            self.charge,
            self.cooldown
        );
        true
    }

    fn precondition(&self, score: u64, occupied: bool) -> bool {
        if self.cooldown > 0 {
            return false;
        }
        match self.config.mode {
            SpendMode::Burst { shots } => self.burst_fired < shots && self.charge > 0,
            SpendMode::Discrete => self.charge > 0,
            SpendMode::Drain => {
                !occupied && score >= self.config.cost.max(self.config.unlock_score)
            }
        }
    }
}
