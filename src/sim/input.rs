//! Per-tick input snapshot
//!
//! The simulation never polls devices. An outer collaborator decodes whatever
//! it reads into a `Keys` bit set plus a quit flag once per tick.

use glam::IVec2;
use serde::{Deserialize, Serialize};

/// Bit set of keys held down during a tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Keys {
    pub bits: u16,
}

impl Keys {
    // Movement
    pub const UP: u16 = 1 << 0;
    pub const DOWN: u16 = 1 << 1;
    pub const LEFT: u16 = 1 << 2;
    pub const RIGHT: u16 = 1 << 3;

    // Abilities
    pub const FIRE: u16 = 1 << 4;
    /// Held together with FIRE to request a spread shot
    pub const MODIFIER: u16 = 1 << 5;
    pub const SHIELD: u16 = 1 << 6;
    pub const GRAVITY: u16 = 1 << 7;

    pub const fn none() -> Self {
        Self { bits: 0 }
    }

    pub const fn from_bits(bits: u16) -> Self {
        Self { bits }
    }

    #[inline]
    pub const fn is_pressed(&self, key: u16) -> bool {
        self.bits & key != 0
    }

    #[inline]
    pub fn set(&mut self, key: u16, pressed: bool) {
        if pressed {
            self.bits |= key;
        } else {
            self.bits &= !key;
        }
    }

    /// Keys held now that were not held in `previous`
    #[inline]
    pub const fn newly_pressed(&self, previous: Keys) -> Keys {
        Keys {
            bits: self.bits & !previous.bits,
        }
    }

    /// Sum of unit deltas for every held direction key (screen y grows down)
    pub fn movement(&self) -> IVec2 {
        let mut delta = IVec2::ZERO;
        if self.is_pressed(Self::UP) {
            delta.y -= 1;
        }
        if self.is_pressed(Self::DOWN) {
            delta.y += 1;
        }
        if self.is_pressed(Self::LEFT) {
            delta.x -= 1;
        }
        if self.is_pressed(Self::RIGHT) {
            delta.x += 1;
        }
        delta
    }
}

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub keys: Keys,
    /// Stop the simulation before this tick mutates anything
    pub quit: bool,
}

impl TickInput {
    pub const fn with_keys(bits: u16) -> Self {
        Self {
            keys: Keys::from_bits(bits),
            quit: false,
        }
    }

    pub const fn quit() -> Self {
        Self {
            keys: Keys::none(),
            quit: true,
        }
    }
}
