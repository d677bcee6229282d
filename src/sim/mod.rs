//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (spawn order within each collection)
//! - No rendering, audio or input-device dependencies

pub mod bounds;
pub mod collision;
pub mod entities;
pub mod gauge;
pub mod input;
pub mod state;
pub mod tick;

pub use bounds::Rect;
pub use collision::{CollisionRule, Resolution, RuleHits, resolve};
pub use entities::{
    Advance, AdvanceCtx, Beam, BeamStyle, Bomb, Enemy, EnemyState, EntityIds, EntityKind,
    Explosion, Fate, GravityField, Player, Shield, SpreadBeam,
};
pub use gauge::{Ability, AbilityGauge, ScoreCounter};
pub use input::{Keys, TickInput};
pub use state::{Frame, GamePhase, GameState, GaugeView, Sprite};
pub use tick::{TickOutcome, tick};
