//! Musou Shooter - a fixed-rate 2D arcade shooter simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, ability gauges)
//! - `tuning`: Data-driven ability and spawn balance
//! - `settings`: Runtime settings for the headless runner
//! - `platform`: Frame limiting, input sources, startup asset checks

pub mod error;
pub mod platform;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use error::{SettingsError, StartupError};
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    use glam::Vec2;

    /// Reference simulation cadence (ticks per second)
    pub const TICK_RATE_HZ: u32 = 50;

    /// Playfield dimensions (origin top-left, y grows downward)
    pub const PLAYFIELD_WIDTH: f32 = 1100.0;
    pub const PLAYFIELD_HEIGHT: f32 = 650.0;

    /// Player defaults
    pub const PLAYER_START: Vec2 = Vec2::new(550.0, 600.0);
    pub const PLAYER_SIZE: Vec2 = Vec2::new(80.0, 80.0);
    pub const PLAYER_SPEED: f32 = 10.0;

    /// Enemy defaults
    pub const ENEMY_SIZE: Vec2 = Vec2::new(64.0, 64.0);
    pub const ENEMY_DESCENT_SPEED: f32 = 6.0;
    pub const ENEMY_SPAWN_INTERVAL: u64 = 25;
    pub const ENEMY_STOP_MIN: i32 = 50;
    pub const ENEMY_STOP_MAX: i32 = (PLAYFIELD_HEIGHT as i32) / 2;
    pub const ENEMY_DROP_MIN: u64 = 50;
    pub const ENEMY_DROP_MAX: u64 = 300;
    pub const ENEMY_VARIANTS: u8 = 3;

    /// Bomb defaults
    pub const BOMB_SPEED: f32 = 6.0;
    pub const BOMB_RADIUS_MIN: u32 = 10;
    pub const BOMB_RADIUS_MAX: u32 = 50;
    pub const BOMB_COLORS: u8 = 6;

    /// Beam defaults
    pub const BEAM_SPEED: f32 = 15.0;
    /// Ticks a beam survives outside the playfield
    pub const BEAM_GRACE_TICKS: u32 = 15;
    /// Unrotated beam sprite (length along travel, thickness across)
    pub const BEAM_SIZE: Vec2 = Vec2::new(60.0, 16.0);

    /// Spread shot fan
    pub const SPREAD_ARC_DEGREES: f32 = 100.0;
    pub const SPREAD_FAN_COUNT: usize = 3;

    /// Shield and gravity field lifetimes
    pub const SHIELD_LIFE: u32 = 400;
    pub const SHIELD_SCALE: f32 = 1.8;
    pub const GRAVITY_LIFE: u32 = 400;

    /// Explosion defaults
    pub const EXPLOSION_SIZE: Vec2 = Vec2::new(60.0, 60.0);
    pub const EXPLOSION_LIFE_LARGE: i32 = 100;
    pub const EXPLOSION_LIFE_SMALL: i32 = 50;

    /// Score awards
    pub const SCORE_ENEMY: u64 = 10;
    pub const SCORE_BOMB: u64 = 1;
    /// Score needed before the shield can ram enemies
    pub const SHIELD_RAM_SCORE: u64 = 1000;
}

/// Facing direction (screen coordinates) to a counter-clockwise angle in degrees
#[inline]
pub fn direction_to_degrees(dir: Vec2) -> f32 {
    (-dir.y).atan2(dir.x).to_degrees()
}

/// Counter-clockwise angle in degrees to a unit vector in screen coordinates
#[inline]
pub fn unit_from_degrees(degrees: f32) -> Vec2 {
    let rad = degrees.to_radians();
    Vec2::new(rad.cos(), -rad.sin())
}
