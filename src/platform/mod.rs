//! Platform abstraction layer
//!
//! Everything the simulation deliberately knows nothing about:
//! - Time: holding the loop to a fixed tick rate
//! - Input: turning some device (or a script) into per-tick snapshots
//! - Assets: checking required files exist before starting

pub mod assets;
pub mod input;
pub mod time;

pub use assets::{REQUIRED_ASSETS, verify_assets};
pub use input::{InputSource, Replay, ScriptedPilot};
pub use time::FrameLimiter;
