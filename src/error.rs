//! Startup error types
//!
//! Gameplay itself never fails: rejected ability activations are plain
//! `false` returns and game over is a tick outcome. Only loading settings
//! and checking required assets can stop the simulation from starting.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading or validating runner settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid settings: {0}")]
    Invalid(String),
}

/// Fatal errors that prevent the simulation from starting.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Settings(#[from] SettingsError),

    #[error("required asset not found: {}", .0.display())]
    MissingAsset(PathBuf),
}
