//! Runner settings
//!
//! Loaded from an optional JSON file. Missing fields fall back to defaults,
//! so `{}` is a valid settings file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::TICK_RATE_HZ;
use crate::error::SettingsError;

/// Headless runner settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Simulation ticks per second
    pub tick_rate_hz: u32,
    /// Run seed; a random one is drawn when absent
    pub seed: Option<u64>,
    /// Stop after this many ticks even if the player survives
    pub max_ticks: Option<u64>,
    /// Directory that must contain the sprite assets
    pub asset_dir: Option<PathBuf>,
    /// env_logger filter used when RUST_LOG is unset
    pub log_filter: String,
    /// Sleep between ticks to hold the tick rate (false runs flat out)
    pub realtime: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tick_rate_hz: TICK_RATE_HZ,
            seed: None,
            max_ticks: None,
            asset_dir: None,
            log_filter: "info".to_string(),
            realtime: true,
        }
    }
}

impl Settings {
    /// Parse and validate settings from a JSON string
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.tick_rate_hz == 0 {
            return Err(SettingsError::Invalid(
                "tick_rate_hz must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
