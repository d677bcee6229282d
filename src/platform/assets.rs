//! Startup asset check
//!
//! Rendering lives outside this crate, but a run must not start if the
//! renderer's images are missing.

use std::path::Path;

use crate::error::StartupError;

/// Files a renderer needs under the asset directory
pub const REQUIRED_ASSETS: &[&str] = &[
    "background.jpg",
    "player.png",
    "player_shield.png",
    "player_hit.png",
    "enemy1.png",
    "enemy2.png",
    "enemy3.png",
    "beam.png",
    "wide_beam.png",
    "explosion.gif",
];

/// Fail with the first required asset that is not a regular file under `dir`
pub fn verify_assets(dir: &Path) -> Result<(), StartupError> {
    for name in REQUIRED_ASSETS {
        let path = dir.join(name);
        if !path.is_file() {
            return Err(StartupError::MissingAsset(path));
        }
    }
    log::info!("All {} assets present in {}", REQUIRED_ASSETS.len(), dir.display());
    Ok(())
}
