//! Musou Shooter headless runner
//!
//! Loads settings, checks assets, then drives the simulation at a fixed
//! rate with the scripted pilot until the run ends. Prints a JSON summary.

use std::path::{Path, PathBuf};

use serde::Serialize;

use musou_shooter::Settings;
use musou_shooter::StartupError;
use musou_shooter::platform::{FrameLimiter, InputSource, ScriptedPilot, verify_assets};
use musou_shooter::sim::{GameState, TickOutcome, tick};

/// Why a run stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
enum EndReason {
    GameOver,
    Quit,
    TickLimit,
}

/// Final report written to stdout
#[derive(Debug, Serialize)]
struct RunSummary {
    seed: u64,
    score: u64,
    ticks: u64,
    reason: EndReason,
}

fn load_settings(path: Option<&Path>) -> Result<Settings, StartupError> {
    match path {
        Some(path) => Ok(Settings::load(path)?),
        None => Ok(Settings::default()),
    }
}

fn main() -> Result<(), StartupError> {
    let settings_path = std::env::args_os().nth(1).map(PathBuf::from);
    let settings = load_settings(settings_path.as_deref())?;
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(settings.log_filter.as_str()),
    )
    .init();
    match &settings_path {
        Some(path) => log::info!("Settings loaded from {}", path.display()),
        None => log::info!("No settings file given, using defaults"),
    }

    if let Some(dir) = &settings.asset_dir {
        verify_assets(dir)?;
    }

    let seed = settings.seed.unwrap_or_else(rand::random);
    log::info!(
        "Musou Shooter starting: seed {}, {} Hz",
        seed,
        settings.tick_rate_hz
    );

    let mut state = GameState::new(seed);
    let mut pilot = ScriptedPilot::new();
    let mut limiter = FrameLimiter::new(settings.tick_rate_hz, settings.realtime);

    let reason = loop {
        if settings.max_ticks.is_some_and(|max| state.tick >= max) {
            log::info!("Tick limit reached");
            break EndReason::TickLimit;
        }

        let input = pilot.poll(&state);
        match tick(&mut state, &input) {
            TickOutcome::Running => {}
            TickOutcome::GameOver { .. } => break EndReason::GameOver,
            TickOutcome::Quit => break EndReason::Quit,
        }
        limiter.wait();
    };

    let summary = RunSummary {
        seed,
        score: state.score.value(),
        ticks: state.tick,
        reason,
    };
    match serde_json::to_string_pretty(&summary) {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("Failed to serialize run summary: {e}"),
    }
    Ok(())
}
