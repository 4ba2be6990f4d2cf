//! Headless engine for the Smart Scout simulation.
//!
//! Plays a number of seasons with a scripted strategy and prints a JSON
//! summary to stdout. Logs go to stderr.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `scout-config.yaml` (or the path given as
//!    the first argument), falling back to defaults when the file is
//!    missing
//! 2. Initialize structured logging (tracing)
//! 3. Create the session and the configured strategy
//! 4. Play every season, restarting the session in between
//! 5. Print the summary

mod error;

use std::io::Write;
use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use scout_core::{LoggingConfig, ScoutConfig, SeasonResult, Session, play_season};
use scout_types::SessionId;

use crate::error::EngineError;

/// Default configuration file, relative to the working directory.
const DEFAULT_CONFIG_PATH: &str = "scout-config.yaml";

/// JSON document printed at the end of a run.
#[derive(Debug, Serialize)]
struct RunSummary {
    /// Session that played every season.
    session_id: SessionId,
    /// Strategy name.
    strategy: String,
    /// Seed of the session RNG.
    seed: u64,
    /// Per-season results, in order.
    seasons: Vec<SeasonResult>,
    /// Best score across the run.
    best_score: Option<Decimal>,
    /// Mean score across the run.
    mean_score: Option<Decimal>,
}

/// Application entry point for the engine.
///
/// # Errors
///
/// Returns an error if configuration, a season, or output fails.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config_path = std::env::args_os()
        .nth(1)
        .map_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from);
    let (config, from_file) = load_config(&config_path)?;

    init_logging(&config.logging);
    info!("scout-engine starting");
    if from_file {
        info!(path = %config_path.display(), "Configuration loaded");
    } else {
        info!(path = %config_path.display(), "Config file not found, using defaults");
    }

    let summary = run(&config)?;

    let mut stdout = std::io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, &summary).map_err(EngineError::from)?;
    writeln!(stdout)?;
    Ok(())
}

/// Load configuration, or defaults when `path` does not exist.
///
/// Returns whether the file was read.
fn load_config(path: &Path) -> Result<(ScoutConfig, bool), EngineError> {
    if path.exists() {
        Ok((ScoutConfig::from_file(path)?, true))
    } else {
        Ok((ScoutConfig::default(), false))
    }
}

/// Install the tracing subscriber. `RUST_LOG` wins over the configured level.
fn init_logging(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr);
    if logging.json {
        builder.json().init();
    } else {
        builder.init();
    }
}

/// Play every configured season.
fn run(config: &ScoutConfig) -> Result<RunSummary, EngineError> {
    let engine = config.engine;
    let mut session = Session::new(config)?;
    let mut strategy = engine.strategy.build();
    info!(
        session_id = %session.id(),
        strategy = strategy.name(),
        seasons = engine.sessions,
        seed = config.session.seed,
        "Session created"
    );

    let mut seasons = Vec::new();
    for index in 0..engine.sessions {
        if index > 0 {
            session.restart()?;
        }
        let result = play_season(&mut session, strategy.as_mut(), engine.step_secs)?;
        seasons.push(result);
    }

    let mean_score = mean(seasons.iter().map(|s| s.score));
    Ok(RunSummary {
        session_id: session.id(),
        strategy: strategy.name().to_owned(),
        seed: config.session.seed,
        seasons,
        best_score: session.scores().best(),
        mean_score,
    })
}

/// Arithmetic mean, rounded to cents. `None` for an empty input.
fn mean(scores: impl Iterator<Item = Decimal>) -> Option<Decimal> {
    let (sum, count) = scores.fold((Decimal::ZERO, 0_u32), |(sum, n), s| {
        (sum.saturating_add(s), n.saturating_add(1))
    });
    sum.checked_div(Decimal::from(count)).map(|m| m.round_dp(2))
}
