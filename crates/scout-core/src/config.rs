//! Configuration loading and typed config structures for Smart Scout.
//!
//! The canonical configuration lives in `scout-config.yaml` at the project
//! root. Every section and field is optional; anything left out takes the
//! reference game value, so an empty document is a valid configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use scout_economics::EconomicsParams;
use scout_field::FieldParams;

use crate::strategy::StrategyKind;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level configuration.
///
/// Mirrors the structure of `scout-config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoutConfig {
    /// Field generation parameters.
    #[serde(default)]
    pub field: FieldParams,

    /// Yield, price, cost, and optimizer parameters.
    #[serde(default)]
    pub economics: EconomicsParams,

    /// Grid size, seed, bank, drone, and clock settings.
    #[serde(default)]
    pub session: SessionConfig,

    /// Headless runner settings.
    #[serde(default)]
    pub engine: EngineConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ScoutConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yml::from_str(yaml)?)
    }
}

/// Per-session settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Field rows.
    #[serde(default = "default_rows")]
    pub rows: usize,

    /// Field columns.
    #[serde(default = "default_cols")]
    pub cols: usize,

    /// Seed for the session RNG.
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Money in the bank at the start of a season, in whole dollars.
    #[serde(default = "default_starting_bank")]
    pub starting_bank: u64,

    /// Price of one drone mission, in whole dollars.
    #[serde(default = "default_drone_mission_cost")]
    pub drone_mission_cost: u64,

    /// Season length in seconds.
    #[serde(default = "default_season_length_secs")]
    pub season_length_secs: u32,

    /// Seconds between replant decisions.
    #[serde(default = "default_decision_interval_secs")]
    pub decision_interval_secs: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            rows: default_rows(),
            cols: default_cols(),
            seed: default_seed(),
            starting_bank: default_starting_bank(),
            drone_mission_cost: default_drone_mission_cost(),
            season_length_secs: default_season_length_secs(),
            decision_interval_secs: default_decision_interval_secs(),
        }
    }
}

/// Headless runner settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Number of seasons to play. Seasons after the first restart the same
    /// session, so the RNG is seeded once from `session.seed`.
    #[serde(default = "default_sessions")]
    pub sessions: u32,

    /// Scripted player used by the runner.
    #[serde(default)]
    pub strategy: StrategyKind,

    /// Seconds the clock advances between scouting moves.
    #[serde(default = "default_step_secs")]
    pub step_secs: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            sessions: default_sessions(),
            strategy: StrategyKind::default(),
            step_secs: default_step_secs(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter used when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON log lines instead of human-readable ones.
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

// ---------------------------------------------------------------------------
// Default value functions (serde default requires named functions)
// ---------------------------------------------------------------------------

const fn default_rows() -> usize {
    7
}

const fn default_cols() -> usize {
    10
}

const fn default_seed() -> u64 {
    42
}

const fn default_starting_bank() -> u64 {
    100_000
}

const fn default_drone_mission_cost() -> u64 {
    160
}

const fn default_season_length_secs() -> u32 {
    120
}

const fn default_decision_interval_secs() -> u32 {
    30
}

const fn default_sessions() -> u32 {
    5
}

const fn default_step_secs() -> u32 {
    1
}

fn default_log_level() -> String {
    "info".to_owned()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn default_config_matches_reference_game() {
        let config = ScoutConfig::default();
        assert_eq!(config.session.rows, 7);
        assert_eq!(config.session.cols, 10);
        assert_eq!(config.session.starting_bank, 100_000);
        assert_eq!(config.session.drone_mission_cost, 160);
        assert_eq!(config.session.season_length_secs, 120);
        assert_eq!(config.session.decision_interval_secs, 30);
        assert_eq!(config.economics.price_per_bushel, 4.0);
        assert_eq!(config.field.base_mean, 31.0);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn empty_yaml_uses_defaults() {
        assert_eq!(ScoutConfig::parse("").unwrap(), ScoutConfig::default());
        assert_eq!(ScoutConfig::parse("{}").unwrap(), ScoutConfig::default());
    }

    #[test]
    fn parse_partial_yaml() {
        let yaml = r"
field:
  anomaly_probability: 0.05
economics:
  price_per_bushel: 5.0
  fallback_threshold: 24
session:
  rows: 5
  seed: 7
engine:
  sessions: 3
  strategy: drone
logging:
  level: debug
";
        let config = ScoutConfig::parse(yaml).unwrap();
        assert_eq!(config.field.anomaly_probability, 0.05);
        assert_eq!(config.field.patch_count, 2);
        assert_eq!(config.economics.price_per_bushel, 5.0);
        assert_eq!(config.economics.fallback_threshold, 24.0);
        assert_eq!(config.session.rows, 5);
        assert_eq!(config.session.cols, 10);
        assert_eq!(config.session.seed, 7);
        assert_eq!(config.engine.sessions, 3);
        assert_eq!(config.engine.strategy, StrategyKind::Drone);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn invalid_yaml_is_an_error() {
        let err = ScoutConfig::parse("session: [not, a, map]").unwrap_err();
        assert!(matches!(err, ConfigError::Yaml { .. }));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = ScoutConfig::from_file(Path::new("/nonexistent/scout-config.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn shipped_config_file_parses() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../scout-config.yaml");
        let config = ScoutConfig::from_file(&path).unwrap();
        assert_eq!(config, ScoutConfig::default());
    }
}
