//! Error types for the headless engine binary.

/// Top-level error for the engine binary.
///
/// Each variant wraps a subsystem error so `main` can propagate with `?`.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: scout_core::ConfigError,
    },

    /// The session could not be created or restarted.
    #[error("session error: {source}")]
    Session {
        /// The underlying session error.
        #[from]
        source: scout_core::SessionError,
    },

    /// A season failed to play out.
    #[error("runner error: {source}")]
    Runner {
        /// The underlying runner error.
        #[from]
        source: scout_core::RunnerError,
    },

    /// The summary could not be serialized.
    #[error("output error: {source}")]
    Output {
        /// The underlying JSON error.
        #[from]
        source: serde_json::Error,
    },
}
