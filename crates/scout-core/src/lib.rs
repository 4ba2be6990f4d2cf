//! Session orchestration for the Smart Scout simulation.
//!
//! A [`Session`] owns one field for one season at a time and exposes the
//! discrete operations a client drives it with: walking the scout,
//! launching a drone, advancing the clock, and answering replant
//! decisions. Scripted players implement [`ScoutStrategy`] and are run to
//! harvest by [`play_season`].
//!
//! # Modules
//!
//! - [`bank`] -- [`Bank`]: append-only money ledger in [`Decimal`] dollars.
//! - [`clock`] -- [`SeasonClock`]: seconds to harvest and decision points.
//! - [`config`] -- Configuration loading from `scout-config.yaml`.
//! - [`events`] -- [`SessionEvent`] queue drained by the presentation layer.
//! - [`runner`] -- [`play_season`]: headless season loop.
//! - [`score`] -- Harvest settlement and the [`ScoreBoard`].
//! - [`session`] -- [`Session`], [`DecisionPrompt`], and [`SessionError`].
//! - [`strategy`] -- [`ScoutStrategy`] trait and built-in scripted players.
//! - [`walker`] -- [`ScoutWalker`]: where the scout may step next.
//!
//! [`Decimal`]: rust_decimal::Decimal

pub mod bank;
pub mod clock;
pub mod config;
pub mod events;
pub mod runner;
pub mod score;
pub mod session;
pub mod strategy;
pub mod walker;

pub use bank::{Bank, BankEntry, BankEntryKind, BankError};
pub use clock::{ClockError, ClockEvent, SeasonClock, SeasonStage};
pub use config::{ConfigError, EngineConfig, LoggingConfig, ScoutConfig, SessionConfig};
pub use events::{EventQueue, SessionEvent};
pub use runner::{DecisionRecord, RunnerError, SeasonResult, log_season_end, play_season};
pub use score::{HarvestSummary, ScoreBoard, ScoreError, harvest};
pub use session::{DecisionPrompt, Session, SessionError, SessionSnapshot, SessionView};
pub use strategy::{DroneStrategy, IdleStrategy, ScoutMove, ScoutStrategy, StrategyKind, SweepStrategy};
pub use walker::ScoutWalker;
