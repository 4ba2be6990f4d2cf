//! Season clock for a Smart Scout session.
//!
//! The clock counts whole seconds from planting to harvest. Every
//! `decision_interval` seconds the clock stops on a replant decision and
//! stays paused until the decision is resolved. Reaching the season length
//! ends the season; a due point that coincides with the end of the season
//! is not a decision.
//!
//! The stage shown on the timeline is derived from elapsed time, never
//! stored.

use serde::{Deserialize, Serialize};

/// Errors that can occur when building a clock.
#[derive(Debug, thiserror::Error)]
pub enum ClockError {
    /// Invalid clock configuration.
    #[error("invalid clock configuration: {reason}")]
    InvalidConfig {
        /// Explanation of what is wrong with the configuration.
        reason: String,
    },
}

/// Result of advancing the clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClockEvent {
    /// Time passed without reaching a decision or the end of the season.
    Running,
    /// The clock stopped on a replant decision.
    DecisionDue,
    /// The season is over.
    SeasonOver,
}

/// Timeline stage, spaced evenly across the season.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SeasonStage {
    /// Start of the season.
    Planting,
    /// First quarter passed.
    Replanting,
    /// Half way.
    WeedSpraying,
    /// Three quarters.
    FinalSpraying,
    /// Season over.
    Harvest,
}

impl SeasonStage {
    /// All stages in timeline order.
    pub const ALL: [Self; 5] = [
        Self::Planting,
        Self::Replanting,
        Self::WeedSpraying,
        Self::FinalSpraying,
        Self::Harvest,
    ];

    /// Display name for the timeline.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Planting => "Planting",
            Self::Replanting => "Replanting",
            Self::WeedSpraying => "Weed Spraying",
            Self::FinalSpraying => "Final Spraying",
            Self::Harvest => "Harvest",
        }
    }
}

/// Seconds-based season clock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonClock {
    /// Seconds since planting.
    elapsed: u32,
    /// Season length in seconds.
    season_length: u32,
    /// Seconds between decision points.
    decision_interval: u32,
    /// Whether the clock is stopped on an unresolved decision.
    decision_pending: bool,
}

impl SeasonClock {
    /// Create a clock at the start of a season.
    ///
    /// # Errors
    ///
    /// Returns [`ClockError::InvalidConfig`] if either duration is zero.
    pub fn new(season_length: u32, decision_interval: u32) -> Result<Self, ClockError> {
        if season_length == 0 {
            return Err(ClockError::InvalidConfig {
                reason: "season length must be at least 1 second".to_owned(),
            });
        }
        if decision_interval == 0 {
            return Err(ClockError::InvalidConfig {
                reason: "decision interval must be at least 1 second".to_owned(),
            });
        }
        Ok(Self {
            elapsed: 0,
            season_length,
            decision_interval,
            decision_pending: false,
        })
    }

    /// Seconds since planting.
    pub const fn elapsed(&self) -> u32 {
        self.elapsed
    }

    /// Seconds until harvest.
    pub const fn remaining(&self) -> u32 {
        self.season_length.saturating_sub(self.elapsed)
    }

    /// Season length in seconds.
    pub const fn season_length(&self) -> u32 {
        self.season_length
    }

    /// Whether the clock is stopped on a decision.
    pub const fn is_decision_pending(&self) -> bool {
        self.decision_pending
    }

    /// Whether the season has ended.
    pub const fn is_season_over(&self) -> bool {
        self.elapsed >= self.season_length
    }

    /// The next decision point after the current time, if one falls
    /// strictly before the end of the season.
    pub fn next_decision_at(&self) -> Option<u32> {
        let completed = self.elapsed.checked_div(self.decision_interval)?;
        let next = completed
            .checked_add(1)?
            .checked_mul(self.decision_interval)?;
        (next < self.season_length).then_some(next)
    }

    /// Seconds until the next decision, or until harvest if no decision
    /// remains.
    pub fn until_next_decision(&self) -> u32 {
        self.next_decision_at()
            .unwrap_or(self.season_length)
            .saturating_sub(self.elapsed)
    }

    /// Advance by up to `secs` seconds.
    ///
    /// Stops early on a decision point. While a decision is pending no time
    /// passes and [`ClockEvent::DecisionDue`] is returned again.
    pub fn advance(&mut self, secs: u32) -> ClockEvent {
        if self.is_season_over() {
            return ClockEvent::SeasonOver;
        }
        if self.decision_pending {
            return ClockEvent::DecisionDue;
        }

        let target = self.elapsed.saturating_add(secs);
        if let Some(due) = self.next_decision_at() {
            if target >= due {
                self.elapsed = due;
                self.decision_pending = true;
                return ClockEvent::DecisionDue;
            }
        }

        self.elapsed = target.min(self.season_length);
        if self.is_season_over() {
            ClockEvent::SeasonOver
        } else {
            ClockEvent::Running
        }
    }

    /// Resume after a decision. A no-op when none is pending.
    pub const fn resolve_decision(&mut self) {
        self.decision_pending = false;
    }

    /// Timeline stage for the current time.
    pub fn stage(&self) -> SeasonStage {
        let last = SeasonStage::ALL.len().saturating_sub(1);
        let index = u64::from(self.elapsed)
            .saturating_mul(u64::try_from(last).unwrap_or(u64::MAX))
            .checked_div(u64::from(self.season_length))
            .and_then(|i| usize::try_from(i).ok())
            .unwrap_or(last)
            .min(last);
        SeasonStage::ALL
            .get(index)
            .copied()
            .unwrap_or(SeasonStage::Harvest)
    }

    /// Back to the start of the season.
    pub const fn reset(&mut self) {
        self.elapsed = 0;
        self.decision_pending = false;
    }
}
