//! Headless season loop.
//!
//! [`play_season`] drives one season of a [`Session`] with a
//! [`ScoutStrategy`]: while the clock runs the strategy scouts, every
//! decision point is answered by the strategy, and the loop ends at
//! harvest.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use scout_types::{Decision, EconomicResult, SessionId};

use crate::clock::ClockEvent;
use crate::session::{Session, SessionError};
use crate::strategy::{ScoutMove, ScoutStrategy};

/// Errors that can occur while playing a season.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// A session operation failed.
    #[error("session error: {source}")]
    Session {
        /// The underlying session error.
        #[from]
        source: SessionError,
    },

    /// The clock did not reach harvest within the step budget.
    #[error("season did not finish within {steps} steps")]
    Stalled {
        /// Steps taken before giving up.
        steps: u64,
    },
}

/// One resolved decision point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DecisionRecord {
    /// Seconds since planting.
    pub elapsed: u32,
    /// The strategy's choice.
    pub decision: Decision,
    /// Settled economics.
    pub result: EconomicResult,
}

/// Outcome of one season.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonResult {
    /// Session id.
    pub session_id: SessionId,
    /// Season number.
    pub season: u32,
    /// Strategy name.
    pub strategy: String,
    /// Cells scouted before harvest.
    pub scouted: usize,
    /// Drone missions bought.
    pub drone_missions: usize,
    /// Every decision, in order.
    pub decisions: Vec<DecisionRecord>,
    /// Whole-field mean stand count at harvest, rounded.
    pub average_stand_count: f64,
    /// Harvest yield, bushels per acre.
    pub average_yield: f64,
    /// Final score.
    pub score: Decimal,
    /// Whether the score beat every earlier season.
    pub new_record: bool,
}

/// Play the current season of `session` to harvest.
///
/// The clock advances `step_secs` seconds after each scouting move. A
/// strategy that asks for an illegal move or an unaffordable drone gets an
/// error; the season is not silently skipped.
///
/// # Errors
///
/// Returns [`RunnerError::Session`] if a session operation fails and
/// [`RunnerError::Stalled`] if harvest is never reached.
pub fn play_season(
    session: &mut Session,
    strategy: &mut dyn ScoutStrategy,
    step_secs: u32,
) -> Result<SeasonResult, RunnerError> {
    let step_secs = step_secs.max(1);
    let max_steps = u64::from(session.clock().season_length())
        .saturating_mul(4)
        .saturating_add(16);
    let best_before = session.scores().best();
    let mut decisions = Vec::new();
    let mut drone_missions: usize = 0;

    let mut steps: u64 = 0;
    loop {
        if steps >= max_steps {
            return Err(RunnerError::Stalled { steps });
        }
        steps = steps.saturating_add(1);

        if session.clock().is_decision_pending() {
            let prompt = session.decision_prompt();
            let decision = strategy.decide(&prompt);
            let elapsed = session.clock().elapsed();
            let report = session.decide(decision)?;
            debug!(elapsed, decision = decision.label(), %report, "Strategy decided");
            decisions.push(DecisionRecord {
                elapsed,
                decision,
                result: report.result,
            });
            continue;
        }

        let next = strategy.next_move(&session.view());
        match next {
            ScoutMove::Walk(pos) => {
                let scouted = session.move_to(pos)?;
                debug!(row = pos.row, col = pos.col, scouted, "Scout moved");
            }
            ScoutMove::LaunchDrone => {
                let swept = session.launch_drone()?;
                drone_missions = drone_missions.saturating_add(1);
                debug!(cells = swept.len(), "Drone mission flown");
            }
            ScoutMove::Wait => {}
        }

        if session.advance(step_secs)? == ClockEvent::SeasonOver {
            break;
        }
    }

    let harvest = session
        .harvest_summary()
        .copied()
        .ok_or(RunnerError::Stalled { steps })?;
    let new_record = best_before.is_none_or(|best| harvest.score > best);
    let result = SeasonResult {
        session_id: session.id(),
        season: session.season(),
        strategy: strategy.name().to_owned(),
        scouted: session.observation().open_count(),
        drone_missions,
        decisions,
        average_stand_count: harvest.average_stand_count,
        average_yield: harvest.average_yield,
        score: harvest.score,
        new_record,
    };
    log_season_end(&result);
    Ok(result)
}

/// Log a one-line summary of a finished season.
pub fn log_season_end(result: &SeasonResult) {
    info!(
        session_id = %result.session_id,
        season = result.season,
        strategy = %result.strategy,
        decisions = result.decisions.len(),
        drone_missions = result.drone_missions,
        average_yield = result.average_yield,
        score = %result.score,
        new_record = result.new_record,
        "Season finished"
    );
}
