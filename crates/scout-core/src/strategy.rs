//! Scripted players for headless seasons.
//!
//! A [`ScoutStrategy`] is asked for its next scouting move whenever the
//! clock is running and for a [`Decision`] whenever a replant decision is
//! due. It could be a scripted bot, a replay, or a test stub; the session
//! does not care.

use serde::{Deserialize, Serialize};

use scout_types::{CellPos, Decision};

use crate::session::{DecisionPrompt, SessionView};

/// One scouting action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoutMove {
    /// Walk onto a cell.
    Walk(CellPos),
    /// Buy a drone mission.
    LaunchDrone,
    /// Do nothing this step.
    Wait,
}

/// A source of scouting moves and replant decisions.
pub trait ScoutStrategy {
    /// Short name used in logs and summaries.
    fn name(&self) -> &'static str;

    /// Pick the next scouting move.
    fn next_move(&mut self, view: &SessionView<'_>) -> ScoutMove;

    /// Answer a replant decision.
    fn decide(&mut self, prompt: &DecisionPrompt) -> Decision;
}

/// Built-in strategies selectable from configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    /// [`IdleStrategy`].
    Idle,
    /// [`SweepStrategy`].
    #[default]
    Sweep,
    /// [`DroneStrategy`].
    Drone,
}

impl StrategyKind {
    /// Build a fresh strategy of this kind.
    pub fn build(self) -> Box<dyn ScoutStrategy> {
        match self {
            Self::Idle => Box::new(IdleStrategy),
            Self::Sweep => Box::new(SweepStrategy::new()),
            Self::Drone => Box::new(DroneStrategy),
        }
    }
}

/// Takes the smart replant when the session offers it, otherwise leaves
/// the field alone.
fn smart_or_nothing(prompt: &DecisionPrompt) -> Decision {
    if prompt.smart_replant_available {
        Decision::ThresholdReplant {
            threshold: prompt.recommended_threshold,
        }
    } else {
        Decision::DoNotReplant
    }
}

/// Never scouts, never replants.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdleStrategy;

impl ScoutStrategy for IdleStrategy {
    fn name(&self) -> &'static str {
        "idle"
    }

    fn next_move(&mut self, _view: &SessionView<'_>) -> ScoutMove {
        ScoutMove::Wait
    }

    fn decide(&mut self, _prompt: &DecisionPrompt) -> Decision {
        Decision::DoNotReplant
    }
}

/// Walks the field on foot in a boustrophedon: left to right along the
/// bottom row, one row up, right to left, and so on.
#[derive(Debug, Clone, Default)]
pub struct SweepStrategy {
    path: Vec<CellPos>,
    cursor: usize,
}

impl SweepStrategy {
    /// A sweep that has not started yet.
    pub const fn new() -> Self {
        Self {
            path: Vec::new(),
            cursor: 0,
        }
    }

    /// The full walking path for a `rows x cols` field.
    pub fn path_for(rows: usize, cols: usize) -> Vec<CellPos> {
        let mut path = Vec::with_capacity(rows.saturating_mul(cols));
        for (i, row) in (0..rows).rev().enumerate() {
            if i % 2 == 0 {
                path.extend((0..cols).map(|col| CellPos::new(row, col)));
            } else {
                path.extend((0..cols).rev().map(|col| CellPos::new(row, col)));
            }
        }
        path
    }
}

impl ScoutStrategy for SweepStrategy {
    fn name(&self) -> &'static str {
        "sweep"
    }

    fn next_move(&mut self, view: &SessionView<'_>) -> ScoutMove {
        if view.position.is_none() {
            self.path = Self::path_for(view.rows, view.cols);
            self.cursor = 0;
        }
        match self.path.get(self.cursor) {
            Some(&pos) => {
                self.cursor = self.cursor.saturating_add(1);
                ScoutMove::Walk(pos)
            }
            None => ScoutMove::Wait,
        }
    }

    fn decide(&mut self, prompt: &DecisionPrompt) -> Decision {
        smart_or_nothing(prompt)
    }
}

/// Buys a drone mission whenever one is available and affordable, then
/// takes the smart replant.
#[derive(Debug, Clone, Copy, Default)]
pub struct DroneStrategy;

impl ScoutStrategy for DroneStrategy {
    fn name(&self) -> &'static str {
        "drone"
    }

    fn next_move(&mut self, view: &SessionView<'_>) -> ScoutMove {
        if view.drone_available && !view.fully_scouted && view.balance >= view.drone_cost {
            ScoutMove::LaunchDrone
        } else {
            ScoutMove::Wait
        }
    }

    fn decide(&mut self, prompt: &DecisionPrompt) -> Decision {
        smart_or_nothing(prompt)
    }
}
