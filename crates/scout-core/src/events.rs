//! Notifications queued by a session for the presentation layer.
//!
//! The session pushes events as state changes and the client drains them
//! in order. Timing and animation are entirely the client's concern.

use std::collections::VecDeque;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use scout_types::{CellChange, CellPos, Decision, EconomicResult, TileRating};

/// Something the presentation layer may want to show.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionEvent {
    /// A cell was scouted for the first time.
    CellOpened {
        /// The scouted cell.
        pos: CellPos,
        /// Its stand count.
        stand_count: f64,
        /// Tile colour bucket.
        rating: TileRating,
    },
    /// The rounded yield estimate changed.
    EstimatedYieldChanged {
        /// New estimate in bushels per acre, rounded.
        bushels_per_acre: f64,
    },
    /// Every cell has been scouted.
    FieldFullyScouted,
    /// The bank balance changed.
    BankChanged {
        /// New balance.
        balance: Decimal,
        /// Signed change.
        delta: Decimal,
    },
    /// The clock stopped on a replant decision.
    DecisionDue {
        /// Seconds since planting.
        elapsed: u32,
    },
    /// A replant overwrote a cell.
    CellReplanted(CellChange),
    /// A decision was applied and settled.
    DecisionResolved {
        /// The applied decision.
        decision: Decision,
        /// Its settled economics.
        result: EconomicResult,
    },
    /// The season ended and the harvest was sold.
    SeasonOver {
        /// Final score.
        score: Decimal,
        /// Whether the score beat every earlier season.
        new_record: bool,
    },
}

/// FIFO of pending events.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventQueue {
    pending: VecDeque<SessionEvent>,
}

impl EventQueue {
    /// An empty queue.
    pub const fn new() -> Self {
        Self {
            pending: VecDeque::new(),
        }
    }

    /// Append an event.
    pub fn push(&mut self, event: SessionEvent) {
        self.pending.push_back(event);
    }

    /// Number of undrained events.
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Whether nothing is pending.
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Take every pending event, oldest first.
    pub fn drain(&mut self) -> Vec<SessionEvent> {
        self.pending.drain(..).collect()
    }

    /// Drop every pending event.
    pub fn clear(&mut self) {
        self.pending.clear();
    }
}
