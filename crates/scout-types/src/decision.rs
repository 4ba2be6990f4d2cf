//! Replant decisions and their outcomes.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::grid::CellPos;

/// Stand count below which a tile is rated [`TileRating::Poor`].
pub const POOR_BELOW: f64 = 24.0;

/// Highest stand count still rated [`TileRating::Average`].
pub const AVERAGE_UP_TO: f64 = 29.0;

/// The player's choice at a replant decision point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Decision {
    /// Leave the field as it is.
    DoNotReplant,
    /// Replant every acre.
    FullReplant,
    /// Replant only acres whose stand count is strictly below `threshold`.
    ThresholdReplant {
        /// Stand-count cutoff (exclusive).
        threshold: f64,
    },
}

impl Decision {
    /// Short machine-friendly label used in logs.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::DoNotReplant => "do_not_replant",
            Self::FullReplant => "full_replant",
            Self::ThresholdReplant { .. } => "threshold_replant",
        }
    }
}

/// Economic summary of one resolved decision.
///
/// Yields are bushels per acre derived from the whole-field average stand
/// count before and after replanting. `net_benefit` is the projected
/// revenue change across the field minus `cost`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct EconomicResult {
    /// Number of acres (cells) that were replanted.
    pub acres_affected: usize,
    /// Replanting cost in whole dollars.
    pub cost: u64,
    /// Projected yield before the decision, bushels per acre.
    pub yield_before: f64,
    /// Projected yield after the decision, bushels per acre.
    pub yield_after: f64,
    /// Projected revenue change minus cost, in dollars.
    pub net_benefit: f64,
}

/// A single cell overwritten by a replant.
///
/// The client animates these independently; the core only reports them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct CellChange {
    /// The replanted cell.
    pub pos: CellPos,
    /// Stand count before replanting.
    pub before: f64,
    /// Freshly drawn stand count.
    pub after: f64,
}

/// Coarse quality bucket used to colour a scouted tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum TileRating {
    /// Below 24k plants per acre.
    Poor,
    /// 24k to 29k plants per acre inclusive.
    Average,
    /// Above 29k plants per acre.
    Good,
}

impl TileRating {
    /// Rate a stand count.
    pub fn from_stand_count(stand_count: f64) -> Self {
        if stand_count < POOR_BELOW {
            Self::Poor
        } else if stand_count <= AVERAGE_UP_TO {
            Self::Average
        } else {
            Self::Good
        }
    }
}
