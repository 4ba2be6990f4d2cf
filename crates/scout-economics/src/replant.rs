//! Executes a replant decision on the field.
//!
//! [`apply_decision`] is a single synchronous transformation: it overwrites
//! the affected cells with fresh single-cell draws and reports every change
//! so the presentation layer can animate them at its own pace. The
//! observation mask is read, never written.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::info;

use scout_field::FieldGenerator;
use scout_types::{CellChange, CellPos, Decision, Grid, ObservationGrid};

use crate::error::EconomicsError;
use crate::yield_model::YieldModel;

/// What a replant did to the field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplantOutcome {
    /// The decision that was applied.
    pub decision: Decision,
    /// Number of cells overwritten.
    pub acres_affected: usize,
    /// Replant cost in whole dollars.
    pub cost: u64,
    /// Every overwritten cell, in row-major order.
    pub changes: Vec<CellChange>,
}

/// Apply `decision` to `grid`.
///
/// - `DoNotReplant` leaves the grid alone at no cost.
/// - `FullReplant` redraws every cell.
/// - `ThresholdReplant` redraws only cells strictly below the threshold and
///   is rejected unless every cell has been scouted.
///
/// On error the grid is untouched.
pub fn apply_decision(
    grid: &mut Grid,
    observation: &ObservationGrid,
    decision: Decision,
    generator: &FieldGenerator,
    model: &YieldModel,
    rng: &mut impl Rng,
) -> Result<ReplantOutcome, EconomicsError> {
    if !observation.matches(grid) {
        return Err(EconomicsError::DimensionMismatch {
            rows: grid.rows(),
            cols: grid.cols(),
            obs_rows: observation.rows(),
            obs_cols: observation.cols(),
        });
    }

    let selected: Vec<CellPos> = match decision {
        Decision::DoNotReplant => Vec::new(),
        Decision::FullReplant => grid.iter().map(|(pos, _)| pos).collect(),
        Decision::ThresholdReplant { threshold } => {
            if !threshold.is_finite() {
                return Err(EconomicsError::InvalidThreshold(threshold));
            }
            if !observation.is_fully_open() {
                return Err(EconomicsError::FieldNotFullyScouted {
                    closed: observation.closed_count(),
                });
            }
            grid.iter()
                .filter(|&(_, v)| v < threshold)
                .map(|(pos, _)| pos)
                .collect()
        }
    };

    let mut changes = Vec::with_capacity(selected.len());
    for pos in selected {
        let after = generator.generate_single_value(rng);
        if let Some(before) = grid.set(pos, after) {
            changes.push(CellChange { pos, before, after });
        }
    }

    let acres_affected = changes.len();
    let cost = model.replant_cost(acres_affected);
    info!(
        decision = decision.label(),
        acres_affected,
        cost,
        "Replant decision applied"
    );

    Ok(ReplantOutcome {
        decision,
        acres_affected,
        cost,
        changes,
    })
}
