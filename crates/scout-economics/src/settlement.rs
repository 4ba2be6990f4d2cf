//! Economic result of a resolved decision, and its player-facing summary.

use core::fmt;

use serde::{Deserialize, Serialize};

use scout_types::EconomicResult;

use crate::replant::ReplantOutcome;
use crate::yield_model::YieldModel;

/// Settle a replant against whole-field averages.
///
/// `avg_before` and `avg_after` are the mean stand counts of the entire
/// field around the replant. The benefit is projected over all
/// `field_acres`, not only the replanted ones, then the cost is deducted.
pub fn settle(
    avg_before: f64,
    avg_after: f64,
    field_acres: usize,
    outcome: &ReplantOutcome,
    price_per_bushel: f64,
    model: &YieldModel,
) -> EconomicResult {
    let benefit = model.economic_benefit(field_acres, avg_before, avg_after, price_per_bushel);
    #[allow(clippy::cast_precision_loss)]
    let net_benefit = benefit - outcome.cost as f64;
    EconomicResult {
        acres_affected: outcome.acres_affected,
        cost: outcome.cost,
        yield_before: model.yield_from_stand_count(avg_before),
        yield_after: model.yield_from_stand_count(avg_after),
        net_benefit,
    }
}

/// Human-readable outcome of a replant, shown after each decision.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReplantReport {
    /// The settled result.
    pub result: EconomicResult,
    /// Price the projection was made at.
    pub price_per_bushel: f64,
}

impl ReplantReport {
    /// Wrap a settled result.
    pub const fn new(result: EconomicResult, price_per_bushel: f64) -> Self {
        Self {
            result,
            price_per_bushel,
        }
    }
}

impl fmt::Display for ReplantReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = &self.result;
        if r.acres_affected == 0 {
            return write!(f, "No acres replanted. Yield stays at {:.1} bu/acre.", r.yield_before);
        }

        writeln!(
            f,
            "Replanted {} acres for ${}.",
            r.acres_affected, r.cost
        )?;

        let change = r.yield_after - r.yield_before;
        if change > 0.0 {
            writeln!(f, "Yield increased by {change:.1} bu/acre to {:.1}.", r.yield_after)?;
        } else if change < 0.0 {
            writeln!(
                f,
                "Yield decreased by {:.1} bu/acre to {:.1}.",
                change.abs(),
                r.yield_after
            )?;
        } else {
            writeln!(f, "Yield unchanged at {:.1} bu/acre.", r.yield_after)?;
        }

        let net = r.net_benefit;
        if net > 0.0 {
            write!(f, "Net gain of ${net:.2} at ${:.2}/bu.", self.price_per_bushel)
        } else if net < 0.0 {
            write!(f, "Net loss of ${:.2} at ${:.2}/bu.", net.abs(), self.price_per_bushel)
        } else {
            write!(f, "Break-even at ${:.2}/bu.", self.price_per_bushel)
        }
    }
}
