//! Harvest settlement and the best-score board.
//!
//! At harvest the whole field is sold at its rounded average yield. The
//! season's score is the bank balance plus that sale. [`ScoreBoard`] keeps
//! the best score across restarts of the same process.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;

use scout_economics::YieldModel;
use scout_types::Grid;

/// Errors raised while settling the harvest.
#[derive(Debug, thiserror::Error)]
pub enum ScoreError {
    /// The field has no cells to harvest.
    #[error("cannot harvest an empty field")]
    EmptyField,

    /// A value cannot be represented as money.
    #[error("{value} is not representable as money")]
    NotRepresentable {
        /// The offending value.
        value: f64,
    },

    /// Money arithmetic overflowed.
    #[error("harvest sale overflow")]
    Overflow,
}

/// Settled harvest of one season.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HarvestSummary {
    /// Whole-field mean stand count, rounded.
    pub average_stand_count: f64,
    /// Yield at that stand count, rounded, in bushels per acre.
    pub average_yield: f64,
    /// Acres sold.
    pub acres: usize,
    /// Price per bushel.
    pub price_per_bushel: Decimal,
    /// Sale proceeds.
    pub sale: Decimal,
    /// Bank balance before the sale.
    pub bank_before_sale: Decimal,
    /// Final score: bank plus sale.
    pub score: Decimal,
}

/// Sell the field at its rounded average yield.
///
/// # Errors
///
/// Returns [`ScoreError`] if the field is empty or the sale cannot be
/// represented as [`Decimal`].
pub fn harvest(
    grid: &Grid,
    model: &YieldModel,
    price_per_bushel: f64,
    bank_balance: Decimal,
) -> Result<HarvestSummary, ScoreError> {
    let average_stand_count = grid.mean().ok_or(ScoreError::EmptyField)?.round();
    let average_yield = model.yield_from_stand_count(average_stand_count).round();

    let price = to_money(price_per_bushel)?;
    let acres = grid.len();
    let sale = to_money(average_yield)?
        .checked_mul(Decimal::from(acres))
        .and_then(|v| v.checked_mul(price))
        .ok_or(ScoreError::Overflow)?;
    let score = bank_balance.checked_add(sale).ok_or(ScoreError::Overflow)?;

    Ok(HarvestSummary {
        average_stand_count,
        average_yield,
        acres,
        price_per_bushel: price,
        sale,
        bank_before_sale: bank_balance,
        score,
    })
}

fn to_money(value: f64) -> Result<Decimal, ScoreError> {
    Decimal::try_from(value).map_err(|_| ScoreError::NotRepresentable { value })
}

/// Best score seen by this process. Never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBoard {
    best: Option<Decimal>,
    seasons: u32,
}

impl ScoreBoard {
    /// An empty board.
    pub const fn new() -> Self {
        Self {
            best: None,
            seasons: 0,
        }
    }

    /// Best score so far.
    pub const fn best(&self) -> Option<Decimal> {
        self.best
    }

    /// Seasons recorded.
    pub const fn seasons(&self) -> u32 {
        self.seasons
    }

    /// Record a season's score. Returns `true` if it is a new record.
    pub fn record(&mut self, score: Decimal) -> bool {
        self.seasons = self.seasons.saturating_add(1);
        let is_record = self.best.is_none_or(|best| score > best);
        if is_record {
            self.best = Some(score);
            info!(%score, seasons = self.seasons, "New best score");
        }
        is_record
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn harvest_at_reference_stand() {
        let grid = Grid::filled(7, 10, 31.0).unwrap();
        let summary =
            harvest(&grid, &YieldModel::REFERENCE, 4.0, Decimal::from(100_000)).unwrap();
        assert_eq!(summary.average_stand_count, 31.0);
        assert_eq!(summary.average_yield, 175.0);
        assert_eq!(summary.sale, Decimal::from(49_000));
        assert_eq!(summary.score, Decimal::from(149_000));
    }

    #[test]
    fn harvest_rounds_stand_then_yield() {
        // Mean 27.6 rounds to 28; 175 * 28 / 31 = 158.06 rounds to 158.
        let mut grid = Grid::filled(1, 5, 27.0).unwrap();
        for v in grid.values_mut().iter_mut().take(3) {
            *v = 28.0;
        }
        let summary = harvest(&grid, &YieldModel::REFERENCE, 4.0, Decimal::ZERO).unwrap();
        assert_eq!(summary.average_stand_count, 28.0);
        assert_eq!(summary.average_yield, 158.0);
        assert_eq!(summary.sale, Decimal::from(158 * 5 * 4));
    }

    #[test]
    fn overdrawn_bank_lowers_the_score() {
        let grid = Grid::filled(7, 10, 31.0).unwrap();
        let summary = harvest(&grid, &YieldModel::REFERENCE, 4.0, Decimal::from(-1_000)).unwrap();
        assert_eq!(summary.score, Decimal::from(48_000));
    }

    #[test]
    fn non_finite_price_is_rejected() {
        let grid = Grid::filled(2, 2, 31.0).unwrap();
        let err = harvest(&grid, &YieldModel::REFERENCE, f64::NAN, Decimal::ZERO).unwrap_err();
        assert!(matches!(err, ScoreError::NotRepresentable { .. }));
    }

    #[test]
    fn board_keeps_the_best() {
        let mut board = ScoreBoard::new();
        assert!(board.record(Decimal::from(140_000)));
        assert!(!board.record(Decimal::from(130_000)));
        assert!(!board.record(Decimal::from(140_000)));
        assert!(board.record(Decimal::from(150_000)));
        assert_eq!(board.best(), Some(Decimal::from(150_000)));
        assert_eq!(board.seasons(), 4);
    }
}
