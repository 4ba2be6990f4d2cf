//! Search for the most profitable partial-replant threshold.
//!
//! Every cell value is a candidate threshold, tried in ascending order with
//! duplicates kept as separate trials. A candidate replants the cells
//! strictly below it. Candidates that would replant fewer than the minimum
//! area are skipped. The winner is the first candidate whose net benefit is
//! positive and strictly greater than every earlier one, so ties resolve to
//! the lowest threshold.

use serde::{Deserialize, Serialize};
use tracing::debug;

use scout_types::Grid;

use crate::yield_model::YieldModel;

/// A priced partial-replant candidate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdPlan {
    /// Cells strictly below this value are replanted.
    pub threshold: f64,
    /// Number of cells below the threshold.
    pub acres_below: usize,
    /// Mean stand count of those cells.
    pub avg_before: f64,
    /// Replant cost for those cells.
    pub cost: u64,
    /// Projected benefit minus cost.
    pub net_benefit: f64,
}

/// Threshold search over a full grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThresholdOptimizer {
    model: YieldModel,
    min_replant_acres: usize,
}

impl Default for ThresholdOptimizer {
    fn default() -> Self {
        Self::new(YieldModel::REFERENCE, 10)
    }
}

impl ThresholdOptimizer {
    /// Create an optimizer over `model` that ignores candidates replanting
    /// fewer than `min_replant_acres` cells.
    pub const fn new(model: YieldModel, min_replant_acres: usize) -> Self {
        Self {
            model,
            min_replant_acres,
        }
    }

    /// The yield model used for pricing.
    pub const fn model(&self) -> &YieldModel {
        &self.model
    }

    /// Minimum replant area a candidate must cover.
    pub const fn min_replant_acres(&self) -> usize {
        self.min_replant_acres
    }

    /// Price one candidate threshold against the grid.
    ///
    /// Returns `None` when the candidate covers fewer than the minimum area.
    pub fn evaluate(
        &self,
        grid: &Grid,
        threshold: f64,
        target_after_replant: f64,
        price_per_bushel: f64,
    ) -> Option<ThresholdPlan> {
        let (sum, acres_below) = grid
            .values()
            .iter()
            .filter(|&&v| v < threshold)
            .fold((0.0_f64, 0_usize), |(sum, n), &v| (sum + v, n.saturating_add(1)));
        if acres_below < self.min_replant_acres || acres_below == 0 {
            return None;
        }

        #[allow(clippy::cast_precision_loss)]
        let avg_before = sum / acres_below as f64;
        let cost = self.model.replant_cost(acres_below);
        #[allow(clippy::cast_precision_loss)]
        let net_benefit = self.model.economic_benefit(
            acres_below,
            avg_before,
            target_after_replant,
            price_per_bushel,
        ) - cost as f64;

        Some(ThresholdPlan {
            threshold,
            acres_below,
            avg_before,
            cost,
            net_benefit,
        })
    }

    /// The most profitable candidate, or `None` if no candidate has a
    /// positive net benefit.
    pub fn best_plan(
        &self,
        grid: &Grid,
        target_after_replant: f64,
        price_per_bushel: f64,
    ) -> Option<ThresholdPlan> {
        let mut candidates = grid.values().to_vec();
        candidates.sort_by(f64::total_cmp);

        let mut best: Option<ThresholdPlan> = None;
        let mut evaluated = 0_usize;
        for &threshold in &candidates {
            let Some(plan) =
                self.evaluate(grid, threshold, target_after_replant, price_per_bushel)
            else {
                continue;
            };
            evaluated = evaluated.saturating_add(1);
            let best_benefit = best.map_or(0.0, |b| b.net_benefit);
            if plan.net_benefit > best_benefit {
                best = Some(plan);
            }
        }

        debug!(
            candidates = candidates.len(),
            evaluated,
            threshold = best.map(|b| b.threshold),
            "Threshold search finished"
        );
        best
    }

    /// The threshold of [`best_plan`](Self::best_plan), if any.
    pub fn calculate_smart_threshold(
        &self,
        grid: &Grid,
        target_after_replant: f64,
        price_per_bushel: f64,
    ) -> Option<f64> {
        self.best_plan(grid, target_after_replant, price_per_bushel)
            .map(|plan| plan.threshold)
    }
}

/// Best threshold on the reference model with a 10-acre minimum.
pub fn calculate_smart_threshold(
    grid: &Grid,
    target_after_replant: f64,
    price_per_bushel: f64,
) -> Option<f64> {
    ThresholdOptimizer::default().calculate_smart_threshold(
        grid,
        target_after_replant,
        price_per_bushel,
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    /// A 7x10 field with `low` cells of `low_value` and the rest at `high_value`.
    fn split_field(low: usize, low_value: f64, high_value: f64) -> Grid {
        let mut grid = Grid::filled(7, 10, high_value).unwrap();
        for v in grid.values_mut().iter_mut().take(low) {
            *v = low_value;
        }
        grid
    }

    #[test]
    fn uniform_small_grid_has_no_threshold() {
        let grid = Grid::filled(3, 3, 30.0).unwrap();
        assert_eq!(calculate_smart_threshold(&grid, 28.5, 4.0), None);
    }

    #[test]
    fn uniform_large_grid_has_no_threshold() {
        // Nothing is strictly below any candidate.
        let grid = Grid::filled(7, 10, 12.0).unwrap();
        assert_eq!(calculate_smart_threshold(&grid, 28.5, 4.0), None);
    }

    #[test]
    fn fewer_than_ten_low_cells_is_skipped() {
        let grid = split_field(9, 5.0, 30.0);
        assert_eq!(calculate_smart_threshold(&grid, 28.5, 4.0), None);
    }

    #[test]
    fn ten_very_low_cells_are_worth_replanting() {
        // 10 acres at 5 -> 28.5: 175 * 23.5 / 31 * 4 * 10 = 5306.45.. minus 1250.
        let grid = split_field(10, 5.0, 30.0);
        let plan = ThresholdOptimizer::default()
            .best_plan(&grid, 28.5, 4.0)
            .unwrap();
        assert_eq!(plan.threshold, 30.0);
        assert_eq!(plan.acres_below, 10);
        assert_eq!(plan.avg_before, 5.0);
        assert_eq!(plan.cost, 1_250);
        assert!((plan.net_benefit - (175.0 * 23.5 / 31.0 * 40.0 - 1_250.0)).abs() < 1e-9);
    }

    #[test]
    fn replanting_near_target_is_not_profitable() {
        // 28 -> 28.5 gains ~11.3 $/acre against a $125/acre cost.
        let grid = split_field(20, 28.0, 30.0);
        assert_eq!(calculate_smart_threshold(&grid, 28.5, 4.0), None);
    }

    #[test]
    fn ties_keep_the_lowest_threshold() {
        // Values 5 (x10), 31 (x10), 32 (x50). Threshold 31 replants the ten
        // 5s; 32 also replants the ten 31s at a loss. The ten duplicate 31
        // candidates tie exactly and the first is kept.
        let mut grid = Grid::filled(7, 10, 32.0).unwrap();
        for (i, v) in grid.values_mut().iter_mut().enumerate().take(20) {
            *v = if i < 10 { 5.0 } else { 31.0 };
        }
        let plan = ThresholdOptimizer::default()
            .best_plan(&grid, 28.5, 4.0)
            .unwrap();
        assert_eq!(plan.threshold, 31.0);
        assert_eq!(plan.acres_below, 10);
    }

    #[test]
    fn higher_minimum_area_filters_candidates() {
        let grid = split_field(10, 5.0, 30.0);
        let strict = ThresholdOptimizer::new(YieldModel::REFERENCE, 11);
        assert_eq!(strict.calculate_smart_threshold(&grid, 28.5, 4.0), None);
    }

    #[test]
    fn evaluate_reports_below_minimum_as_none() {
        let grid = split_field(10, 5.0, 30.0);
        let optimizer = ThresholdOptimizer::default();
        assert!(optimizer.evaluate(&grid, 5.0, 28.5, 4.0).is_none());
        assert!(optimizer.evaluate(&grid, 30.0, 28.5, 4.0).is_some());
    }
}
