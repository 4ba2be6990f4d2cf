//! Stand count to yield to dollars.
//!
//! Yield is linear in stand count, anchored at a reference point: the
//! reference stand (31k plants per acre) yields the reference 175 bushels
//! per acre. Replanting costs a flat amount per acre.

use serde::{Deserialize, Serialize};

/// Linear yield model and replant pricing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YieldModel {
    /// Stand count (thousands per acre) that yields `reference_yield`.
    pub reference_stand_count: f64,
    /// Bushels per acre at the reference stand count.
    pub reference_yield: f64,
    /// Replanting cost per acre, in whole dollars.
    pub replant_cost_per_acre: u64,
}

impl YieldModel {
    /// The reference corn model: 31k plants -> 175 bu/acre, $125 per acre replant.
    pub const REFERENCE: Self = Self {
        reference_stand_count: 31.0,
        reference_yield: 175.0,
        replant_cost_per_acre: 125,
    };

    /// Bushels per acre for a stand count.
    pub fn yield_from_stand_count(&self, stand_count: f64) -> f64 {
        self.reference_yield * (stand_count / self.reference_stand_count)
    }

    /// Revenue change from moving `acres` from `stand_before` to
    /// `stand_after`, at `price_per_bushel`. Zero when the stands match.
    pub fn economic_benefit(
        &self,
        acres: usize,
        stand_before: f64,
        stand_after: f64,
        price_per_bushel: f64,
    ) -> f64 {
        let gained =
            self.yield_from_stand_count(stand_after) - self.yield_from_stand_count(stand_before);
        #[allow(clippy::cast_precision_loss)]
        let acres = acres as f64;
        gained * price_per_bushel * acres
    }

    /// Cost of replanting `acres`, saturating at `u64::MAX`.
    pub fn replant_cost(&self, acres: usize) -> u64 {
        u64::try_from(acres)
            .unwrap_or(u64::MAX)
            .saturating_mul(self.replant_cost_per_acre)
    }
}

impl Default for YieldModel {
    fn default() -> Self {
        Self::REFERENCE
    }
}

/// [`YieldModel::yield_from_stand_count`] on the reference model.
pub fn yield_from_stand_count(stand_count: f64) -> f64 {
    YieldModel::REFERENCE.yield_from_stand_count(stand_count)
}

/// [`YieldModel::economic_benefit`] on the reference model.
pub fn economic_benefit(
    acres: usize,
    stand_before: f64,
    stand_after: f64,
    price_per_bushel: f64,
) -> f64 {
    YieldModel::REFERENCE.economic_benefit(acres, stand_before, stand_after, price_per_bushel)
}

/// [`YieldModel::replant_cost`] on the reference model.
pub fn replant_cost(acres: usize) -> u64 {
    YieldModel::REFERENCE.replant_cost(acres)
}
