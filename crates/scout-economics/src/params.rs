//! Prices, costs, and optimizer policy.

use serde::{Deserialize, Serialize};

use crate::error::EconomicsError;
use crate::optimizer::ThresholdOptimizer;
use crate::yield_model::YieldModel;

/// Economic parameters for a session.
///
/// Mirrors the `economics` section of `scout-config.yaml`; every field
/// defaults to the reference game values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EconomicsParams {
    /// Stand count that yields `reference_yield`.
    #[serde(default = "default_reference_stand_count")]
    pub reference_stand_count: f64,

    /// Bushels per acre at the reference stand count.
    #[serde(default = "default_reference_yield")]
    pub reference_yield: f64,

    /// Replanting cost per acre, in whole dollars.
    #[serde(default = "default_replant_cost_per_acre")]
    pub replant_cost_per_acre: u64,

    /// Sale price per bushel, in dollars.
    #[serde(default = "default_price_per_bushel")]
    pub price_per_bushel: f64,

    /// Smallest replant area the optimizer will recommend, in acres.
    #[serde(default = "default_min_replant_acres")]
    pub min_replant_acres: usize,

    /// Stand count the optimizer assumes replanted acres will reach.
    #[serde(default = "default_target_stand_after_replant")]
    pub target_stand_after_replant: f64,

    /// Threshold offered when the optimizer finds nothing profitable.
    #[serde(default = "default_fallback_threshold")]
    pub fallback_threshold: f64,
}

impl Default for EconomicsParams {
    fn default() -> Self {
        Self {
            reference_stand_count: default_reference_stand_count(),
            reference_yield: default_reference_yield(),
            replant_cost_per_acre: default_replant_cost_per_acre(),
            price_per_bushel: default_price_per_bushel(),
            min_replant_acres: default_min_replant_acres(),
            target_stand_after_replant: default_target_stand_after_replant(),
            fallback_threshold: default_fallback_threshold(),
        }
    }
}

impl EconomicsParams {
    /// Check every parameter against its valid range.
    pub fn validate(&self) -> Result<(), EconomicsError> {
        if !self.reference_stand_count.is_finite() || self.reference_stand_count <= 0.0 {
            return Err(invalid(
                "reference_stand_count",
                format!("must be positive, got {}", self.reference_stand_count),
            ));
        }
        for (name, value) in [
            ("reference_yield", self.reference_yield),
            ("price_per_bushel", self.price_per_bushel),
            ("target_stand_after_replant", self.target_stand_after_replant),
            ("fallback_threshold", self.fallback_threshold),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(invalid(name, format!("must be a non-negative number, got {value}")));
            }
        }
        Ok(())
    }

    /// The yield model described by these parameters.
    pub const fn yield_model(&self) -> YieldModel {
        YieldModel {
            reference_stand_count: self.reference_stand_count,
            reference_yield: self.reference_yield,
            replant_cost_per_acre: self.replant_cost_per_acre,
        }
    }

    /// The threshold optimizer described by these parameters.
    pub const fn optimizer(&self) -> ThresholdOptimizer {
        ThresholdOptimizer::new(self.yield_model(), self.min_replant_acres)
    }
}

fn invalid(name: &'static str, reason: String) -> EconomicsError {
    EconomicsError::InvalidParameter { name, reason }
}

// ---------------------------------------------------------------------------
// Default value functions (serde default requires named functions)
// ---------------------------------------------------------------------------

const fn default_reference_stand_count() -> f64 {
    31.0
}

const fn default_reference_yield() -> f64 {
    175.0
}

const fn default_replant_cost_per_acre() -> u64 {
    125
}

const fn default_price_per_bushel() -> f64 {
    4.0
}

const fn default_min_replant_acres() -> usize {
    10
}

const fn default_target_stand_after_replant() -> f64 {
    28.5
}

const fn default_fallback_threshold() -> f64 {
    25.0
}
