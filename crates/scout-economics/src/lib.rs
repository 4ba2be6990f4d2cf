//! Economics of the Smart Scout simulation.
//!
//! Converts stand counts into yield and dollars, searches for the most
//! profitable partial-replant threshold, and applies replant decisions to
//! the field.
//!
//! # Modules
//!
//! - [`params`] -- [`EconomicsParams`]: prices, costs, and optimizer policy.
//! - [`yield_model`] -- [`YieldModel`]: stand count to yield to dollars.
//! - [`optimizer`] -- [`ThresholdOptimizer`]: best partial-replant cutoff.
//! - [`replant`] -- [`apply_decision`]: executes a [`Decision`] on the grid.
//! - [`settlement`] -- [`settle`] and [`ReplantReport`]: the economic
//!   result of a resolved decision and its player-facing summary.
//! - [`error`] -- Error types for this crate.
//!
//! [`Decision`]: scout_types::Decision

pub mod error;
pub mod optimizer;
pub mod params;
pub mod replant;
pub mod settlement;
pub mod yield_model;

pub use error::EconomicsError;
pub use optimizer::{ThresholdOptimizer, ThresholdPlan, calculate_smart_threshold};
pub use params::EconomicsParams;
pub use replant::{ReplantOutcome, apply_decision};
pub use settlement::{ReplantReport, settle};
pub use yield_model::{YieldModel, economic_benefit, replant_cost, yield_from_stand_count};
