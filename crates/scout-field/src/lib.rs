//! Field generation and scouting state for the Smart Scout simulation.
//!
//! This crate produces the synthetic stand-count field a session plays on
//! and tracks which parts of it the player has scouted.
//!
//! # Modules
//!
//! - [`generator`] -- [`FieldGenerator`]: spatially-correlated field
//!   generation (noise, smoothing, anomalies, low patches) and single-cell
//!   regeneration for replanting.
//! - [`smoothing`] -- The 3x3 Gaussian kernel and its edge-renormalized
//!   convolution.
//! - [`observation`] -- [`ObservationTracker`]: the one-way scouting mask
//!   and aggregates over scouted cells.
//! - [`error`] -- Error types for generation and scouting.
//!
//! All randomness is injected: every generating call takes `&mut impl Rng`,
//! so a seeded generator reproduces the same field bit for bit.

pub mod error;
pub mod generator;
pub mod observation;
pub mod smoothing;

pub use error::FieldError;
pub use generator::{FieldGenerator, FieldParams};
pub use observation::ObservationTracker;
pub use smoothing::GaussianKernel;
