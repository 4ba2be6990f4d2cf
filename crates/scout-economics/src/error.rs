//! Error types for the `scout-economics` crate.

/// Errors raised while applying or evaluating replant decisions.
#[derive(Debug, thiserror::Error)]
pub enum EconomicsError {
    /// A threshold replant was requested before every cell was scouted.
    #[error("threshold replant requires a fully scouted field ({closed} cells still closed)")]
    FieldNotFullyScouted {
        /// Number of cells not yet scouted.
        closed: usize,
    },

    /// The observation mask does not match the field.
    #[error("observation grid is {obs_rows}x{obs_cols} but field is {rows}x{cols}")]
    DimensionMismatch {
        /// Field rows.
        rows: usize,
        /// Field columns.
        cols: usize,
        /// Observation rows.
        obs_rows: usize,
        /// Observation columns.
        obs_cols: usize,
    },

    /// The replant threshold is not a finite number.
    #[error("replant threshold must be finite, got {0}")]
    InvalidThreshold(f64),

    /// An economics parameter is out of its valid range.
    #[error("invalid economics parameter `{name}`: {reason}")]
    InvalidParameter {
        /// The offending parameter.
        name: &'static str,
        /// What is wrong with it.
        reason: String,
    },
}
