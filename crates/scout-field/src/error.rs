//! Error types for the `scout-field` crate.

use scout_types::CellPos;

/// Errors that can occur while generating or scouting a field.
#[derive(Debug, thiserror::Error)]
pub enum FieldError {
    /// A field must have at least one row and one column.
    #[error("field must have at least one cell (got {rows}x{cols})")]
    EmptyField {
        /// Requested rows.
        rows: usize,
        /// Requested columns.
        cols: usize,
    },

    /// The requested dimensions overflow the cell count.
    #[error("field dimensions {rows}x{cols} are too large")]
    TooLarge {
        /// Requested rows.
        rows: usize,
        /// Requested columns.
        cols: usize,
    },

    /// A generation parameter is out of its valid range.
    #[error("invalid field parameter `{name}`: {reason}")]
    InvalidParameter {
        /// The offending parameter.
        name: &'static str,
        /// What is wrong with it.
        reason: String,
    },

    /// A cell coordinate lies outside the field.
    #[error("cell {pos} is outside the {rows}x{cols} field")]
    OutOfBounds {
        /// The requested cell.
        pos: CellPos,
        /// Field rows.
        rows: usize,
        /// Field columns.
        cols: usize,
    },
}
