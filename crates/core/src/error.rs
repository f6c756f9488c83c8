//! Error types for grid construction and scheduler lookups
//!
//! Per-tick operators never fail on well-formed fields, so every variant here
//! describes a construction-time or configuration-time problem.

use thiserror::Error;

/// Crate-wide result type
pub type Result<T> = std::result::Result<T, GridError>;

/// Errors raised while building a grid, a planet, or its rule table
#[derive(Debug, Error)]
pub enum GridError {
    /// Only 1-D, 2-D and 3-D grids are supported
    #[error("unsupported grid dimensionality: {0} (expected 1, 2 or 3)")]
    UnsupportedDimensionality(usize),

    /// Every axis must hold at least one cell
    #[error("grid axis {axis} has zero extent")]
    ZeroExtent { axis: usize },

    /// A seeded field does not match the grid's cell count
    #[error("field '{field}' has {found} values, grid has {expected} cells")]
    ShapeMismatch {
        field: &'static str,
        expected: usize,
        found: usize,
    },

    /// A rule name was not found in the tick scheduler
    #[error("no tick rule named '{0}'")]
    UnknownRule(String),

    /// Configuration could not be parsed
    #[error("invalid simulation config: {0}")]
    Config(#[from] serde_json::Error),
}
