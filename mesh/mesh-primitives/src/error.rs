//! Error types for primitive generation.

use thiserror::Error;

/// Result type for primitive generation.
pub type PrimitiveResult<T> = Result<T, PrimitiveError>;

/// Parameter validation errors raised before any geometry is produced.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PrimitiveError {
    /// A dimension is zero, negative, or not finite.
    #[error("{name} must be positive and finite, got {value}")]
    InvalidDimension {
        /// Parameter name (`length`, `width`, `height`, or `ratio`).
        name: &'static str,
        /// Value supplied.
        value: f64,
    },

    /// Tessellation count must be even.
    #[error("tessellation count must be even, got {n}")]
    OddTessellation {
        /// Count supplied.
        n: usize,
    },

    /// Tessellation count does not split evenly over the ring points.
    #[error("tessellation count must be a multiple of {multiple}, got {n}")]
    IndivisibleTessellation {
        /// Count supplied.
        n: usize,
        /// Triangles emitted per ring point.
        multiple: usize,
    },

    /// Tessellation count is too low for the shape.
    #[error("tessellation count must be at least {min}, got {n}")]
    TooFewTriangles {
        /// Minimum accepted count.
        min: usize,
        /// Count supplied.
        n: usize,
    },
}
