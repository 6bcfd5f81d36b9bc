//! Error types for mesh transformation operations.

use thiserror::Error;

/// Result type for transformation operations.
pub type TransformResult<T> = Result<T, TransformError>;

/// Errors that can occur during mesh transformation.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TransformError {
    /// Basis vectors are not mutually orthogonal unit vectors.
    #[error("rotation basis is not orthonormal (deviation {deviation:e}, tolerance {tolerance:e})")]
    NonOrthonormalBasis {
        /// Largest entry of `|BᵀB - I|`.
        deviation: f64,
        /// Tolerance that was exceeded.
        tolerance: f64,
    },

    /// Basis is orthonormal but left-handed, so it mirrors the mesh and
    /// flips its winding.
    #[error("rotation basis is left-handed (determinant {determinant})")]
    LeftHandedBasis {
        /// Determinant of the basis matrix.
        determinant: f64,
    },
}
