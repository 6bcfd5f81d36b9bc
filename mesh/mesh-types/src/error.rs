//! Error types for core mesh types.

use thiserror::Error;

/// Result type for core mesh type operations.
pub type TypesResult<T> = Result<T, TypesError>;

/// Errors raised by mesh and bounding-box construction.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TypesError {
    /// A bounding box was requested for a mesh with no triangles.
    #[error("cannot compute a bounding box of an empty mesh")]
    EmptyMesh,

    /// Bounding box corners are not ordered on some axis.
    #[error("invalid bounds on axis {axis}: min {min} > max {max}")]
    InvalidBounds {
        /// Axis index (0 = x, 1 = y, 2 = z).
        axis: usize,
        /// Minimum coordinate supplied.
        min: f64,
        /// Maximum coordinate supplied.
        max: f64,
    },

    /// A flat vertex list does not describe whole triangles.
    #[error("vertex count {count} is not a multiple of 3")]
    IncompleteTriangle {
        /// Number of vertices supplied.
        count: usize,
    },

    /// Supplied normals do not match the triangle count.
    #[error("expected {expected} normals (one per triangle), got {got}")]
    NormalCountMismatch {
        /// Number of triangles in the mesh.
        expected: usize,
        /// Number of normals supplied.
        got: usize,
    },
}
