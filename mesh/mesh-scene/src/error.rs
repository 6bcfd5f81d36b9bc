//! Error types for scene composition.

use thiserror::Error;

/// Result type for scene operations.
pub type SceneResult<T> = Result<T, SceneError>;

/// Per-triangle attribute tracked by a scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attribute {
    /// Per-triangle colors.
    Colors,
    /// Per-triangle material ids.
    MaterialIds,
}

impl std::fmt::Display for Attribute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Colors => "colors",
            Self::MaterialIds => "material ids",
        })
    }
}

/// Errors raised when scene parts do not line up with the mesh.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SceneError {
    /// A per-triangle array is neither empty nor one entry per triangle.
    #[error("{attribute} has {got} entries, mesh has {expected} triangles")]
    LengthMismatch {
        /// Which array is misaligned.
        attribute: Attribute,
        /// Number of triangles in the mesh.
        expected: usize,
        /// Number of entries supplied.
        got: usize,
    },

    /// A material id does not index the material table.
    #[error("triangle {triangle} uses material {id}, table has {count} materials")]
    MaterialIdOutOfRange {
        /// Triangle carrying the bad id.
        triangle: usize,
        /// The id.
        id: usize,
        /// Size of the material table.
        count: usize,
    },

    /// Some triangles would carry the attribute and others would not.
    #[error("cannot mix triangles with and without {attribute} (scene {scene})")]
    MixedAttribute {
        /// Attribute present on only part of the content.
        attribute: Attribute,
        /// Position of the offending input; 0 for `add`.
        scene: usize,
    },
}
