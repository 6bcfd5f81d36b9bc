//! In-place transformations of triangle meshes.
//!
//! This crate provides:
//! - [`MeshTransform`], implemented for [`Mesh`](mesh_types::Mesh): scale,
//!   axis rotations, basis rotation, and translation
//! - Rotation matrix helpers ([`rotation_x`], [`rotation_y`], [`rotation_z`],
//!   [`basis_matrix`])
//!
//! Rotations act about the origin. Generators in `mesh-primitives` build
//! shapes centered at the origin, so the usual pipeline is
//! scale, then rotate, then translate.
//!
//! # Example
//!
//! ```
//! use mesh_transform::MeshTransform;
//! use mesh_types::{Mesh, Vector3};
//!
//! let mut mesh = Mesh::new();
//! mesh.push_triangle(Vector3::zeros(), Vector3::x(), Vector3::y());
//!
//! // Tilt the triangle onto the XZ plane and lift it
//! mesh.rotate_x(std::f64::consts::FRAC_PI_2);
//! mesh.translate(&Vector3::new(0.0, 0.0, 1.0));
//!
//! // Arbitrary bases are checked before use
//! let skewed = Vector3::new(1.0, 1.0, 0.0);
//! assert!(mesh.rotate(&Vector3::x(), &skewed, &Vector3::z()).is_err());
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod error;
mod transform;

pub use error::{TransformError, TransformResult};
pub use transform::{MeshTransform, basis_matrix, rotation_x, rotation_y, rotation_z};
