//! Core mesh types for plant geometry.
//!
//! This crate provides the foundational types shared by the generators,
//! transforms, codecs, and scenes:
//!
//! - [`Mesh`] - A dense, unindexed triangle mesh
//! - [`Aabb`] - Axis-aligned bounding box
//! - [`Real`] - Precision selector (`f32` or `f64`)
//! - [`vec`] - Origin and axis vectors at a chosen precision
//!
//! # Precision
//!
//! Every type is generic over [`Real`] and defaults to `f64`. Use
//! `Mesh::<f32>::new()` for single precision.
//!
//! # Coordinate System
//!
//! Uses a **right-handed coordinate system**. Triangle winding is
//! **counter-clockwise (CCW) when viewed from outside**, so normals point
//! outward by the right-hand rule.
//!
//! # Example
//!
//! ```
//! use mesh_types::{Aabb, Mesh, Vector3};
//!
//! let mut mesh = Mesh::new();
//! mesh.push_triangle(
//!     Vector3::new(0.0, 0.0, 0.0),
//!     Vector3::new(1.0, 0.0, 0.0),
//!     Vector3::new(0.0, 1.0, 0.0),
//! );
//!
//! assert_eq!(mesh.ntriangles(), 1);
//! let bounds = Aabb::from_mesh(&mesh).unwrap();
//! assert_eq!(bounds.max, Vector3::new(1.0, 1.0, 0.0));
//! ```

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod bounds;
mod error;
mod mesh;
mod real;
pub mod vec;

pub use bounds::Aabb;
pub use error::{TypesError, TypesResult};
pub use mesh::{Mesh, face_normal, triangle_area};
pub use real::Real;

// Re-export nalgebra types for convenience
pub use nalgebra::{Matrix3, Vector3};
