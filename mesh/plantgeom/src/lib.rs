//! Triangle mesh engine for plant modeling.
//!
//! This umbrella crate re-exports the `mesh-*` crates behind one dependency.
//! Meshes are dense, unindexed triangle soups generic over `f32`/`f64`.
//!
//! # Quick Start
//!
//! ```no_run
//! use plantgeom::prelude::*;
//!
//! // A leaf blade tilted 30 degrees and lifted to the top of a stem
//! let mut leaf = ellipse(&EllipseParams::default().with_length(0.3).with_width(0.1)).unwrap();
//! leaf.rotate_y(-std::f64::consts::FRAC_PI_6);
//! leaf.translate(&Vector3::new(0.15, 0.0, 1.0));
//!
//! let stem = solid_cylinder(&CylinderParams::default().with_length(0.02).with_width(0.02)).unwrap();
//!
//! let mut plant: Scene<f64, [u8; 3], ()> = Scene::new();
//! plant.add(stem, Some([90, 60, 20]), None).unwrap();
//! plant.add(leaf, Some([30, 150, 40]), None).unwrap();
//!
//! save_mesh(plant.mesh(), "plant.stl", SaveFormat::StlBinary).unwrap();
//! let reloaded: Mesh<f32> = load_mesh("plant.stl").unwrap();
//! assert_eq!(reloaded.ntriangles(), plant.ntriangles());
//! ```
//!
//! # Module Organization
//!
//! - [`types`] - `Mesh`, `Aabb`, the `Real` precision trait, axis helpers
//! - [`primitives`] - Triangles, rectangles, trapezoids, ellipses, cylinders,
//!   cones, frustums, and cubes
//! - [`transform`] - In-place scale, rotation, and translation
//! - [`io`] - STL, PLY, OBJ, and Gmsh MSH files
//! - [`scene`] - Merged meshes with colors and materials
//!
//! # Feature Flags
//!
//! - `serde` - `Serialize`/`Deserialize` for `Mesh` and `Aabb`

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

// =============================================================================
// Re-exports
// =============================================================================

/// Core data structures: `Mesh`, `Aabb`, `Real`.
pub use mesh_types as types;

/// Parametric primitive generators.
pub use mesh_primitives as primitives;

/// In-place mesh transforms.
pub use mesh_transform as transform;

/// File I/O for STL, PLY, OBJ, and MSH formats.
pub use mesh_io as io;

/// Scene composition with colors and materials.
pub use mesh_scene as scene;

// =============================================================================
// Prelude
// =============================================================================

/// Common imports for building plant geometry.
///
/// # Usage
///
/// ```
/// use plantgeom::prelude::*;
///
/// let mesh: Mesh = rectangle(&RectangleParams::default()).unwrap();
/// assert_eq!(mesh.ntriangles(), 2);
/// ```
pub mod prelude {
    // Core types
    pub use mesh_types::{Aabb, Mesh, Real, Vector3};

    // Primitives
    pub use mesh_primitives::{
        ConeParams, CubeParams, CylinderParams, EllipseParams, FrustumParams, RectangleParams,
        TrapezoidParams, TriangleParams, ellipse, hollow_cone, hollow_cube, hollow_cylinder,
        hollow_frustum, rectangle, solid_cone, solid_cube, solid_cylinder, solid_frustum,
        trapezoid, triangle,
    };

    // Transform
    pub use mesh_transform::MeshTransform;

    // I/O
    pub use mesh_io::{MeshFormat, SaveFormat, load_mesh, save_mesh};

    // Scene
    pub use mesh_scene::Scene;
}

// =============================================================================
// Tests
// =============================================================================
