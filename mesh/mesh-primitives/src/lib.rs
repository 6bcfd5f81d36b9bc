//! Parametric triangle meshes for plant-modeling building blocks.
//!
//! Each generator takes a parameter struct, validates it, and returns a
//! fresh [`Mesh`](mesh_types::Mesh) in a canonical pose:
//!
//! - **Flat shapes** ([`triangle`], [`rectangle`], [`trapezoid`],
//!   [`ellipse`]) lie in the `z = 0` plane facing `+Z`.
//! - **Solids** ([`solid_cube`], [`solid_cylinder`], [`solid_cone`],
//!   [`solid_frustum`]) are closed and wound outward.
//! - **Hollow variants** drop the caps and keep the lateral surface.
//!
//! All shapes are centered at the origin with `length` along X, `width`
//! along Y, and `height` along Z. Place them with `mesh-transform`.
//!
//! # Quick Start
//!
//! ```
//! use mesh_primitives::{solid_cylinder, CylinderParams};
//!
//! let params = CylinderParams::default()
//!     .with_length(0.02)
//!     .with_width(0.02)
//!     .with_height(0.5)
//!     .with_n(16);
//!
//! let stem = solid_cylinder(&params).unwrap();
//! assert_eq!(stem.ntriangles(), 16);
//! ```
//!
//! # Precision
//!
//! Generators are generic over [`Real`](mesh_types::Real). The precision
//! follows the parameter type:
//!
//! ```
//! use mesh_primitives::{ellipse, EllipseParams};
//!
//! let leaf = ellipse(&EllipseParams::<f32>::default()).unwrap();
//! assert_eq!(leaf.ntriangles(), 20);
//! ```

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod cube;
mod error;
mod flat;
mod params;
mod solid;

pub use cube::{hollow_cube, solid_cube};
pub use error::{PrimitiveError, PrimitiveResult};
pub use flat::{ellipse, rectangle, trapezoid, triangle};
pub use params::{
    ConeParams, CubeParams, CylinderParams, ELLIPSE_DEFAULT_N, EllipseParams, FrustumParams,
    HOLLOW_CONE_DEFAULT_N, HOLLOW_CYLINDER_DEFAULT_N, HOLLOW_FRUSTUM_DEFAULT_N, RectangleParams,
    SOLID_CONE_DEFAULT_N, SOLID_CYLINDER_DEFAULT_N, SOLID_FRUSTUM_DEFAULT_N, TrapezoidParams,
    TriangleParams,
};
pub use solid::{
    hollow_cone, hollow_cylinder, hollow_frustum, solid_cone, solid_cylinder, solid_frustum,
};
