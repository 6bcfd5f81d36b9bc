//! Scene composition for plant geometry.
//!
//! A [`Scene`] owns one merged [`Mesh`](mesh_types::Mesh) and, in step with
//! its triangles, optional colors and material ids pointing into a material
//! table. Renderers read the colors; ray tracers read the materials.
//!
//! Scenes are built incrementally with [`Scene::add`] or combined with
//! [`Scene::merge`], which renumbers material ids so they stay valid.
//!
//! # Example
//!
//! ```
//! use mesh_primitives::{ellipse, solid_cylinder, CylinderParams, EllipseParams};
//! use mesh_scene::Scene;
//!
//! let mut plant: Scene<f64, [f32; 3], String> = Scene::new();
//! plant
//!     .add(
//!         solid_cylinder(&CylinderParams::default().with_n(16)).unwrap(),
//!         Some([0.4, 0.3, 0.1]),
//!         Some("stem".to_string()),
//!     )
//!     .unwrap();
//! plant
//!     .add(
//!         ellipse(&EllipseParams::default()).unwrap(),
//!         Some([0.1, 0.6, 0.1]),
//!         Some("leaf".to_string()),
//!     )
//!     .unwrap();
//!
//! assert_eq!(plant.ntriangles(), 36);
//! assert_eq!(plant.colors().len(), 36);
//! assert_eq!(plant.materials().len(), 2);
//! ```

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod error;
mod scene;

pub use error::{Attribute, SceneError, SceneResult};
pub use scene::Scene;
