//! A merged mesh with aligned per-triangle attributes.

use std::iter::repeat_n;

use mesh_types::{Mesh, Real};
use tracing::debug;

use crate::error::{Attribute, SceneError, SceneResult};

/// One mesh plus optional per-triangle colors and material ids.
///
/// `colors` and `material_ids` are each either empty or hold exactly one
/// entry per triangle. Every material id indexes `materials`. Colors and
/// materials are opaque: the scene only moves them around.
///
/// # Example
///
/// ```
/// use mesh_primitives::{rectangle, RectangleParams};
/// use mesh_scene::Scene;
///
/// let leaf = rectangle(&RectangleParams::default()).unwrap();
///
/// let mut scene: Scene<f64, [u8; 3], &str> = Scene::new();
/// scene.add(leaf, Some([0, 160, 0]), Some("chlorophyll")).unwrap();
///
/// assert_eq!(scene.ntriangles(), 2);
/// assert_eq!(scene.material_ids(), &[0, 0]);
/// assert_eq!(scene.material_of(1), Some(&"chlorophyll"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Scene<T: Real, C, M> {
    mesh: Mesh<T>,
    colors: Vec<C>,
    material_ids: Vec<usize>,
    materials: Vec<M>,
}

impl<T: Real, C, M> Default for Scene<T, C, M> {
    fn default() -> Self {
        Self {
            mesh: Mesh::new(),
            colors: Vec::new(),
            material_ids: Vec::new(),
            materials: Vec::new(),
        }
    }
}

impl<T: Real, C, M> Scene<T, C, M> {
    /// Create an empty scene.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap a mesh with no colors or materials.
    #[must_use]
    pub fn from_mesh(mesh: Mesh<T>) -> Self {
        Self {
            mesh,
            ..Self::default()
        }
    }

    /// Assemble a scene from its parts, checking alignment.
    ///
    /// # Errors
    ///
    /// - [`SceneError::LengthMismatch`] if `colors` or `material_ids` is
    ///   non-empty and its length differs from the triangle count
    /// - [`SceneError::MaterialIdOutOfRange`] if an id does not index
    ///   `materials`
    pub fn from_parts(
        mesh: Mesh<T>,
        colors: Vec<C>,
        material_ids: Vec<usize>,
        materials: Vec<M>,
    ) -> SceneResult<Self> {
        let ntriangles = mesh.ntriangles();
        check_length(Attribute::Colors, colors.len(), ntriangles)?;
        check_length(Attribute::MaterialIds, material_ids.len(), ntriangles)?;
        if let Some((triangle, &id)) = material_ids
            .iter()
            .enumerate()
            .find(|&(_, &id)| id >= materials.len())
        {
            return Err(SceneError::MaterialIdOutOfRange {
                triangle,
                id,
                count: materials.len(),
            });
        }

        Ok(Self {
            mesh,
            colors,
            material_ids,
            materials,
        })
    }

    /// The merged mesh.
    #[must_use]
    pub const fn mesh(&self) -> &Mesh<T> {
        &self.mesh
    }

    /// Per-triangle colors, empty when the scene is uncolored.
    #[must_use]
    pub fn colors(&self) -> &[C] {
        &self.colors
    }

    /// Per-triangle indices into [`materials`](Self::materials), empty when
    /// the scene has no materials assigned.
    #[must_use]
    pub fn material_ids(&self) -> &[usize] {
        &self.material_ids
    }

    /// The material table.
    #[must_use]
    pub fn materials(&self) -> &[M] {
        &self.materials
    }

    /// Material of one triangle, if the scene assigns materials.
    #[must_use]
    pub fn material_of(&self, triangle: usize) -> Option<&M> {
        self.material_ids
            .get(triangle)
            .and_then(|&id| self.materials.get(id))
    }

    /// Number of triangles in the scene.
    #[must_use]
    pub fn ntriangles(&self) -> usize {
        self.mesh.ntriangles()
    }

    /// Whether the scene holds no triangles.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.mesh.is_empty()
    }

    /// Split the scene into `(mesh, colors, material_ids, materials)`.
    #[must_use]
    pub fn into_parts(self) -> (Mesh<T>, Vec<C>, Vec<usize>, Vec<M>) {
        (self.mesh, self.colors, self.material_ids, self.materials)
    }
}

impl<T: Real, C: Clone, M> Scene<T, C, M> {
    /// Append a mesh, optionally colored and with its own material.
    ///
    /// The color is repeated for every new triangle. The material is pushed
    /// onto the table and every new triangle references it. Adding an empty
    /// mesh changes nothing.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::MixedAttribute`] if the scene already holds
    /// triangles and `color` (or `material`) is given where the existing
    /// triangles have none, or missing where they have one. The scene is
    /// left untouched on error.
    pub fn add(&mut self, mesh: Mesh<T>, color: Option<C>, material: Option<M>) -> SceneResult<()> {
        let added = mesh.ntriangles();
        if added == 0 {
            return Ok(());
        }
        if !self.is_empty() {
            if self.colors.is_empty() == color.is_some() {
                return Err(SceneError::MixedAttribute {
                    attribute: Attribute::Colors,
                    scene: 0,
                });
            }
            if self.material_ids.is_empty() == material.is_some() {
                return Err(SceneError::MixedAttribute {
                    attribute: Attribute::MaterialIds,
                    scene: 0,
                });
            }
        }

        if self.mesh.is_empty() {
            self.mesh = mesh;
        } else {
            self.mesh.append(&mesh);
        }
        if let Some(color) = color {
            self.colors.extend(repeat_n(color, added));
        }
        if let Some(material) = material {
            let id = self.materials.len();
            self.materials.push(material);
            self.material_ids.extend(repeat_n(id, added));
        }

        debug!(
            added,
            ntriangles = self.ntriangles(),
            nmaterials = self.materials.len(),
            "added mesh to scene"
        );
        Ok(())
    }
}

impl<T: Real, C: Clone, M: Clone> Scene<T, C, M> {
    /// Merge scenes into a new one, in order.
    ///
    /// Meshes, color runs, and material-id runs are concatenated. Material
    /// tables are concatenated too, and each scene's ids are offset by the
    /// number of materials contributed by the scenes before it. Scenes
    /// without triangles add no geometry and take no part in the attribute
    /// checks, but their material tables are still appended.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::MixedAttribute`] if some non-empty scenes carry
    /// colors (or material ids) and others do not. `scene` is the position
    /// of the first offending input.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_primitives::{rectangle, triangle, RectangleParams, TriangleParams};
    /// use mesh_scene::Scene;
    ///
    /// let mut stem: Scene<f64, (), char> = Scene::new();
    /// stem.add(triangle(&TriangleParams::default()).unwrap(), None, Some('s')).unwrap();
    /// let mut leaf: Scene<f64, (), char> = Scene::new();
    /// leaf.add(rectangle(&RectangleParams::default()).unwrap(), None, Some('l')).unwrap();
    ///
    /// let plant = Scene::merge([&stem, &leaf]).unwrap();
    /// assert_eq!(plant.material_ids(), &[0, 1, 1]);
    /// assert_eq!(plant.materials(), &['s', 'l']);
    /// ```
    pub fn merge<'a, I>(scenes: I) -> SceneResult<Self>
    where
        I: IntoIterator<Item = &'a Self>,
        Self: 'a,
    {
        let scenes: Vec<&Self> = scenes.into_iter().collect();
        let first = scenes.iter().find(|s| !s.is_empty());
        let colored = first.is_some_and(|s| !s.colors.is_empty());
        let with_materials = first.is_some_and(|s| !s.material_ids.is_empty());

        for (position, scene) in scenes.iter().enumerate().filter(|(_, s)| !s.is_empty()) {
            if scene.colors.is_empty() == colored {
                return Err(SceneError::MixedAttribute {
                    attribute: Attribute::Colors,
                    scene: position,
                });
            }
            if scene.material_ids.is_empty() == with_materials {
                return Err(SceneError::MixedAttribute {
                    attribute: Attribute::MaterialIds,
                    scene: position,
                });
            }
        }

        let ntriangles: usize = scenes.iter().map(|s| s.ntriangles()).sum();
        let mut merged = Self {
            mesh: Mesh::merge(scenes.iter().map(|s| &s.mesh)),
            colors: Vec::with_capacity(if colored { ntriangles } else { 0 }),
            material_ids: Vec::with_capacity(if with_materials { ntriangles } else { 0 }),
            materials: Vec::new(),
        };
        for scene in &scenes {
            let offset = merged.materials.len();
            merged.colors.extend_from_slice(&scene.colors);
            merged
                .material_ids
                .extend(scene.material_ids.iter().map(|id| id + offset));
            merged.materials.extend_from_slice(&scene.materials);
        }

        debug!(
            nscenes = scenes.len(),
            ntriangles,
            nmaterials = merged.materials.len(),
            "merged scenes"
        );
        Ok(merged)
    }
}

fn check_length(attribute: Attribute, got: usize, expected: usize) -> SceneResult<()> {
    if got == 0 || got == expected {
        Ok(())
    } else {
        Err(SceneError::LengthMismatch {
            attribute,
            expected,
            got,
        })
    }
}
