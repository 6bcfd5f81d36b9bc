//! Dense, unindexed triangle mesh.

use nalgebra::Vector3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Real, TypesError, TypesResult};

/// A dense triangle mesh without shared vertices.
///
/// Every triangle owns three consecutive entries of the vertex buffer, so a
/// mesh with `n` triangles always stores exactly `3 * n` vertices. Nothing is
/// welded or indexed: triangles can be edited independently and two meshes
/// merge by plain concatenation.
///
/// # Memory Layout
///
/// - `vertices`: `Vec<Vector3<T>>` - vertex triples in append order
/// - `normals`: `Vec<Vector3<T>>` - either empty (not computed) or one unit
///   normal per triangle
///
/// # Winding Order
///
/// Triangles are **counter-clockwise (CCW)** when viewed from the side their
/// normal points to.
///
/// # Example
///
/// ```
/// use mesh_types::{Mesh, Vector3};
///
/// let mut mesh = Mesh::<f64>::new();
/// mesh.push_triangle(
///     Vector3::new(0.0, 0.0, 0.0),
///     Vector3::new(1.0, 0.0, 0.0),
///     Vector3::new(0.0, 1.0, 0.0),
/// );
///
/// assert_eq!(mesh.ntriangles(), 1);
/// assert_eq!(mesh.nvertices(), 3);
/// assert!((mesh.area() - 0.5).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(
        try_from = "RawMesh<T>",
        bound(serialize = "T: Real + Serialize", deserialize = "T: Real + Deserialize<'de>")
    )
)]
pub struct Mesh<T = f64> {
    vertices: Vec<Vector3<T>>,
    normals: Vec<Vector3<T>>,
}

/// Unchecked serialized form, validated into a [`Mesh`] on load.
#[cfg(feature = "serde")]
#[derive(Deserialize)]
#[serde(bound(deserialize = "T: Real + Deserialize<'de>"))]
struct RawMesh<T> {
    vertices: Vec<Vector3<T>>,
    #[serde(default)]
    normals: Vec<Vector3<T>>,
}

#[cfg(feature = "serde")]
impl<T: Real> TryFrom<RawMesh<T>> for Mesh<T> {
    type Error = TypesError;

    fn try_from(raw: RawMesh<T>) -> TypesResult<Self> {
        let mesh = Self::from_vertices(raw.vertices)?;
        if raw.normals.is_empty() {
            Ok(mesh)
        } else {
            mesh.with_normals(raw.normals)
        }
    }
}

impl<T> Default for Mesh<T> {
    fn default() -> Self {
        Self {
            vertices: Vec::new(),
            normals: Vec::new(),
        }
    }
}

impl<T: Real> Mesh<T> {
    /// Create an empty mesh.
    ///
    /// The precision follows the type parameter, e.g. `Mesh::<f32>::new()`.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            vertices: Vec::new(),
            normals: Vec::new(),
        }
    }

    /// Create an empty mesh with room for `ntriangles` triangles and
    /// `nvertices` vertices.
    ///
    /// Capacity only affects allocation, never content. The usual
    /// `nvertices` is `3 * ntriangles`.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_types::Mesh;
    ///
    /// let mesh = Mesh::<f32>::with_capacity(10, 30);
    /// assert!(mesh.is_empty());
    /// ```
    #[inline]
    #[must_use]
    pub fn with_capacity(ntriangles: usize, nvertices: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(nvertices.max(3 * ntriangles)),
            normals: Vec::new(),
        }
    }

    /// Build a mesh from a flat list of vertex triples.
    ///
    /// # Errors
    ///
    /// Returns [`TypesError::IncompleteTriangle`] if the length is not a
    /// multiple of 3.
    pub fn from_vertices(vertices: Vec<Vector3<T>>) -> TypesResult<Self> {
        if vertices.len() % 3 != 0 {
            return Err(TypesError::IncompleteTriangle {
                count: vertices.len(),
            });
        }
        Ok(Self {
            vertices,
            normals: Vec::new(),
        })
    }

    /// Attach one normal per triangle, replacing any cached normals.
    ///
    /// # Errors
    ///
    /// Returns [`TypesError::NormalCountMismatch`] if `normals.len()` differs
    /// from [`Self::ntriangles`].
    pub fn with_normals(mut self, normals: Vec<Vector3<T>>) -> TypesResult<Self> {
        if normals.len() != self.ntriangles() {
            return Err(TypesError::NormalCountMismatch {
                expected: self.ntriangles(),
                got: normals.len(),
            });
        }
        self.normals = normals;
        Ok(self)
    }

    /// Append one triangle.
    ///
    /// Existing data is never reordered. If normals are cached, the new
    /// triangle's normal is computed so the cache stays aligned.
    pub fn push_triangle(&mut self, v0: Vector3<T>, v1: Vector3<T>, v2: Vector3<T>) {
        if !self.normals.is_empty() {
            self.normals.push(face_normal(&v0, &v1, &v2));
        }
        self.vertices.push(v0);
        self.vertices.push(v1);
        self.vertices.push(v2);
    }

    /// Number of triangles.
    #[inline]
    #[must_use]
    pub fn ntriangles(&self) -> usize {
        self.vertices.len() / 3
    }

    /// Number of vertices (always `3 * ntriangles`).
    #[inline]
    #[must_use]
    pub fn nvertices(&self) -> usize {
        self.vertices.len()
    }

    /// Check whether the mesh has no triangles.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// All vertices, three per triangle, in append order.
    #[inline]
    #[must_use]
    pub fn vertices(&self) -> &[Vector3<T>] {
        &self.vertices
    }

    /// Mutable access to vertex positions.
    ///
    /// The slice cannot change the vertex count. Cached normals are left
    /// untouched; callers that move vertices should call
    /// [`Self::clear_normals`] or [`Self::update_normals`].
    #[inline]
    pub fn vertices_mut(&mut self) -> &mut [Vector3<T>] {
        &mut self.vertices
    }

    /// Get a triangle's vertices by index.
    #[must_use]
    pub fn triangle(&self, index: usize) -> Option<[Vector3<T>; 3]> {
        let base = index.checked_mul(3)?;
        let end = base.checked_add(3)?;
        match self.vertices.get(base..end) {
            Some(&[a, b, c]) => Some([a, b, c]),
            _ => None,
        }
    }

    /// Iterate over triangles as vertex triples.
    pub fn triangles(&self) -> impl Iterator<Item = [Vector3<T>; 3]> + '_ {
        self.vertices.chunks_exact(3).map(|t| [t[0], t[1], t[2]])
    }

    /// Total surface area (sum of triangle areas).
    #[must_use]
    pub fn area(&self) -> T {
        self.triangles()
            .fold(T::zero(), |acc, [a, b, c]| acc + triangle_area(&a, &b, &c))
    }

    /// Area of every triangle, in triangle order.
    #[must_use]
    pub fn areas(&self) -> Vec<T> {
        self.triangles()
            .map(|[a, b, c]| triangle_area(&a, &b, &c))
            .collect()
    }

    /// Cached per-triangle normals.
    ///
    /// Empty until [`Self::update_normals`] or [`Self::with_normals`] is
    /// called, or after an operation that invalidates them.
    #[inline]
    #[must_use]
    pub fn normals(&self) -> &[Vector3<T>] {
        &self.normals
    }

    /// Mutable access to cached normals.
    #[inline]
    pub fn normals_mut(&mut self) -> &mut [Vector3<T>] {
        &mut self.normals
    }

    /// Check whether per-triangle normals are cached.
    #[inline]
    #[must_use]
    pub fn has_normals(&self) -> bool {
        !self.normals.is_empty() && self.normals.len() == self.ntriangles()
    }

    /// Recompute one unit normal per triangle from the winding order.
    ///
    /// Degenerate triangles get a zero normal.
    pub fn update_normals(&mut self) {
        self.normals = self
            .triangles()
            .map(|[a, b, c]| face_normal(&a, &b, &c))
            .collect();
    }

    /// Drop cached normals.
    #[inline]
    pub fn clear_normals(&mut self) {
        self.normals.clear();
    }

    /// Normal of triangle `index`: the cached one if present, otherwise
    /// computed from its vertices.
    #[must_use]
    pub fn normal(&self, index: usize) -> Option<Vector3<T>> {
        if self.has_normals() {
            return self.normals.get(index).copied();
        }
        self.triangle(index).map(|[a, b, c]| face_normal(&a, &b, &c))
    }

    /// Reserve capacity for `additional` more triangles.
    pub fn reserve(&mut self, additional: usize) {
        self.vertices.reserve(3 * additional);
    }

    /// Append another mesh's triangles after this mesh's triangles.
    ///
    /// Normals stay cached only if both meshes had them. Appending an empty
    /// mesh changes nothing.
    pub fn append(&mut self, other: &Self) {
        if other.is_empty() {
            return;
        }
        let keep_normals = (self.has_normals() || self.is_empty()) && other.has_normals();
        if keep_normals {
            self.normals.extend_from_slice(&other.normals);
        } else {
            self.normals.clear();
        }
        self.vertices.extend_from_slice(&other.vertices);
    }

    /// Concatenate several meshes into a new one, in order.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_types::{Mesh, Vector3};
    ///
    /// let mut a = Mesh::<f64>::new();
    /// a.push_triangle(Vector3::x(), Vector3::y(), Vector3::z());
    /// let b = a.clone();
    ///
    /// let merged = Mesh::merge([&a, &b]);
    /// assert_eq!(merged.ntriangles(), 2);
    /// ```
    #[must_use]
    pub fn merge<'a, I>(meshes: I) -> Self
    where
        I: IntoIterator<Item = &'a Self>,
        T: 'a,
    {
        let meshes: Vec<&Self> = meshes.into_iter().collect();
        let total = meshes.iter().map(|m| m.ntriangles()).sum();
        let mut merged = Self::with_capacity(total, 3 * total);
        for mesh in meshes {
            merged.append(mesh);
        }
        merged
    }

    /// Copy this mesh at another precision.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_types::{Mesh, Vector3};
    ///
    /// let mut mesh = Mesh::<f64>::new();
    /// mesh.push_triangle(Vector3::x(), Vector3::y(), Vector3::z());
    /// let single: Mesh<f32> = mesh.convert();
    /// assert_eq!(single.ntriangles(), 1);
    /// ```
    #[must_use]
    pub fn convert<U: Real>(&self) -> Mesh<U> {
        let cast = |v: &Vector3<T>| {
            Vector3::new(
                U::from_float(v.x.as_f64()),
                U::from_float(v.y.as_f64()),
                U::from_float(v.z.as_f64()),
            )
        };
        Mesh {
            vertices: self.vertices.iter().map(cast).collect(),
            normals: self.normals.iter().map(cast).collect(),
        }
    }
}

impl<T: Real> Extend<[Vector3<T>; 3]> for Mesh<T> {
    fn extend<I: IntoIterator<Item = [Vector3<T>; 3]>>(&mut self, iter: I) {
        for [a, b, c] in iter {
            self.push_triangle(a, b, c);
        }
    }
}

impl<T: Real> FromIterator<[Vector3<T>; 3]> for Mesh<T> {
    fn from_iter<I: IntoIterator<Item = [Vector3<T>; 3]>>(iter: I) -> Self {
        let mut mesh = Self::new();
        mesh.extend(iter);
        mesh
    }
}

/// Area of a triangle: half the magnitude of the edge cross product.
///
/// Collinear or coincident vertices give zero.
#[inline]
#[must_use]
pub fn triangle_area<T: Real>(v0: &Vector3<T>, v1: &Vector3<T>, v2: &Vector3<T>) -> T {
    let e1 = v1 - v0;
    let e2 = v2 - v0;
    e1.cross(&e2).norm() * T::from_float(0.5)
}

/// Unit normal of a triangle by the right-hand rule, or zero if degenerate.
#[must_use]
pub fn face_normal<T: Real>(v0: &Vector3<T>, v1: &Vector3<T>, v2: &Vector3<T>) -> Vector3<T> {
    let e1 = v1 - v0;
    let e2 = v2 - v0;
    e1.cross(&e2)
        .try_normalize(T::zero())
        .unwrap_or_else(Vector3::zeros)
}
