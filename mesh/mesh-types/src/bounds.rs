//! Axis-aligned bounding box.

use nalgebra::Vector3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Mesh, Real, TypesError, TypesResult};

/// An axis-aligned bounding box (AABB).
///
/// Defined by a minimum and a maximum corner with `min[i] <= max[i]` on every
/// axis. A box is a snapshot: it does not follow later edits of the mesh it
/// was built from.
///
/// # Example
///
/// ```
/// use mesh_types::{Aabb, Vector3};
///
/// let aabb = Aabb::new(
///     Vector3::new(0.0, 0.0, 0.0),
///     Vector3::new(1.0, 1.0, 1.0),
/// )
/// .unwrap();
///
/// assert_eq!(aabb.size(), Vector3::new(1.0, 1.0, 1.0));
/// assert!(aabb.contains(&Vector3::new(0.5, 0.5, 0.5)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(
        try_from = "RawAabb<T>",
        bound(serialize = "T: Real + Serialize", deserialize = "T: Real + Deserialize<'de>")
    )
)]
pub struct Aabb<T = f64> {
    /// Minimum corner (smallest x, y, z values).
    pub min: Vector3<T>,
    /// Maximum corner (largest x, y, z values).
    pub max: Vector3<T>,
}

/// Serialized corners, checked with [`Aabb::new`] on load.
#[cfg(feature = "serde")]
#[derive(Deserialize)]
#[serde(bound(deserialize = "T: Real + Deserialize<'de>"))]
struct RawAabb<T> {
    min: Vector3<T>,
    max: Vector3<T>,
}

#[cfg(feature = "serde")]
impl<T: Real> TryFrom<RawAabb<T>> for Aabb<T> {
    type Error = TypesError;

    fn try_from(raw: RawAabb<T>) -> TypesResult<Self> {
        Self::new(raw.min, raw.max)
    }
}

impl<T: Real> Aabb<T> {
    /// Create a box from its minimum and maximum corners.
    ///
    /// Components are never swapped.
    ///
    /// # Errors
    ///
    /// Returns [`TypesError::InvalidBounds`] for the first axis where
    /// `min > max` (or either value is NaN).
    #[allow(clippy::neg_cmp_op_on_partial_ord)]
    // Negated comparison: NaN corners must be rejected too
    pub fn new(min: Vector3<T>, max: Vector3<T>) -> TypesResult<Self> {
        for axis in 0..3 {
            if !(min[axis] <= max[axis]) {
                return Err(TypesError::InvalidBounds {
                    axis,
                    min: min[axis].as_f64(),
                    max: max[axis].as_f64(),
                });
            }
        }
        Ok(Self { min, max })
    }

    /// Create a box without checking corner order.
    ///
    /// The caller guarantees `min[i] <= max[i]`; otherwise the box describes
    /// no region and queries on it are meaningless.
    #[inline]
    #[must_use]
    pub const fn new_unchecked(min: Vector3<T>, max: Vector3<T>) -> Self {
        Self { min, max }
    }

    /// Tight box around every vertex of a mesh.
    ///
    /// Scans the vertices once.
    ///
    /// # Errors
    ///
    /// Returns [`TypesError::EmptyMesh`] if the mesh has no triangles.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_types::{Aabb, Mesh, Vector3};
    ///
    /// let mut mesh = Mesh::new();
    /// mesh.push_triangle(
    ///     Vector3::new(0.0, 0.0, 0.0),
    ///     Vector3::new(10.0, 5.0, 3.0),
    ///     Vector3::new(-2.0, 8.0, 1.0),
    /// );
    ///
    /// let aabb = Aabb::from_mesh(&mesh).unwrap();
    /// assert_eq!(aabb.min, Vector3::new(-2.0, 0.0, 0.0));
    /// assert_eq!(aabb.max, Vector3::new(10.0, 8.0, 3.0));
    /// ```
    pub fn from_mesh(mesh: &Mesh<T>) -> TypesResult<Self> {
        Self::from_points(mesh.vertices().iter()).ok_or(TypesError::EmptyMesh)
    }

    /// Tight box around a set of points, or `None` if there are none.
    #[must_use]
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Vector3<T>>) -> Option<Self> {
        let mut points = points.into_iter();
        let first = *points.next()?;
        let (min, max) = points.fold((first, first), |(min, max), p| {
            (min.inf(p), max.sup(p))
        });
        Some(Self { min, max })
    }

    /// Width, depth, and height of the box.
    #[inline]
    #[must_use]
    pub fn size(&self) -> Vector3<T> {
        self.max - self.min
    }

    /// Center point of the box.
    #[inline]
    #[must_use]
    pub fn center(&self) -> Vector3<T> {
        (self.min + self.max) * T::from_float(0.5)
    }

    /// Volume of the box.
    #[inline]
    #[must_use]
    pub fn volume(&self) -> T {
        let s = self.size();
        s.x * s.y * s.z
    }

    /// Length of the box diagonal.
    #[inline]
    #[must_use]
    pub fn diagonal(&self) -> T {
        self.size().norm()
    }

    /// Check if the box contains a point.
    ///
    /// Points on the boundary are considered inside.
    #[inline]
    #[must_use]
    pub fn contains(&self, point: &Vector3<T>) -> bool {
        (0..3).all(|i| point[i] >= self.min[i] && point[i] <= self.max[i])
    }

    /// Check if this box intersects another one. Touching boxes intersect.
    #[inline]
    #[must_use]
    pub fn intersects(&self, other: &Self) -> bool {
        (0..3).all(|i| self.min[i] <= other.max[i] && self.max[i] >= other.min[i])
    }

    /// Smallest box containing both boxes.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        Self {
            min: self.min.inf(&other.min),
            max: self.max.sup(&other.max),
        }
    }
}
