//! Parameters for primitive generation.
//!
//! Every generator takes a parameter struct whose `Default` is the unit
//! shape (`length = width = height = 1`, `ratio = 1`). A tessellation count
//! of `None` picks the generator's own default resolution.

use mesh_types::Real;

use crate::error::{PrimitiveError, PrimitiveResult};

/// Default triangle count of [`ellipse`](crate::ellipse).
pub const ELLIPSE_DEFAULT_N: usize = 20;
/// Default tessellation count of [`hollow_cylinder`](crate::hollow_cylinder).
pub const HOLLOW_CYLINDER_DEFAULT_N: usize = 40;
/// Default tessellation count of [`solid_cylinder`](crate::solid_cylinder).
pub const SOLID_CYLINDER_DEFAULT_N: usize = 80;
/// Default tessellation count of [`hollow_cone`](crate::hollow_cone).
pub const HOLLOW_CONE_DEFAULT_N: usize = 20;
/// Default tessellation count of [`solid_cone`](crate::solid_cone).
pub const SOLID_CONE_DEFAULT_N: usize = 40;
/// Default tessellation count of [`hollow_frustum`](crate::hollow_frustum).
pub const HOLLOW_FRUSTUM_DEFAULT_N: usize = 40;
/// Default tessellation count of [`solid_frustum`](crate::solid_frustum).
pub const SOLID_FRUSTUM_DEFAULT_N: usize = 80;

/// Parameters for [`triangle`](crate::triangle).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriangleParams<T = f64> {
    /// Extent along X, from the base edge to the apex.
    pub length: T,
    /// Length of the base edge, along Y.
    pub width: T,
}

impl<T: Real> Default for TriangleParams<T> {
    fn default() -> Self {
        Self {
            length: T::one(),
            width: T::one(),
        }
    }
}

impl<T: Real> TriangleParams<T> {
    /// Set the length.
    #[must_use]
    pub const fn with_length(mut self, length: T) -> Self {
        self.length = length;
        self
    }

    /// Set the width.
    #[must_use]
    pub const fn with_width(mut self, width: T) -> Self {
        self.width = width;
        self
    }

    pub(crate) fn validate(&self) -> PrimitiveResult<()> {
        positive("length", self.length)?;
        positive("width", self.width)
    }
}

/// Parameters for [`rectangle`](crate::rectangle).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectangleParams<T = f64> {
    /// Extent along X.
    pub length: T,
    /// Extent along Y.
    pub width: T,
}

impl<T: Real> Default for RectangleParams<T> {
    fn default() -> Self {
        Self {
            length: T::one(),
            width: T::one(),
        }
    }
}

impl<T: Real> RectangleParams<T> {
    /// Set the length.
    #[must_use]
    pub const fn with_length(mut self, length: T) -> Self {
        self.length = length;
        self
    }

    /// Set the width.
    #[must_use]
    pub const fn with_width(mut self, width: T) -> Self {
        self.width = width;
        self
    }

    pub(crate) fn validate(&self) -> PrimitiveResult<()> {
        positive("length", self.length)?;
        positive("width", self.width)
    }
}

/// Parameters for [`trapezoid`](crate::trapezoid).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrapezoidParams<T = f64> {
    /// Distance between the two parallel edges, along X.
    pub length: T,
    /// Length of the wide edge, along Y.
    pub width: T,
    /// Narrow edge length divided by `width`.
    pub ratio: T,
}

impl<T: Real> Default for TrapezoidParams<T> {
    fn default() -> Self {
        Self {
            length: T::one(),
            width: T::one(),
            ratio: T::one(),
        }
    }
}

impl<T: Real> TrapezoidParams<T> {
    /// Set the length.
    #[must_use]
    pub const fn with_length(mut self, length: T) -> Self {
        self.length = length;
        self
    }

    /// Set the width of the wide edge.
    #[must_use]
    pub const fn with_width(mut self, width: T) -> Self {
        self.width = width;
        self
    }

    /// Set the narrow-to-wide edge ratio.
    #[must_use]
    pub const fn with_ratio(mut self, ratio: T) -> Self {
        self.ratio = ratio;
        self
    }

    pub(crate) fn validate(&self) -> PrimitiveResult<()> {
        positive("length", self.length)?;
        positive("width", self.width)?;
        positive("ratio", self.ratio)
    }
}

/// Parameters for [`ellipse`](crate::ellipse).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EllipseParams<T = f64> {
    /// Diameter along X.
    pub length: T,
    /// Diameter along Y.
    pub width: T,
    /// Number of fan triangles (even, at least 4). `None` uses
    /// [`ELLIPSE_DEFAULT_N`].
    pub n: Option<usize>,
}

impl<T: Real> Default for EllipseParams<T> {
    fn default() -> Self {
        Self {
            length: T::one(),
            width: T::one(),
            n: None,
        }
    }
}

impl<T: Real> EllipseParams<T> {
    /// Set the length.
    #[must_use]
    pub const fn with_length(mut self, length: T) -> Self {
        self.length = length;
        self
    }

    /// Set the width.
    #[must_use]
    pub const fn with_width(mut self, width: T) -> Self {
        self.width = width;
        self
    }

    /// Set the number of triangles.
    #[must_use]
    pub const fn with_n(mut self, n: usize) -> Self {
        self.n = Some(n);
        self
    }

    pub(crate) fn validate(&self) -> PrimitiveResult<usize> {
        positive("length", self.length)?;
        positive("width", self.width)?;
        tessellation(self.n.unwrap_or(ELLIPSE_DEFAULT_N), 4)
    }
}

/// Parameters for [`hollow_cylinder`](crate::hollow_cylinder) and
/// [`solid_cylinder`](crate::solid_cylinder).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CylinderParams<T = f64> {
    /// Cross-section diameter along X.
    pub length: T,
    /// Cross-section diameter along Y.
    pub width: T,
    /// Extent along Z.
    pub height: T,
    /// Total triangle count (even). The hollow variant needs at least 6 and
    /// the solid one a multiple of 4, at least 12. `None` uses the
    /// generator's default.
    pub n: Option<usize>,
}

impl<T: Real> Default for CylinderParams<T> {
    fn default() -> Self {
        Self {
            length: T::one(),
            width: T::one(),
            height: T::one(),
            n: None,
        }
    }
}

impl<T: Real> CylinderParams<T> {
    /// Set the length.
    #[must_use]
    pub const fn with_length(mut self, length: T) -> Self {
        self.length = length;
        self
    }

    /// Set the width.
    #[must_use]
    pub const fn with_width(mut self, width: T) -> Self {
        self.width = width;
        self
    }

    /// Set the height.
    #[must_use]
    pub const fn with_height(mut self, height: T) -> Self {
        self.height = height;
        self
    }

    /// Set the tessellation count.
    #[must_use]
    pub const fn with_n(mut self, n: usize) -> Self {
        self.n = Some(n);
        self
    }

    /// Checks the parameters and returns the ring point count.
    pub(crate) fn validate(&self, default_n: usize, per_point: usize) -> PrimitiveResult<usize> {
        positive("length", self.length)?;
        positive("width", self.width)?;
        positive("height", self.height)?;
        ring_points(self.n.unwrap_or(default_n), per_point)
    }
}

/// Parameters for [`hollow_cone`](crate::hollow_cone) and
/// [`solid_cone`](crate::solid_cone).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConeParams<T = f64> {
    /// Base diameter along X.
    pub length: T,
    /// Base diameter along Y.
    pub width: T,
    /// Distance from base to apex, along Z.
    pub height: T,
    /// Total triangle count (even). The hollow variant needs at least 4 and
    /// the solid one at least 6. `None` uses the generator's default.
    pub n: Option<usize>,
}

impl<T: Real> Default for ConeParams<T> {
    fn default() -> Self {
        Self {
            length: T::one(),
            width: T::one(),
            height: T::one(),
            n: None,
        }
    }
}

impl<T: Real> ConeParams<T> {
    /// Set the length.
    #[must_use]
    pub const fn with_length(mut self, length: T) -> Self {
        self.length = length;
        self
    }

    /// Set the width.
    #[must_use]
    pub const fn with_width(mut self, width: T) -> Self {
        self.width = width;
        self
    }

    /// Set the height.
    #[must_use]
    pub const fn with_height(mut self, height: T) -> Self {
        self.height = height;
        self
    }

    /// Set the tessellation count.
    #[must_use]
    pub const fn with_n(mut self, n: usize) -> Self {
        self.n = Some(n);
        self
    }

    /// Checks the parameters and returns the ring point count.
    pub(crate) fn validate(&self, default_n: usize, per_point: usize) -> PrimitiveResult<usize> {
        positive("length", self.length)?;
        positive("width", self.width)?;
        positive("height", self.height)?;
        ring_points(self.n.unwrap_or(default_n), per_point)
    }
}

/// Parameters for [`hollow_frustum`](crate::hollow_frustum) and
/// [`solid_frustum`](crate::solid_frustum).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrustumParams<T = f64> {
    /// Bottom diameter along X.
    pub length: T,
    /// Bottom diameter along Y.
    pub width: T,
    /// Extent along Z.
    pub height: T,
    /// Top ring size relative to the bottom ring.
    pub ratio: T,
    /// Total triangle count, with the same rules as
    /// [`CylinderParams::n`]. `None` uses the generator's default.
    pub n: Option<usize>,
}

impl<T: Real> Default for FrustumParams<T> {
    fn default() -> Self {
        Self {
            length: T::one(),
            width: T::one(),
            height: T::one(),
            ratio: T::one(),
            n: None,
        }
    }
}

impl<T: Real> FrustumParams<T> {
    /// Set the length.
    #[must_use]
    pub const fn with_length(mut self, length: T) -> Self {
        self.length = length;
        self
    }

    /// Set the width.
    #[must_use]
    pub const fn with_width(mut self, width: T) -> Self {
        self.width = width;
        self
    }

    /// Set the height.
    #[must_use]
    pub const fn with_height(mut self, height: T) -> Self {
        self.height = height;
        self
    }

    /// Set the top-to-bottom ratio.
    #[must_use]
    pub const fn with_ratio(mut self, ratio: T) -> Self {
        self.ratio = ratio;
        self
    }

    /// Set the tessellation count.
    #[must_use]
    pub const fn with_n(mut self, n: usize) -> Self {
        self.n = Some(n);
        self
    }

    /// Checks the parameters and returns the ring point count.
    pub(crate) fn validate(&self, default_n: usize, per_point: usize) -> PrimitiveResult<usize> {
        positive("length", self.length)?;
        positive("width", self.width)?;
        positive("height", self.height)?;
        positive("ratio", self.ratio)?;
        ring_points(self.n.unwrap_or(default_n), per_point)
    }
}

/// Parameters for [`hollow_cube`](crate::hollow_cube) and
/// [`solid_cube`](crate::solid_cube).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubeParams<T = f64> {
    /// Extent along X.
    pub length: T,
    /// Extent along Y.
    pub width: T,
    /// Extent along Z.
    pub height: T,
}

impl<T: Real> Default for CubeParams<T> {
    fn default() -> Self {
        Self {
            length: T::one(),
            width: T::one(),
            height: T::one(),
        }
    }
}

impl<T: Real> CubeParams<T> {
    /// Set the length.
    #[must_use]
    pub const fn with_length(mut self, length: T) -> Self {
        self.length = length;
        self
    }

    /// Set the width.
    #[must_use]
    pub const fn with_width(mut self, width: T) -> Self {
        self.width = width;
        self
    }

    /// Set the height.
    #[must_use]
    pub const fn with_height(mut self, height: T) -> Self {
        self.height = height;
        self
    }

    pub(crate) fn validate(&self) -> PrimitiveResult<()> {
        positive("length", self.length)?;
        positive("width", self.width)?;
        positive("height", self.height)
    }
}

fn positive<T: Real>(name: &'static str, value: T) -> PrimitiveResult<()> {
    if value.is_finite() && value > T::zero() {
        Ok(())
    } else {
        Err(PrimitiveError::InvalidDimension {
            name,
            value: value.as_f64(),
        })
    }
}

fn tessellation(n: usize, min: usize) -> PrimitiveResult<usize> {
    if n % 2 != 0 {
        return Err(PrimitiveError::OddTessellation { n });
    }
    if n < min {
        return Err(PrimitiveError::TooFewTriangles { min, n });
    }
    Ok(n)
}

/// Ring point count for a shape emitting `per_point` triangles per ring
/// point. Rings need at least 3 points.
fn ring_points(n: usize, per_point: usize) -> PrimitiveResult<usize> {
    if n % 2 != 0 {
        return Err(PrimitiveError::OddTessellation { n });
    }
    if n % per_point != 0 {
        return Err(PrimitiveError::IndivisibleTessellation {
            n,
            multiple: per_point,
        });
    }
    let min = (3 * per_point).max(4);
    if n < min {
        return Err(PrimitiveError::TooFewTriangles { min, n });
    }
    Ok(n / per_point)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_unit_shapes() {
        let p = FrustumParams::<f64>::default();
        assert!((p.length - 1.0).abs() < f64::EPSILON);
        assert!((p.ratio - 1.0).abs() < f64::EPSILON);
        assert_eq!(p.n, None);
        assert_eq!(EllipseParams::<f32>::default().validate(), Ok(ELLIPSE_DEFAULT_N));
    }

    #[test]
    fn builder_sets_fields() {
        let p = CylinderParams::<f64>::default()
            .with_length(2.0)
            .with_width(3.0)
            .with_height(4.0)
            .with_n(12);
        assert!((p.width - 3.0).abs() < f64::EPSILON);
        assert_eq!(p.validate(SOLID_CYLINDER_DEFAULT_N, 4), Ok(3));
        assert_eq!(p.validate(HOLLOW_CYLINDER_DEFAULT_N, 2), Ok(6));
    }

    #[test]
    fn rejects_bad_dimensions() {
        let p = RectangleParams::default().with_width(0.0);
        assert_eq!(
            p.validate(),
            Err(PrimitiveError::InvalidDimension {
                name: "width",
                value: 0.0
            })
        );
        let p = CubeParams::default().with_height(f64::NAN);
        assert!(matches!(
            p.validate(),
            Err(PrimitiveError::InvalidDimension { name: "height", .. })
        ));
        let p = TrapezoidParams::default().with_ratio(-0.5);
        assert!(p.validate().is_err());
    }

    #[test]
    fn rejects_bad_tessellation() {
        assert_eq!(tessellation(19, 4), Err(PrimitiveError::OddTessellation { n: 19 }));
        assert_eq!(tessellation(4, 4), Ok(4));
    }

    #[test]
    fn ring_points_follow_triangles_per_point() {
        assert_eq!(ring_points(20, 1), Ok(20));
        assert_eq!(ring_points(40, 2), Ok(20));
        assert_eq!(ring_points(80, 4), Ok(20));
        assert_eq!(
            ring_points(10, 4),
            Err(PrimitiveError::IndivisibleTessellation { n: 10, multiple: 4 })
        );
        assert_eq!(ring_points(9, 1), Err(PrimitiveError::OddTessellation { n: 9 }));
        assert_eq!(
            ring_points(4, 2),
            Err(PrimitiveError::TooFewTriangles { min: 6, n: 4 })
        );
        assert_eq!(
            ring_points(8, 4),
            Err(PrimitiveError::TooFewTriangles { min: 12, n: 8 })
        );
        assert_eq!(ring_points(4, 1), Ok(4));
    }

    #[test]
    fn dimensions_are_checked_before_tessellation() {
        let p = EllipseParams::default().with_length(-1.0).with_n(19);
        assert!(matches!(
            p.validate(),
            Err(PrimitiveError::InvalidDimension { name: "length", .. })
        ));
    }
}
