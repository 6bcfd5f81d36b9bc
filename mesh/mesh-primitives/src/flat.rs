//! Flat primitives in the `z = 0` plane.
//!
//! All triangles wind counter-clockwise seen from `+Z`, so every face
//! normal is `+Z`. Shapes are centered so their bounding box is centered
//! at the origin, with `length` along X and `width` along Y.

use mesh_types::{Mesh, Real, Vector3};
use tracing::debug;

use crate::error::PrimitiveResult;
use crate::params::{EllipseParams, RectangleParams, TrapezoidParams, TriangleParams};

/// Isosceles triangle with its base edge on `x = -length/2` and its apex at
/// `(length/2, 0, 0)`.
///
/// # Errors
///
/// Returns [`PrimitiveError::InvalidDimension`](crate::PrimitiveError) if a
/// dimension is not positive and finite.
///
/// # Example
///
/// ```
/// use mesh_primitives::{triangle, TriangleParams};
///
/// let mesh = triangle(&TriangleParams::<f64>::default().with_length(2.0)).unwrap();
/// assert_eq!(mesh.ntriangles(), 1);
/// assert!((mesh.area() - 1.0).abs() < 1e-12);
/// ```
pub fn triangle<T: Real>(params: &TriangleParams<T>) -> PrimitiveResult<Mesh<T>> {
    params.validate()?;
    let hl = half(params.length);
    let hw = half(params.width);

    let mut mesh = Mesh::with_capacity(1, 3);
    mesh.push_triangle(
        Vector3::new(-hl, -hw, T::zero()),
        Vector3::new(hl, T::zero(), T::zero()),
        Vector3::new(-hl, hw, T::zero()),
    );
    debug!(ntriangles = 1, "generated triangle");
    Ok(mesh)
}

/// Axis-aligned rectangle made of two triangles.
///
/// # Errors
///
/// Returns [`PrimitiveError::InvalidDimension`](crate::PrimitiveError) if a
/// dimension is not positive and finite.
pub fn rectangle<T: Real>(params: &RectangleParams<T>) -> PrimitiveResult<Mesh<T>> {
    params.validate()?;
    let hl = half(params.length);
    let hw = half(params.width);

    let mut mesh = Mesh::with_capacity(2, 6);
    push_quad(
        &mut mesh,
        Vector3::new(-hl, -hw, T::zero()),
        Vector3::new(hl, -hw, T::zero()),
        Vector3::new(hl, hw, T::zero()),
        Vector3::new(-hl, hw, T::zero()),
    );
    debug!(ntriangles = 2, "generated rectangle");
    Ok(mesh)
}

/// Isosceles trapezoid with the wide edge (`width`) on `x = -length/2` and
/// the narrow edge (`width * ratio`) on `x = length/2`.
///
/// A ratio above 1 makes the `+X` edge the wider one.
///
/// # Errors
///
/// Returns [`PrimitiveError::InvalidDimension`](crate::PrimitiveError) if a
/// dimension or the ratio is not positive and finite.
pub fn trapezoid<T: Real>(params: &TrapezoidParams<T>) -> PrimitiveResult<Mesh<T>> {
    params.validate()?;
    let hl = half(params.length);
    let hw = half(params.width);
    let hn = hw * params.ratio;

    let mut mesh = Mesh::with_capacity(2, 6);
    push_quad(
        &mut mesh,
        Vector3::new(-hl, -hw, T::zero()),
        Vector3::new(hl, -hn, T::zero()),
        Vector3::new(hl, hn, T::zero()),
        Vector3::new(-hl, hw, T::zero()),
    );
    debug!(ntriangles = 2, "generated trapezoid");
    Ok(mesh)
}

/// Ellipse approximated by a fan of `n` triangles around the origin.
///
/// The fan's rim points lie on the ellipse with semi-axes `length/2` and
/// `width/2`, starting at `(length/2, 0, 0)`.
///
/// # Errors
///
/// Dimension errors come first, then
/// [`PrimitiveError::OddTessellation`](crate::PrimitiveError) and
/// [`PrimitiveError::TooFewTriangles`](crate::PrimitiveError) (`n < 4`).
///
/// # Example
///
/// ```
/// use mesh_primitives::{ellipse, EllipseParams};
///
/// let mesh = ellipse(&EllipseParams::<f32>::default().with_n(8)).unwrap();
/// assert_eq!(mesh.ntriangles(), 8);
/// ```
pub fn ellipse<T: Real>(params: &EllipseParams<T>) -> PrimitiveResult<Mesh<T>> {
    let n = params.validate()?;
    let rim = ring(half(params.length), half(params.width), T::zero(), n);
    let center = Vector3::zeros();

    let mut mesh = Mesh::with_capacity(n, 3 * n);
    fan(&mut mesh, center, &rim, false);
    debug!(ntriangles = n, "generated ellipse");
    Ok(mesh)
}

pub(crate) fn half<T: Real>(value: T) -> T {
    value * T::from_float(0.5)
}

/// Two triangles `(a, b, c)` and `(a, c, d)` for a planar quad wound `a..d`.
pub(crate) fn push_quad<T: Real>(
    mesh: &mut Mesh<T>,
    a: Vector3<T>,
    b: Vector3<T>,
    c: Vector3<T>,
    d: Vector3<T>,
) {
    mesh.push_triangle(a, b, c);
    mesh.push_triangle(a, c, d);
}

/// `count` points on the ellipse `(rx cos t, ry sin t, z)`, counter-clockwise
/// from `+X` seen from `+Z`.
pub(crate) fn ring<T: Real>(rx: T, ry: T, z: T, count: usize) -> Vec<Vector3<T>> {
    let step = T::two_pi() / T::from_count(count);
    (0..count)
        .map(|k| {
            let theta = step * T::from_count(k);
            Vector3::new(rx * theta.cos(), ry * theta.sin(), z)
        })
        .collect()
}

/// Closed fan from `center` over consecutive ring points.
///
/// With `reversed` the fan faces `-Z` instead of `+Z`.
pub(crate) fn fan<T: Real>(
    mesh: &mut Mesh<T>,
    center: Vector3<T>,
    rim: &[Vector3<T>],
    reversed: bool,
) {
    let m = rim.len();
    for k in 0..m {
        let p = rim[k];
        let q = rim[(k + 1) % m];
        if reversed {
            mesh.push_triangle(center, q, p);
        } else {
            mesh.push_triangle(center, p, q);
        }
    }
}
