//! Ring-based solids: cylinders, cones, and frusta.
//!
//! Every shape is built around the Z axis and centered at the origin. The
//! bottom ring lies at `z = -height/2` with radii `length/2` (X) and
//! `width/2` (Y); the top ring (or the cone apex) lies at `z = height/2`.
//!
//! The tessellation count `n` is the total number of triangles. Each ring
//! point contributes a fixed number of them, so the ring size is `n / 2`
//! for tubes, `n / 4` for closed tubes, `n` for open cones and `n / 2` for
//! closed cones. The defaults all give 20-point rings.
//!
//! Hollow variants are open tubes without caps. Solid variants add fans that
//! close them, and all their triangles wind outward.

use mesh_types::{Mesh, Real, Vector3};
use tracing::debug;

use crate::error::PrimitiveResult;
use crate::flat::{fan, half, ring};
use crate::params::{
    ConeParams, CylinderParams, FrustumParams, HOLLOW_CONE_DEFAULT_N, HOLLOW_CYLINDER_DEFAULT_N,
    HOLLOW_FRUSTUM_DEFAULT_N, SOLID_CONE_DEFAULT_N, SOLID_CYLINDER_DEFAULT_N,
    SOLID_FRUSTUM_DEFAULT_N,
};

/// Side band: two triangles per ring point.
const TUBE: usize = 2;
/// Side band plus two cap fans.
const CLOSED_TUBE: usize = 4;
/// Apex fan: one triangle per ring point.
const CONE: usize = 1;
/// Apex fan plus a base fan.
const CLOSED_CONE: usize = 2;

/// Lateral surface of an elliptic cylinder, `n` triangles.
///
/// # Errors
///
/// Returns a [`PrimitiveError`](crate::PrimitiveError) if a dimension is not
/// positive and finite, or `n` is odd or below 6.
///
/// # Example
///
/// ```
/// use mesh_primitives::{hollow_cylinder, CylinderParams};
///
/// let mesh = hollow_cylinder(&CylinderParams::<f64>::default()).unwrap();
/// assert_eq!(mesh.ntriangles(), 40);
/// ```
pub fn hollow_cylinder<T: Real>(params: &CylinderParams<T>) -> PrimitiveResult<Mesh<T>> {
    let m = params.validate(HOLLOW_CYLINDER_DEFAULT_N, TUBE)?;
    let mesh = frustum_mesh(params.length, params.width, params.height, T::one(), m, false);
    debug!(m, ntriangles = mesh.ntriangles(), "generated hollow cylinder");
    Ok(mesh)
}

/// Closed elliptic cylinder, `n` triangles.
///
/// # Errors
///
/// Returns a [`PrimitiveError`](crate::PrimitiveError) if a dimension is not
/// positive and finite, or `n` is not a multiple of 4 of at least 12.
pub fn solid_cylinder<T: Real>(params: &CylinderParams<T>) -> PrimitiveResult<Mesh<T>> {
    let m = params.validate(SOLID_CYLINDER_DEFAULT_N, CLOSED_TUBE)?;
    let mesh = frustum_mesh(params.length, params.width, params.height, T::one(), m, true);
    debug!(m, ntriangles = mesh.ntriangles(), "generated solid cylinder");
    Ok(mesh)
}

/// Lateral surface of a frustum whose top ring is the bottom ring scaled by
/// `ratio`, `n` triangles.
///
/// # Errors
///
/// Returns a [`PrimitiveError`](crate::PrimitiveError) if a dimension or the
/// ratio is not positive and finite, or `n` is odd or below 6.
pub fn hollow_frustum<T: Real>(params: &FrustumParams<T>) -> PrimitiveResult<Mesh<T>> {
    let m = params.validate(HOLLOW_FRUSTUM_DEFAULT_N, TUBE)?;
    let mesh = frustum_mesh(
        params.length,
        params.width,
        params.height,
        params.ratio,
        m,
        false,
    );
    debug!(m, ntriangles = mesh.ntriangles(), "generated hollow frustum");
    Ok(mesh)
}

/// Closed frustum, `n` triangles.
///
/// # Errors
///
/// Same as [`solid_cylinder`], plus the ratio check.
pub fn solid_frustum<T: Real>(params: &FrustumParams<T>) -> PrimitiveResult<Mesh<T>> {
    let m = params.validate(SOLID_FRUSTUM_DEFAULT_N, CLOSED_TUBE)?;
    let mesh = frustum_mesh(
        params.length,
        params.width,
        params.height,
        params.ratio,
        m,
        true,
    );
    debug!(m, ntriangles = mesh.ntriangles(), "generated solid frustum");
    Ok(mesh)
}

/// Lateral surface of an elliptic cone, `n` triangles meeting at the apex
/// `(0, 0, height/2)`.
///
/// # Errors
///
/// Returns a [`PrimitiveError`](crate::PrimitiveError) if a dimension is not
/// positive and finite, or `n` is odd or below 4.
pub fn hollow_cone<T: Real>(params: &ConeParams<T>) -> PrimitiveResult<Mesh<T>> {
    let m = params.validate(HOLLOW_CONE_DEFAULT_N, CONE)?;
    let mesh = cone_mesh(params.length, params.width, params.height, m, false);
    debug!(m, ntriangles = mesh.ntriangles(), "generated hollow cone");
    Ok(mesh)
}

/// Closed cone with a base cap, `n` triangles.
///
/// # Errors
///
/// Returns a [`PrimitiveError`](crate::PrimitiveError) if a dimension is not
/// positive and finite, or `n` is odd or below 6.
pub fn solid_cone<T: Real>(params: &ConeParams<T>) -> PrimitiveResult<Mesh<T>> {
    let m = params.validate(SOLID_CONE_DEFAULT_N, CLOSED_CONE)?;
    let mesh = cone_mesh(params.length, params.width, params.height, m, true);
    debug!(m, ntriangles = mesh.ntriangles(), "generated solid cone");
    Ok(mesh)
}

/// Rings of `m` points; `2m` triangles, or `4m` with caps.
fn frustum_mesh<T: Real>(length: T, width: T, height: T, ratio: T, m: usize, caps: bool) -> Mesh<T> {
    let (rx, ry, hz) = (half(length), half(width), half(height));
    let bottom = ring(rx, ry, -hz, m);
    let top = ring(rx * ratio, ry * ratio, hz, m);

    let ntriangles = if caps { CLOSED_TUBE * m } else { TUBE * m };
    let mut mesh = Mesh::with_capacity(ntriangles, 3 * ntriangles);
    for k in 0..m {
        let next = (k + 1) % m;
        mesh.push_triangle(bottom[k], bottom[next], top[next]);
        mesh.push_triangle(bottom[k], top[next], top[k]);
    }
    if caps {
        fan(&mut mesh, Vector3::new(T::zero(), T::zero(), hz), &top, false);
        fan(&mut mesh, Vector3::new(T::zero(), T::zero(), -hz), &bottom, true);
    }
    mesh
}

/// Base ring of `m` points; `m` triangles, or `2m` with a cap.
fn cone_mesh<T: Real>(length: T, width: T, height: T, m: usize, cap: bool) -> Mesh<T> {
    let hz = half(height);
    let base = ring(half(length), half(width), -hz, m);
    let apex = Vector3::new(T::zero(), T::zero(), hz);

    let ntriangles = if cap { CLOSED_CONE * m } else { CONE * m };
    let mut mesh = Mesh::with_capacity(ntriangles, 3 * ntriangles);
    for k in 0..m {
        mesh.push_triangle(base[k], base[(k + 1) % m], apex);
    }
    if cap {
        fan(&mut mesh, Vector3::new(T::zero(), T::zero(), -hz), &base, true);
    }
    mesh
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::PrimitiveError;
    use crate::test_support::{assert_outward, signed_volume};
    use approx::assert_relative_eq;
    use mesh_types::Aabb;
    use std::f64::consts::PI;

    #[test]
    fn triangle_counts() {
        let cyl = CylinderParams::<f64>::default().with_n(12);
        assert_eq!(hollow_cylinder(&cyl).unwrap().ntriangles(), 12);
        assert_eq!(solid_cylinder(&cyl).unwrap().ntriangles(), 12);

        let cone = ConeParams::<f64>::default().with_n(12);
        assert_eq!(hollow_cone(&cone).unwrap().ntriangles(), 12);
        assert_eq!(solid_cone(&cone).unwrap().ntriangles(), 12);

        let fru = FrustumParams::<f64>::default().with_n(12).with_ratio(0.5);
        assert_eq!(hollow_frustum(&fru).unwrap().ntriangles(), 12);
        assert_eq!(solid_frustum(&fru).unwrap().ntriangles(), 12);
    }

    #[test]
    fn default_resolutions() {
        assert_eq!(hollow_cylinder(&CylinderParams::<f64>::default()).unwrap().ntriangles(), 40);
        assert_eq!(solid_cylinder(&CylinderParams::<f64>::default()).unwrap().ntriangles(), 80);
        assert_eq!(hollow_cone(&ConeParams::<f64>::default()).unwrap().ntriangles(), 20);
        assert_eq!(solid_cone(&ConeParams::<f64>::default()).unwrap().ntriangles(), 40);
        assert_eq!(hollow_frustum(&FrustumParams::<f64>::default()).unwrap().ntriangles(), 40);
        assert_eq!(solid_frustum(&FrustumParams::<f64>::default()).unwrap().ntriangles(), 80);
    }

    #[test]
    fn default_rings_have_twenty_points() {
        // Distinct rim points on the bottom ring, skipping the cap center
        let bottom_ring = |mesh: &Mesh<f64>| {
            let mut rim: Vec<Vector3<f64>> = Vec::new();
            for v in mesh.vertices().iter().filter(|v| v.z < 0.0 && v.xy().norm() > 0.25) {
                if !rim.iter().any(|p| (p - v).norm() < 1e-9) {
                    rim.push(*v);
                }
            }
            rim.len()
        };
        assert_eq!(bottom_ring(&hollow_cylinder(&CylinderParams::default()).unwrap()), 20);
        assert_eq!(bottom_ring(&solid_cylinder(&CylinderParams::default()).unwrap()), 20);
        assert_eq!(bottom_ring(&hollow_cone(&ConeParams::default()).unwrap()), 20);
        assert_eq!(bottom_ring(&solid_cone(&ConeParams::default()).unwrap()), 20);
        assert_eq!(bottom_ring(&hollow_frustum(&FrustumParams::default()).unwrap()), 20);
        assert_eq!(bottom_ring(&solid_frustum(&FrustumParams::default()).unwrap()), 20);
    }

    #[test]
    fn cylinder_is_centered() {
        let params = CylinderParams::default()
            .with_length(2.0)
            .with_width(4.0)
            .with_height(6.0)
            .with_n(16);
        let aabb = Aabb::from_mesh(&solid_cylinder(&params).unwrap()).unwrap();
        assert_relative_eq!(aabb.min, Vector3::new(-1.0, -2.0, -3.0), epsilon = 1e-12);
        assert_relative_eq!(aabb.max, Vector3::new(1.0, 2.0, 3.0), epsilon = 1e-12);
    }

    #[test]
    fn solid_cylinder_volume_converges() {
        let params = CylinderParams::default()
            .with_length(2.0)
            .with_width(2.0)
            .with_height(3.0)
            .with_n(2000);
        let mesh = solid_cylinder(&params).unwrap();
        assert_relative_eq!(signed_volume(&mesh), PI * 3.0, epsilon = 1e-3);
        assert_outward(&mesh);
    }

    #[test]
    fn solid_cone_volume_converges() {
        let params = ConeParams::default()
            .with_length(2.0)
            .with_width(2.0)
            .with_height(3.0)
            .with_n(2000);
        let mesh = solid_cone(&params).unwrap();
        assert_relative_eq!(signed_volume(&mesh), PI, epsilon = 1e-3);
        assert_outward(&mesh);
    }

    #[test]
    fn solid_frustum_volume_converges() {
        let params = FrustumParams::default()
            .with_length(2.0)
            .with_width(2.0)
            .with_height(3.0)
            .with_ratio(0.5)
            .with_n(2000);
        let mesh = solid_frustum(&params).unwrap();
        // pi h (R^2 + R r + r^2) / 3 with R = 1, r = 0.5
        let expected = PI * 3.0 * (1.0 + 0.5 + 0.25) / 3.0;
        assert_relative_eq!(signed_volume(&mesh), expected, epsilon = 1e-3);
        assert_outward(&mesh);
    }

    #[test]
    fn hollow_cylinder_lateral_area() {
        let params = CylinderParams::default()
            .with_length(2.0)
            .with_width(2.0)
            .with_height(1.0)
            .with_n(4000);
        let mesh = hollow_cylinder(&params).unwrap();
        assert_relative_eq!(mesh.area(), 2.0 * PI, epsilon = 1e-4);
    }

    #[test]
    fn frustum_with_unit_ratio_is_a_cylinder() {
        let fru = FrustumParams::<f64>::default().with_n(20);
        let cyl = CylinderParams::<f64>::default().with_n(20);
        assert_eq!(solid_frustum(&fru).unwrap(), solid_cylinder(&cyl).unwrap());
    }

    #[test]
    fn cone_apex_on_axis() {
        let params = ConeParams::<f64>::default().with_height(2.0).with_n(6);
        let mesh = hollow_cone(&params).unwrap();
        for [_, _, apex] in mesh.triangles() {
            assert_eq!(apex, Vector3::new(0.0, 0.0, 1.0));
        }
    }

    #[test]
    fn validation_order() {
        let bad_dim_and_n = CylinderParams::default().with_height(-1.0).with_n(3);
        assert!(matches!(
            solid_cylinder(&bad_dim_and_n),
            Err(PrimitiveError::InvalidDimension { name: "height", .. })
        ));
        let odd = ConeParams::<f64>::default().with_n(7);
        assert_eq!(hollow_cone(&odd), Err(PrimitiveError::OddTessellation { n: 7 }));
        let small = FrustumParams::<f64>::default().with_n(4);
        assert_eq!(
            hollow_frustum(&small),
            Err(PrimitiveError::TooFewTriangles { min: 6, n: 4 })
        );
        let uneven = CylinderParams::<f64>::default().with_n(10);
        assert_eq!(hollow_cylinder(&uneven).unwrap().ntriangles(), 10);
        assert_eq!(
            solid_cylinder(&uneven),
            Err(PrimitiveError::IndivisibleTessellation { n: 10, multiple: 4 })
        );
        let tiny = ConeParams::<f64>::default().with_n(4);
        assert_eq!(hollow_cone(&tiny).unwrap().ntriangles(), 4);
        assert_eq!(
            solid_cone(&tiny),
            Err(PrimitiveError::TooFewTriangles { min: 6, n: 4 })
        );
        let ratio = FrustumParams::default().with_ratio(0.0);
        assert!(matches!(
            solid_frustum(&ratio),
            Err(PrimitiveError::InvalidDimension { name: "ratio", .. })
        ));
    }
}
