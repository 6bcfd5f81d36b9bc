//! Axis-aligned boxes centered at the origin.

use mesh_types::{Mesh, Real, Vector3};
use tracing::debug;

use crate::error::PrimitiveResult;
use crate::flat::{half, push_quad};
use crate::params::CubeParams;

/// Closed box with `length`, `width`, and `height` along X, Y, and Z.
/// Twelve outward-wound triangles, two per face.
///
/// # Errors
///
/// Returns [`PrimitiveError::InvalidDimension`](crate::PrimitiveError) if a
/// dimension is not positive and finite.
///
/// # Example
///
/// ```
/// use mesh_primitives::{solid_cube, CubeParams};
///
/// let mesh = solid_cube(&CubeParams::<f64>::default().with_height(2.0)).unwrap();
/// assert_eq!(mesh.ntriangles(), 12);
/// assert!((mesh.area() - 10.0).abs() < 1e-12);
/// ```
pub fn solid_cube<T: Real>(params: &CubeParams<T>) -> PrimitiveResult<Mesh<T>> {
    params.validate()?;
    let mesh = box_mesh(params, true);
    debug!(ntriangles = mesh.ntriangles(), "generated solid cube");
    Ok(mesh)
}

/// Box without its `+Z` and `-Z` faces: the four side walls, eight
/// outward-wound triangles.
///
/// # Errors
///
/// Same as [`solid_cube`].
pub fn hollow_cube<T: Real>(params: &CubeParams<T>) -> PrimitiveResult<Mesh<T>> {
    params.validate()?;
    let mesh = box_mesh(params, false);
    debug!(ntriangles = mesh.ntriangles(), "generated hollow cube");
    Ok(mesh)
}

fn box_mesh<T: Real>(params: &CubeParams<T>, caps: bool) -> Mesh<T> {
    let (hx, hy, hz) = (half(params.length), half(params.width), half(params.height));
    // Corner `pXYZ` takes the max of each axis whose digit is 1
    let corner = |x: bool, y: bool, z: bool| {
        Vector3::new(
            if x { hx } else { -hx },
            if y { hy } else { -hy },
            if z { hz } else { -hz },
        )
    };
    let p000 = corner(false, false, false);
    let p100 = corner(true, false, false);
    let p010 = corner(false, true, false);
    let p110 = corner(true, true, false);
    let p001 = corner(false, false, true);
    let p101 = corner(true, false, true);
    let p011 = corner(false, true, true);
    let p111 = corner(true, true, true);

    let ntriangles = if caps { 12 } else { 8 };
    let mut mesh = Mesh::with_capacity(ntriangles, 3 * ntriangles);
    push_quad(&mut mesh, p100, p110, p111, p101);
    push_quad(&mut mesh, p000, p001, p011, p010);
    push_quad(&mut mesh, p010, p011, p111, p110);
    push_quad(&mut mesh, p000, p100, p101, p001);
    if caps {
        push_quad(&mut mesh, p001, p101, p111, p011);
        push_quad(&mut mesh, p000, p010, p110, p100);
    }
    mesh
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::test_support::{assert_outward, signed_volume};
    use approx::assert_relative_eq;
    use mesh_types::{Aabb, face_normal};

    fn params() -> CubeParams<f64> {
        CubeParams::default()
            .with_length(2.0)
            .with_width(3.0)
            .with_height(4.0)
    }

    #[test]
    fn solid_cube_is_closed_and_outward() {
        let mesh = solid_cube(&params()).unwrap();
        assert_eq!(mesh.ntriangles(), 12);
        assert_relative_eq!(signed_volume(&mesh), 24.0, epsilon = 1e-12);
        assert_relative_eq!(mesh.area(), 2.0 * (6.0 + 8.0 + 12.0), epsilon = 1e-12);
        assert_outward(&mesh);
    }

    #[test]
    fn solid_cube_is_centered() {
        let aabb = Aabb::from_mesh(&solid_cube(&params()).unwrap()).unwrap();
        assert_eq!(aabb.min, Vector3::new(-1.0, -1.5, -2.0));
        assert_eq!(aabb.max, Vector3::new(1.0, 1.5, 2.0));
    }

    #[test]
    fn hollow_cube_has_no_z_faces() {
        let mesh = hollow_cube(&params()).unwrap();
        assert_eq!(mesh.ntriangles(), 8);
        for [a, b, c] in mesh.triangles() {
            assert_relative_eq!(face_normal(&a, &b, &c).z, 0.0);
        }
        assert_outward(&mesh);
    }

    #[test]
    fn rejects_zero_length() {
        assert!(solid_cube(&CubeParams::default().with_length(0.0)).is_err());
        assert!(hollow_cube(&CubeParams::default().with_length(f64::INFINITY)).is_err());
    }
}
