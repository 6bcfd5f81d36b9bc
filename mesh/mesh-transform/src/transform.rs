//! In-place affine operations on meshes.

use mesh_types::{Matrix3, Mesh, Real, Vector3};
use nalgebra::ComplexField;
use tracing::debug;

use crate::error::{TransformError, TransformResult};

/// In-place transformations of a mesh.
///
/// Every operation visits each vertex once. A merged mesh has no sub-mesh
/// boundaries, so a transform applied after a merge moves every constituent.
///
/// # Example
///
/// ```
/// use mesh_transform::MeshTransform;
/// use mesh_types::{Mesh, Vector3};
///
/// let mut mesh = Mesh::new();
/// mesh.push_triangle(Vector3::zeros(), Vector3::x(), Vector3::y());
///
/// mesh.scale(&Vector3::new(2.0, 2.0, 1.0));
/// mesh.rotate_z(std::f64::consts::FRAC_PI_2);
/// mesh.translate(&Vector3::new(0.0, 0.0, 5.0));
///
/// assert!((mesh.vertices()[1] - Vector3::new(0.0, 2.0, 5.0)).norm() < 1e-12);
/// ```
pub trait MeshTransform<T: Real> {
    /// Multiply every vertex component-wise by `factors`.
    ///
    /// Cached normals are cleared; recompute them with
    /// [`Mesh::update_normals`] when needed.
    fn scale(&mut self, factors: &Vector3<T>);

    /// Rotate by `angle` radians about the X axis, counter-clockwise seen
    /// from `+X` toward the origin.
    fn rotate_x(&mut self, angle: T);

    /// Rotate by `angle` radians about the Y axis, counter-clockwise seen
    /// from `+Y` toward the origin.
    fn rotate_y(&mut self, angle: T);

    /// Rotate by `angle` radians about the Z axis, counter-clockwise seen
    /// from `+Z` toward the origin.
    fn rotate_z(&mut self, angle: T);

    /// Rotate into the basis whose columns are `x`, `y`, and `z`: the old X
    /// axis maps onto `x`, and so on.
    ///
    /// # Errors
    ///
    /// Returns [`TransformError::NonOrthonormalBasis`] when the vectors are
    /// not orthonormal within [`Real::tolerance`], and
    /// [`TransformError::LeftHandedBasis`] when they form a mirror image.
    /// The mesh is left untouched on error.
    fn rotate(&mut self, x: &Vector3<T>, y: &Vector3<T>, z: &Vector3<T>) -> TransformResult<()>;

    /// Same as [`rotate`](Self::rotate) without checking the basis.
    ///
    /// A non-orthonormal basis skews the mesh.
    fn rotate_unchecked(&mut self, x: &Vector3<T>, y: &Vector3<T>, z: &Vector3<T>);

    /// Add `offset` to every vertex. Cached normals are kept.
    fn translate(&mut self, offset: &Vector3<T>);
}

impl<T: Real> MeshTransform<T> for Mesh<T> {
    fn scale(&mut self, factors: &Vector3<T>) {
        for v in self.vertices_mut() {
            v.component_mul_assign(factors);
        }
        self.clear_normals();
        debug!(nvertices = self.nvertices(), "scaled mesh");
    }

    fn rotate_x(&mut self, angle: T) {
        apply_rotation(self, &rotation_x(angle));
    }

    fn rotate_y(&mut self, angle: T) {
        apply_rotation(self, &rotation_y(angle));
    }

    fn rotate_z(&mut self, angle: T) {
        apply_rotation(self, &rotation_z(angle));
    }

    fn rotate(&mut self, x: &Vector3<T>, y: &Vector3<T>, z: &Vector3<T>) -> TransformResult<()> {
        let basis = basis_matrix(x, y, z);
        check_rotation(&basis)?;
        apply_rotation(self, &basis);
        Ok(())
    }

    fn rotate_unchecked(&mut self, x: &Vector3<T>, y: &Vector3<T>, z: &Vector3<T>) {
        apply_rotation(self, &basis_matrix(x, y, z));
    }

    fn translate(&mut self, offset: &Vector3<T>) {
        for v in self.vertices_mut() {
            *v += offset;
        }
        debug!(nvertices = self.nvertices(), "translated mesh");
    }
}

/// Rotation about the X axis by `angle` radians.
#[must_use]
#[rustfmt::skip]
pub fn rotation_x<T: Real>(angle: T) -> Matrix3<T> {
    let (sin_a, cos_a) = angle.sin_cos();
    let (zero, one) = (T::zero(), T::one());
    Matrix3::new(
        one,  zero,   zero,
        zero, cos_a, -sin_a,
        zero, sin_a,  cos_a,
    )
}

/// Rotation about the Y axis by `angle` radians.
#[must_use]
#[rustfmt::skip]
pub fn rotation_y<T: Real>(angle: T) -> Matrix3<T> {
    let (sin_a, cos_a) = angle.sin_cos();
    let (zero, one) = (T::zero(), T::one());
    Matrix3::new(
         cos_a, zero, sin_a,
         zero,  one,  zero,
        -sin_a, zero, cos_a,
    )
}

/// Rotation about the Z axis by `angle` radians.
#[must_use]
#[rustfmt::skip]
pub fn rotation_z<T: Real>(angle: T) -> Matrix3<T> {
    let (sin_a, cos_a) = angle.sin_cos();
    let (zero, one) = (T::zero(), T::one());
    Matrix3::new(
        cos_a, -sin_a, zero,
        sin_a,  cos_a, zero,
        zero,   zero,  one,
    )
}

/// Matrix with `x`, `y`, and `z` as its columns.
#[must_use]
pub fn basis_matrix<T: Real>(x: &Vector3<T>, y: &Vector3<T>, z: &Vector3<T>) -> Matrix3<T> {
    Matrix3::from_columns(&[*x, *y, *z])
}

#[allow(clippy::neg_cmp_op_on_partial_ord)]
// Negated comparisons: a NaN entry must fail the check
fn check_rotation<T: Real>(basis: &Matrix3<T>) -> TransformResult<()> {
    let tolerance = T::tolerance();
    let residual = basis.transpose() * basis - Matrix3::identity();
    let deviation = residual
        .iter()
        .map(|e| ComplexField::abs(*e))
        .fold(T::zero(), |acc, e| if !(e <= acc) { e } else { acc });
    if !(deviation <= tolerance) {
        return Err(TransformError::NonOrthonormalBasis {
            deviation: deviation.as_f64(),
            tolerance: tolerance.as_f64(),
        });
    }
    let determinant = basis.determinant();
    if determinant < T::zero() {
        return Err(TransformError::LeftHandedBasis {
            determinant: determinant.as_f64(),
        });
    }
    Ok(())
}

fn apply_rotation<T: Real>(mesh: &mut Mesh<T>, matrix: &Matrix3<T>) {
    for v in mesh.vertices_mut() {
        *v = matrix * *v;
    }
    for n in mesh.normals_mut() {
        *n = matrix * *n;
    }
    debug!(nvertices = mesh.nvertices(), "rotated mesh");
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::{FRAC_PI_2, PI};

    fn unit_triangle() -> Mesh<f64> {
        let mut mesh = Mesh::new();
        mesh.push_triangle(Vector3::zeros(), Vector3::x(), Vector3::y());
        mesh
    }

    #[test]
    fn rotate_z_quarter_turn() {
        let mut mesh = unit_triangle();
        mesh.rotate_z(FRAC_PI_2);
        assert_relative_eq!(mesh.vertices()[1], Vector3::new(0.0, 1.0, 0.0), epsilon = 1e-12);
        assert_relative_eq!(mesh.vertices()[2], Vector3::new(-1.0, 0.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn rotate_x_quarter_turn() {
        let mut mesh = unit_triangle();
        mesh.rotate_x(FRAC_PI_2);
        assert_relative_eq!(mesh.vertices()[2], Vector3::new(0.0, 0.0, 1.0), epsilon = 1e-12);
    }

    #[test]
    fn rotate_y_quarter_turn() {
        let mut mesh = unit_triangle();
        mesh.rotate_y(FRAC_PI_2);
        assert_relative_eq!(mesh.vertices()[1], Vector3::new(0.0, 0.0, -1.0), epsilon = 1e-12);
    }

    #[test]
    fn rotation_keeps_normals_aligned() {
        let mut mesh = unit_triangle();
        mesh.update_normals();
        mesh.rotate_x(PI / 3.0);
        let [a, b, c] = mesh.triangle(0).unwrap();
        let expected = mesh_types::face_normal(&a, &b, &c);
        assert_relative_eq!(mesh.normals()[0], expected, epsilon = 1e-12);
    }

    #[test]
    fn scale_clears_normals() {
        let mut mesh = unit_triangle();
        mesh.update_normals();
        mesh.scale(&Vector3::new(2.0, 3.0, 4.0));
        assert!(!mesh.has_normals());
        assert_eq!(mesh.vertices()[1], Vector3::new(2.0, 0.0, 0.0));
        assert_eq!(mesh.vertices()[2], Vector3::new(0.0, 3.0, 0.0));
    }

    #[test]
    fn translate_round_trip_is_exact() {
        let mut mesh = unit_triangle();
        let original = mesh.clone();
        let offset = Vector3::new(0.25, -3.5, 10.0);
        mesh.translate(&offset);
        mesh.translate(&-offset);
        assert_eq!(mesh, original);
    }

    #[test]
    fn translate_keeps_normals() {
        let mut mesh = unit_triangle();
        mesh.update_normals();
        mesh.translate(&Vector3::new(1.0, 1.0, 1.0));
        assert_eq!(mesh.normals(), &[Vector3::z()]);
    }

    #[test]
    fn rotate_into_basis() {
        let mut mesh = unit_triangle();
        // Old X -> Y, old Y -> -X, old Z -> Z
        mesh.rotate(&Vector3::y(), &-Vector3::x(), &Vector3::z()).unwrap();
        assert_eq!(mesh.vertices()[1], Vector3::new(0.0, 1.0, 0.0));
        assert_eq!(mesh.vertices()[2], Vector3::new(-1.0, 0.0, 0.0));
    }

    #[test]
    fn rotate_rejects_skewed_basis() {
        let mut mesh = unit_triangle();
        let original = mesh.clone();
        let err = mesh
            .rotate(&Vector3::x(), &Vector3::new(1.0, 1.0, 0.0), &Vector3::z())
            .unwrap_err();
        assert!(matches!(err, TransformError::NonOrthonormalBasis { .. }));
        assert_eq!(mesh, original);
    }

    #[test]
    fn rotate_rejects_mirror_basis() {
        let mut mesh = unit_triangle();
        let err = mesh
            .rotate(&Vector3::y(), &Vector3::x(), &Vector3::z())
            .unwrap_err();
        assert_eq!(err, TransformError::LeftHandedBasis { determinant: -1.0 });
    }

    #[test]
    fn rotate_rejects_nan_basis() {
        let mut mesh = unit_triangle();
        let nan = Vector3::new(f64::NAN, 0.0, 0.0);
        assert!(mesh.rotate(&nan, &Vector3::y(), &Vector3::z()).is_err());
    }

    #[test]
    fn unchecked_rotate_skews() {
        let mut mesh = unit_triangle();
        mesh.rotate_unchecked(&Vector3::x(), &Vector3::new(1.0, 1.0, 0.0), &Vector3::z());
        assert_eq!(mesh.vertices()[2], Vector3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn rotation_matrices_agree_with_basis() {
        let angle = 0.7_f64;
        let rz = rotation_z(angle);
        let basis = basis_matrix(
            &rz.column(0).into_owned(),
            &rz.column(1).into_owned(),
            &rz.column(2).into_owned(),
        );
        assert_relative_eq!(rz, basis);
        assert!(check_rotation(&rotation_x(angle)).is_ok());
        assert!(check_rotation(&rotation_y(-angle)).is_ok());
    }

    #[test]
    fn single_precision_basis_tolerance() {
        let mut mesh = Mesh::<f32>::new();
        mesh.push_triangle(Vector3::zeros(), Vector3::x(), Vector3::y());
        let r = rotation_z(0.3_f32);
        let (x, y, z) = (
            r.column(0).into_owned(),
            r.column(1).into_owned(),
            r.column(2).into_owned(),
        );
        assert!(mesh.rotate(&x, &y, &z).is_ok());
    }
}
