//! Constructors for common vectors.
//!
//! Vectors are [`nalgebra::Vector3`] values; addition, subtraction, scalar
//! multiplication, `cross`, `dot`, and `normalize` come from nalgebra. The
//! helpers here name the origin and the coordinate axes at a chosen precision.

use nalgebra::Vector3;

use crate::Real;

/// The origin `(0, 0, 0)`.
///
/// # Example
///
/// ```
/// use mesh_types::vec::origin;
///
/// let o = origin::<f32>();
/// assert_eq!(o.x, 0.0_f32);
/// ```
#[inline]
#[must_use]
pub fn origin<T: Real>() -> Vector3<T> {
    Vector3::zeros()
}

/// Unit vector along X.
#[inline]
#[must_use]
pub fn x_axis<T: Real>() -> Vector3<T> {
    Vector3::x()
}

/// Unit vector along Y.
#[inline]
#[must_use]
pub fn y_axis<T: Real>() -> Vector3<T> {
    Vector3::y()
}

/// Unit vector along Z.
#[inline]
#[must_use]
pub fn z_axis<T: Real>() -> Vector3<T> {
    Vector3::z()
}

/// Vector of length `s` along X, at the precision of `s`.
///
/// # Example
///
/// ```
/// use mesh_types::vec::along_x;
///
/// let v = along_x(2.5_f32);
/// assert_eq!((v.x, v.y, v.z), (2.5, 0.0, 0.0));
/// ```
#[inline]
#[must_use]
pub fn along_x<T: Real>(s: T) -> Vector3<T> {
    Vector3::new(s, T::zero(), T::zero())
}

/// Vector of length `s` along Y.
#[inline]
#[must_use]
pub fn along_y<T: Real>(s: T) -> Vector3<T> {
    Vector3::new(T::zero(), s, T::zero())
}

/// Vector of length `s` along Z.
#[inline]
#[must_use]
pub fn along_z<T: Real>(s: T) -> Vector3<T> {
    Vector3::new(T::zero(), T::zero(), s)
}
