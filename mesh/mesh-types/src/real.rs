//! Floating-point precision selector.

use nalgebra::RealField;

/// Scalar type used for mesh coordinates.
///
/// Implemented for `f32` and `f64`. Every mesh, vector, and bounding box is
/// parametric over this trait, so a whole pipeline runs at one precision.
/// `f64` is the default wherever a default type parameter is allowed.
///
/// # Example
///
/// ```
/// use mesh_types::Real;
///
/// let half = f32::from_float(0.5);
/// assert_eq!(half, 0.5_f32);
/// assert_eq!(half.as_f64(), 0.5);
/// ```
pub trait Real: RealField + Copy {
    /// Convert from `f64`, rounding to the target precision.
    fn from_float(value: f64) -> Self;

    /// Widen (or copy) to `f64`.
    fn as_f64(self) -> f64;

    /// Narrow (or copy) to `f32`. Binary STL and PLY store this width.
    fn as_f32(self) -> f32;

    /// Tolerance for checked geometric preconditions
    /// (orthonormal rotation bases).
    fn tolerance() -> Self;

    /// Convert an unsigned count into this precision.
    #[allow(clippy::cast_precision_loss)]
    // Precision loss: tessellation counts are far below 2^24
    fn from_count(value: usize) -> Self {
        Self::from_float(value as f64)
    }
}

impl Real for f32 {
    #[allow(clippy::cast_possible_truncation)]
    // Truncation: narrowing is the purpose of this conversion
    fn from_float(value: f64) -> Self {
        value as f32
    }

    fn as_f64(self) -> f64 {
        f64::from(self)
    }

    fn as_f32(self) -> f32 {
        self
    }

    fn tolerance() -> Self {
        1e-4
    }
}

impl Real for f64 {
    fn from_float(value: f64) -> Self {
        value
    }

    fn as_f64(self) -> f64 {
        self
    }

    #[allow(clippy::cast_possible_truncation)]
    // Truncation: f64 to f32 is intentional for 32-bit file formats
    fn as_f32(self) -> f32 {
        self as f32
    }

    fn tolerance() -> Self {
        1e-9
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn f32_roundtrip_through_f64() {
        let v = f32::from_float(1.25);
        assert!((v.as_f64() - 1.25).abs() < f64::EPSILON);
    }

    #[test]
    fn f64_narrows_as_f32() {
        let v = 0.1_f64;
        assert!((v.as_f32() - 0.1_f32).abs() < f32::EPSILON);
    }

    #[test]
    fn from_count_is_exact_for_small_counts() {
        assert!((f64::from_count(40) - 40.0).abs() < f64::EPSILON);
        assert!((f32::from_count(7) - 7.0).abs() < f32::EPSILON);
    }
}
