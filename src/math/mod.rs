pub mod matrix;
pub mod quaternion;
pub mod scalar;
pub mod vector;

/// 2D point type.
pub type Point2 = nalgebra::Point2<f64>;

/// 3D point type.
pub type Point3 = nalgebra::Point3<f64>;

/// Point type generic over the dimension.
pub type Point<const D: usize> = nalgebra::Point<f64, D>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;

/// 3D vector type.
pub type Vector3 = nalgebra::Vector3<f64>;

/// 4D vector type.
pub type Vector4 = nalgebra::Vector4<f64>;

/// Vector type generic over the dimension.
pub type VectorN<const D: usize> = nalgebra::SVector<f64, D>;

/// 2x2 linear map.
pub type Matrix2 = nalgebra::Matrix2<f64>;

/// 3x3 linear map.
pub type Matrix3 = nalgebra::Matrix3<f64>;

/// 4x4 transformation matrix.
pub type Matrix4 = nalgebra::Matrix4<f64>;

/// 2D affine map in homogeneous 3x3 form (last row `[0, 0, 1]`).
pub type Affine2 = nalgebra::Matrix3<f64>;

/// Quaternion stored as `(x, y, z, w)`.
pub type Quaternion = nalgebra::Quaternion<f64>;

/// Default geometric tolerance used by [`Tolerance::default`].
pub const TOLERANCE: f64 = 1e-6;

/// Numeric threshold below which two values are treated as equal.
///
/// Every tolerance-sensitive operation takes one of these explicitly, so
/// callers with different precision needs never share mutable state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerance {
    /// Absolute epsilon, scaled by magnitude where a comparison is relative.
    pub epsilon: f64,
}

impl Tolerance {
    /// Creates a tolerance with the given epsilon.
    #[must_use]
    pub const fn new(epsilon: f64) -> Self {
        Self { epsilon }
    }

    /// Relative comparison: `|a - b| <= eps * max(1, |a|, |b|)`.
    #[must_use]
    pub fn approx_eq(self, a: f64, b: f64) -> bool {
        (a - b).abs() <= self.scaled(a.abs().max(b.abs()))
    }

    /// Absolute comparison against zero.
    #[must_use]
    pub fn is_zero(self, a: f64) -> bool {
        a.abs() <= self.epsilon
    }

    /// Epsilon scaled by a magnitude, never below the absolute epsilon.
    #[must_use]
    pub fn scaled(self, magnitude: f64) -> f64 {
        self.epsilon * magnitude.abs().max(1.0)
    }

    /// Epsilon squared, for comparisons on squared lengths.
    #[must_use]
    pub fn squared(self) -> f64 {
        self.epsilon * self.epsilon
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::new(TOLERANCE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_compare_scales_with_magnitude() {
        let tol = Tolerance::default();
        assert!(tol.approx_eq(1.0e9, 1.0e9 + 100.0));
        assert!(!tol.approx_eq(1.0, 1.0 + 1e-3));
        assert!(tol.approx_eq(0.0, 1e-7));
    }

    #[test]
    fn custom_epsilon_is_independent() {
        let loose = Tolerance::new(1e-2);
        let tight = Tolerance::new(1e-9);
        assert!(loose.is_zero(5e-3));
        assert!(!tight.is_zero(5e-3));
    }
}
