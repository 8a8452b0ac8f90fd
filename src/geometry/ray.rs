use crate::error::{GeometryError, Result};
use crate::math::vector::{is_finite, try_normalize};
use crate::math::{Point, Tolerance, VectorN};

/// A half-line defined by an origin point and a direction vector.
///
/// The parametric form is: `P(t) = origin + t * direction`, `t >= 0`.
/// The direction is not required to be unit length; every `t` reported by
/// this crate is in units of the stored direction's length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray<const D: usize> {
    origin: Point<D>,
    direction: VectorN<D>,
}

/// 2D ray.
pub type Ray2 = Ray<2>;

/// 3D ray.
pub type Ray3 = Ray<3>;

impl<const D: usize> Ray<D> {
    /// Creates a new ray from an origin and direction.
    ///
    /// # Errors
    ///
    /// Returns an error if any component is non-finite or the direction
    /// is zero-length.
    pub fn new(origin: Point<D>, direction: VectorN<D>, tol: Tolerance) -> Result<Self> {
        if !is_finite(&origin.coords) || !is_finite(&direction) {
            return Err(GeometryError::NonFinite("ray").into());
        }
        if direction.norm() <= tol.epsilon {
            return Err(GeometryError::Degenerate("ray direction is zero-length".into()).into());
        }
        Ok(Self { origin, direction })
    }

    /// Returns the origin point of the ray.
    #[must_use]
    pub fn origin(&self) -> &Point<D> {
        &self.origin
    }

    /// Returns the direction vector of the ray.
    #[must_use]
    pub fn direction(&self) -> &VectorN<D> {
        &self.direction
    }

    /// Point at parameter `t`.
    #[must_use]
    pub fn at(&self, t: f64) -> Point<D> {
        self.origin + self.direction * t
    }

    /// The same ray with a unit-length direction.
    ///
    /// # Errors
    ///
    /// Returns an error if the direction is shorter than `tol`.
    pub fn normalized(&self, tol: Tolerance) -> Result<Self> {
        Ok(Self {
            origin: self.origin,
            direction: try_normalize(&self.direction, tol)?,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::math::{Point2, Point3, Vector2, Vector3};

    #[test]
    fn parameter_is_in_direction_units() {
        let tol = Tolerance::default();
        let ray = Ray3::new(Point3::origin(), Vector3::new(0.0, 0.0, 2.0), tol).unwrap();
        assert_relative_eq!(ray.at(1.5), Point3::new(0.0, 0.0, 3.0));

        let unit = ray.normalized(tol).unwrap();
        assert_relative_eq!(unit.at(1.5), Point3::new(0.0, 0.0, 1.5));
    }

    #[test]
    fn zero_direction_is_rejected() {
        let tol = Tolerance::default();
        let err = Ray2::new(Point2::origin(), Vector2::zeros(), tol).unwrap_err();
        assert!(err.is_degenerate());
        assert!(Ray2::new(Point2::new(f64::NAN, 0.0), Vector2::x(), tol).is_err());
    }
}
