use crate::error::{GeometryError, Result};
use crate::math::{Point3, Tolerance, Vector3};

use super::{Plane, Segment3};

/// A triangle in 3D space with vertices `a`, `b`, `c`.
///
/// Counter-clockwise winding around [`Triangle::unit_normal`]. Barycentric
/// coordinates are reported as `(wa, wb, wc)` with `wa + wb + wc = 1`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub a: Point3,
    pub b: Point3,
    pub c: Point3,
}

impl Triangle {
    #[must_use]
    pub fn new(a: Point3, b: Point3, c: Point3) -> Self {
        Self { a, b, c }
    }

    /// Unnormalized normal `(b - a) x (c - a)`; its length is twice the area.
    #[must_use]
    pub fn scaled_normal(&self) -> Vector3 {
        (self.b - self.a).cross(&(self.c - self.a))
    }

    #[must_use]
    pub fn area(&self) -> f64 {
        0.5 * self.scaled_normal().norm()
    }

    #[must_use]
    pub fn centroid(&self) -> Point3 {
        Point3::from((self.a.coords + self.b.coords + self.c.coords) / 3.0)
    }

    /// The three edges `ab`, `bc`, `ca`.
    #[must_use]
    pub fn edges(&self) -> [Segment3; 3] {
        [
            Segment3::new(self.a, self.b),
            Segment3::new(self.b, self.c),
            Segment3::new(self.c, self.a),
        ]
    }

    /// Returns `true` if the vertices are collinear or coincident within
    /// tolerance.
    ///
    /// The test is relative: twice the area is compared against `eps` times
    /// the squared longest edge, so it is independent of the triangle's scale.
    #[must_use]
    pub fn is_degenerate(&self, tol: Tolerance) -> bool {
        let longest_sq = (self.b - self.a)
            .norm_squared()
            .max((self.c - self.b).norm_squared())
            .max((self.a - self.c).norm_squared());
        if longest_sq <= tol.squared() {
            return true;
        }
        self.scaled_normal().norm() <= tol.epsilon * longest_sq
    }

    /// Unit normal.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::Degenerate`] for a collinear triangle.
    pub fn unit_normal(&self, tol: Tolerance) -> Result<Vector3> {
        self.ensure_valid(tol)?;
        Ok(self.scaled_normal().normalize())
    }

    /// Supporting plane.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::Degenerate`] for a collinear triangle.
    pub fn plane(&self, tol: Tolerance) -> Result<Plane> {
        Plane::from_point_normal(&self.a, &self.unit_normal(tol)?, tol)
    }

    /// Barycentric coordinates of the projection of `p` onto the triangle's
    /// plane. Weights may be negative when the projection lies outside.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::Degenerate`] for a collinear triangle.
    pub fn barycentric(&self, p: &Point3, tol: Tolerance) -> Result<Vector3> {
        self.ensure_valid(tol)?;
        let v0 = self.b - self.a;
        let v1 = self.c - self.a;
        let v2 = p - self.a;
        let d00 = v0.dot(&v0);
        let d01 = v0.dot(&v1);
        let d11 = v1.dot(&v1);
        let d20 = v2.dot(&v0);
        let d21 = v2.dot(&v1);
        let denom = d00 * d11 - d01 * d01;
        let wb = (d11 * d20 - d01 * d21) / denom;
        let wc = (d00 * d21 - d01 * d20) / denom;
        Ok(Vector3::new(1.0 - wb - wc, wb, wc))
    }

    /// Point with barycentric weights `w`.
    #[must_use]
    pub fn from_barycentric(&self, w: &Vector3) -> Point3 {
        Point3::from(self.a.coords * w.x + self.b.coords * w.y + self.c.coords * w.z)
    }

    pub(crate) fn ensure_valid(&self, tol: Tolerance) -> Result<()> {
        if self.is_degenerate(tol) {
            return Err(GeometryError::Degenerate("triangle vertices are collinear".into()).into());
        }
        Ok(())
    }
}

/// Returns `true` if every barycentric weight is in `[-eps, 1 + eps]`.
#[must_use]
pub(crate) fn barycentric_inside(w: &Vector3, tol: Tolerance) -> bool {
    w.iter().all(|c| *c >= -tol.epsilon && *c <= 1.0 + tol.epsilon)
}
