use crate::error::{GeometryError, Result};
use crate::math::vector::{any_orthonormal, is_finite};
use crate::math::{Point2, Point3, Tolerance, Vector3};

/// Classification of a point relative to a plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointPlaneClassification {
    /// Point is on the positive side (in the direction of the normal).
    Front,
    /// Point is on the negative side (opposite the normal).
    Back,
    /// Point lies on the plane (within tolerance).
    On,
}

/// An infinite plane in 3D space.
///
/// Stored as a unit normal `n` and signed offset `d` with `n . p = d` for
/// every point `p` on the plane. Two in-plane directions (`u_dir`, `v_dir`)
/// with `u_dir x v_dir = n` give the parametric form
/// `P(u, v) = origin + u * u_dir + v * v_dir`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    normal: Vector3,
    offset: f64,
    u_dir: Vector3,
    v_dir: Vector3,
}

impl Plane {
    /// Creates a plane through `point` with the given normal.
    ///
    /// # Errors
    ///
    /// Returns an error if the normal is zero-length or an input is non-finite.
    pub fn from_point_normal(point: &Point3, normal: &Vector3, tol: Tolerance) -> Result<Self> {
        if !is_finite(&point.coords) {
            return Err(GeometryError::NonFinite("plane point").into());
        }
        let normal = unit_normal(normal, tol)?;
        Ok(Self::from_unit(normal, normal.dot(&point.coords)))
    }

    /// Creates the plane `n . p = offset`.
    ///
    /// The normal need not be unit length; the offset is rescaled with it.
    ///
    /// # Errors
    ///
    /// Returns an error if the normal is zero-length or an input is non-finite.
    pub fn from_normal_offset(normal: &Vector3, offset: f64, tol: Tolerance) -> Result<Self> {
        if !offset.is_finite() {
            return Err(GeometryError::NonFinite("plane offset").into());
        }
        let len = normal.norm();
        let unit = unit_normal(normal, tol)?;
        Ok(Self::from_unit(unit, offset / len))
    }

    /// Creates the plane through three points, wound counter-clockwise
    /// around the resulting normal.
    ///
    /// # Errors
    ///
    /// Returns an error if the points are collinear or coincident.
    pub fn from_points(a: &Point3, b: &Point3, c: &Point3, tol: Tolerance) -> Result<Self> {
        let n = (b - a).cross(&(c - a));
        let scale = (b - a).norm_squared().max((c - a).norm_squared());
        if n.norm() <= tol.epsilon * scale.max(tol.epsilon) {
            return Err(GeometryError::Degenerate("plane points are collinear".into()).into());
        }
        Self::from_point_normal(a, &n, tol)
    }

    fn from_unit(normal: Vector3, offset: f64) -> Self {
        let u_dir = any_orthonormal(&normal);
        let v_dir = normal.cross(&u_dir);
        Self {
            normal,
            offset,
            u_dir,
            v_dir,
        }
    }

    /// Returns the unit normal vector of the plane.
    #[must_use]
    pub fn normal(&self) -> &Vector3 {
        &self.normal
    }

    /// Returns the signed distance of the plane from the world origin.
    #[must_use]
    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// The point on the plane closest to the world origin.
    #[must_use]
    pub fn origin(&self) -> Point3 {
        Point3::from(self.normal * self.offset)
    }

    /// Returns the U direction vector.
    #[must_use]
    pub fn u_dir(&self) -> &Vector3 {
        &self.u_dir
    }

    /// Returns the V direction vector.
    #[must_use]
    pub fn v_dir(&self) -> &Vector3 {
        &self.v_dir
    }

    /// Evaluates the parametric form at `(u, v)`.
    #[must_use]
    pub fn point_at(&self, u: f64, v: f64) -> Point3 {
        self.origin() + self.u_dir * u + self.v_dir * v
    }

    /// In-plane `(u, v)` coordinates of the projection of `point`.
    #[must_use]
    pub fn to_local(&self, point: &Point3) -> Point2 {
        let rel = point - self.origin();
        Point2::new(rel.dot(&self.u_dir), rel.dot(&self.v_dir))
    }

    /// Signed distance from a point to the plane.
    /// Positive = on the normal side, negative = opposite.
    #[must_use]
    pub fn signed_distance(&self, point: &Point3) -> f64 {
        self.normal.dot(&point.coords) - self.offset
    }

    /// Orthogonal projection of a point onto the plane.
    #[must_use]
    pub fn project_point(&self, point: &Point3) -> Point3 {
        point - self.normal * self.signed_distance(point)
    }

    /// The same plane with the normal reversed.
    #[must_use]
    pub fn flipped(&self) -> Self {
        Self {
            normal: -self.normal,
            offset: -self.offset,
            u_dir: self.v_dir,
            v_dir: self.u_dir,
        }
    }

    /// Classifies a point relative to the plane.
    #[must_use]
    pub fn classify_point(&self, point: &Point3, tol: Tolerance) -> PointPlaneClassification {
        let dist = self.signed_distance(point);
        if dist > tol.epsilon {
            PointPlaneClassification::Front
        } else if dist < -tol.epsilon {
            PointPlaneClassification::Back
        } else {
            PointPlaneClassification::On
        }
    }

    /// Returns `true` if the point lies on the plane within tolerance.
    #[must_use]
    pub fn contains_point(&self, point: &Point3, tol: Tolerance) -> bool {
        self.classify_point(point, tol) == PointPlaneClassification::On
    }
}

fn unit_normal(normal: &Vector3, tol: Tolerance) -> Result<Vector3> {
    if !is_finite(normal) {
        return Err(GeometryError::NonFinite("plane normal").into());
    }
    let len = normal.norm();
    if len <= tol.epsilon {
        return Err(GeometryError::Degenerate("plane normal is zero-length".into()).into());
    }
    Ok(*normal / len)
}
