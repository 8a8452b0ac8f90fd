use crate::geometry::{OrientedRect, Plane, Ray, Rect, Segment};
use crate::math::{Point, Point2, Point3, Tolerance, VectorN};

use super::ClosestPoint;

/// Nearest point on the unbounded line `origin + t * direction`.
///
/// A zero direction collapses the line to `origin` (`t = 0`).
#[must_use]
pub fn point_line<const D: usize>(p: &Point<D>, origin: &Point<D>, direction: &VectorN<D>) -> ClosestPoint<D> {
    let len_sq = direction.norm_squared();
    if len_sq == 0.0 {
        return ClosestPoint {
            point: *origin,
            parameter: 0.0,
        };
    }
    let t = (p - origin).dot(direction) / len_sq;
    ClosestPoint {
        point: origin + direction * t,
        parameter: t,
    }
}

/// Nearest point on a segment; the parameter is clamped to `[0, 1]`.
#[must_use]
pub fn point_segment<const D: usize>(p: &Point<D>, seg: &Segment<D>, tol: Tolerance) -> ClosestPoint<D> {
    if seg.is_degenerate(tol) {
        return ClosestPoint {
            point: seg.start,
            parameter: 0.0,
        };
    }
    let t = point_line(p, &seg.start, &seg.direction()).parameter.clamp(0.0, 1.0);
    ClosestPoint {
        point: seg.at(t),
        parameter: t,
    }
}

/// Nearest point on a ray; the parameter is clamped to `t >= 0`.
#[must_use]
pub fn point_ray<const D: usize>(p: &Point<D>, ray: &Ray<D>) -> ClosestPoint<D> {
    let t = point_line(p, ray.origin(), ray.direction()).parameter.max(0.0);
    ClosestPoint {
        point: ray.at(t),
        parameter: t,
    }
}

/// Orthogonal projection onto a plane; the parameter is the signed distance
/// of `p` from the plane.
#[must_use]
pub fn point_plane(p: &Point3, plane: &Plane) -> ClosestPoint<3> {
    ClosestPoint {
        point: plane.project_point(p),
        parameter: plane.signed_distance(p),
    }
}

/// Nearest point in a filled axis-aligned rectangle.
#[must_use]
pub fn point_rect(p: &Point2, rect: &Rect) -> Point2 {
    Point2::new(
        p.x.clamp(rect.min().x, rect.max().x),
        p.y.clamp(rect.min().y, rect.max().y),
    )
}

/// Nearest point in a filled oriented rectangle.
#[must_use]
pub fn point_oriented_rect(p: &Point2, rect: &OrientedRect) -> Point2 {
    let local = point_rect(&rect.to_local(p), &rect.local_rect());
    rect.to_world(&local)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::f64::consts::FRAC_PI_2;

    use approx::assert_relative_eq;

    use super::*;
    use crate::math::{Vector2, Vector3};

    #[test]
    fn segment_parameter_is_clamped() {
        let tol = Tolerance::default();
        let seg = Segment::new(Point2::new(0.0, 0.0), Point2::new(4.0, 0.0));
        let mid = point_segment(&Point2::new(1.0, 3.0), &seg, tol);
        assert!((mid.parameter - 0.25).abs() < 1e-12);
        assert_relative_eq!(mid.point, Point2::new(1.0, 0.0));

        let before = point_segment(&Point2::new(-2.0, 1.0), &seg, tol);
        assert!(before.parameter.abs() < 1e-12);
        let after = point_segment(&Point2::new(9.0, 1.0), &seg, tol);
        assert!((after.parameter - 1.0).abs() < 1e-12);
    }

    #[test]
    fn zero_length_segment_is_its_start() {
        let tol = Tolerance::default();
        let seg = Segment::new(Point3::new(1.0, 1.0, 1.0), Point3::new(1.0, 1.0, 1.0));
        let cp = point_segment(&Point3::origin(), &seg, tol);
        assert_eq!(cp.point, seg.start);
    }

    #[test]
    fn ray_and_line_differ_behind_origin() {
        let tol = Tolerance::default();
        let ray = Ray::new(Point2::new(0.0, 0.0), Vector2::new(2.0, 0.0), tol).unwrap();
        let behind = Point2::new(-3.0, 1.0);
        let on_ray = point_ray(&behind, &ray);
        assert!(on_ray.parameter.abs() < 1e-12);
        let on_line = point_line(&behind, ray.origin(), ray.direction());
        assert!((on_line.parameter + 1.5).abs() < 1e-12);
        assert_relative_eq!(on_line.point, Point2::new(-3.0, 0.0));
    }

    #[test]
    fn plane_projection_reports_signed_distance() {
        let tol = Tolerance::default();
        let plane = Plane::from_point_normal(&Point3::new(0.0, 0.0, 1.0), &Vector3::z(), tol).unwrap();
        let cp = point_plane(&Point3::new(2.0, 3.0, -1.0), &plane);
        assert_relative_eq!(cp.point, Point3::new(2.0, 3.0, 1.0));
        assert!((cp.parameter + 2.0).abs() < 1e-12);
    }

    #[test]
    fn rect_queries() {
        let rect = Rect::new(Point2::new(0.0, 0.0), Point2::new(2.0, 1.0));
        assert_eq!(point_rect(&Point2::new(3.0, -1.0), &rect), Point2::new(2.0, 0.0));
        assert_eq!(point_rect(&Point2::new(1.0, 0.5), &rect), Point2::new(1.0, 0.5));

        let upright = OrientedRect::new(Point2::origin(), Vector2::new(2.0, 1.0), FRAC_PI_2);
        let cp = point_oriented_rect(&Point2::new(5.0, 0.0), &upright);
        assert_relative_eq!(cp, Point2::new(1.0, 0.0), epsilon = 1e-12);
    }
}
