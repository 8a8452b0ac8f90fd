use crate::geometry::{Plane, Ray3, Segment3};
use crate::math::{Point3, Tolerance, Vector3};

use super::{Hit, Intersection};

/// Line of intersection between two planes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaneLine {
    /// Point on the line closest to the world origin.
    pub origin: Point3,
    /// Unit direction `a.normal x b.normal`.
    pub direction: Vector3,
}

impl PlaneLine {
    #[must_use]
    pub fn at(&self, t: f64) -> Point3 {
        self.origin + self.direction * t
    }
}

/// Intersects a ray with a plane.
///
/// A ray parallel to the plane reports [`Intersection::Coincident`] when it
/// lies in the plane and [`Intersection::None`] otherwise.
#[must_use]
pub fn ray_plane(ray: &Ray3, plane: &Plane, tol: Tolerance) -> Intersection<Hit<3>> {
    let d = ray.direction();
    let denom = plane.normal().dot(d);
    let dist = plane.signed_distance(ray.origin());

    if denom.abs() <= tol.epsilon * d.norm() {
        return if dist.abs() <= tol.epsilon {
            Intersection::Coincident
        } else {
            Intersection::None
        };
    }

    let t = -dist / denom;
    if t < -tol.epsilon / d.norm() {
        return Intersection::None;
    }
    let t = t.max(0.0);
    Intersection::Point(Hit { point: ray.at(t), t })
}

/// Intersects a segment with a plane.
///
/// A segment lying in the plane is returned whole as the overlap.
#[must_use]
pub fn segment_plane(seg: &Segment3, plane: &Plane, tol: Tolerance) -> Intersection<Hit<3>, Segment3> {
    let d0 = plane.signed_distance(&seg.start);
    let d1 = plane.signed_distance(&seg.end);
    let on0 = d0.abs() <= tol.epsilon;
    let on1 = d1.abs() <= tol.epsilon;

    if seg.is_degenerate(tol) {
        return if on0 {
            Intersection::Point(Hit { point: seg.start, t: 0.0 })
        } else {
            Intersection::None
        };
    }

    match (on0, on1) {
        (true, true) => return Intersection::Overlap(*seg),
        (true, false) => return Intersection::Point(Hit { point: seg.start, t: 0.0 }),
        (false, true) => return Intersection::Point(Hit { point: seg.end, t: 1.0 }),
        (false, false) => {}
    }

    // Both endpoints strictly on the same side.
    if d0.signum() == d1.signum() {
        return Intersection::None;
    }

    let t = (d0 / (d0 - d1)).clamp(0.0, 1.0);
    Intersection::Point(Hit { point: seg.at(t), t })
}

/// Intersects two planes.
///
/// Returns the line of intersection as the overlap, [`Intersection::None`]
/// for distinct parallel planes, or [`Intersection::Coincident`] when the
/// planes are the same (normals may be opposed).
#[must_use]
pub fn plane_plane(a: &Plane, b: &Plane, tol: Tolerance) -> Intersection<(), PlaneLine> {
    let n1 = a.normal();
    let n2 = b.normal();
    let u = n1.cross(n2);
    let len_sq = u.norm_squared();

    if len_sq <= tol.squared() {
        // Opposed normals describe the same plane when the offsets are negated.
        let same = if n1.dot(n2) > 0.0 {
            (a.offset() - b.offset()).abs()
        } else {
            (a.offset() + b.offset()).abs()
        };
        return if same <= tol.epsilon {
            Intersection::Coincident
        } else {
            Intersection::None
        };
    }

    let origin = (n2.cross(&u) * a.offset() + u.cross(n1) * b.offset()) / len_sq;
    Intersection::Overlap(PlaneLine {
        origin: Point3::from(origin),
        direction: u / len_sq.sqrt(),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    fn v(x: f64, y: f64, z: f64) -> Vector3 {
        Vector3::new(x, y, z)
    }

    fn xy_plane(z: f64) -> Plane {
        Plane::from_point_normal(&p(0.0, 0.0, z), &Vector3::z(), Tolerance::default()).unwrap()
    }

    // ── ray_plane ──

    #[test]
    fn ray_hits_plane() {
        let tol = Tolerance::default();
        let ray = Ray3::new(p(1.0, 2.0, 5.0), v(0.0, 0.0, -2.0), tol).unwrap();
        let hit = *ray_plane(&ray, &xy_plane(1.0), tol).point().unwrap();
        assert!((hit.t - 2.0).abs() < 1e-12);
        assert_relative_eq!(hit.point, p(1.0, 2.0, 1.0), epsilon = 1e-12);
    }

    #[test]
    fn ray_pointing_away_misses() {
        let tol = Tolerance::default();
        let ray = Ray3::new(p(0.0, 0.0, 5.0), Vector3::z(), tol).unwrap();
        assert!(ray_plane(&ray, &xy_plane(0.0), tol).is_none());
    }

    #[test]
    fn parallel_ray_off_plane_misses() {
        let tol = Tolerance::default();
        let ray = Ray3::new(p(0.0, 0.0, 1.0), Vector3::x(), tol).unwrap();
        assert!(ray_plane(&ray, &xy_plane(0.0), tol).is_none());
    }

    #[test]
    fn ray_in_plane_is_coincident() {
        let tol = Tolerance::default();
        let ray = Ray3::new(p(0.0, 0.0, 0.0), v(1.0, 1.0, 0.0), tol).unwrap();
        assert!(matches!(ray_plane(&ray, &xy_plane(0.0), tol), Intersection::Coincident));
    }

    // ── segment_plane ──

    #[test]
    fn segment_crossing_plane() {
        let tol = Tolerance::default();
        let seg = Segment3::new(p(0.0, 0.0, -1.0), p(2.0, 0.0, 3.0));
        let hit = *segment_plane(&seg, &xy_plane(0.0), tol).point().unwrap();
        assert!((hit.t - 0.25).abs() < 1e-12);
        assert_relative_eq!(hit.point, p(0.5, 0.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn segment_short_of_plane() {
        let tol = Tolerance::default();
        let seg = Segment3::new(p(0.0, 0.0, 1.0), p(0.0, 0.0, 3.0));
        assert!(segment_plane(&seg, &xy_plane(0.0), tol).is_none());
    }

    #[test]
    fn segment_touching_and_lying_in_plane() {
        let tol = Tolerance::default();
        let touching = Segment3::new(p(0.0, 0.0, 2.0), p(0.0, 0.0, 0.0));
        let hit = *segment_plane(&touching, &xy_plane(0.0), tol).point().unwrap();
        assert!((hit.t - 1.0).abs() < 1e-12);

        let lying = Segment3::new(p(0.0, 0.0, 0.0), p(4.0, 1.0, 0.0));
        assert_eq!(segment_plane(&lying, &xy_plane(0.0), tol).overlap(), Some(&lying));
    }

    // ── plane_plane ──

    #[test]
    fn perpendicular_planes_meet_on_axis() {
        let tol = Tolerance::default();
        let xz = Plane::from_point_normal(&p(0.0, 3.0, 0.0), &Vector3::y(), tol).unwrap();
        let line = *plane_plane(&xy_plane(2.0), &xz, tol).overlap().unwrap();
        assert!(line.direction.x.abs() > 1.0 - 1e-12);
        assert_relative_eq!(line.origin, p(0.0, 3.0, 2.0), epsilon = 1e-12);
        assert!(xz.contains_point(&line.at(7.0), tol));
    }

    #[test]
    fn oblique_planes_line_lies_on_both() {
        let tol = Tolerance::default();
        let a = Plane::from_point_normal(&p(1.0, 0.0, 0.0), &v(1.0, 2.0, 3.0), tol).unwrap();
        let b = Plane::from_point_normal(&p(0.0, -1.0, 2.0), &v(-2.0, 0.5, 1.0), tol).unwrap();
        let line = *plane_plane(&a, &b, tol).overlap().unwrap();
        for t in [-3.0, 0.0, 5.0] {
            let q = line.at(t);
            assert!(a.contains_point(&q, tol));
            assert!(b.contains_point(&q, tol));
        }
    }

    #[test]
    fn parallel_and_coincident_planes() {
        let tol = Tolerance::default();
        assert!(plane_plane(&xy_plane(0.0), &xy_plane(5.0), tol).is_none());
        assert!(matches!(plane_plane(&xy_plane(1.0), &xy_plane(1.0), tol), Intersection::Coincident));
        assert!(matches!(
            plane_plane(&xy_plane(1.0), &xy_plane(1.0).flipped(), tol),
            Intersection::Coincident
        ));
    }
}
