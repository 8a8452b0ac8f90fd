use crate::closest;
use crate::geometry::{Ray2, Segment, Segment2, Segment3};
use crate::math::vector::perp_dot;
use crate::math::{Point, Tolerance};

use super::{Intersection, PairHit};

/// Bounded segment-segment intersection in 2D.
///
/// Returns a [`PairHit`] with `t` on `a` and `u` on `b`, an
/// [`Intersection::Overlap`] with the shared sub-segment (oriented along `a`)
/// when the segments are collinear and overlap, or [`Intersection::None`].
/// Zero-length segments are treated as points.
#[must_use]
pub fn segment_segment_2d(a: &Segment2, b: &Segment2, tol: Tolerance) -> Intersection<PairHit<2>, Segment2> {
    if let Some(result) = degenerate_pair(a, b, tol) {
        return result;
    }

    let d1 = a.direction();
    let d2 = b.direction();
    let len1 = d1.norm();
    let len2 = d2.norm();
    let w = b.start - a.start;

    let cross = perp_dot(&d1, &d2);
    if cross.abs() <= tol.epsilon * len1 * len2 {
        // Parallel: only collinear segments can meet.
        if perp_dot(&d1, &w).abs() / len1 > tol.epsilon {
            return Intersection::None;
        }
        return collinear_overlap(a, b, tol);
    }

    let t = perp_dot(&w, &d2) / cross;
    let u = perp_dot(&w, &d1) / cross;
    if !in_unit_range(t, tol.epsilon / len1) || !in_unit_range(u, tol.epsilon / len2) {
        return Intersection::None;
    }
    let t = t.clamp(0.0, 1.0);
    Intersection::Point(PairHit {
        point: a.at(t),
        t,
        u: u.clamp(0.0, 1.0),
    })
}

/// Ray-segment intersection in 2D.
///
/// `t` is the ray parameter (in units of the ray direction's length), `u`
/// the segment parameter. A collinear overlap is returned as the shared
/// sub-segment, oriented along the ray.
#[must_use]
pub fn ray_segment_2d(ray: &Ray2, seg: &Segment2, tol: Tolerance) -> Intersection<PairHit<2>, Segment2> {
    if seg.is_degenerate(tol) {
        let cp = closest::point_ray(&seg.start, ray);
        if (cp.point - seg.start).norm() <= tol.epsilon {
            return Intersection::Point(PairHit {
                point: seg.start,
                t: cp.parameter,
                u: 0.0,
            });
        }
        return Intersection::None;
    }

    let o = *ray.origin();
    let d1 = *ray.direction();
    let d2 = seg.direction();
    let len1 = d1.norm();
    let len2 = d2.norm();
    let w = seg.start - o;
    let eps_t = tol.epsilon / len1;

    let cross = perp_dot(&d1, &d2);
    if cross.abs() <= tol.epsilon * len1 * len2 {
        if perp_dot(&d1, &w).abs() / len1 > tol.epsilon {
            return Intersection::None;
        }
        let len1_sq = len1 * len1;
        let t0 = w.dot(&d1) / len1_sq;
        let t1 = (seg.end - o).dot(&d1) / len1_sq;
        let lo = t0.min(t1).max(0.0);
        let hi = t0.max(t1);
        if hi < -eps_t {
            return Intersection::None;
        }
        if hi - lo <= eps_t {
            let point = ray.at(lo);
            return Intersection::Point(PairHit {
                point,
                t: lo,
                u: parameter_on(seg, &point),
            });
        }
        return Intersection::Overlap(Segment2::new(ray.at(lo), ray.at(hi)));
    }

    let t = perp_dot(&w, &d2) / cross;
    let u = perp_dot(&w, &d1) / cross;
    if t < -eps_t || !in_unit_range(u, tol.epsilon / len2) {
        return Intersection::None;
    }
    let t = t.max(0.0);
    Intersection::Point(PairHit {
        point: ray.at(t),
        t,
        u: u.clamp(0.0, 1.0),
    })
}

/// Ray-ray intersection in 2D.
///
/// Collinear rays pointing the same way share a half-line and report
/// [`Intersection::Coincident`]; collinear rays facing each other overlap on
/// the segment between their origins.
#[must_use]
pub fn ray_ray_2d(a: &Ray2, b: &Ray2, tol: Tolerance) -> Intersection<PairHit<2>, Segment2> {
    let d1 = *a.direction();
    let d2 = *b.direction();
    let len1 = d1.norm();
    let len2 = d2.norm();
    let w = b.origin() - a.origin();

    let cross = perp_dot(&d1, &d2);
    if cross.abs() <= tol.epsilon * len1 * len2 {
        if perp_dot(&d1, &w).abs() / len1 > tol.epsilon {
            return Intersection::None;
        }
        if d1.dot(&d2) > 0.0 {
            return Intersection::Coincident;
        }
        let s = w.dot(&d1) / (len1 * len1);
        let eps_t = tol.epsilon / len1;
        return if s > eps_t {
            Intersection::Overlap(Segment2::new(*a.origin(), *b.origin()))
        } else if s >= -eps_t {
            Intersection::Point(PairHit {
                point: *a.origin(),
                t: 0.0,
                u: 0.0,
            })
        } else {
            Intersection::None
        };
    }

    let t = perp_dot(&w, &d2) / cross;
    let u = perp_dot(&w, &d1) / cross;
    if t < -tol.epsilon / len1 || u < -tol.epsilon / len2 {
        return Intersection::None;
    }
    let t = t.max(0.0);
    Intersection::Point(PairHit {
        point: a.at(t),
        t,
        u: u.max(0.0),
    })
}

/// Bounded segment-segment intersection in 3D.
///
/// Non-parallel segments intersect when their closest points coincide
/// within tolerance; collinear segments may overlap on a sub-segment.
#[must_use]
pub fn segment_segment_3d(a: &Segment3, b: &Segment3, tol: Tolerance) -> Intersection<PairHit<3>, Segment3> {
    if let Some(result) = degenerate_pair(a, b, tol) {
        return result;
    }

    let d1 = a.direction();
    let d2 = b.direction();
    let len1 = d1.norm();
    let len2 = d2.norm();

    if d1.cross(&d2).norm() <= tol.epsilon * len1 * len2 {
        let w = b.start - a.start;
        if w.cross(&d1).norm() / len1 > tol.epsilon {
            return Intersection::None;
        }
        return collinear_overlap(a, b, tol);
    }

    let pair = closest::segment_segment(a, b, tol);
    if (pair.point_a - pair.point_b).norm() <= tol.epsilon {
        Intersection::Point(PairHit {
            point: pair.point_a,
            t: pair.s,
            u: pair.t,
        })
    } else {
        Intersection::None
    }
}

/// Resolves the cases where either segment has zero length.
fn degenerate_pair<const D: usize>(
    a: &Segment<D>,
    b: &Segment<D>,
    tol: Tolerance,
) -> Option<Intersection<PairHit<D>, Segment<D>>> {
    let result = match (a.is_degenerate(tol), b.is_degenerate(tol)) {
        (false, false) => return None,
        (true, true) => {
            if (a.start - b.start).norm() <= tol.epsilon {
                Intersection::Point(PairHit {
                    point: a.start,
                    t: 0.0,
                    u: 0.0,
                })
            } else {
                Intersection::None
            }
        }
        (true, false) => match point_on_segment(&a.start, b, tol) {
            Some(u) => Intersection::Point(PairHit {
                point: a.start,
                t: 0.0,
                u,
            }),
            None => Intersection::None,
        },
        (false, true) => match point_on_segment(&b.start, a, tol) {
            Some(t) => Intersection::Point(PairHit {
                point: b.start,
                t,
                u: 0.0,
            }),
            None => Intersection::None,
        },
    };
    Some(result)
}

/// Overlap of two collinear, non-degenerate segments.
fn collinear_overlap<const D: usize>(
    a: &Segment<D>,
    b: &Segment<D>,
    tol: Tolerance,
) -> Intersection<PairHit<D>, Segment<D>> {
    let d = a.direction();
    let len_sq = d.norm_squared();
    let t0 = (b.start - a.start).dot(&d) / len_sq;
    let t1 = (b.end - a.start).dot(&d) / len_sq;
    let lo = t0.min(t1).max(0.0);
    let hi = t0.max(t1).min(1.0);
    let eps_t = tol.epsilon / len_sq.sqrt();

    if lo > hi + eps_t {
        return Intersection::None;
    }
    if hi - lo <= eps_t {
        let t = (0.5 * (lo + hi)).clamp(0.0, 1.0);
        let point = a.at(t);
        return Intersection::Point(PairHit {
            point,
            t,
            u: parameter_on(b, &point),
        });
    }
    Intersection::Overlap(Segment::new(a.at(lo), a.at(hi)))
}

/// Segment parameter of `p` if it lies on `seg` within tolerance.
fn point_on_segment<const D: usize>(p: &Point<D>, seg: &Segment<D>, tol: Tolerance) -> Option<f64> {
    let cp = closest::point_segment(p, seg, tol);
    ((cp.point - p).norm() <= tol.epsilon).then_some(cp.parameter)
}

/// Clamped parameter of the projection of `p` onto `seg`.
fn parameter_on<const D: usize>(seg: &Segment<D>, p: &Point<D>) -> f64 {
    let d = seg.direction();
    let len_sq = d.norm_squared();
    if len_sq == 0.0 {
        return 0.0;
    }
    ((p - seg.start).dot(&d) / len_sq).clamp(0.0, 1.0)
}

fn in_unit_range(x: f64, eps: f64) -> bool {
    x >= -eps && x <= 1.0 + eps
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::math::{Point2, Point3, Vector2};

    fn seg(ax: f64, ay: f64, bx: f64, by: f64) -> Segment2 {
        Segment2::new(Point2::new(ax, ay), Point2::new(bx, by))
    }

    #[test]
    fn crossing_segments() {
        let tol = Tolerance::default();
        let hit = *segment_segment_2d(&seg(0.0, 0.0, 2.0, 2.0), &seg(0.0, 2.0, 2.0, 0.0), tol)
            .point()
            .unwrap();
        assert_relative_eq!(hit.point, Point2::new(1.0, 1.0), epsilon = 1e-12);
        assert!((hit.t - 0.5).abs() < 1e-12);
        assert!((hit.u - 0.5).abs() < 1e-12);
    }

    #[test]
    fn endpoint_touch_is_a_hit() {
        let tol = Tolerance::default();
        let r = segment_segment_2d(&seg(0.0, 0.0, 1.0, 0.0), &seg(1.0, 0.0, 1.0, 5.0), tol);
        let hit = r.point().unwrap();
        assert!((hit.t - 1.0).abs() < 1e-12);
        assert!(hit.u.abs() < 1e-12);
    }

    #[test]
    fn non_crossing_and_parallel_segments() {
        let tol = Tolerance::default();
        assert!(segment_segment_2d(&seg(0.0, 0.0, 1.0, 0.0), &seg(2.0, -1.0, 2.0, 1.0), tol).is_none());
        assert!(segment_segment_2d(&seg(0.0, 0.0, 1.0, 0.0), &seg(0.0, 1.0, 1.0, 1.0), tol).is_none());
    }

    #[test]
    fn collinear_overlap_is_sub_segment() {
        let tol = Tolerance::default();
        let r = segment_segment_2d(&seg(0.0, 0.0, 4.0, 0.0), &seg(5.0, 0.0, 2.0, 0.0), tol);
        let o = r.overlap().unwrap();
        assert_relative_eq!(o.start, Point2::new(2.0, 0.0), epsilon = 1e-12);
        assert_relative_eq!(o.end, Point2::new(4.0, 0.0), epsilon = 1e-12);

        let touching = segment_segment_2d(&seg(0.0, 0.0, 1.0, 0.0), &seg(1.0, 0.0, 3.0, 0.0), tol);
        assert_relative_eq!(touching.point().unwrap().point, Point2::new(1.0, 0.0), epsilon = 1e-12);

        assert!(segment_segment_2d(&seg(0.0, 0.0, 1.0, 0.0), &seg(2.0, 0.0, 3.0, 0.0), tol).is_none());
    }

    #[test]
    fn zero_length_segment_is_a_point() {
        let tol = Tolerance::default();
        let dot = seg(1.0, 0.0, 1.0, 0.0);
        let hit = segment_segment_2d(&dot, &seg(0.0, 0.0, 4.0, 0.0), tol);
        assert!((hit.point().unwrap().u - 0.25).abs() < 1e-12);
        assert!(segment_segment_2d(&dot, &seg(0.0, 1.0, 4.0, 1.0), tol).is_none());
        assert!(segment_segment_2d(&dot, &dot, tol).intersects());
    }

    #[test]
    fn ray_hits_segment_in_front_only() {
        let tol = Tolerance::default();
        let ray = Ray2::new(Point2::new(0.0, 0.0), Vector2::new(2.0, 0.0), tol).unwrap();
        let hit = *ray_segment_2d(&ray, &seg(3.0, -1.0, 3.0, 1.0), tol).point().unwrap();
        assert!((hit.t - 1.5).abs() < 1e-12);
        assert!((hit.u - 0.5).abs() < 1e-12);
        assert!(ray_segment_2d(&ray, &seg(-3.0, -1.0, -3.0, 1.0), tol).is_none());
    }

    #[test]
    fn collinear_ray_segment_overlap() {
        let tol = Tolerance::default();
        let ray = Ray2::new(Point2::new(0.0, 0.0), Vector2::x(), tol).unwrap();
        let r = ray_segment_2d(&ray, &seg(-1.0, 0.0, 2.0, 0.0), tol);
        let o = r.overlap().unwrap();
        assert_relative_eq!(o.start, Point2::new(0.0, 0.0));
        assert_relative_eq!(o.end, Point2::new(2.0, 0.0));
        assert!(ray_segment_2d(&ray, &seg(-3.0, 0.0, -1.0, 0.0), tol).is_none());
    }

    #[test]
    fn ray_ray_cases() {
        let tol = Tolerance::default();
        let a = Ray2::new(Point2::new(0.0, 0.0), Vector2::x(), tol).unwrap();
        let b = Ray2::new(Point2::new(2.0, -2.0), Vector2::y(), tol).unwrap();
        let hit = *ray_ray_2d(&a, &b, tol).point().unwrap();
        assert_relative_eq!(hit.point, Point2::new(2.0, 0.0), epsilon = 1e-12);

        let same = Ray2::new(Point2::new(5.0, 0.0), Vector2::x(), tol).unwrap();
        assert!(matches!(ray_ray_2d(&a, &same, tol), Intersection::Coincident));

        let facing = Ray2::new(Point2::new(5.0, 0.0), -Vector2::x(), tol).unwrap();
        assert!(ray_ray_2d(&a, &facing, tol).overlap().is_some());

        let away = Ray2::new(Point2::new(-5.0, 0.0), -Vector2::x(), tol).unwrap();
        assert!(ray_ray_2d(&a, &away, tol).is_none());
    }

    #[test]
    fn skew_and_crossing_segments_3d() {
        let tol = Tolerance::default();
        let a = Segment3::new(Point3::new(-1.0, 0.0, 0.0), Point3::new(1.0, 0.0, 0.0));
        let b = Segment3::new(Point3::new(0.0, -1.0, 0.0), Point3::new(0.0, 1.0, 0.0));
        let hit = *segment_segment_3d(&a, &b, tol).point().unwrap();
        assert_relative_eq!(hit.point, Point3::origin(), epsilon = 1e-12);

        let skew = Segment3::new(Point3::new(0.0, -1.0, 1.0), Point3::new(0.0, 1.0, 1.0));
        assert!(segment_segment_3d(&a, &skew, tol).is_none());

        let collinear = Segment3::new(Point3::new(0.5, 0.0, 0.0), Point3::new(3.0, 0.0, 0.0));
        let o = *segment_segment_3d(&a, &collinear, tol).overlap().unwrap();
        assert_relative_eq!(o.start, Point3::new(0.5, 0.0, 0.0), epsilon = 1e-12);
        assert_relative_eq!(o.end, Point3::new(1.0, 0.0, 0.0), epsilon = 1e-12);
    }
}
