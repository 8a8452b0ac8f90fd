use crate::geometry::{OrientedRect, Ray2, Rect, Segment2};
use crate::math::{Point2, Tolerance, Vector2};

use super::{Hit, Intersection};

/// Ray-rectangle intersection by the slab method.
///
/// Returns the chord of the ray inside the rectangle as an overlap (its start
/// is the entry point, or the origin if the ray starts inside), or a single
/// [`Hit`] when the ray only grazes a corner.
#[must_use]
pub fn ray_rect(ray: &Ray2, rect: &Rect, tol: Tolerance) -> Intersection<Hit<2>, Segment2> {
    let origin = *ray.origin();
    let dir = *ray.direction();
    match clip(&origin, &dir, 0.0, f64::INFINITY, rect, tol) {
        Some((t0, t1)) => chord(t0, t1, tol.epsilon / dir.norm(), |t| ray.at(t)),
        None => Intersection::None,
    }
}

/// Clips a segment against an axis-aligned rectangle.
///
/// The overlap is the part of the segment inside the rectangle (boundary
/// inclusive). A zero-length segment is treated as a point.
#[must_use]
pub fn segment_rect(seg: &Segment2, rect: &Rect, tol: Tolerance) -> Intersection<Hit<2>, Segment2> {
    if seg.is_degenerate(tol) {
        return if rect.contains(&seg.start, tol) {
            Intersection::Point(Hit { point: seg.start, t: 0.0 })
        } else {
            Intersection::None
        };
    }
    let dir = seg.direction();
    match clip(&seg.start, &dir, 0.0, 1.0, rect, tol) {
        Some((t0, t1)) => chord(t0, t1, tol.epsilon / dir.norm(), |t| seg.at(t)),
        None => Intersection::None,
    }
}

/// Clips a segment against an oriented rectangle.
///
/// The segment is moved into the rectangle's frame and clipped there;
/// parameters refer to the original segment.
#[must_use]
pub fn segment_oriented_rect(seg: &Segment2, rect: &OrientedRect, tol: Tolerance) -> Intersection<Hit<2>, Segment2> {
    let local = Segment2::new(rect.to_local(&seg.start), rect.to_local(&seg.end));
    match segment_rect(&local, &rect.local_rect(), tol) {
        Intersection::Point(hit) => Intersection::Point(Hit {
            point: rect.to_world(&hit.point),
            t: hit.t,
        }),
        Intersection::Overlap(part) => {
            Intersection::Overlap(Segment2::new(rect.to_world(&part.start), rect.to_world(&part.end)))
        }
        Intersection::None => Intersection::None,
        Intersection::Coincident => Intersection::Coincident,
    }
}

/// Intersection of two axis-aligned rectangles.
///
/// Rectangles touching at a single corner meet at a point; rectangles that
/// share an edge overlap on a zero-width rectangle.
#[must_use]
pub fn rect_rect(a: &Rect, b: &Rect, tol: Tolerance) -> Intersection<Point2, Rect> {
    let lo = Point2::new(a.min().x.max(b.min().x), a.min().y.max(b.min().y));
    let hi = Point2::new(a.max().x.min(b.max().x), a.max().y.min(b.max().y));
    if lo.x > hi.x + tol.epsilon || lo.y > hi.y + tol.epsilon {
        return Intersection::None;
    }
    let overlap = Rect::new(lo, Point2::new(hi.x.max(lo.x), hi.y.max(lo.y)));
    let size = overlap.size();
    if size.x <= tol.epsilon && size.y <= tol.epsilon {
        return Intersection::Point(overlap.center());
    }
    Intersection::Overlap(overlap)
}

/// Separating-axis test for two oriented rectangles.
///
/// Touching rectangles (separation within `eps`) count as intersecting.
#[must_use]
pub fn oriented_rect_oriented_rect(a: &OrientedRect, b: &OrientedRect, tol: Tolerance) -> bool {
    let axes_a = a.axes();
    let axes_b = b.axes();
    let between = b.center() - a.center();

    axes_a.iter().chain(axes_b.iter()).all(|axis| {
        let ra = projected_radius(a.half_extents(), &axes_a, axis);
        let rb = projected_radius(b.half_extents(), &axes_b, axis);
        between.dot(axis).abs() <= ra + rb + tol.epsilon
    })
}

fn projected_radius(half: &Vector2, axes: &[Vector2; 2], axis: &Vector2) -> f64 {
    half.x * axes[0].dot(axis).abs() + half.y * axes[1].dot(axis).abs()
}

/// Liang-Barsky style slab clip of `origin + t * dir` for `t` in `[t_lo, t_hi]`.
fn clip(origin: &Point2, dir: &Vector2, t_lo: f64, t_hi: f64, rect: &Rect, tol: Tolerance) -> Option<(f64, f64)> {
    let len = dir.norm();
    let eps_t = tol.epsilon / len;
    let mut t0 = t_lo;
    let mut t1 = t_hi;

    for axis in 0..2 {
        let o = origin[axis];
        let d = dir[axis];
        let (min, max) = (rect.min()[axis], rect.max()[axis]);

        if d.abs() <= tol.epsilon * len {
            if o < min - tol.epsilon || o > max + tol.epsilon {
                return None;
            }
            continue;
        }

        let (near, far) = {
            let a = (min - o) / d;
            let b = (max - o) / d;
            if a <= b {
                (a, b)
            } else {
                (b, a)
            }
        };
        t0 = t0.max(near);
        t1 = t1.min(far);
        if t0 > t1 + eps_t {
            return None;
        }
    }

    Some((t0, t1.max(t0)))
}

fn chord(t0: f64, t1: f64, eps_t: f64, at: impl Fn(f64) -> Point2) -> Intersection<Hit<2>, Segment2> {
    if t1 - t0 <= eps_t {
        Intersection::Point(Hit { point: at(t0), t: t0 })
    } else {
        Intersection::Overlap(Segment2::new(at(t0), at(t1)))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::f64::consts::FRAC_PI_4;

    use approx::assert_relative_eq;

    use super::*;

    fn unit_square() -> Rect {
        Rect::new(Point2::new(0.0, 0.0), Point2::new(1.0, 1.0))
    }

    // ── ray_rect ──

    #[test]
    fn ray_through_rect_gives_chord() {
        let tol = Tolerance::default();
        let ray = Ray2::new(Point2::new(-1.0, 0.5), Vector2::x(), tol).unwrap();
        let chord = *ray_rect(&ray, &unit_square(), tol).overlap().unwrap();
        assert_relative_eq!(chord.start, Point2::new(0.0, 0.5), epsilon = 1e-12);
        assert_relative_eq!(chord.end, Point2::new(1.0, 0.5), epsilon = 1e-12);
    }

    #[test]
    fn ray_starting_inside_clips_at_origin() {
        let tol = Tolerance::default();
        let ray = Ray2::new(Point2::new(0.5, 0.5), Vector2::new(1.0, 1.0), tol).unwrap();
        let chord = *ray_rect(&ray, &unit_square(), tol).overlap().unwrap();
        assert_relative_eq!(chord.start, Point2::new(0.5, 0.5));
        assert_relative_eq!(chord.end, Point2::new(1.0, 1.0), epsilon = 1e-12);
    }

    #[test]
    fn ray_missing_or_behind() {
        let tol = Tolerance::default();
        let away = Ray2::new(Point2::new(-1.0, 0.5), -Vector2::x(), tol).unwrap();
        assert!(ray_rect(&away, &unit_square(), tol).is_none());
        let parallel = Ray2::new(Point2::new(-1.0, 2.0), Vector2::x(), tol).unwrap();
        assert!(ray_rect(&parallel, &unit_square(), tol).is_none());
    }

    #[test]
    fn ray_grazing_corner_is_a_point() {
        let tol = Tolerance::default();
        let ray = Ray2::new(Point2::new(0.0, 2.0), Vector2::new(1.0, -1.0), tol).unwrap();
        let hit = *ray_rect(&ray, &unit_square(), tol).point().unwrap();
        assert_relative_eq!(hit.point, Point2::new(1.0, 1.0), epsilon = 1e-9);
        assert!((hit.t - 1.0).abs() < 1e-9);
    }

    // ── segment_rect ──

    #[test]
    fn segment_clipped_to_rect() {
        let tol = Tolerance::default();
        let seg = Segment2::new(Point2::new(-1.0, -1.0), Point2::new(0.5, 0.5));
        let part = *segment_rect(&seg, &unit_square(), tol).overlap().unwrap();
        assert_relative_eq!(part.start, Point2::new(0.0, 0.0), epsilon = 1e-12);
        assert_relative_eq!(part.end, Point2::new(0.5, 0.5), epsilon = 1e-12);

        let outside = Segment2::new(Point2::new(2.0, 0.0), Point2::new(3.0, 1.0));
        assert!(segment_rect(&outside, &unit_square(), tol).is_none());

        let dot = Segment2::new(Point2::new(0.5, 0.5), Point2::new(0.5, 0.5));
        assert!(segment_rect(&dot, &unit_square(), tol).point().is_some());
    }

    #[test]
    fn segment_clipped_to_oriented_rect() {
        let tol = Tolerance::default();
        let diamond = OrientedRect::new(Point2::origin(), Vector2::new(1.0, 1.0), FRAC_PI_4);
        let seg = Segment2::new(Point2::new(-3.0, 0.0), Point2::new(3.0, 0.0));
        let part = *segment_oriented_rect(&seg, &diamond, tol).overlap().unwrap();
        let reach = 2.0_f64.sqrt();
        assert_relative_eq!(part.start, Point2::new(-reach, 0.0), epsilon = 1e-9);
        assert_relative_eq!(part.end, Point2::new(reach, 0.0), epsilon = 1e-9);
    }

    // ── rect_rect ──

    #[test]
    fn overlapping_touching_and_disjoint_rects() {
        let tol = Tolerance::default();
        let a = unit_square();
        let b = Rect::new(Point2::new(0.5, 0.5), Point2::new(2.0, 2.0));
        let o = *rect_rect(&a, &b, tol).overlap().unwrap();
        assert_eq!(*o.min(), Point2::new(0.5, 0.5));
        assert_eq!(*o.max(), Point2::new(1.0, 1.0));

        let corner = Rect::new(Point2::new(1.0, 1.0), Point2::new(2.0, 2.0));
        assert_relative_eq!(*rect_rect(&a, &corner, tol).point().unwrap(), Point2::new(1.0, 1.0));

        let far = Rect::new(Point2::new(3.0, 3.0), Point2::new(4.0, 4.0));
        assert!(rect_rect(&a, &far, tol).is_none());
    }

    // ── oriented_rect_oriented_rect ──

    #[test]
    fn separating_axis_test() {
        let tol = Tolerance::default();
        let a = OrientedRect::new(Point2::origin(), Vector2::new(1.0, 1.0), 0.0);
        let rotated = OrientedRect::new(Point2::new(2.2, 0.0), Vector2::new(1.0, 1.0), FRAC_PI_4);
        assert!(oriented_rect_oriented_rect(&a, &rotated, tol));

        let far = OrientedRect::new(Point2::new(2.5, 0.0), Vector2::new(1.0, 1.0), FRAC_PI_4);
        assert!(!oriented_rect_oriented_rect(&a, &far, tol));

        let touching = OrientedRect::new(Point2::new(2.0, 0.0), Vector2::new(1.0, 1.0), 0.0);
        assert!(oriented_rect_oriented_rect(&a, &touching, tol));
    }
}
