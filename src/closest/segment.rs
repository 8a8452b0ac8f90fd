use crate::geometry::{Ray, Segment};
use crate::math::{Point, Tolerance, VectorN};

use super::ClosestPair;

/// Closest points between two segments in any dimension.
///
/// `s` is the parameter on `a`, `t` the parameter on `b`, both in `[0, 1]`.
/// For parallel segments the pair starts from the point on `b` nearest
/// `a.start`, so the result is deterministic. Zero-length segments are
/// treated as points.
#[must_use]
pub fn segment_segment<const D: usize>(a: &Segment<D>, b: &Segment<D>, tol: Tolerance) -> ClosestPair<D> {
    let (s, t) = solve(&a.start, &a.direction(), 1.0, &b.start, &b.direction(), tol);
    ClosestPair {
        point_a: a.at(s),
        point_b: b.at(t),
        s,
        t,
    }
}

/// Closest points between a ray and a segment.
///
/// `s` is the ray parameter (`s >= 0`), `t` the segment parameter.
#[must_use]
pub fn ray_segment<const D: usize>(ray: &Ray<D>, seg: &Segment<D>, tol: Tolerance) -> ClosestPair<D> {
    let (s, t) = solve(ray.origin(), ray.direction(), f64::INFINITY, &seg.start, &seg.direction(), tol);
    ClosestPair {
        point_a: ray.at(s),
        point_b: seg.at(t),
        s,
        t,
    }
}

/// Parameters of the closest points of `p0 + s * d1`, `s` in `[0, s_max]`,
/// and `q0 + t * d2`, `t` in `[0, 1]`.
fn solve<const D: usize>(
    p0: &Point<D>,
    d1: &VectorN<D>,
    s_max: f64,
    q0: &Point<D>,
    d2: &VectorN<D>,
    tol: Tolerance,
) -> (f64, f64) {
    let r = p0 - q0;
    let aa = d1.norm_squared();
    let e = d2.norm_squared();
    let f = d2.dot(&r);
    let eps_sq = tol.squared();

    if aa <= eps_sq && e <= eps_sq {
        return (0.0, 0.0);
    }
    if aa <= eps_sq {
        return (0.0, (f / e).clamp(0.0, 1.0));
    }

    let c = d1.dot(&r);
    if e <= eps_sq {
        return ((-c / aa).clamp(0.0, s_max), 0.0);
    }

    let bb = d1.dot(d2);
    let denom = aa * e - bb * bb;
    let mut s = if denom > eps_sq * aa * e {
        ((bb * f - c * e) / denom).clamp(0.0, s_max)
    } else {
        0.0
    };

    let mut t = (bb * s + f) / e;
    if t < 0.0 {
        t = 0.0;
        s = (-c / aa).clamp(0.0, s_max);
    } else if t > 1.0 {
        t = 1.0;
        s = ((bb - c) / aa).clamp(0.0, s_max);
    }
    (s, t)
}
