use crate::error::Result;
use crate::geometry::{barycentric_inside, Segment3, Triangle};
use crate::math::{Point3, Tolerance, Vector3};

use super::{segment_segment, ClosestPoint};

/// Closest points between a segment and a triangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentTriangleClosest {
    /// Point on the segment.
    pub point_segment: Point3,
    /// Point on the triangle.
    pub point_triangle: Point3,
    /// Segment parameter of `point_segment`.
    pub t: f64,
    /// Barycentric weights `(wa, wb, wc)` of `point_triangle`.
    pub barycentric: Vector3,
}

impl SegmentTriangleClosest {
    #[must_use]
    pub fn distance(&self) -> f64 {
        (self.point_triangle - self.point_segment).norm()
    }
}

/// Nearest point on a filled triangle, with its barycentric weights.
///
/// Classifies `p` against the vertex, edge and face Voronoi regions.
///
/// # Errors
///
/// Returns [`GeometryError::Degenerate`](crate::error::GeometryError::Degenerate) for a collinear triangle.
pub fn point_triangle(p: &Point3, tri: &Triangle, tol: Tolerance) -> Result<ClosestPoint<3, Vector3>> {
    tri.ensure_valid(tol)?;
    let (a, b, c) = (tri.a, tri.b, tri.c);
    let ab = b - a;
    let ac = c - a;

    let ap = p - a;
    let d1 = ab.dot(&ap);
    let d2 = ac.dot(&ap);
    if d1 <= 0.0 && d2 <= 0.0 {
        return Ok(found(a, Vector3::new(1.0, 0.0, 0.0)));
    }

    let bp = p - b;
    let d3 = ab.dot(&bp);
    let d4 = ac.dot(&bp);
    if d3 >= 0.0 && d4 <= d3 {
        return Ok(found(b, Vector3::new(0.0, 1.0, 0.0)));
    }

    let vc = d1 * d4 - d3 * d2;
    if vc <= 0.0 && d1 >= 0.0 && d3 <= 0.0 {
        let v = d1 / (d1 - d3);
        return Ok(found(a + ab * v, Vector3::new(1.0 - v, v, 0.0)));
    }

    let cp = p - c;
    let d5 = ab.dot(&cp);
    let d6 = ac.dot(&cp);
    if d6 >= 0.0 && d5 <= d6 {
        return Ok(found(c, Vector3::new(0.0, 0.0, 1.0)));
    }

    let vb = d5 * d2 - d1 * d6;
    if vb <= 0.0 && d2 >= 0.0 && d6 <= 0.0 {
        let w = d2 / (d2 - d6);
        return Ok(found(a + ac * w, Vector3::new(1.0 - w, 0.0, w)));
    }

    let va = d3 * d6 - d5 * d4;
    if va <= 0.0 && (d4 - d3) >= 0.0 && (d5 - d6) >= 0.0 {
        let w = (d4 - d3) / ((d4 - d3) + (d5 - d6));
        return Ok(found(b + (c - b) * w, Vector3::new(0.0, 1.0 - w, w)));
    }

    // Face region.
    let denom = 1.0 / (va + vb + vc);
    let v = vb * denom;
    let w = vc * denom;
    Ok(found(a + ab * v + ac * w, Vector3::new(1.0 - v - w, v, w)))
}

/// Closest points between a segment and a filled triangle.
///
/// A segment crossing the triangle's interior returns the crossing point on
/// both sides. Otherwise the nearest of the two endpoint projections and the
/// three edge pairs wins; ties keep the earliest candidate in that order.
///
/// # Errors
///
/// Returns [`GeometryError::Degenerate`](crate::error::GeometryError::Degenerate) for a collinear triangle.
pub fn segment_triangle(seg: &Segment3, tri: &Triangle, tol: Tolerance) -> Result<SegmentTriangleClosest> {
    tri.ensure_valid(tol)?;

    if !seg.is_degenerate(tol) {
        let plane = tri.plane(tol)?;
        let d0 = plane.signed_distance(&seg.start);
        let d1 = plane.signed_distance(&seg.end);
        if d0 * d1 <= 0.0 && (d0 - d1).abs() > tol.epsilon {
            let t = (d0 / (d0 - d1)).clamp(0.0, 1.0);
            let q = seg.at(t);
            let barycentric = tri.barycentric(&q, tol)?;
            if barycentric_inside(&barycentric, tol) {
                return Ok(SegmentTriangleClosest {
                    point_segment: q,
                    point_triangle: q,
                    t,
                    barycentric,
                });
            }
        }
    }

    let endpoint = |t: f64, end: Point3| -> Result<SegmentTriangleClosest> {
        let cp = point_triangle(&end, tri, tol)?;
        Ok(SegmentTriangleClosest {
            point_segment: end,
            point_triangle: cp.point,
            t,
            barycentric: cp.parameter,
        })
    };

    let edges = tri.edges();
    let edge = |index: usize| {
        let pair = segment_segment(seg, &edges[index], tol);
        SegmentTriangleClosest {
            point_segment: pair.point_a,
            point_triangle: pair.point_b,
            t: pair.s,
            barycentric: edge_weights(index, pair.t),
        }
    };
    let [first, rest @ ..] = [
        endpoint(0.0, seg.start)?,
        endpoint(1.0, seg.end)?,
        edge(0),
        edge(1),
        edge(2),
    ];
    Ok(rest.into_iter().fold(first, |best, candidate| {
        if candidate.distance() < best.distance() {
            candidate
        } else {
            best
        }
    }))
}

/// Barycentric weights of the point at `t` along edge `index` (ab, bc, ca).
fn edge_weights(index: usize, t: f64) -> Vector3 {
    match index {
        0 => Vector3::new(1.0 - t, t, 0.0),
        1 => Vector3::new(0.0, 1.0 - t, t),
        _ => Vector3::new(t, 0.0, 1.0 - t),
    }
}

fn found(point: Point3, barycentric: Vector3) -> ClosestPoint<3, Vector3> {
    ClosestPoint {
        point,
        parameter: barycentric,
    }
}
