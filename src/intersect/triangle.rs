use crate::error::{GeometryError, Result};
use crate::geometry::{barycentric_inside, Plane, Ray2, Ray3, Segment2, Segment3, Triangle};
use crate::math::vector::perp_dot;
use crate::math::{Point2, Point3, Tolerance, Vector3};

use super::segment::{ray_segment_2d, segment_segment_2d};
use super::{Intersection, TriangleHit};

/// Where a line crosses a triangle's plane.
enum Crossing {
    /// Line crosses the plane inside the triangle at line parameter `t`.
    Inside { t: f64, barycentric: Vector3 },
    /// Line crosses the plane outside the triangle.
    Outside,
    /// Line is parallel to the plane and lies in it.
    Coplanar,
    /// Line is parallel to the plane and off it.
    Parallel,
}

/// Moller-Trumbore ray-triangle intersection.
///
/// A hit is reported only when every barycentric weight lies in `[0, 1]`
/// within `eps`. A ray lying in the triangle's plane reports
/// [`Intersection::Coincident`] if it touches the triangle.
///
/// # Errors
///
/// Returns [`GeometryError::Degenerate`] for a collinear triangle.
pub fn ray_triangle(ray: &Ray3, tri: &Triangle, tol: Tolerance) -> Result<Intersection<TriangleHit>> {
    tri.ensure_valid(tol)?;
    let dir = ray.direction();
    match crossing(ray.origin(), dir, tri, tol) {
        Crossing::Inside { t, barycentric } => {
            if t < -tol.epsilon / dir.norm() {
                return Ok(Intersection::None);
            }
            let t = t.max(0.0);
            Ok(Intersection::Point(TriangleHit {
                point: ray.at(t),
                t,
                barycentric,
            }))
        }
        Crossing::Outside | Crossing::Parallel => Ok(Intersection::None),
        Crossing::Coplanar => {
            let frame = LocalFrame::new(tri, tol)?;
            let origin = frame.project(ray.origin());
            let local_dir = frame.project(&(ray.origin() + dir)) - origin;
            let ray2 = Ray2::new(origin, local_dir, tol)?;
            let touches = frame.contains(&origin, tol)?
                || frame
                    .edges()
                    .iter()
                    .any(|edge| ray_segment_2d(&ray2, edge, tol).intersects());
            Ok(coincident_if(touches))
        }
    }
}

/// Segment-triangle intersection (Moller-Trumbore bounded to `t` in `[0, 1]`).
///
/// A segment lying in the triangle's plane reports
/// [`Intersection::Coincident`] if it touches the triangle. A zero-length
/// segment is treated as a point.
///
/// # Errors
///
/// Returns [`GeometryError::Degenerate`] for a collinear triangle.
pub fn segment_triangle(seg: &Segment3, tri: &Triangle, tol: Tolerance) -> Result<Intersection<TriangleHit>> {
    tri.ensure_valid(tol)?;

    if seg.is_degenerate(tol) {
        let plane = tri.plane(tol)?;
        if plane.signed_distance(&seg.start).abs() > tol.epsilon {
            return Ok(Intersection::None);
        }
        let barycentric = tri.barycentric(&seg.start, tol)?;
        if !barycentric_inside(&barycentric, tol) {
            return Ok(Intersection::None);
        }
        return Ok(Intersection::Point(TriangleHit {
            point: seg.start,
            t: 0.0,
            barycentric,
        }));
    }

    let dir = seg.direction();
    match crossing(&seg.start, &dir, tri, tol) {
        Crossing::Inside { t, barycentric } => {
            let eps_t = tol.epsilon / dir.norm();
            if t < -eps_t || t > 1.0 + eps_t {
                return Ok(Intersection::None);
            }
            let t = t.clamp(0.0, 1.0);
            Ok(Intersection::Point(TriangleHit {
                point: seg.at(t),
                t,
                barycentric,
            }))
        }
        Crossing::Outside | Crossing::Parallel => Ok(Intersection::None),
        Crossing::Coplanar => {
            let frame = LocalFrame::new(tri, tol)?;
            let seg2 = Segment2::new(frame.project(&seg.start), frame.project(&seg.end));
            let touches = frame.contains(&seg2.start, tol)?
                || frame
                    .edges()
                    .iter()
                    .any(|edge| segment_segment_2d(&seg2, edge, tol).intersects());
            Ok(coincident_if(touches))
        }
    }
}

/// Point-in-triangle test in 2D, boundary inclusive within tolerance.
///
/// Works for either winding.
///
/// # Errors
///
/// Returns [`GeometryError::Degenerate`] if `a`, `b`, `c` are collinear.
pub fn point_in_triangle_2d(p: &Point2, a: &Point2, b: &Point2, c: &Point2, tol: Tolerance) -> Result<bool> {
    let area2 = perp_dot(&(b - a), &(c - a));
    let longest_sq = (b - a)
        .norm_squared()
        .max((c - b).norm_squared())
        .max((a - c).norm_squared());
    if longest_sq <= tol.squared() || area2.abs() <= tol.epsilon * longest_sq {
        return Err(GeometryError::Degenerate("triangle vertices are collinear".into()).into());
    }
    let wa = perp_dot(&(c - b), &(p - b)) / area2;
    let wb = perp_dot(&(a - c), &(p - c)) / area2;
    let wc = 1.0 - wa - wb;
    Ok(barycentric_inside(&Vector3::new(wa, wb, wc), tol))
}

fn crossing(origin: &Point3, dir: &Vector3, tri: &Triangle, tol: Tolerance) -> Crossing {
    let e1 = tri.b - tri.a;
    let e2 = tri.c - tri.a;
    let pvec = dir.cross(&e2);
    let det = e1.dot(&pvec);

    if det.abs() <= tol.epsilon * dir.norm() * e1.cross(&e2).norm() {
        let n = tri.scaled_normal().normalize();
        return if n.dot(&(origin - tri.a)).abs() <= tol.epsilon {
            Crossing::Coplanar
        } else {
            Crossing::Parallel
        };
    }

    let inv_det = 1.0 / det;
    let s = origin - tri.a;
    let wb = s.dot(&pvec) * inv_det;
    let qvec = s.cross(&e1);
    let wc = dir.dot(&qvec) * inv_det;
    let barycentric = Vector3::new(1.0 - wb - wc, wb, wc);
    if !barycentric_inside(&barycentric, tol) {
        return Crossing::Outside;
    }
    Crossing::Inside {
        t: e2.dot(&qvec) * inv_det,
        barycentric,
    }
}

fn coincident_if(touches: bool) -> Intersection<TriangleHit> {
    if touches {
        Intersection::Coincident
    } else {
        Intersection::None
    }
}

/// The triangle expressed in its plane's 2D frame.
struct LocalFrame {
    plane: Plane,
    vertices: [Point2; 3],
}

impl LocalFrame {
    fn new(tri: &Triangle, tol: Tolerance) -> Result<Self> {
        let plane = tri.plane(tol)?;
        let vertices = [plane.to_local(&tri.a), plane.to_local(&tri.b), plane.to_local(&tri.c)];
        Ok(Self { plane, vertices })
    }

    fn project(&self, p: &Point3) -> Point2 {
        self.plane.to_local(p)
    }

    fn contains(&self, p: &Point2, tol: Tolerance) -> Result<bool> {
        let [a, b, c] = &self.vertices;
        point_in_triangle_2d(p, a, b, c, tol)
    }

    fn edges(&self) -> [Segment2; 3] {
        let [a, b, c] = self.vertices;
        [Segment2::new(a, b), Segment2::new(b, c), Segment2::new(c, a)]
    }
}
