//! Closest-point queries.
//!
//! Point queries return the nearest point on the primitive with its
//! parameter; pair queries return one point on each primitive. All queries
//! are total except those on triangles, which fail for collinear vertices.

mod point;
mod segment;
mod triangle;

pub use point::{point_line, point_oriented_rect, point_plane, point_ray, point_rect, point_segment};
pub use segment::{ray_segment, segment_segment};
pub use triangle::{point_triangle, segment_triangle, SegmentTriangleClosest};

use crate::math::Point;

/// Nearest point on a primitive.
///
/// `parameter` is the primitive's parameter at `point`: the line/ray/segment
/// parameter, the signed distance for a plane, or barycentric weights for a
/// triangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClosestPoint<const D: usize, P = f64> {
    pub point: Point<D>,
    pub parameter: P,
}

/// Nearest pair of points between two parametric primitives.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClosestPair<const D: usize> {
    /// Point on the first primitive.
    pub point_a: Point<D>,
    /// Point on the second primitive.
    pub point_b: Point<D>,
    /// Parameter of `point_a`.
    pub s: f64,
    /// Parameter of `point_b`.
    pub t: f64,
}

impl<const D: usize> ClosestPair<D> {
    #[must_use]
    pub fn distance(&self) -> f64 {
        (self.point_b - self.point_a).norm()
    }

    #[must_use]
    pub fn distance_squared(&self) -> f64 {
        (self.point_b - self.point_a).norm_squared()
    }
}
