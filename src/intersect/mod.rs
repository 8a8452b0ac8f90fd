//! Pairwise intersection tests.
//!
//! Every test is deterministic and total: parallel and collinear
//! configurations are detected before the general solve, and a hit is only
//! reported inside both primitives' parameter ranges (`t >= 0` for rays,
//! `0 <= t <= 1` for segments). Parameters within `eps` of a range boundary
//! are clamped onto it.

mod plane;
mod rect;
mod segment;
mod shape;
mod triangle;

pub use plane::{plane_plane, ray_plane, segment_plane, PlaneLine};
pub use rect::{oriented_rect_oriented_rect, ray_rect, rect_rect, segment_oriented_rect, segment_rect};
pub use segment::{ray_ray_2d, ray_segment_2d, segment_segment_2d, segment_segment_3d};
pub use shape::{overlapping_pairs, Shape2};
pub use triangle::{point_in_triangle_2d, ray_triangle, segment_triangle};

use crate::math::{Point, Point3, Vector3};

/// Outcome of an intersection test.
///
/// `H` is the single-point payload, `O` the payload for an extended overlap
/// (a sub-segment or sub-rectangle).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Intersection<H, O = ()> {
    /// The primitives do not meet.
    None,
    /// The primitives meet at a single point.
    Point(H),
    /// The primitives share a bounded region.
    Overlap(O),
    /// The primitives share an unbounded set, e.g. a ray lying in a plane.
    Coincident,
}

impl<H, O> Intersection<H, O> {
    /// Returns `true` for [`Intersection::None`].
    #[must_use]
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Returns `true` unless the result is [`Intersection::None`].
    #[must_use]
    pub fn intersects(&self) -> bool {
        !self.is_none()
    }

    /// The single-point payload, if any.
    #[must_use]
    pub fn point(&self) -> Option<&H> {
        match self {
            Self::Point(hit) => Some(hit),
            _ => None,
        }
    }

    /// The overlap payload, if any.
    #[must_use]
    pub fn overlap(&self) -> Option<&O> {
        match self {
            Self::Overlap(o) => Some(o),
            _ => None,
        }
    }
}

/// A hit on a single parametric primitive (ray or segment).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit<const D: usize> {
    pub point: Point<D>,
    /// Parameter along the first primitive.
    pub t: f64,
}

/// A hit between two parametric primitives.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PairHit<const D: usize> {
    pub point: Point<D>,
    /// Parameter along the first primitive.
    pub t: f64,
    /// Parameter along the second primitive.
    pub u: f64,
}

/// A hit between a ray or segment and a triangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriangleHit {
    pub point: Point3,
    /// Parameter along the ray or segment.
    pub t: f64,
    /// Barycentric weights `(wa, wb, wc)` of the hit on the triangle.
    pub barycentric: Vector3,
}
