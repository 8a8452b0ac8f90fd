use crate::geometry::{OrientedRect, Rect, Segment2};
use crate::math::Tolerance;

use super::rect::{oriented_rect_oriented_rect, rect_rect, segment_oriented_rect, segment_rect};
use super::segment::segment_segment_2d;

/// A 2D shape for mixed-type overlap queries.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape2 {
    Segment(Segment2),
    Rect(Rect),
    Oriented(OrientedRect),
}

impl Shape2 {
    /// Axis-aligned bounds.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        match self {
            Self::Segment(s) => Rect::new(s.start, s.end),
            Self::Rect(r) => *r,
            Self::Oriented(o) => o.bounds(),
        }
    }

    /// Exact overlap test, boundary contact included.
    #[must_use]
    pub fn intersects(&self, other: &Self, tol: Tolerance) -> bool {
        match (self, other) {
            (Self::Segment(a), Self::Segment(b)) => segment_segment_2d(a, b, tol).intersects(),
            (Self::Segment(s), Self::Rect(r)) | (Self::Rect(r), Self::Segment(s)) => {
                segment_rect(s, r, tol).intersects()
            }
            (Self::Segment(s), Self::Oriented(o)) | (Self::Oriented(o), Self::Segment(s)) => {
                segment_oriented_rect(s, o, tol).intersects()
            }
            (Self::Rect(a), Self::Rect(b)) => rect_rect(a, b, tol).intersects(),
            (Self::Rect(r), Self::Oriented(o)) | (Self::Oriented(o), Self::Rect(r)) => {
                oriented_rect_oriented_rect(&OrientedRect::from(*r), o, tol)
            }
            (Self::Oriented(a), Self::Oriented(b)) => oriented_rect_oriented_rect(a, b, tol),
        }
    }
}

/// All index pairs `(i, j)`, `i < j`, of shapes that overlap.
///
/// Candidates come from a sweep over the bounds sorted by `min.x`; each is
/// confirmed with [`Shape2::intersects`]. Output is sorted.
#[must_use]
pub fn overlapping_pairs(shapes: &[Shape2], tol: Tolerance) -> Vec<(usize, usize)> {
    let bounds: Vec<Rect> = shapes.iter().map(Shape2::bounds).collect();
    let mut order: Vec<usize> = (0..shapes.len()).collect();
    order.sort_by(|&a, &b| bounds[a].min().x.total_cmp(&bounds[b].min().x).then(a.cmp(&b)));

    let mut pairs = Vec::new();
    for (k, &i) in order.iter().enumerate() {
        for &j in &order[k + 1..] {
            if bounds[j].min().x > bounds[i].max().x + tol.epsilon {
                break;
            }
            if rect_rect(&bounds[i], &bounds[j], tol).is_none() {
                continue;
            }
            if shapes[i].intersects(&shapes[j], tol) {
                pairs.push((i.min(j), i.max(j)));
            }
        }
    }
    pairs.sort_unstable();
    pairs
}
