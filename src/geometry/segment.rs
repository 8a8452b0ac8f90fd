use crate::math::{Point, Tolerance, VectorN};

/// A line segment between two endpoints.
///
/// The parametric form is `P(t) = start + t * (end - start)`, `t` in `[0, 1]`.
/// A zero-length segment is valid; every algorithm treats it as the point
/// `start`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment<const D: usize> {
    pub start: Point<D>,
    pub end: Point<D>,
}

/// 2D segment.
pub type Segment2 = Segment<2>;

/// 3D segment.
pub type Segment3 = Segment<3>;

impl<const D: usize> Segment<D> {
    /// Creates a segment from its endpoints.
    #[must_use]
    pub fn new(start: Point<D>, end: Point<D>) -> Self {
        Self { start, end }
    }

    /// The unnormalized direction `end - start`.
    #[must_use]
    pub fn direction(&self) -> VectorN<D> {
        self.end - self.start
    }

    #[must_use]
    pub fn length(&self) -> f64 {
        self.direction().norm()
    }

    #[must_use]
    pub fn length_squared(&self) -> f64 {
        self.direction().norm_squared()
    }

    /// Point at parameter `t` (not clamped).
    #[must_use]
    pub fn at(&self, t: f64) -> Point<D> {
        self.start + self.direction() * t
    }

    #[must_use]
    pub fn midpoint(&self) -> Point<D> {
        self.at(0.5)
    }

    /// The segment with its endpoints swapped.
    #[must_use]
    pub fn reversed(&self) -> Self {
        Self::new(self.end, self.start)
    }

    /// Returns `true` if the segment is no longer than `eps`.
    #[must_use]
    pub fn is_degenerate(&self, tol: Tolerance) -> bool {
        self.length_squared() <= tol.squared()
    }
}
