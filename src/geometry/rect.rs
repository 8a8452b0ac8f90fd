use crate::math::{Point2, Tolerance, Vector2};

/// An axis-aligned rectangle in 2D, stored as its min and max corners.
///
/// Invariant: `min.x <= max.x` and `min.y <= max.y`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    min: Point2,
    max: Point2,
}

impl Rect {
    /// Creates the rectangle spanned by two opposite corners, in any order.
    #[must_use]
    pub fn new(a: Point2, b: Point2) -> Self {
        Self {
            min: Point2::new(a.x.min(b.x), a.y.min(b.y)),
            max: Point2::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    /// Creates a rectangle from its center and half extents (sign ignored).
    #[must_use]
    pub fn from_center_half_extents(center: Point2, half_extents: Vector2) -> Self {
        let half = half_extents.abs();
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Smallest rectangle containing every point, or `None` if empty.
    #[must_use]
    pub fn from_points<'a, I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a Point2>,
    {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        Some(iter.fold(Self::new(*first, *first), |acc, p| acc.expand_to_include(p)))
    }

    #[must_use]
    pub fn min(&self) -> &Point2 {
        &self.min
    }

    #[must_use]
    pub fn max(&self) -> &Point2 {
        &self.max
    }

    #[must_use]
    pub fn center(&self) -> Point2 {
        nalgebra::center(&self.min, &self.max)
    }

    #[must_use]
    pub fn size(&self) -> Vector2 {
        self.max - self.min
    }

    #[must_use]
    pub fn half_extents(&self) -> Vector2 {
        self.size() * 0.5
    }

    #[must_use]
    pub fn area(&self) -> f64 {
        let s = self.size();
        s.x * s.y
    }

    /// Returns `true` if the width or height is within `eps` of zero.
    #[must_use]
    pub fn is_degenerate(&self, tol: Tolerance) -> bool {
        let s = self.size();
        s.x <= tol.epsilon || s.y <= tol.epsilon
    }

    /// Point containment, boundary inclusive within tolerance.
    #[must_use]
    pub fn contains(&self, p: &Point2, tol: Tolerance) -> bool {
        p.x >= self.min.x - tol.epsilon
            && p.x <= self.max.x + tol.epsilon
            && p.y >= self.min.y - tol.epsilon
            && p.y <= self.max.y + tol.epsilon
    }

    /// The rectangle grown to include `p`.
    #[must_use]
    pub fn expand_to_include(&self, p: &Point2) -> Self {
        Self {
            min: Point2::new(self.min.x.min(p.x), self.min.y.min(p.y)),
            max: Point2::new(self.max.x.max(p.x), self.max.y.max(p.y)),
        }
    }

    /// Smallest rectangle containing both.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        self.expand_to_include(&other.min).expand_to_include(&other.max)
    }

    /// Corners counter-clockwise starting at `min`.
    #[must_use]
    pub fn corners(&self) -> [Point2; 4] {
        [
            self.min,
            Point2::new(self.max.x, self.min.y),
            self.max,
            Point2::new(self.min.x, self.max.y),
        ]
    }
}

/// A rectangle rotated by `angle` radians (CCW) about its center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrientedRect {
    center: Point2,
    half_extents: Vector2,
    angle: f64,
}

impl OrientedRect {
    /// Creates an oriented rectangle; the sign of the half extents is ignored.
    #[must_use]
    pub fn new(center: Point2, half_extents: Vector2, angle: f64) -> Self {
        Self {
            center,
            half_extents: half_extents.abs(),
            angle,
        }
    }

    #[must_use]
    pub fn center(&self) -> &Point2 {
        &self.center
    }

    #[must_use]
    pub fn half_extents(&self) -> &Vector2 {
        &self.half_extents
    }

    #[must_use]
    pub fn angle(&self) -> f64 {
        self.angle
    }

    /// The rectangle's local unit x and y axes in world space.
    #[must_use]
    pub fn axes(&self) -> [Vector2; 2] {
        let (s, c) = self.angle.sin_cos();
        [Vector2::new(c, s), Vector2::new(-s, c)]
    }

    /// World point to local coordinates (center at origin, axis aligned).
    #[must_use]
    pub fn to_local(&self, p: &Point2) -> Point2 {
        let rel = p - self.center;
        let [ax, ay] = self.axes();
        Point2::new(rel.dot(&ax), rel.dot(&ay))
    }

    /// Local coordinates to world point.
    #[must_use]
    pub fn to_world(&self, local: &Point2) -> Point2 {
        let [ax, ay] = self.axes();
        self.center + ax * local.x + ay * local.y
    }

    /// The rectangle in its own frame, centered at the origin.
    #[must_use]
    pub fn local_rect(&self) -> Rect {
        Rect::from_center_half_extents(Point2::origin(), self.half_extents)
    }

    /// Corners counter-clockwise, starting at local `(-hx, -hy)`.
    #[must_use]
    pub fn corners(&self) -> [Point2; 4] {
        self.local_rect().corners().map(|c| self.to_world(&c))
    }

    #[must_use]
    pub fn area(&self) -> f64 {
        4.0 * self.half_extents.x * self.half_extents.y
    }

    #[must_use]
    pub fn is_degenerate(&self, tol: Tolerance) -> bool {
        self.half_extents.x * 2.0 <= tol.epsilon || self.half_extents.y * 2.0 <= tol.epsilon
    }

    /// Point containment, boundary inclusive within tolerance.
    #[must_use]
    pub fn contains(&self, p: &Point2, tol: Tolerance) -> bool {
        self.local_rect().contains(&self.to_local(p), tol)
    }

    /// Axis-aligned bounds.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        let [ax, ay] = self.axes();
        let extent = Vector2::new(
            ax.x.abs() * self.half_extents.x + ay.x.abs() * self.half_extents.y,
            ax.y.abs() * self.half_extents.x + ay.y.abs() * self.half_extents.y,
        );
        Rect::from_center_half_extents(self.center, extent)
    }
}

impl From<Rect> for OrientedRect {
    fn from(rect: Rect) -> Self {
        Self::new(rect.center(), rect.half_extents(), 0.0)
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::FRAC_PI_4;

    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn corners_are_normalized() {
        let r = Rect::new(Point2::new(3.0, -1.0), Point2::new(1.0, 2.0));
        assert_eq!(*r.min(), Point2::new(1.0, -1.0));
        assert_eq!(*r.max(), Point2::new(3.0, 2.0));
        assert!((r.area() - 6.0).abs() < 1e-12);
        assert_relative_eq!(r.center(), Point2::new(2.0, 0.5));
    }

    #[test]
    fn containment_and_growth() {
        let tol = Tolerance::default();
        let r = Rect::new(Point2::new(0.0, 0.0), Point2::new(1.0, 1.0));
        assert!(r.contains(&Point2::new(1.0, 0.5), tol));
        assert!(!r.contains(&Point2::new(1.1, 0.5), tol));

        let grown = r.expand_to_include(&Point2::new(2.0, -1.0));
        assert_eq!(*grown.min(), Point2::new(0.0, -1.0));
        assert_eq!(*grown.max(), Point2::new(2.0, 1.0));

        let pts = [Point2::new(1.0, 5.0), Point2::new(-2.0, 0.0), Point2::new(0.0, 3.0)];
        let b = Rect::from_points(&pts);
        assert_eq!(b.map(|r| *r.min()), Some(Point2::new(-2.0, 0.0)));
        assert!(Rect::from_points(&Vec::<Point2>::new()).is_none());
    }

    #[test]
    fn thin_rect_is_degenerate() {
        let tol = Tolerance::default();
        assert!(Rect::new(Point2::new(0.0, 0.0), Point2::new(5.0, 0.0)).is_degenerate(tol));
        assert!(OrientedRect::new(Point2::origin(), Vector2::new(0.0, 1.0), 0.3).is_degenerate(tol));
    }

    #[test]
    fn oriented_local_world_round_trip() {
        let tol = Tolerance::default();
        let obb = OrientedRect::new(Point2::new(1.0, 1.0), Vector2::new(2.0, 1.0), FRAC_PI_4);
        let p = Point2::new(1.5, 2.0);
        assert_relative_eq!(obb.to_world(&obb.to_local(&p)), p, epsilon = 1e-12);
        assert!(obb.contains(&Point2::new(1.0, 1.0), tol));
        assert!(!obb.contains(&Point2::new(3.9, 1.0), tol));
        assert!((obb.area() - 8.0).abs() < 1e-12);

        let bounds = obb.bounds();
        for c in obb.corners() {
            assert!(bounds.contains(&c, tol));
        }
    }
}
