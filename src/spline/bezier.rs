use crate::error::{GeometryError, Result, SplineError};
use crate::math::{Point, VectorN};

use super::{ensure_finite, locate_in, ArcLengthTable, Curve, EditableSpline, SplineConfig};

/// A chain of cubic Bézier segments.
///
/// Control points are laid out as `anchor, out-handle, in-handle, anchor,
/// ...`, so `n` segments use `3n + 1` points and consecutive segments share
/// an anchor.
#[derive(Debug, Clone, PartialEq)]
pub struct BezierPath<const D: usize> {
    points: Vec<Point<D>>,
    config: SplineConfig,
    table: ArcLengthTable,
}

impl<const D: usize> BezierPath<D> {
    /// Creates a path from `3n + 1` control points, `n >= 1`.
    ///
    /// # Errors
    ///
    /// Returns [`SplineError::ControlPointCount`] for any other count and
    /// [`GeometryError::NonFinite`] for a non-finite point.
    pub fn new(points: Vec<Point<D>>, config: SplineConfig) -> Result<Self> {
        validate(&points)?;
        Ok(Self::from_valid(points, config))
    }

    /// Creates a path through `anchors`, with `handles[i]` holding the
    /// out-handle of anchor `i` and the in-handle of anchor `i + 1`.
    ///
    /// # Errors
    ///
    /// Returns [`SplineError::ControlPointCount`] if there are fewer than two
    /// anchors or `handles.len() != anchors.len() - 1`.
    pub fn from_anchors_and_handles(
        anchors: &[Point<D>],
        handles: &[(Point<D>, Point<D>)],
        config: SplineConfig,
    ) -> Result<Self> {
        if anchors.len() < 2 || handles.len() + 1 != anchors.len() {
            return Err(SplineError::ControlPointCount {
                kind: "Bézier path",
                expected: "at least 2 anchors and one handle pair per segment",
                count: anchors.len() + 2 * handles.len(),
            }
            .into());
        }
        let mut points = Vec::with_capacity(3 * handles.len() + 1);
        points.push(anchors[0]);
        for (anchor, (out_handle, in_handle)) in anchors[1..].iter().zip(handles) {
            points.extend([*out_handle, *in_handle, *anchor]);
        }
        Self::new(points, config)
    }

    /// Builds a path from points already known to be valid.
    pub(super) fn from_valid(points: Vec<Point<D>>, config: SplineConfig) -> Self {
        let table = build_table(&points, &config);
        Self { points, config, table }
    }

    /// Number of anchors (`segment_count + 1`).
    #[must_use]
    pub fn anchor_count(&self) -> usize {
        self.segment_count() + 1
    }

    /// Anchor `i`, if it exists.
    #[must_use]
    pub fn anchor(&self, i: usize) -> Option<&Point<D>> {
        self.points.get(i.checked_mul(3)?)
    }

    /// The four control points of segment `i`.
    #[must_use]
    pub fn segment(&self, i: usize) -> Option<[Point<D>; 4]> {
        let base = i.checked_mul(3)?;
        let s = self.points.get(base..base.checked_add(4)?)?;
        Some([s[0], s[1], s[2], s[3]])
    }

    /// Splits segment `index` at local parameter `u` with de Casteljau's
    /// algorithm; the curve's shape is unchanged and the segment count grows
    /// by one.
    ///
    /// # Errors
    ///
    /// Returns [`SplineError::IndexOutOfBounds`] for a bad segment index and
    /// [`GeometryError::ParameterOutOfRange`] if `u` is outside `[0, 1]`.
    pub fn split_segment(&mut self, index: usize, u: f64) -> Result<()> {
        let [p0, p1, p2, p3] = self.segment(index).ok_or(SplineError::IndexOutOfBounds {
            index,
            len: self.segment_count(),
        })?;
        if !(0.0..=1.0).contains(&u) {
            return Err(GeometryError::ParameterOutOfRange {
                parameter: "u",
                value: u,
                min: 0.0,
                max: 1.0,
            }
            .into());
        }

        let p01 = p0.lerp(&p1, u);
        let p12 = p1.lerp(&p2, u);
        let p23 = p2.lerp(&p3, u);
        let p012 = p01.lerp(&p12, u);
        let p123 = p12.lerp(&p23, u);
        let mid = p012.lerp(&p123, u);

        let base = index * 3;
        self.points.splice(base + 1..base + 3, [p01, p012, mid, p123, p23]);
        self.refresh();
        Ok(())
    }

    /// Appends a segment ending at `anchor`.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::NonFinite`] for a non-finite point.
    pub fn push_segment(&mut self, out_handle: Point<D>, in_handle: Point<D>, anchor: Point<D>) -> Result<()> {
        ensure_finite(&[out_handle, in_handle, anchor])?;
        self.points.extend([out_handle, in_handle, anchor]);
        self.refresh();
        Ok(())
    }

    /// Moves control point `index`.
    ///
    /// # Errors
    ///
    /// Returns [`SplineError::IndexOutOfBounds`] for a bad index and
    /// [`GeometryError::NonFinite`] for a non-finite point.
    pub fn set_control_point(&mut self, index: usize, point: Point<D>) -> Result<()> {
        ensure_finite(&[point])?;
        let len = self.points.len();
        let slot = self
            .points
            .get_mut(index)
            .ok_or(SplineError::IndexOutOfBounds { index, len })?;
        *slot = point;
        self.refresh();
        Ok(())
    }

    /// Replaces every control point.
    ///
    /// # Errors
    ///
    /// Same as [`BezierPath::new`]; the path is unchanged on error.
    pub fn set_control_points(&mut self, points: Vec<Point<D>>) -> Result<()> {
        validate(&points)?;
        self.points = points;
        self.refresh();
        Ok(())
    }
}

impl<const D: usize> Curve<D> for BezierPath<D> {
    fn segment_count(&self) -> usize {
        (self.points.len() - 1) / 3
    }

    fn evaluate_segment(&self, index: usize, u: f64) -> Point<D> {
        let base = index.min(self.segment_count() - 1) * 3;
        bernstein(&self.points[base..base + 4], u)
    }

    fn derivative_segment(&self, index: usize, u: f64) -> VectorN<D> {
        let base = index.min(self.segment_count() - 1) * 3;
        let p = &self.points[base..base + 4];
        let u = u.clamp(0.0, 1.0);
        let v = 1.0 - u;
        (p[1] - p[0]) * (3.0 * v * v) + (p[2] - p[1]) * (6.0 * v * u) + (p[3] - p[2]) * (3.0 * u * u)
    }

    fn config(&self) -> &SplineConfig {
        &self.config
    }

    fn arc_length(&self) -> &ArcLengthTable {
        &self.table
    }
}

impl<const D: usize> EditableSpline<D> for BezierPath<D> {
    fn control_points(&self) -> &[Point<D>] {
        &self.points
    }

    fn replace_control_points(&mut self, points: Vec<Point<D>>) -> Result<()> {
        self.set_control_points(points)
    }

    fn refresh(&mut self) {
        self.table = build_table(&self.points, &self.config);
    }
}

fn validate<const D: usize>(points: &[Point<D>]) -> Result<()> {
    if points.len() < 4 || (points.len() - 1) % 3 != 0 {
        return Err(SplineError::ControlPointCount {
            kind: "Bézier path",
            expected: "3n + 1 with n >= 1",
            count: points.len(),
        }
        .into());
    }
    ensure_finite(points)
}

fn build_table<const D: usize>(points: &[Point<D>], config: &SplineConfig) -> ArcLengthTable {
    let n = (points.len() - 1) / 3;
    ArcLengthTable::build(config.arc_length_samples, |t| {
        let (index, u) = locate_in(n, t);
        bernstein(&points[index * 3..index * 3 + 4], u)
    })
}

/// Cubic Bernstein form over four control points; the ends are returned
/// exactly.
fn bernstein<const D: usize>(p: &[Point<D>], u: f64) -> Point<D> {
    if u <= 0.0 {
        return p[0];
    }
    if u >= 1.0 {
        return p[3];
    }
    let v = 1.0 - u;
    Point::from(
        p[0].coords * (v * v * v)
            + p[1].coords * (3.0 * v * v * u)
            + p[2].coords * (3.0 * v * u * u)
            + p[3].coords * (u * u * u),
    )
}
