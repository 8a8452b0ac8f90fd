use crate::error::{Result, SplineError};
use crate::math::{Point, VectorN};

use super::{ensure_finite, locate_in, ArcLengthTable, BezierPath, Curve, EditableSpline, SplineConfig};

/// A uniform Catmull-Rom spline through its control points.
///
/// `n` points give `n - 1` segments; segment `i` runs from point `i` to
/// point `i + 1`, using its neighbours as the outer controls. The first and
/// last points are duplicated to supply the missing neighbours.
#[derive(Debug, Clone, PartialEq)]
pub struct CatmullRom<const D: usize> {
    points: Vec<Point<D>>,
    config: SplineConfig,
    table: ArcLengthTable,
}

impl<const D: usize> CatmullRom<D> {
    /// Creates a spline through at least two points.
    ///
    /// # Errors
    ///
    /// Returns [`SplineError::ControlPointCount`] for fewer than two points
    /// and a non-finite error for a non-finite point.
    pub fn new(points: Vec<Point<D>>, config: SplineConfig) -> Result<Self> {
        validate(&points)?;
        let table = build_table(&points, &config);
        Ok(Self { points, config, table })
    }

    /// Global parameter at which the spline passes through point `index`.
    ///
    /// # Errors
    ///
    /// Returns [`SplineError::IndexOutOfBounds`] for a bad index.
    pub fn control_point_parameter(&self, index: usize) -> Result<f64> {
        let len = self.points.len();
        if index >= len {
            return Err(SplineError::IndexOutOfBounds { index, len }.into());
        }
        #[allow(clippy::cast_precision_loss)]
        Ok(index as f64 / (len - 1) as f64)
    }

    /// The equivalent piecewise Bézier path, one segment per span.
    #[must_use]
    pub fn to_bezier(&self) -> BezierPath<D> {
        let mut points = Vec::with_capacity(3 * self.segment_count() + 1);
        points.push(self.points[0]);
        for i in 0..self.segment_count() {
            let [p0, p1, p2, p3] = self.span(i);
            points.push(p1 + (p2 - p0) / 6.0);
            points.push(p2 - (p3 - p1) / 6.0);
            points.push(p2);
        }
        BezierPath::from_valid(points, self.config)
    }

    /// Appends a control point.
    ///
    /// # Errors
    ///
    /// Returns a non-finite error for a non-finite point.
    pub fn push(&mut self, point: Point<D>) -> Result<()> {
        ensure_finite(&[point])?;
        self.points.push(point);
        self.refresh();
        Ok(())
    }

    /// Inserts a control point before `index` (`index == len` appends).
    ///
    /// # Errors
    ///
    /// Returns [`SplineError::IndexOutOfBounds`] if `index > len`.
    pub fn insert(&mut self, index: usize, point: Point<D>) -> Result<()> {
        let len = self.points.len();
        if index > len {
            return Err(SplineError::IndexOutOfBounds { index, len }.into());
        }
        ensure_finite(&[point])?;
        self.points.insert(index, point);
        self.refresh();
        Ok(())
    }

    /// Removes and returns control point `index`.
    ///
    /// # Errors
    ///
    /// Returns [`SplineError::IndexOutOfBounds`] for a bad index and
    /// [`SplineError::ControlPointCount`] if fewer than two points would
    /// remain.
    pub fn remove(&mut self, index: usize) -> Result<Point<D>> {
        let len = self.points.len();
        if index >= len {
            return Err(SplineError::IndexOutOfBounds { index, len }.into());
        }
        if len <= 2 {
            return Err(too_few(len - 1).into());
        }
        let removed = self.points.remove(index);
        self.refresh();
        Ok(removed)
    }

    /// Moves control point `index`.
    ///
    /// # Errors
    ///
    /// Returns [`SplineError::IndexOutOfBounds`] for a bad index.
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
    /// Same as [`CatmullRom::new`]; the spline is unchanged on error.
    pub fn set_control_points(&mut self, points: Vec<Point<D>>) -> Result<()> {
        validate(&points)?;
        self.points = points;
        self.refresh();
        Ok(())
    }

    fn span(&self, index: usize) -> [Point<D>; 4] {
        span_of(&self.points, index)
    }
}

impl<const D: usize> Curve<D> for CatmullRom<D> {
    fn segment_count(&self) -> usize {
        self.points.len() - 1
    }

    fn evaluate_segment(&self, index: usize, u: f64) -> Point<D> {
        position(&self.span(index.min(self.segment_count() - 1)), u)
    }

    fn derivative_segment(&self, index: usize, u: f64) -> VectorN<D> {
        let [p0, p1, p2, p3] = self.span(index.min(self.segment_count() - 1));
        let u = u.clamp(0.0, 1.0);
        let (p0, p1, p2, p3) = (p0.coords, p1.coords, p2.coords, p3.coords);
        let c1 = p2 - p0;
        let c2 = p0 * 2.0 - p1 * 5.0 + p2 * 4.0 - p3;
        let c3 = p1 * 3.0 - p0 - p2 * 3.0 + p3;
        (c1 + c2 * (2.0 * u) + c3 * (3.0 * u * u)) * 0.5
    }

    fn config(&self) -> &SplineConfig {
        &self.config
    }

    fn arc_length(&self) -> &ArcLengthTable {
        &self.table
    }
}

impl<const D: usize> EditableSpline<D> for CatmullRom<D> {
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

/// The four controls of segment `index`, with the end points duplicated.
fn span_of<const D: usize>(points: &[Point<D>], index: usize) -> [Point<D>; 4] {
    let last = points.len() - 1;
    let p1 = points[index];
    let p2 = points[index + 1];
    let p0 = if index == 0 { p1 } else { points[index - 1] };
    let p3 = if index + 1 == last { p2 } else { points[index + 2] };
    [p0, p1, p2, p3]
}

/// Uniform Catmull-Rom basis; the segment ends are returned exactly.
fn position<const D: usize>(span: &[Point<D>; 4], u: f64) -> Point<D> {
    let [p0, p1, p2, p3] = span;
    if u <= 0.0 {
        return *p1;
    }
    if u >= 1.0 {
        return *p2;
    }
    let (p0, p1, p2, p3) = (p0.coords, p1.coords, p2.coords, p3.coords);
    let c0 = p1 * 2.0;
    let c1 = p2 - p0;
    let c2 = p0 * 2.0 - p1 * 5.0 + p2 * 4.0 - p3;
    let c3 = p1 * 3.0 - p0 - p2 * 3.0 + p3;
    Point::from((c0 + c1 * u + c2 * (u * u) + c3 * (u * u * u)) * 0.5)
}

fn build_table<const D: usize>(points: &[Point<D>], config: &SplineConfig) -> ArcLengthTable {
    let n = points.len() - 1;
    ArcLengthTable::build(config.arc_length_samples, |t| {
        let (index, u) = locate_in(n, t);
        position(&span_of(points, index), u)
    })
}

fn validate<const D: usize>(points: &[Point<D>]) -> Result<()> {
    if points.len() < 2 {
        return Err(too_few(points.len()).into());
    }
    ensure_finite(points)
}

fn too_few(count: usize) -> SplineError {
    SplineError::ControlPointCount {
        kind: "Catmull-Rom spline",
        expected: "at least 2",
        count,
    }
}
