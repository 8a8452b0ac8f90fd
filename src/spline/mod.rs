//! Piecewise cubic splines with arc-length parameterization.
//!
//! A spline is evaluated on the global parameter `t` in `[0, 1]`, spread
//! evenly over its segments: segment `i` of `n` covers `[i / n, (i + 1) / n]`
//! and `t = 1` falls in the last segment. Each spline owns an
//! [`ArcLengthTable`] that is rebuilt whenever its control points change.

mod arc_length;
mod bezier;
mod catmull_rom;

pub use arc_length::ArcLengthTable;
pub use bezier::BezierPath;
pub use catmull_rom::CatmullRom;

use crate::error::{CurvixError, GeometryError, Result};
use crate::math::vector::try_normalize;
use crate::math::{Point, Tolerance, VectorN};

/// Default number of chords in a spline's arc-length table.
pub const DEFAULT_ARC_LENGTH_SAMPLES: usize = 64;

/// Local parameters this close to a knot snap onto it, so that the
/// parameter of a control point evaluates to that control point exactly.
const KNOT_SNAP: f64 = 1e-12;

/// How a global parameter outside `[0, 1]` is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParamMode {
    /// Reject parameters outside `[0, 1]`.
    #[default]
    Strict,
    /// Clamp into `[0, 1]`.
    Clamp,
    /// Wrap by the fractional part; values in `[0, 1]` are kept as is.
    Wrap,
}

impl ParamMode {
    /// Maps `t` into `[0, 1]` according to the mode.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::ParameterOutOfRange`] for a non-finite `t`,
    /// or in [`ParamMode::Strict`] for any `t` outside `[0, 1]`.
    pub fn resolve(self, t: f64) -> Result<f64> {
        if (0.0..=1.0).contains(&t) {
            return Ok(t);
        }
        let out_of_range = || -> CurvixError {
            GeometryError::ParameterOutOfRange {
                parameter: "t",
                value: t,
                min: 0.0,
                max: 1.0,
            }
            .into()
        };
        if !t.is_finite() {
            return Err(out_of_range());
        }
        match self {
            Self::Strict => Err(out_of_range()),
            Self::Clamp => Ok(t.clamp(0.0, 1.0)),
            Self::Wrap => Ok(t.rem_euclid(1.0)),
        }
    }
}

/// Per-spline settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplineConfig {
    /// Chords in the arc-length table (raised to at least 1).
    pub arc_length_samples: usize,
    /// Mode used by [`Curve::at`] and [`Curve::tangent_at`].
    pub mode: ParamMode,
    pub tolerance: Tolerance,
}

impl Default for SplineConfig {
    fn default() -> Self {
        Self {
            arc_length_samples: DEFAULT_ARC_LENGTH_SAMPLES,
            mode: ParamMode::default(),
            tolerance: Tolerance::default(),
        }
    }
}

/// A piecewise cubic curve in `D` dimensions.
///
/// Implementors supply per-segment evaluation; everything on the global
/// parameter is provided.
pub trait Curve<const D: usize> {
    /// Number of cubic segments (at least 1).
    fn segment_count(&self) -> usize;

    /// Point on segment `index` at local parameter `u` in `[0, 1]`.
    fn evaluate_segment(&self, index: usize, u: f64) -> Point<D>;

    /// Derivative `dP/du` on segment `index`.
    fn derivative_segment(&self, index: usize, u: f64) -> VectorN<D>;

    fn config(&self) -> &SplineConfig;

    fn arc_length(&self) -> &ArcLengthTable;

    /// Segment index and local parameter for a global `t` in `[0, 1]`.
    fn locate(&self, t: f64) -> (usize, f64) {
        locate_in(self.segment_count(), t)
    }

    /// Point at global parameter `t`.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::ParameterOutOfRange`] when `mode` rejects `t`.
    fn evaluate(&self, t: f64, mode: ParamMode) -> Result<Point<D>> {
        let t = mode.resolve(t)?;
        let (index, u) = self.locate(t);
        Ok(self.evaluate_segment(index, u))
    }

    /// Point at `t` using the configured mode.
    ///
    /// # Errors
    ///
    /// See [`Curve::evaluate`].
    fn at(&self, t: f64) -> Result<Point<D>> {
        self.evaluate(t, self.config().mode)
    }

    /// Point at `t` clamped into `[0, 1]`; NaN maps to the start.
    fn evaluate_clamped(&self, t: f64) -> Point<D> {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let (index, u) = self.locate(t);
        self.evaluate_segment(index, u)
    }

    /// Derivative `dP/dt` with respect to the global parameter.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::ParameterOutOfRange`] when `mode` rejects
    /// `t`, or [`GeometryError::Degenerate`] when the derivative vanishes
    /// (for example at coincident control points).
    fn tangent(&self, t: f64, mode: ParamMode) -> Result<VectorN<D>> {
        let t = mode.resolve(t)?;
        let (index, u) = self.locate(t);
        #[allow(clippy::cast_precision_loss)]
        let d = self.derivative_segment(index, u) * self.segment_count() as f64;
        if d.norm() <= self.config().tolerance.epsilon {
            return Err(GeometryError::Degenerate(format!("zero tangent at t = {t}")).into());
        }
        Ok(d)
    }

    /// Tangent at `t` using the configured mode.
    ///
    /// # Errors
    ///
    /// See [`Curve::tangent`].
    fn tangent_at(&self, t: f64) -> Result<VectorN<D>> {
        self.tangent(t, self.config().mode)
    }

    /// Unit tangent at `t`.
    ///
    /// # Errors
    ///
    /// See [`Curve::tangent`].
    fn unit_tangent(&self, t: f64, mode: ParamMode) -> Result<VectorN<D>> {
        try_normalize(&self.tangent(t, mode)?, self.config().tolerance)
    }

    /// Polyline length through `subdivisions + 1` evenly spaced parameters
    /// (`subdivisions` is raised to at least 1).
    fn length(&self, subdivisions: usize) -> f64 {
        let pts = self.sample(subdivisions.max(1) + 1);
        pts.windows(2).map(|w| (w[1] - w[0]).norm()).sum()
    }

    /// `count` points at evenly spaced parameters from `t = 0` to `t = 1`.
    #[allow(clippy::cast_precision_loss)]
    fn sample(&self, count: usize) -> Vec<Point<D>> {
        match count {
            0 => Vec::new(),
            1 => vec![self.evaluate_clamped(0.0)],
            _ => {
                let step = 1.0 / (count - 1) as f64;
                (0..count).map(|k| self.evaluate_clamped(k as f64 * step)).collect()
            }
        }
    }

    /// Arc length according to the spline's table.
    fn total_length(&self) -> f64 {
        self.arc_length().total_length()
    }

    /// Point at arc length `distance` from the start, clamped to the curve.
    fn evaluate_by_distance(&self, distance: f64) -> Point<D> {
        self.evaluate_clamped(self.arc_length().parameter_at_distance(distance))
    }

    /// Tangent `dP/dt` at arc length `distance` from the start.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::Degenerate`] when the derivative vanishes.
    fn tangent_by_distance(&self, distance: f64) -> Result<VectorN<D>> {
        self.tangent(self.arc_length().parameter_at_distance(distance), ParamMode::Clamp)
    }
}

/// Editor-facing access to a spline's control points.
///
/// Changing the points through this trait keeps the arc-length table in
/// sync; [`EditableSpline::refresh`] rebuilds it on demand.
pub trait EditableSpline<const D: usize> {
    fn control_points(&self) -> &[Point<D>];

    /// Replaces every control point.
    ///
    /// # Errors
    ///
    /// Returns a spline error if the new count is invalid for the spline
    /// kind; the spline is unchanged in that case.
    fn replace_control_points(&mut self, points: Vec<Point<D>>) -> Result<()>;

    /// Re-evaluates derived state (the arc-length table).
    fn refresh(&mut self);
}

/// Segment index and local parameter of `t` on a curve of `n` segments.
fn locate_in(n: usize, t: f64) -> (usize, f64) {
    let n = n.max(1);
    #[allow(clippy::cast_precision_loss)]
    let scaled = t.clamp(0.0, 1.0) * n as f64;
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let index = (scaled.floor() as usize).min(n - 1);
    #[allow(clippy::cast_precision_loss)]
    let mut u = scaled - index as f64;
    if u < KNOT_SNAP {
        u = 0.0;
    } else if u > 1.0 - KNOT_SNAP {
        u = 1.0;
    }
    (index, u)
}

/// Rejects control points with non-finite components.
fn ensure_finite<const D: usize>(points: &[Point<D>]) -> Result<()> {
    if points.iter().all(|p| p.coords.iter().all(|c| c.is_finite())) {
        Ok(())
    } else {
        Err(GeometryError::NonFinite("control point").into())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn strict_rejects_out_of_range() {
        assert!(ParamMode::Strict.resolve(1.5).unwrap_err().is_out_of_range());
        assert!(ParamMode::Strict.resolve(-0.1).is_err());
        assert_eq!(ParamMode::Strict.resolve(1.0), Ok(1.0));
    }

    #[test]
    fn clamp_and_wrap() {
        assert_eq!(ParamMode::Clamp.resolve(1.5), Ok(1.0));
        assert_eq!(ParamMode::Clamp.resolve(-2.0), Ok(0.0));
        assert!((ParamMode::Wrap.resolve(1.25).unwrap_or(f64::NAN) - 0.25).abs() < 1e-12);
        assert!((ParamMode::Wrap.resolve(-0.25).unwrap_or(f64::NAN) - 0.75).abs() < 1e-12);
        assert_eq!(ParamMode::Wrap.resolve(1.0), Ok(1.0));
    }

    #[test]
    fn non_finite_is_always_rejected() {
        for mode in [ParamMode::Strict, ParamMode::Clamp, ParamMode::Wrap] {
            assert!(mode.resolve(f64::NAN).is_err());
            assert!(mode.resolve(f64::INFINITY).is_err());
        }
    }
}
