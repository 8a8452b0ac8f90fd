use crate::math::Point;

/// Cumulative chord lengths of a curve at evenly spaced parameters.
///
/// `params[k] = k / samples` and `lengths[k]` is the polyline length from
/// `t = 0` up to `params[k]`. Both vectors hold `samples + 1` entries and
/// `lengths` is non-decreasing.
#[derive(Debug, Clone, PartialEq)]
pub struct ArcLengthTable {
    params: Vec<f64>,
    lengths: Vec<f64>,
}

impl ArcLengthTable {
    /// Samples `point_at` at `samples + 1` parameters (`samples` is raised
    /// to at least 1).
    #[must_use]
    pub fn build<const D: usize>(samples: usize, point_at: impl Fn(f64) -> Point<D>) -> Self {
        let samples = samples.max(1);
        let mut params = Vec::with_capacity(samples + 1);
        let mut lengths = Vec::with_capacity(samples + 1);

        let mut prev = point_at(0.0);
        let mut total = 0.0;
        params.push(0.0);
        lengths.push(0.0);
        for k in 1..=samples {
            #[allow(clippy::cast_precision_loss)]
            let t = k as f64 / samples as f64;
            let p = point_at(t);
            total += (p - prev).norm();
            params.push(t);
            lengths.push(total);
            prev = p;
        }
        Self { params, lengths }
    }

    /// Number of chords in the table.
    #[must_use]
    pub fn samples(&self) -> usize {
        self.params.len() - 1
    }

    #[must_use]
    pub fn total_length(&self) -> f64 {
        self.lengths.last().copied().unwrap_or(0.0)
    }

    /// Curve parameter at arc length `distance` from the start.
    ///
    /// The distance is clamped to `[0, total_length]`; the parameter is
    /// interpolated linearly between the bracketing samples. A zero-length
    /// curve maps every distance to `0`.
    #[must_use]
    pub fn parameter_at_distance(&self, distance: f64) -> f64 {
        let total = self.total_length();
        if total <= 0.0 || distance.is_nan() {
            return 0.0;
        }
        let d = distance.clamp(0.0, total);
        let idx = self.lengths.partition_point(|&l| l < d);
        if idx == 0 {
            return self.params[0];
        }
        if idx >= self.lengths.len() {
            return self.params[self.params.len() - 1];
        }
        let (l0, l1) = (self.lengths[idx - 1], self.lengths[idx]);
        let (t0, t1) = (self.params[idx - 1], self.params[idx]);
        let span = l1 - l0;
        if span <= 0.0 {
            return t1;
        }
        t0 + (d - l0) / span * (t1 - t0)
    }

    /// Arc length from the start to parameter `t`, interpolated.
    #[must_use]
    pub fn distance_at_parameter(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        let samples = self.samples();
        #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let k = ((t * samples as f64).floor() as usize).min(samples - 1);
        let (t0, t1) = (self.params[k], self.params[k + 1]);
        let frac = (t - t0) / (t1 - t0);
        self.lengths[k] + frac * (self.lengths[k + 1] - self.lengths[k])
    }
}
