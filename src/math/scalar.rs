//! Scalar helpers and fast approximations of common transcendental functions.
//!
//! The `fast_*` functions trade accuracy for speed; each documents its
//! worst-case error over the stated input range.

use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI, TAU};

use super::Tolerance;

/// Clamps `x` into `[0, 1]`.
#[must_use]
pub fn clamp01(x: f64) -> f64 {
    x.clamp(0.0, 1.0)
}

/// Tolerance-based equality of two scalars.
#[must_use]
pub fn approx_eq(a: f64, b: f64, tol: Tolerance) -> bool {
    tol.approx_eq(a, b)
}

/// Linear interpolation `a + (b - a) * t`, `t` unclamped.
#[must_use]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Returns `t` such that `lerp(a, b, t) == x`.
///
/// Returns `None` when `a` and `b` are equal within tolerance.
#[must_use]
pub fn inverse_lerp(a: f64, b: f64, x: f64, tol: Tolerance) -> Option<f64> {
    let span = b - a;
    if tol.is_zero(span) {
        return None;
    }
    Some((x - a) / span)
}

/// Approximate `1 / sqrt(x)` using the bit-level initial guess refined by
/// three Newton steps. Relative error is below `1e-9` for positive finite `x`.
///
/// Returns `f64::INFINITY` for `x <= 0`.
#[must_use]
pub fn fast_inv_sqrt(x: f64) -> f64 {
    if x <= 0.0 {
        return f64::INFINITY;
    }
    let half = 0.5 * x;
    let mut y = f64::from_bits(0x5FE6_EB50_C7B5_37A9 - (x.to_bits() >> 1));
    y *= 1.5 - half * y * y;
    y *= 1.5 - half * y * y;
    y *= 1.5 - half * y * y;
    y
}

/// Approximate `sqrt(x)` built on [`fast_inv_sqrt`]. Returns `0` for `x <= 0`.
#[must_use]
pub fn fast_sqrt(x: f64) -> f64 {
    if x <= 0.0 {
        return 0.0;
    }
    x * fast_inv_sqrt(x)
}

/// Approximate `sin(x)` with a corrected parabola. Absolute error is below
/// `2e-3` for any finite `x`.
#[must_use]
pub fn fast_sin(x: f64) -> f64 {
    const B: f64 = 4.0 / PI;
    const C: f64 = -4.0 / (PI * PI);
    const P: f64 = 0.225;

    // Wrap into [-pi, pi).
    let x = (x + PI).rem_euclid(TAU) - PI;
    let y = B * x + C * x * x.abs();
    P * (y * y.abs() - y) + y
}

/// Approximate `cos(x)`; same error bound as [`fast_sin`].
#[must_use]
pub fn fast_cos(x: f64) -> f64 {
    fast_sin(x + FRAC_PI_2)
}

/// Approximate `atan2(y, x)`. Absolute error is below `2e-3` radians.
///
/// Returns `0` when both arguments are zero.
#[must_use]
pub fn fast_atan2(y: f64, x: f64) -> f64 {
    if x == 0.0 && y == 0.0 {
        return 0.0;
    }
    let ax = x.abs();
    let ay = y.abs();
    let (z, swapped) = if ay > ax { (ax / ay, true) } else { (ay / ax, false) };

    // atan(z) for z in [0, 1].
    let mut angle = FRAC_PI_4 * z - z * (z - 1.0) * (0.2447 + 0.0663 * z);
    if swapped {
        angle = FRAC_PI_2 - angle;
    }
    if x < 0.0 {
        angle = PI - angle;
    }
    if y < 0.0 {
        -angle
    } else {
        angle
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inverse_lerp_recovers_parameter() {
        let tol = Tolerance::default();
        let t = inverse_lerp(2.0, 6.0, 5.0, tol).unwrap_or(f64::NAN);
        assert!((t - 0.75).abs() < 1e-12);
        assert!(inverse_lerp(3.0, 3.0, 3.0, tol).is_none());
    }

    #[test]
    fn fast_inv_sqrt_is_close() {
        for &x in &[1e-6, 0.25, 1.0, 2.0, 10.0, 12345.678] {
            let exact = 1.0 / f64::sqrt(x);
            let approx = fast_inv_sqrt(x);
            assert!(((approx - exact) / exact).abs() < 1e-9, "x={x}");
        }
        assert!((fast_sqrt(16.0) - 4.0).abs() < 1e-4);
        assert!(fast_sqrt(-1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn fast_trig_within_error_bound() {
        let mut x = -10.0;
        while x < 10.0 {
            assert!((fast_sin(x) - x.sin()).abs() < 2e-3, "sin x={x}");
            assert!((fast_cos(x) - x.cos()).abs() < 2e-3, "cos x={x}");
            x += 0.01;
        }
    }

    #[test]
    fn fast_atan2_covers_all_quadrants() {
        for i in 0..360 {
            let a = f64::from(i).to_radians() - PI + 0.001;
            let (y, x) = (a.sin() * 3.0, a.cos() * 3.0);
            assert!((fast_atan2(y, x) - y.atan2(x)).abs() < 2e-3, "angle={a}");
        }
        assert!(fast_atan2(0.0, 0.0).abs() < f64::EPSILON);
    }
}
