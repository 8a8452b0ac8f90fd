//! Vector operations shared by every dimension.
//!
//! Arithmetic (add, subtract, scale) comes straight from `nalgebra`'s
//! operators; this module adds the operations whose failure modes must be
//! explicit, such as normalization and angle measurement.

use std::f64::consts::PI;

use crate::error::{GeometryError, Result};

use super::{Tolerance, Vector2, Vector3, VectorN};

/// Returns the unit vector in the direction of `v`.
///
/// # Errors
///
/// Returns [`GeometryError::Degenerate`] if `|v| <= eps` or `v` is not finite.
pub fn try_normalize<const D: usize>(v: &VectorN<D>, tol: Tolerance) -> Result<VectorN<D>> {
    let len = v.norm();
    if !len.is_finite() || len <= tol.epsilon {
        return Err(GeometryError::Degenerate("cannot normalize a zero-length vector".into()).into());
    }
    Ok(*v / len)
}

/// Normalizes `v`, returning `(zero, true)` instead of failing when `v` is
/// too short to normalize.
#[must_use]
pub fn normalize_or_zero<const D: usize>(v: &VectorN<D>, tol: Tolerance) -> (VectorN<D>, bool) {
    match try_normalize(v, tol) {
        Ok(unit) => (unit, false),
        Err(_) => (VectorN::<D>::zeros(), true),
    }
}

/// Returns `true` if every component is finite.
#[must_use]
pub fn is_finite<const D: usize>(v: &VectorN<D>) -> bool {
    v.iter().all(|c| c.is_finite())
}

/// Component-wise product.
#[must_use]
pub fn component_mul<const D: usize>(a: &VectorN<D>, b: &VectorN<D>) -> VectorN<D> {
    a.component_mul(b)
}

/// Linear interpolation `a + (b - a) * t`, `t` unclamped.
#[must_use]
pub fn lerp<const D: usize>(a: &VectorN<D>, b: &VectorN<D>, t: f64) -> VectorN<D> {
    *a + (*b - *a) * t
}

/// Linear interpolation with `t` clamped into `[0, 1]`.
#[must_use]
pub fn lerp_clamped<const D: usize>(a: &VectorN<D>, b: &VectorN<D>, t: f64) -> VectorN<D> {
    lerp(a, b, t.clamp(0.0, 1.0))
}

/// Angle between two vectors in `[0, pi]`.
///
/// The cosine is clamped into `[-1, 1]` before `acos`, so round-off never
/// produces `NaN` for (anti-)parallel inputs.
///
/// # Errors
///
/// Returns [`GeometryError::Degenerate`] if either vector is zero-length.
pub fn angle_between<const D: usize>(a: &VectorN<D>, b: &VectorN<D>, tol: Tolerance) -> Result<f64> {
    let ua = try_normalize(a, tol)?;
    let ub = try_normalize(b, tol)?;
    let cos = ua.dot(&ub).clamp(-1.0, 1.0);
    Ok(cos.acos().clamp(0.0, PI))
}

/// Tolerance-based equality, relative to the larger of the two magnitudes.
#[must_use]
pub fn approx_eq<const D: usize>(a: &VectorN<D>, b: &VectorN<D>, tol: Tolerance) -> bool {
    (*a - *b).norm() <= tol.scaled(a.norm().max(b.norm()))
}

/// Projection of `v` onto the direction of `onto`.
///
/// # Errors
///
/// Returns [`GeometryError::Degenerate`] if `onto` is zero-length.
pub fn project_onto<const D: usize>(v: &VectorN<D>, onto: &VectorN<D>, tol: Tolerance) -> Result<VectorN<D>> {
    let len_sq = onto.norm_squared();
    if len_sq <= tol.squared() {
        return Err(GeometryError::Degenerate("cannot project onto a zero-length vector".into()).into());
    }
    Ok(*onto * (v.dot(onto) / len_sq))
}

/// Component of `v` perpendicular to `from`.
///
/// # Errors
///
/// Returns [`GeometryError::Degenerate`] if `from` is zero-length.
pub fn reject_from<const D: usize>(v: &VectorN<D>, from: &VectorN<D>, tol: Tolerance) -> Result<VectorN<D>> {
    Ok(*v - project_onto(v, from, tol)?)
}

/// 2D scalar cross product `a.x * b.y - a.y * b.x`.
///
/// Positive when `b` is counter-clockwise from `a`.
#[must_use]
pub fn perp_dot(a: &Vector2, b: &Vector2) -> f64 {
    a.x * b.y - a.y * b.x
}

/// `v` rotated a quarter turn counter-clockwise.
#[must_use]
pub fn perp(v: &Vector2) -> Vector2 {
    Vector2::new(-v.y, v.x)
}

/// 3D cross product.
#[must_use]
pub fn cross(a: &Vector3, b: &Vector3) -> Vector3 {
    a.cross(b)
}

/// A unit vector perpendicular to the unit vector `n`.
#[must_use]
pub fn any_orthonormal(n: &Vector3) -> Vector3 {
    // Choose a reference axis not parallel to n.
    let reference = if n.x.abs() < 0.9 {
        Vector3::x()
    } else {
        Vector3::y()
    };
    n.cross(&reference).normalize()
}
