//! Quaternion rotations.
//!
//! Quaternions are stored as `(x, y, z, w)` (`coords = [i, j, k, w]`). The
//! rotation matrices produced here follow the column-vector convention of
//! [`super::matrix`]. Composition never renormalizes; callers that chain many
//! compositions should call [`try_normalize`] themselves.

use crate::error::{GeometryError, Result, TransformError};

use super::vector::try_normalize as try_normalize_vector;
use super::{Matrix3, Matrix4, Quaternion, Tolerance, Vector3, Vector4};

/// Order in which Euler angle rotations are applied.
///
/// Rotations are about the fixed world axes; `Xyz` rotates about X first,
/// then Y, then Z (`q = qz * qy * qx`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EulerOrder {
    Xyz,
    Xzy,
    Yxz,
    Yzx,
    Zxy,
    Zyx,
}

/// Builds a quaternion from its `(x, y, z, w)` components.
#[must_use]
pub fn from_components(x: f64, y: f64, z: f64, w: f64) -> Quaternion {
    Quaternion::from(Vector4::new(x, y, z, w))
}

/// Rotation of `angle` radians about `axis` (right-handed).
///
/// # Errors
///
/// Returns [`GeometryError::Degenerate`] if `axis` is zero-length.
pub fn from_axis_angle(axis: &Vector3, angle: f64, tol: Tolerance) -> Result<Quaternion> {
    let axis = try_normalize_vector(axis, tol)?;
    let (s, c) = (angle * 0.5).sin_cos();
    Ok(from_components(axis.x * s, axis.y * s, axis.z * s, c))
}

/// Rotation from Euler angles `(x, y, z)` in radians, applied in `order`.
#[must_use]
pub fn from_euler(angles: &Vector3, order: EulerOrder) -> Quaternion {
    let axis_rotation = |axis: usize, angle: f64| {
        let (s, c) = (angle * 0.5).sin_cos();
        let mut v = Vector4::new(0.0, 0.0, 0.0, c);
        v[axis] = s;
        Quaternion::from(v)
    };
    let qx = axis_rotation(0, angles.x);
    let qy = axis_rotation(1, angles.y);
    let qz = axis_rotation(2, angles.z);

    // The first axis named is applied first, so it sits rightmost.
    match order {
        EulerOrder::Xyz => qz * qy * qx,
        EulerOrder::Xzy => qy * qz * qx,
        EulerOrder::Yxz => qz * qx * qy,
        EulerOrder::Yzx => qx * qz * qy,
        EulerOrder::Zxy => qy * qx * qz,
        EulerOrder::Zyx => qx * qy * qz,
    }
}

/// Euler angles `(x, y, z)` of a unit quaternion for [`EulerOrder::Xyz`]
/// (roll, pitch, yaw). Pitch is clamped to `[-pi/2, pi/2]` at gimbal lock.
#[must_use]
pub fn to_euler(q: &Quaternion) -> Vector3 {
    let (x, y, z, w) = (q.coords.x, q.coords.y, q.coords.z, q.coords.w);
    let roll = (2.0 * (w * x + y * z)).atan2(1.0 - 2.0 * (x * x + y * y));
    let pitch = (2.0 * (w * y - z * x)).clamp(-1.0, 1.0).asin();
    let yaw = (2.0 * (w * z + x * y)).atan2(1.0 - 2.0 * (y * y + z * z));
    Vector3::new(roll, pitch, yaw)
}

/// Composition `a * b`: the resulting rotation applies `b`, then `a`.
#[must_use]
pub fn compose(a: &Quaternion, b: &Quaternion) -> Quaternion {
    a * b
}

/// Conjugate `(-x, -y, -z, w)`; the inverse of a unit quaternion.
#[must_use]
pub fn conjugate(q: &Quaternion) -> Quaternion {
    q.conjugate()
}

/// Returns `true` if `| |q| - 1 | <= eps`.
#[must_use]
pub fn is_normalized(q: &Quaternion, tol: Tolerance) -> bool {
    (q.coords.norm() - 1.0).abs() <= tol.epsilon
}

/// Unit quaternion in the direction of `q`.
///
/// # Errors
///
/// Returns [`GeometryError::Degenerate`] if `|q| <= eps`.
pub fn try_normalize(q: &Quaternion, tol: Tolerance) -> Result<Quaternion> {
    let len = q.coords.norm();
    if !len.is_finite() || len <= tol.epsilon {
        return Err(GeometryError::Degenerate("cannot normalize a zero quaternion".into()).into());
    }
    Ok(Quaternion::from(q.coords / len))
}

/// Multiplicative inverse `conj(q) / |q|^2`.
///
/// # Errors
///
/// Returns [`TransformError::Singular`] if `|q|^2 <= eps^2`; the reported
/// determinant is `|q|^2`.
pub fn try_inverse(q: &Quaternion, tol: Tolerance) -> Result<Quaternion> {
    let norm_sq = q.coords.norm_squared();
    if norm_sq <= tol.squared() {
        return Err(TransformError::Singular { determinant: norm_sq }.into());
    }
    Ok(Quaternion::from(q.conjugate().coords / norm_sq))
}

/// Rotates `v` by the unit quaternion `q`.
#[must_use]
pub fn rotate_vector(q: &Quaternion, v: &Vector3) -> Vector3 {
    let u = Vector3::new(q.coords.x, q.coords.y, q.coords.z);
    let t = u.cross(v) * 2.0;
    v + t * q.coords.w + u.cross(&t)
}

/// Rotation matrix of a unit quaternion.
#[must_use]
pub fn to_matrix3(q: &Quaternion) -> Matrix3 {
    let (x, y, z, w) = (q.coords.x, q.coords.y, q.coords.z, q.coords.w);
    let (xx, yy, zz) = (x * x, y * y, z * z);
    let (xy, xz, yz) = (x * y, x * z, y * z);
    let (wx, wy, wz) = (w * x, w * y, w * z);
    Matrix3::new(
        1.0 - 2.0 * (yy + zz), 2.0 * (xy - wz), 2.0 * (xz + wy),
        2.0 * (xy + wz), 1.0 - 2.0 * (xx + zz), 2.0 * (yz - wx),
        2.0 * (xz - wy), 2.0 * (yz + wx), 1.0 - 2.0 * (xx + yy),
    )
}

/// Homogeneous rotation matrix of a unit quaternion.
#[must_use]
pub fn to_matrix4(q: &Quaternion) -> Matrix4 {
    to_matrix3(q).to_homogeneous()
}

/// Unit quaternion of an orthonormal, right-handed rotation matrix.
#[must_use]
pub fn from_rotation_matrix(m: &Matrix3) -> Quaternion {
    let trace = m[(0, 0)] + m[(1, 1)] + m[(2, 2)];
    let q = if trace > 0.0 {
        let s = (trace + 1.0).sqrt() * 2.0;
        from_components(
            (m[(2, 1)] - m[(1, 2)]) / s,
            (m[(0, 2)] - m[(2, 0)]) / s,
            (m[(1, 0)] - m[(0, 1)]) / s,
            0.25 * s,
        )
    } else if m[(0, 0)] > m[(1, 1)] && m[(0, 0)] > m[(2, 2)] {
        let s = (1.0 + m[(0, 0)] - m[(1, 1)] - m[(2, 2)]).sqrt() * 2.0;
        from_components(
            0.25 * s,
            (m[(0, 1)] + m[(1, 0)]) / s,
            (m[(0, 2)] + m[(2, 0)]) / s,
            (m[(2, 1)] - m[(1, 2)]) / s,
        )
    } else if m[(1, 1)] > m[(2, 2)] {
        let s = (1.0 + m[(1, 1)] - m[(0, 0)] - m[(2, 2)]).sqrt() * 2.0;
        from_components(
            (m[(0, 1)] + m[(1, 0)]) / s,
            0.25 * s,
            (m[(1, 2)] + m[(2, 1)]) / s,
            (m[(0, 2)] - m[(2, 0)]) / s,
        )
    } else {
        let s = (1.0 + m[(2, 2)] - m[(0, 0)] - m[(1, 1)]).sqrt() * 2.0;
        from_components(
            (m[(0, 2)] + m[(2, 0)]) / s,
            (m[(1, 2)] + m[(2, 1)]) / s,
            0.25 * s,
            (m[(1, 0)] - m[(0, 1)]) / s,
        )
    };
    let len = q.coords.norm();
    if len > 0.0 {
        Quaternion::from(q.coords / len)
    } else {
        Quaternion::identity()
    }
}

/// Normalized linear interpolation along the shorter arc.
///
/// # Errors
///
/// Returns [`GeometryError::Degenerate`] if the blend has zero length.
pub fn nlerp(a: &Quaternion, b: &Quaternion, t: f64, tol: Tolerance) -> Result<Quaternion> {
    let b = shortest_path_partner(a, b);
    let blended = a.coords + (b - a.coords) * t;
    try_normalize(&Quaternion::from(blended), tol)
}

/// Spherical linear interpolation between two unit quaternions.
///
/// `b` is negated when `a . b < 0` so the interpolation follows the shorter
/// arc. When the inputs are within `eps` of parallel the `sin(theta)`
/// denominator vanishes, so the result falls back to [`nlerp`].
#[must_use]
pub fn slerp(a: &Quaternion, b: &Quaternion, t: f64, tol: Tolerance) -> Quaternion {
    let b = shortest_path_partner(a, b);
    let cos = a.coords.dot(&b);

    if cos > 1.0 - tol.epsilon {
        let blended = a.coords + (b - a.coords) * t;
        let len = blended.norm();
        return if len > tol.epsilon {
            Quaternion::from(blended / len)
        } else {
            *a
        };
    }

    let theta = cos.clamp(-1.0, 1.0).acos();
    let sin = theta.sin();
    let wa = ((1.0 - t) * theta).sin() / sin;
    let wb = (t * theta).sin() / sin;
    Quaternion::from(a.coords * wa + b * wb)
}

/// Rotation angle in `[0, pi]` that takes `a` to `b` (unit inputs).
///
/// Uses the half-chord `atan2` form, which stays accurate for nearly equal
/// rotations where `acos` of the dot product loses precision.
#[must_use]
pub fn angle_between(a: &Quaternion, b: &Quaternion) -> f64 {
    let b = shortest_path_partner(a, b);
    let diff = (a.coords - b).norm();
    let sum = (a.coords + b).norm();
    4.0 * diff.atan2(sum)
}

/// `b`'s coordinates, negated if that puts them on `a`'s hemisphere.
fn shortest_path_partner(a: &Quaternion, b: &Quaternion) -> Vector4 {
    if a.coords.dot(&b.coords) < 0.0 {
        -b.coords
    } else {
        b.coords
    }
}
