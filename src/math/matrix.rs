//! Matrix operations.
//!
//! Convention, used uniformly by every matrix and by the quaternion
//! conversions: points and vectors are column vectors (`p' = M * p`), storage
//! is column-major, and `compose(a, b) = a * b` applies `b` first.

use std::ops::Mul;

use crate::error::{GeometryError, Result, TransformError};

use super::quaternion;
use super::{Affine2, Matrix2, Matrix3, Matrix4, Point2, Point3, Quaternion, Tolerance, Vector2, Vector3};

/// Square matrix operations shared by [`Matrix2`], [`Matrix3`] and [`Matrix4`].
pub trait SquareMatrix: Copy + Mul<Output = Self> {
    /// The determinant.
    fn det(&self) -> f64;

    /// The transpose.
    fn transposed(&self) -> Self;

    /// Inverse without a tolerance check; `None` only when exactly singular.
    fn raw_inverse(&self) -> Option<Self>;
}

impl SquareMatrix for Matrix2 {
    fn det(&self) -> f64 {
        self.determinant()
    }

    fn transposed(&self) -> Self {
        self.transpose()
    }

    fn raw_inverse(&self) -> Option<Self> {
        self.try_inverse()
    }
}

impl SquareMatrix for Matrix3 {
    fn det(&self) -> f64 {
        self.determinant()
    }

    fn transposed(&self) -> Self {
        self.transpose()
    }

    fn raw_inverse(&self) -> Option<Self> {
        self.try_inverse()
    }
}

impl SquareMatrix for Matrix4 {
    fn det(&self) -> f64 {
        self.determinant()
    }

    fn transposed(&self) -> Self {
        self.transpose()
    }

    fn raw_inverse(&self) -> Option<Self> {
        self.try_inverse()
    }
}

/// Determinant of a square matrix.
#[must_use]
pub fn determinant<M: SquareMatrix>(m: &M) -> f64 {
    m.det()
}

/// Transpose of a square matrix.
#[must_use]
pub fn transpose<M: SquareMatrix>(m: &M) -> M {
    m.transposed()
}

/// Composition `a * b`: the resulting map applies `b`, then `a`.
#[must_use]
pub fn compose<M: SquareMatrix>(a: &M, b: &M) -> M {
    *a * *b
}

/// Returns `true` if `|det(m)| > eps`.
#[must_use]
pub fn is_invertible<M: SquareMatrix>(m: &M, tol: Tolerance) -> bool {
    m.det().abs() > tol.epsilon
}

/// Inverse of a square matrix.
///
/// # Errors
///
/// Returns [`TransformError::Singular`] if `|det(m)| <= eps`.
pub fn try_inverse<M: SquareMatrix>(m: &M, tol: Tolerance) -> Result<M> {
    let determinant = m.det();
    if !determinant.is_finite() || determinant.abs() <= tol.epsilon {
        return Err(TransformError::Singular { determinant }.into());
    }
    m.raw_inverse()
        .ok_or_else(|| TransformError::Singular { determinant }.into())
}

/// Translation, rotation and scale of an affine 4x4 transform.
///
/// Recomposes as `T * R * S`: scale first, then rotation, then translation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Trs {
    pub translation: Vector3,
    /// Unit rotation quaternion.
    pub rotation: Quaternion,
    pub scale: Vector3,
}

/// Builds the affine transform `T * R * S`.
///
/// `rotation` is expected to be a unit quaternion.
#[must_use]
pub fn from_trs(translation: &Vector3, rotation: &Quaternion, scale: &Vector3) -> Matrix4 {
    let r = quaternion::to_matrix3(rotation);
    let mut m = Matrix4::identity();
    for col in 0..3 {
        for row in 0..3 {
            m[(row, col)] = r[(row, col)] * scale[col];
        }
        m[(col, 3)] = translation[col];
    }
    m
}

/// Splits an affine transform into translation, rotation and scale.
///
/// A reflection (negative determinant) is folded into the x scale.
///
/// # Errors
///
/// - [`TransformError::Decomposition`] if the bottom row is not `[0, 0, 0, 1]`
///   or the basis is sheared, so no single rotation reproduces it.
/// - [`TransformError::Singular`] if any axis has zero scale.
/// - [`GeometryError::NonFinite`] if any entry is NaN or infinite.
pub fn decompose(m: &Matrix4, tol: Tolerance) -> Result<Trs> {
    ensure_finite(m)?;
    let bottom = [m[(3, 0)], m[(3, 1)], m[(3, 2)], m[(3, 3)] - 1.0];
    if bottom.iter().any(|c| c.abs() > tol.epsilon) {
        return Err(TransformError::Decomposition("matrix is not affine".into()).into());
    }

    let translation = Vector3::new(m[(0, 3)], m[(1, 3)], m[(2, 3)]);
    let mut columns = [
        Vector3::new(m[(0, 0)], m[(1, 0)], m[(2, 0)]),
        Vector3::new(m[(0, 1)], m[(1, 1)], m[(2, 1)]),
        Vector3::new(m[(0, 2)], m[(1, 2)], m[(2, 2)]),
    ];
    let mut scale = Vector3::new(columns[0].norm(), columns[1].norm(), columns[2].norm());
    if scale.iter().any(|s| *s <= tol.epsilon) {
        let linear = Matrix3::from_columns(&columns);
        return Err(TransformError::Singular {
            determinant: linear.determinant(),
        }
        .into());
    }
    for (col, s) in columns.iter_mut().zip(scale.iter()) {
        *col /= *s;
    }

    for (i, j) in [(0, 1), (0, 2), (1, 2)] {
        if columns[i].dot(&columns[j]).abs() > tol.epsilon {
            return Err(TransformError::Decomposition(format!(
                "basis axes {i} and {j} are not orthogonal (sheared transform)"
            ))
            .into());
        }
    }

    if columns[0].cross(&columns[1]).dot(&columns[2]) < 0.0 {
        scale.x = -scale.x;
        columns[0] = -columns[0];
    }

    let rotation = quaternion::from_rotation_matrix(&Matrix3::from_columns(&columns));
    Ok(Trs {
        translation,
        rotation,
        scale,
    })
}

/// Applies an affine transform to a point.
#[must_use]
pub fn transform_point(m: &Matrix4, p: &Point3) -> Point3 {
    let h = m * p.to_homogeneous();
    Point3::new(h.x, h.y, h.z)
}

/// Applies the linear part of an affine transform to a direction.
#[must_use]
pub fn transform_vector(m: &Matrix4, v: &Vector3) -> Vector3 {
    m.fixed_view::<3, 3>(0, 0) * v
}

/// Builds the 2D affine map `T * R * S` with rotation `angle` (radians, CCW).
#[must_use]
pub fn affine2_from_trs(translation: &Vector2, angle: f64, scale: &Vector2) -> Affine2 {
    let (s, c) = angle.sin_cos();
    Affine2::new(
        c * scale.x, -s * scale.y, translation.x,
        s * scale.x, c * scale.y, translation.y,
        0.0, 0.0, 1.0,
    )
}

/// Applies a 2D affine map to a point.
#[must_use]
pub fn transform_point2(m: &Affine2, p: &Point2) -> Point2 {
    let h = m * p.to_homogeneous();
    Point2::new(h.x, h.y)
}

/// Applies the linear part of a 2D affine map to a direction.
#[must_use]
pub fn transform_vector2(m: &Affine2, v: &Vector2) -> Vector2 {
    m.fixed_view::<2, 2>(0, 0) * v
}

/// Linear part of a 2D affine map.
#[must_use]
pub fn affine2_linear(m: &Affine2) -> Matrix2 {
    m.fixed_view::<2, 2>(0, 0).into_owned()
}

fn ensure_finite(m: &Matrix4) -> Result<()> {
    if m.iter().all(|c| c.is_finite()) {
        Ok(())
    } else {
        Err(GeometryError::NonFinite("matrix").into())
    }
}
