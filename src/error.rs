use thiserror::Error;

/// Top-level error type for the Curvix kernel.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CurvixError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Transform(#[from] TransformError),

    #[error(transparent)]
    Spline(#[from] SplineError),
}

/// Errors related to geometric computations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    #[error("parameter {parameter} = {value} is out of range [{min}, {max}]")]
    ParameterOutOfRange {
        parameter: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("degenerate geometry: {0}")]
    Degenerate(String),

    #[error("non-finite component in {0}")]
    NonFinite(&'static str),
}

/// Errors related to matrices and quaternions.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TransformError {
    #[error("matrix is singular (determinant = {determinant})")]
    Singular { determinant: f64 },

    #[error("cannot decompose transform: {0}")]
    Decomposition(String),
}

/// Errors related to spline control structures.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SplineError {
    #[error("{kind} needs {expected}, got {count} control points")]
    ControlPointCount {
        kind: &'static str,
        expected: &'static str,
        count: usize,
    },

    #[error("control point index {index} out of bounds (len {len})")]
    IndexOutOfBounds { index: usize, len: usize },
}

impl CurvixError {
    /// Returns `true` for the degenerate-input class of failures.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        matches!(self, Self::Geometry(GeometryError::Degenerate(_)))
    }

    /// Returns `true` when a matrix or quaternion could not be inverted.
    #[must_use]
    pub fn is_singular(&self) -> bool {
        matches!(self, Self::Transform(TransformError::Singular { .. }))
    }

    /// Returns `true` when a parameter fell outside its valid domain.
    #[must_use]
    pub fn is_out_of_range(&self) -> bool {
        matches!(
            self,
            Self::Geometry(GeometryError::ParameterOutOfRange { .. })
        )
    }
}

/// Convenience type alias for results using [`CurvixError`].
pub type Result<T> = std::result::Result<T, CurvixError>;
