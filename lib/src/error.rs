//! Error types for fitting, prediction, and the linear-algebra utility.

use thiserror::Error;

/// Failure outcomes of [`fit`](crate::model::Regressor::fit) and
/// [`predict`](crate::model::InferenceModel::predict).
///
/// Every variant is an expected, recoverable outcome that the caller is meant
/// to render; none of them is retried automatically since fitting is
/// deterministic.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RegressionError {
    /// The dataset has fewer observations than the configured minimum.
    #[error("insufficient data: need at least {needed} observations, got {got}")]
    InsufficientData { needed: usize, got: usize },

    /// The Gram matrix `XᵗX` is numerically non-invertible, usually because
    /// the predictors are collinear or one of them has no variance.
    #[error("singular design matrix (determinant {determinant:e})")]
    SingularMatrix { determinant: f64 },

    /// Non-finite values reached the engine, or a prediction was requested
    /// for non-finite predictor values.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl From<LinalgError> for RegressionError {
    fn from(err: LinalgError) -> Self {
        match err {
            LinalgError::Singular { determinant } => RegressionError::SingularMatrix { determinant },
            other => RegressionError::InvalidInput(other.to_string()),
        }
    }
}

/// Errors raised by [`Matrix`](crate::linalg::Matrix) operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LinalgError {
    /// Buffer length or operand shape does not match the expected dimensions.
    #[error("dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: String, got: String },

    /// Operation requires a square matrix.
    #[error("matrix is not square: {rows}x{cols}")]
    NotSquare { rows: usize, cols: usize },

    /// Determinant (or pivot product) fell below the singularity tolerance.
    #[error("matrix is singular (determinant {determinant:e})")]
    Singular { determinant: f64 },

    /// The determinant is infinite, so the adjugate cannot be normalized.
    #[error("determinant overflowed f64")]
    Overflow,
}

/// Errors raised while loading horse records.
#[cfg(feature = "csv")]
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    /// A parsed field was NaN or infinite.
    #[error("non-finite value in column `{field}` on line {line}")]
    NonFinite { line: u64, field: &'static str },
}
