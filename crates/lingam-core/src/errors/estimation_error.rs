//! Estimation errors.

use super::error_code::{self, LingamErrorCode};
use super::DataError;

/// Errors that can occur while fitting a model.
#[derive(Debug, thiserror::Error)]
pub enum EstimationError {
    #[error("Singular matrix in {context}")]
    SingularMatrix { context: String },

    #[error("Variable index {index} out of range for {n_variables} variables")]
    VariableOutOfRange { index: usize, n_variables: usize },

    #[error("Causal order search failed: {reason}")]
    OrderSearchFailed { reason: String },

    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Bootstrap produced no successful fits out of {attempted}")]
    BootstrapFailed { attempted: usize },

    #[error("Invalid data: {0}")]
    Data(#[from] DataError),
}

impl LingamErrorCode for EstimationError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::SingularMatrix { .. } => error_code::SINGULAR_MATRIX,
            Self::VariableOutOfRange { .. } => error_code::INDEX_OUT_OF_RANGE,
            Self::Data(e) => e.error_code(),
            _ => error_code::ESTIMATION_ERROR,
        }
    }
}
