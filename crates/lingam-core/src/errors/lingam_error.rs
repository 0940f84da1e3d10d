//! Top-level error aggregating every subsystem.

use super::error_code::LingamErrorCode;
use super::{ConfigError, DataError, EstimationError, GraphError};

/// Any error produced by lingam-fast.
/// Aggregates subsystem errors via `From` conversions.
#[derive(Debug, thiserror::Error)]
pub enum LingamError {
    #[error("Data error: {0}")]
    Data(#[from] DataError),

    #[error("Estimation error: {0}")]
    Estimation(#[from] EstimationError),

    #[error("Graph error: {0}")]
    Graph(#[from] GraphError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl LingamErrorCode for LingamError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Data(e) => e.error_code(),
            Self::Estimation(e) => e.error_code(),
            Self::Graph(e) => e.error_code(),
            Self::Config(e) => e.error_code(),
        }
    }
}

/// Convenience alias used across the workspace.
pub type LingamResult<T> = Result<T, LingamError>;
