//! Causal graph errors.

use super::error_code::{self, LingamErrorCode};

/// Errors raised by graph construction and queries.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    #[error("Cycle detected in causal graph: {path}")]
    CycleDetected { path: String },

    #[error("Unknown variable: {name}")]
    UnknownVariable { name: String },
}

impl LingamErrorCode for GraphError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::CycleDetected { .. } => error_code::CYCLE_DETECTED,
            Self::UnknownVariable { .. } => error_code::GRAPH_ERROR,
        }
    }
}
