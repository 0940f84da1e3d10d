//! Input data and prior knowledge errors.

use super::error_code::{self, LingamErrorCode};

/// Errors raised while building or validating input data.
#[derive(Debug, thiserror::Error)]
pub enum DataError {
    #[error("Data matrix has no variables")]
    NoVariables,

    #[error("Too few samples: need at least {min}, got {actual}")]
    TooFewSamples { min: usize, actual: usize },

    #[error("Ragged data: row {row} has {actual} values, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("Ragged data: variable {variable} has {actual} samples, expected {expected}")]
    RaggedColumn {
        variable: usize,
        expected: usize,
        actual: usize,
    },

    #[error("Non-finite value at sample {sample}, variable {variable}")]
    NonFinite { sample: usize, variable: usize },

    #[error("Variable {name} is constant and cannot be standardized")]
    ConstantColumn { name: String },

    #[error("Invalid variable names: {reason}")]
    InvalidNames { reason: String },

    #[error("CSV parse error at line {line}, column {column}: cannot read {value:?} as a number")]
    Parse {
        line: usize,
        column: usize,
        value: String,
    },

    #[error("I/O error reading {path}: {message}")]
    Io { path: String, message: String },

    #[error("Prior knowledge must be {expected}x{expected}, got {rows}x{cols}")]
    PriorKnowledgeShape {
        expected: usize,
        rows: usize,
        cols: usize,
    },

    #[error("Prior knowledge value {value} at [{row}][{col}] is not one of -1, 0, 1")]
    PriorKnowledgeValue { row: usize, col: usize, value: i64 },

    #[error("Prior knowledge contains inconsistent paths between: {pairs}")]
    InconsistentPriorKnowledge { pairs: String },
}

impl LingamErrorCode for DataError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Parse { .. } => error_code::CSV_ERROR,
            Self::Io { .. } => error_code::IO_ERROR,
            Self::PriorKnowledgeShape { .. }
            | Self::PriorKnowledgeValue { .. }
            | Self::InconsistentPriorKnowledge { .. } => error_code::PRIOR_KNOWLEDGE_ERROR,
            _ => error_code::DATA_ERROR,
        }
    }
}
