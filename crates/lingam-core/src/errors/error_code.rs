//! LingamErrorCode trait for the CLI boundary.

/// Trait for mapping lingam errors to stable error codes.
/// Every error enum implements this so front ends can report a
/// machine-readable code next to the message.
pub trait LingamErrorCode {
    /// Returns the error code string (e.g., "DATA_ERROR").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted error string: `[ERROR_CODE] message`.
    fn coded_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

// Error code constants.
pub const DATA_ERROR: &str = "DATA_ERROR";
pub const CSV_ERROR: &str = "CSV_ERROR";
pub const IO_ERROR: &str = "IO_ERROR";
pub const PRIOR_KNOWLEDGE_ERROR: &str = "PRIOR_KNOWLEDGE_ERROR";
pub const SINGULAR_MATRIX: &str = "SINGULAR_MATRIX";
pub const ESTIMATION_ERROR: &str = "ESTIMATION_ERROR";
pub const INDEX_OUT_OF_RANGE: &str = "INDEX_OUT_OF_RANGE";
pub const GRAPH_ERROR: &str = "GRAPH_ERROR";
pub const CYCLE_DETECTED: &str = "CYCLE_DETECTED";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
