//! Error handling for lingam-fast.
//! One error enum per subsystem, `thiserror` only, zero `anyhow`.

pub mod config_error;
pub mod data_error;
pub mod error_code;
pub mod estimation_error;
pub mod graph_error;
pub mod lingam_error;

pub use config_error::ConfigError;
pub use data_error::DataError;
pub use error_code::LingamErrorCode;
pub use estimation_error::EstimationError;
pub use graph_error::GraphError;
pub use lingam_error::{LingamError, LingamResult};
