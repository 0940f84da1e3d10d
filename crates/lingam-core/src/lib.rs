//! # lingam-core
//!
//! Foundation crate for lingam-fast.
//! Defines the data model, traits, errors, config, tracing setup, and constants
//! shared by the estimation engine and the command-line front end.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod rng;
pub mod tracing;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::LingamConfig;
pub use errors::{
    ConfigError, DataError, EstimationError, GraphError, LingamError, LingamErrorCode,
};
pub use models::{
    AdjacencyMatrix, CausalOrder, CsvOptions, DataMatrix, Knowledge, LingamModel, Method,
    PriorKnowledge,
};
pub use rng::SimpleRng;
pub use traits::CausalDiscovery;
