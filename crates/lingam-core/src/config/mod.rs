//! Configuration system for lingam-fast.
//! TOML-based, 4-layer resolution: CLI > env > project > user > defaults.

pub mod bootstrap_config;
pub mod discovery_config;
pub mod graph_config;
pub mod ica_config;
pub mod lingam_config;
pub mod observability_config;
pub mod regression_config;

pub use bootstrap_config::BootstrapConfig;
pub use discovery_config::DiscoveryConfig;
pub use graph_config::GraphConfig;
pub use ica_config::IcaConfig;
pub use lingam_config::{CliOverrides, LingamConfig};
pub use observability_config::ObservabilityConfig;
pub use regression_config::RegressionConfig;
