/// lingam-fast version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Minimum number of samples accepted by `DataMatrix`.
pub const MIN_SAMPLES: usize = 3;

/// Seed used when a configured seed is 0 (xorshift cannot start from 0).
pub const DEFAULT_SEED: u64 = 0x9E37_79B9_7F4A_7C15;

/// Name of the project-level config file.
pub const PROJECT_CONFIG_FILE: &str = "lingam.toml";

/// Environment variable holding the tracing filter.
pub const LOG_ENV_VAR: &str = "LINGAM_LOG";
