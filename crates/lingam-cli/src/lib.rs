//! # lingam-cli
//!
//! Command-line front end for lingam-fast. The binary is a thin wrapper
//! around [`run`]; everything else lives here so it can be tested.

pub mod cli;
pub mod commands;
pub mod output;

use std::path::Path;

use lingam_core::config::LingamConfig;
use lingam_core::errors::ConfigError;

pub use cli::{Cli, Commands};

/// Resolve configuration for a parsed command line. `root` is searched
/// for `lingam.toml` unless `--config` names a file.
pub fn load_config(cli: &Cli, root: &Path) -> Result<LingamConfig, ConfigError> {
    LingamConfig::load(root, cli.config.as_deref(), Some(&cli.command.overrides()))
}

/// Execute the parsed command with resolved configuration.
pub fn run(cli: &Cli, config: &LingamConfig) -> anyhow::Result<()> {
    match &cli.command {
        Commands::Fit(args) => commands::fit::run(args, config),
        Commands::Bootstrap(args) => commands::bootstrap::run(args, config),
        Commands::Pvalues(args) => commands::pvalues::run(args, config),
        Commands::Simulate(args) => commands::simulate::run(args),
    }
}
