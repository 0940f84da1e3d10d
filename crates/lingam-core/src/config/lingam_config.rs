//! Top-level lingam configuration with 4-layer resolution.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{
    BootstrapConfig, DiscoveryConfig, GraphConfig, IcaConfig, ObservabilityConfig,
    RegressionConfig,
};
use crate::constants::PROJECT_CONFIG_FILE;
use crate::errors::ConfigError;
use crate::models::{IcaFunction, Measure, Method};

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. CLI flags (applied via `apply_cli_overrides`)
/// 2. Environment variables (`LINGAM_*`)
/// 3. Project config (`lingam.toml` in the working directory)
/// 4. User config (`~/.lingam/config.toml`)
/// 5. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LingamConfig {
    pub discovery: DiscoveryConfig,
    pub ica: IcaConfig,
    pub regression: RegressionConfig,
    pub graph: GraphConfig,
    pub bootstrap: BootstrapConfig,
    pub observability: ObservabilityConfig,
}

/// CLI override arguments that can be applied to a config.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub method: Option<String>,
    pub measure: Option<String>,
    pub soft_prior: Option<bool>,
    pub prune: Option<bool>,
    pub edge_threshold: Option<f64>,
    pub ica_max_iter: Option<usize>,
    pub seed: Option<u64>,
    pub n_sampling: Option<usize>,
    pub threads: Option<usize>,
    pub min_causal_effect: Option<f64>,
}

impl LingamConfig {
    /// Load configuration with 4-layer resolution.
    ///
    /// `root` is the directory searched for `lingam.toml`. An explicit
    /// `config_file` replaces the project layer and must exist.
    pub fn load(
        root: &Path,
        config_file: Option<&Path>,
        cli_overrides: Option<&CliOverrides>,
    ) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Layer 4 (lowest priority): user config
        if let Some(user_config_path) = Self::user_config_path() {
            if user_config_path.exists() {
                match Self::merge_toml_file(&mut config, &user_config_path) {
                    Ok(()) => {}
                    Err(e @ ConfigError::ParseError { .. }) => return Err(e),
                    Err(e) => {
                        tracing::warn!(error = %e, "ignoring unreadable user config");
                    }
                }
            }
        }

        // Layer 3: project config
        match config_file {
            Some(path) => Self::merge_toml_file(&mut config, path)?,
            None => {
                let project_config_path = root.join(PROJECT_CONFIG_FILE);
                if project_config_path.exists() {
                    Self::merge_toml_file(&mut config, &project_config_path)?;
                }
            }
        }

        // Layer 2: environment variables
        Self::apply_env_overrides(&mut config);

        // Layer 1 (highest priority): CLI flags
        if let Some(cli) = cli_overrides {
            Self::apply_cli_overrides(&mut config, cli);
        }

        Self::validate(&config)?;

        Ok(config)
    }

    /// Load configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate the configuration values.
    pub fn validate(config: &LingamConfig) -> Result<(), ConfigError> {
        if let Some(ref method) = config.discovery.method {
            if Method::parse(method).is_none() {
                return Err(invalid("discovery.method", "must be \"direct\" or \"ica\""));
            }
        }
        if let Some(ref measure) = config.discovery.measure {
            if Measure::parse(measure).is_none() {
                return Err(invalid(
                    "discovery.measure",
                    "must be \"pwling\" or \"kernel\"",
                ));
            }
        }
        if let Some(ref fun) = config.ica.fun {
            if IcaFunction::parse(fun).is_none() {
                return Err(invalid(
                    "ica.fun",
                    "must be \"logcosh\", \"exp\" or \"cube\"",
                ));
            }
        }
        if config.ica.max_iter == Some(0) {
            return Err(invalid("ica.max_iter", "must be greater than 0"));
        }
        if let Some(tol) = config.ica.tol {
            if !(tol > 0.0 && tol.is_finite()) {
                return Err(invalid("ica.tol", "must be a positive number"));
            }
        }
        if let Some(gamma) = config.regression.gamma {
            if !(gamma > 0.0 && gamma.is_finite()) {
                return Err(invalid("regression.gamma", "must be a positive number"));
            }
        }
        if let Some(threshold) = config.graph.edge_threshold {
            if !(threshold >= 0.0 && threshold.is_finite()) {
                return Err(invalid("graph.edge_threshold", "must be >= 0"));
            }
        }
        if config.bootstrap.n_sampling == Some(0) {
            return Err(invalid("bootstrap.n_sampling", "must be greater than 0"));
        }
        if config.bootstrap.threads == Some(0) {
            return Err(invalid("bootstrap.threads", "must be greater than 0"));
        }
        if let Some(min) = config.bootstrap.min_causal_effect {
            if !(min >= 0.0 && min.is_finite()) {
                return Err(invalid("bootstrap.min_causal_effect", "must be >= 0"));
            }
        }
        Ok(())
    }

    /// Returns the user config path: `~/.lingam/config.toml`.
    fn user_config_path() -> Option<PathBuf> {
        home_dir().map(|h| h.join(".lingam").join("config.toml"))
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are silently ignored.
    fn merge_toml_file(config: &mut LingamConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let file_config: LingamConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`, where `other` values override `base` values
    /// only when `other` has a `Some` value.
    fn merge(base: &mut LingamConfig, other: &LingamConfig) {
        // Discovery
        if other.discovery.method.is_some() {
            base.discovery.method = other.discovery.method.clone();
        }
        if other.discovery.measure.is_some() {
            base.discovery.measure = other.discovery.measure.clone();
        }
        if other.discovery.apply_prior_knowledge_softly.is_some() {
            base.discovery.apply_prior_knowledge_softly =
                other.discovery.apply_prior_knowledge_softly;
        }

        // ICA
        if other.ica.max_iter.is_some() {
            base.ica.max_iter = other.ica.max_iter;
        }
        if other.ica.tol.is_some() {
            base.ica.tol = other.ica.tol;
        }
        if other.ica.fun.is_some() {
            base.ica.fun = other.ica.fun.clone();
        }
        if other.ica.seed.is_some() {
            base.ica.seed = other.ica.seed;
        }

        // Regression
        if other.regression.prune.is_some() {
            base.regression.prune = other.regression.prune;
        }
        if other.regression.gamma.is_some() {
            base.regression.gamma = other.regression.gamma;
        }

        // Graph
        if other.graph.edge_threshold.is_some() {
            base.graph.edge_threshold = other.graph.edge_threshold;
        }

        // Bootstrap
        if other.bootstrap.n_sampling.is_some() {
            base.bootstrap.n_sampling = other.bootstrap.n_sampling;
        }
        if other.bootstrap.seed.is_some() {
            base.bootstrap.seed = other.bootstrap.seed;
        }
        if other.bootstrap.threads.is_some() {
            base.bootstrap.threads = other.bootstrap.threads;
        }
        if other.bootstrap.min_causal_effect.is_some() {
            base.bootstrap.min_causal_effect = other.bootstrap.min_causal_effect;
        }

        // Observability
        if other.observability.log_level.is_some() {
            base.observability.log_level = other.observability.log_level.clone();
        }
    }

    /// Apply environment variable overrides.
    /// Pattern: `LINGAM_DISCOVERY_METHOD`, `LINGAM_BOOTSTRAP_THREADS`, etc.
    fn apply_env_overrides(config: &mut LingamConfig) {
        if let Ok(val) = std::env::var("LINGAM_DISCOVERY_METHOD") {
            config.discovery.method = Some(val);
        }
        if let Ok(val) = std::env::var("LINGAM_DISCOVERY_MEASURE") {
            config.discovery.measure = Some(val);
        }
        if let Ok(val) = std::env::var("LINGAM_ICA_MAX_ITER") {
            if let Ok(v) = val.parse::<usize>() {
                config.ica.max_iter = Some(v);
            }
        }
        if let Ok(val) = std::env::var("LINGAM_ICA_SEED") {
            if let Ok(v) = val.parse::<u64>() {
                config.ica.seed = Some(v);
            }
        }
        if let Ok(val) = std::env::var("LINGAM_REGRESSION_PRUNE") {
            if let Ok(v) = val.parse::<bool>() {
                config.regression.prune = Some(v);
            }
        }
        if let Ok(val) = std::env::var("LINGAM_GRAPH_EDGE_THRESHOLD") {
            if let Ok(v) = val.parse::<f64>() {
                config.graph.edge_threshold = Some(v);
            }
        }
        if let Ok(val) = std::env::var("LINGAM_BOOTSTRAP_N_SAMPLING") {
            if let Ok(v) = val.parse::<usize>() {
                config.bootstrap.n_sampling = Some(v);
            }
        }
        if let Ok(val) = std::env::var("LINGAM_BOOTSTRAP_THREADS") {
            if let Ok(v) = val.parse::<usize>() {
                config.bootstrap.threads = Some(v);
            }
        }
    }

    /// Apply CLI overrides (highest priority).
    pub fn apply_cli_overrides(config: &mut LingamConfig, cli: &CliOverrides) {
        if let Some(ref v) = cli.method {
            config.discovery.method = Some(v.clone());
        }
        if let Some(ref v) = cli.measure {
            config.discovery.measure = Some(v.clone());
        }
        if let Some(v) = cli.soft_prior {
            config.discovery.apply_prior_knowledge_softly = Some(v);
        }
        if let Some(v) = cli.prune {
            config.regression.prune = Some(v);
        }
        if let Some(v) = cli.edge_threshold {
            config.graph.edge_threshold = Some(v);
        }
        if let Some(v) = cli.ica_max_iter {
            config.ica.max_iter = Some(v);
        }
        if let Some(v) = cli.seed {
            config.ica.seed = Some(v);
            config.bootstrap.seed = Some(v);
        }
        if let Some(v) = cli.n_sampling {
            config.bootstrap.n_sampling = Some(v);
        }
        if let Some(v) = cli.threads {
            config.bootstrap.threads = Some(v);
        }
        if let Some(v) = cli.min_causal_effect {
            config.bootstrap.min_causal_effect = Some(v);
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}

fn invalid(field: &str, message: &str) -> ConfigError {
    ConfigError::ValidationFailed {
        field: field.to_string(),
        message: message.to_string(),
    }
}

/// Cross-platform home directory resolution.
fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
}
