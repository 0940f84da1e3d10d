//! Tests for the lingam configuration system.

use std::sync::Mutex;

use lingam_core::config::{CliOverrides, LingamConfig};
use lingam_core::errors::ConfigError;
use lingam_core::models::{IcaFunction, Measure, Method};

/// Serializes tests that touch environment variables.
static ENV_MUTEX: Mutex<()> = Mutex::new(());

fn tempdir() -> tempfile::TempDir {
    tempfile::TempDir::new().unwrap()
}

fn clear_lingam_env_vars() {
    for key in [
        "LINGAM_DISCOVERY_METHOD",
        "LINGAM_DISCOVERY_MEASURE",
        "LINGAM_ICA_MAX_ITER",
        "LINGAM_ICA_SEED",
        "LINGAM_REGRESSION_PRUNE",
        "LINGAM_GRAPH_EDGE_THRESHOLD",
        "LINGAM_BOOTSTRAP_N_SAMPLING",
        "LINGAM_BOOTSTRAP_THREADS",
    ] {
        std::env::remove_var(key);
    }
}

#[test]
fn four_layer_resolution() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_lingam_env_vars();

    let dir = tempdir();
    std::fs::write(
        dir.path().join("lingam.toml"),
        r#"
[discovery]
method = "ica"

[bootstrap]
n_sampling = 50
threads = 2
"#,
    )
    .unwrap();

    std::env::set_var("LINGAM_BOOTSTRAP_N_SAMPLING", "200");

    let cli = CliOverrides {
        threads: Some(8),
        ..Default::default()
    };
    let config = LingamConfig::load(dir.path(), None, Some(&cli)).unwrap();

    // Project layer.
    assert_eq!(config.discovery.effective_method(), Method::Ica);
    // Env beats project.
    assert_eq!(config.bootstrap.effective_n_sampling(), 200);
    // CLI beats project.
    assert_eq!(config.bootstrap.threads, Some(8));

    clear_lingam_env_vars();
}

#[test]
fn missing_files_fall_back_to_defaults() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_lingam_env_vars();

    let dir = tempdir();
    let config = LingamConfig::load(dir.path(), None, None).unwrap();
    assert_eq!(config.discovery.effective_method(), Method::Direct);
    assert_eq!(config.discovery.effective_measure(), Measure::Pwling);
    assert!(!config.discovery.effective_soft_prior());
    assert_eq!(config.ica.effective_max_iter(), 1000);
    assert_eq!(config.ica.effective_tol(), 1e-4);
    assert_eq!(config.ica.effective_fun(), IcaFunction::LogCosh);
    assert!(config.regression.effective_prune());
    assert_eq!(config.graph.effective_edge_threshold(), 0.0);
    assert_eq!(config.bootstrap.effective_n_sampling(), 100);
    assert_eq!(config.observability.effective_log_level(), "info");
}

#[test]
fn explicit_config_file_must_exist() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_lingam_env_vars();

    let dir = tempdir();
    let missing = dir.path().join("nope.toml");
    match LingamConfig::load(dir.path(), Some(&missing), None) {
        Err(ConfigError::FileNotFound { path }) => assert!(path.ends_with("nope.toml")),
        other => panic!("expected FileNotFound, got {other:?}"),
    }
}

#[test]
fn invalid_toml_is_a_parse_error() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_lingam_env_vars();

    let dir = tempdir();
    std::fs::write(dir.path().join("lingam.toml"), "this is not toml {{{{").unwrap();
    assert!(matches!(
        LingamConfig::load(dir.path(), None, None),
        Err(ConfigError::ParseError { .. })
    ));
}

#[test]
fn env_values_are_validated() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_lingam_env_vars();

    let dir = tempdir();
    std::env::set_var("LINGAM_DISCOVERY_METHOD", "bayesian");
    let result = LingamConfig::load(dir.path(), None, None);
    clear_lingam_env_vars();

    match result {
        Err(ConfigError::ValidationFailed { field, .. }) => assert_eq!(field, "discovery.method"),
        other => panic!("expected ValidationFailed, got {other:?}"),
    }
}

#[test]
fn unparsable_env_numbers_are_ignored() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_lingam_env_vars();

    let dir = tempdir();
    std::env::set_var("LINGAM_ICA_MAX_ITER", "lots");
    let config = LingamConfig::load(dir.path(), None, None).unwrap();
    clear_lingam_env_vars();
    assert_eq!(config.ica.max_iter, None);
}

#[test]
fn validation_rejects_bad_values() {
    for (toml, field) in [
        ("[ica]\ntol = 0.0", "ica.tol"),
        ("[ica]\nmax_iter = 0", "ica.max_iter"),
        ("[ica]\nfun = \"tanh\"", "ica.fun"),
        ("[regression]\ngamma = -1.0", "regression.gamma"),
        ("[graph]\nedge_threshold = -0.1", "graph.edge_threshold"),
        ("[bootstrap]\nn_sampling = 0", "bootstrap.n_sampling"),
        ("[bootstrap]\nthreads = 0", "bootstrap.threads"),
        ("[discovery]\nmeasure = \"hsic\"", "discovery.measure"),
    ] {
        match LingamConfig::from_toml(toml) {
            Err(ConfigError::ValidationFailed { field: f, .. }) => assert_eq!(f, field),
            other => panic!("{toml}: expected ValidationFailed, got {other:?}"),
        }
    }
}

#[test]
fn seed_override_applies_to_ica_and_bootstrap() {
    let mut config = LingamConfig::default();
    LingamConfig::apply_cli_overrides(
        &mut config,
        &CliOverrides {
            seed: Some(7),
            ..Default::default()
        },
    );
    assert_eq!(config.ica.effective_seed(), 7);
    assert_eq!(config.bootstrap.effective_seed(), 7);
}

#[test]
fn zero_seed_maps_to_default() {
    let config = LingamConfig::from_toml("[ica]\nseed = 0").unwrap();
    assert_eq!(config.ica.effective_seed(), lingam_core::constants::DEFAULT_SEED);
}

#[test]
fn toml_round_trip_preserves_values() {
    let config = LingamConfig::from_toml(
        r#"
[discovery]
method = "direct"
measure = "kernel"
apply_prior_knowledge_softly = true

[regression]
prune = false
"#,
    )
    .unwrap();
    let back = LingamConfig::from_toml(&config.to_toml().unwrap()).unwrap();
    assert_eq!(back.discovery.effective_measure(), Measure::Kernel);
    assert!(back.discovery.effective_soft_prior());
    assert!(!back.regression.effective_prune());
    assert_eq!(back.ica.max_iter, None);
}
