//! Tracing initialization and configuration.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::constants::LOG_ENV_VAR;

static INIT: Once = Once::new();

/// Initialize the lingam tracing/logging system.
///
/// Reads `LINGAM_LOG` for per-module log levels.
/// Format: `LINGAM_LOG=lingam_fast::direct=debug,lingam_fast=info`
///
/// Falls back to `info` for the lingam crates if `LINGAM_LOG` is not set or is invalid.
///
/// This function is idempotent: only the first call installs a subscriber.
pub fn init_tracing() {
    init_tracing_with_default("info");
}

/// Like `init_tracing`, but with the fallback level taken from config
/// (`observability.log_level`).
pub fn init_tracing_with_default(level: &str) {
    INIT.call_once(|| {
        let fallback = format!("lingam_core={level},lingam_fast={level},lingam_cli={level}");
        let filter =
            EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new(fallback));

        let _ = tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_thread_ids(true),
            )
            .with(filter)
            .try_init();
    });
}
