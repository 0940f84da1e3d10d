use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;

use lingam_cli::{load_config, output, run, Cli};
use lingam_core::tracing::init_tracing_with_default;

fn main() -> ExitCode {
    let cli = Cli::parse();
    match try_main(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", output::coded_message(&e));
            ExitCode::FAILURE
        }
    }
}

fn try_main(cli: &Cli) -> anyhow::Result<()> {
    let root = std::env::current_dir().context("reading the working directory")?;
    let config = load_config(cli, &root)?;
    let level = cli
        .log_level
        .as_deref()
        .unwrap_or_else(|| config.observability.effective_log_level());
    init_tracing_with_default(level);
    run(cli, &config)
}
