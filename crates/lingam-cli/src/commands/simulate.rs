//! `lingam simulate`

use anyhow::Context;

use lingam_fast::{random_dag, simulate_linear_sem, Noise};

use crate::cli::SimulateArgs;
use crate::output::{emit, to_json};

pub fn run(args: &SimulateArgs) -> anyhow::Result<()> {
    if !(0.0..=1.0).contains(&args.density) {
        anyhow::bail!("--density must be in [0, 1], got {}", args.density);
    }
    let noise = Noise::parse(&args.noise)
        .with_context(|| format!("unknown noise distribution {:?}", args.noise))?;

    let adjacency = random_dag(args.variables as usize, args.density, args.seed);
    // Offset so the noise stream is not the one that drew the graph.
    let data = simulate_linear_sem(
        &adjacency,
        args.samples as usize,
        noise,
        args.seed.wrapping_add(1),
    )?;
    tracing::info!(
        variables = args.variables,
        samples = args.samples,
        edges = adjacency.edge_count(0.0),
        %noise,
        "simulated linear SEM"
    );

    if let Some(path) = &args.truth {
        emit(Some(path), &to_json(&adjacency.to_rows())?)?;
    }
    emit(args.output.as_deref(), &data.to_csv_string(','))
}
