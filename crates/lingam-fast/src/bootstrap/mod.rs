//! Bootstrap stability analysis: refit on resampled data and count how often
//! each edge, graph, effect, and path appears.

mod result;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use rayon::prelude::*;

use lingam_core::config::BootstrapConfig;
use lingam_core::errors::EstimationError;
use lingam_core::models::{AdjacencyMatrix, DataMatrix};
use lingam_core::traits::CausalDiscovery;
use lingam_core::SimpleRng;

use crate::effects::total_effect_matrix;

pub use result::{BootstrapResult, DagCount, DirectionCount, PathSummary, SignedEdge, TotalEffectSummary};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BootstrapOptions {
    pub n_sampling: usize,
    pub seed: u64,
    /// Dedicated pool size; `None` runs on the global rayon pool.
    pub threads: Option<usize>,
}

impl BootstrapOptions {
    pub fn from_config(config: &BootstrapConfig) -> Self {
        Self {
            n_sampling: config.effective_n_sampling(),
            seed: config.effective_seed(),
            threads: config.threads,
        }
    }
}

impl Default for BootstrapOptions {
    fn default() -> Self {
        Self::from_config(&BootstrapConfig::default())
    }
}

struct Resample {
    indices: Vec<usize>,
    adjacency: AdjacencyMatrix,
    total_effects: Vec<Vec<f64>>,
}

/// Fit `estimator` on `options.n_sampling` resamples of `data`.
///
/// Resample `k` draws its rows from a generator derived from
/// `(seed, k)`, so the result does not depend on the number of threads.
/// Failed resamples are logged and skipped.
pub fn bootstrap<E>(
    estimator: &E,
    data: &DataMatrix,
    options: &BootstrapOptions,
) -> Result<BootstrapResult, EstimationError>
where
    E: CausalDiscovery + ?Sized,
{
    let start = Instant::now();
    let run = || run_resamples(estimator, data, options);
    let fits = match options.threads {
        Some(threads) => match rayon::ThreadPoolBuilder::new().num_threads(threads).build() {
            Ok(pool) => pool.install(run),
            Err(e) => {
                tracing::warn!(threads, error = %e, "could not build bootstrap pool; using global pool");
                run()
            }
        },
        None => run(),
    };

    if fits.is_empty() {
        return Err(EstimationError::BootstrapFailed {
            attempted: options.n_sampling,
        });
    }
    tracing::info!(
        method = %estimator.method(),
        requested = options.n_sampling,
        succeeded = fits.len(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "bootstrap complete"
    );

    let mut indices = Vec::with_capacity(fits.len());
    let mut adjacency = Vec::with_capacity(fits.len());
    let mut total_effects = Vec::with_capacity(fits.len());
    for r in fits {
        indices.push(r.indices);
        adjacency.push(r.adjacency);
        total_effects.push(r.total_effects);
    }
    Ok(BootstrapResult::new(
        adjacency,
        total_effects,
        indices,
        data.names().to_vec(),
    ))
}

fn run_resamples<E>(estimator: &E, data: &DataMatrix, options: &BootstrapOptions) -> Vec<Resample>
where
    E: CausalDiscovery + ?Sized,
{
    let n = data.n_samples();
    let failures = AtomicUsize::new(0);
    let fits: Vec<Resample> = (0..options.n_sampling)
        .into_par_iter()
        .filter_map(|k| {
            let mut rng = SimpleRng::derive(options.seed, k as u64);
            let indices: Vec<usize> = (0..n).map(|_| rng.below(n)).collect();
            let fitted = data
                .resample(&indices)
                .map_err(EstimationError::from)
                .and_then(|sample| {
                    let model = estimator.fit(&sample)?;
                    let total_effects = total_effect_matrix(&sample, &model)?;
                    Ok((model.adjacency, total_effects))
                });
            match fitted {
                Ok((adjacency, total_effects)) => Some(Resample {
                    indices,
                    adjacency,
                    total_effects,
                }),
                Err(e) => {
                    failures.fetch_add(1, Ordering::Relaxed);
                    tracing::warn!(resample = k, error = %e, "bootstrap resample failed");
                    None
                }
            }
        })
        .collect();
    let failed = failures.load(Ordering::Relaxed);
    if failed > 0 {
        tracing::warn!(failed, total = options.n_sampling, "skipped failed resamples");
    }
    fits
}
