//! Bootstrap configuration.

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_SEED;

/// Default number of bootstrap resamples.
pub const DEFAULT_N_SAMPLING: usize = 100;

/// Configuration for bootstrap stability analysis.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct BootstrapConfig {
    /// Number of resampled fits. Default: 100.
    pub n_sampling: Option<usize>,
    /// Base seed; resample `k` draws from `SimpleRng::derive(seed, k)`.
    pub seed: Option<u64>,
    /// Worker threads. Unset uses the global rayon pool.
    pub threads: Option<usize>,
    /// Effects with |value| below this are not counted.
    pub min_causal_effect: Option<f64>,
}

impl BootstrapConfig {
    pub fn effective_n_sampling(&self) -> usize {
        self.n_sampling.unwrap_or(DEFAULT_N_SAMPLING)
    }

    pub fn effective_seed(&self) -> u64 {
        match self.seed {
            Some(0) | None => DEFAULT_SEED,
            Some(s) => s,
        }
    }

    pub fn effective_min_causal_effect(&self) -> f64 {
        self.min_causal_effect.unwrap_or(0.0)
    }
}
