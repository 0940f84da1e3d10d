//! FastICA configuration.

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_SEED;
use crate::models::IcaFunction;

/// Default maximum number of FastICA iterations.
pub const DEFAULT_MAX_ITER: usize = 1000;

/// Default FastICA convergence tolerance.
pub const DEFAULT_TOL: f64 = 1e-4;

/// Configuration for the ICA step of ICA-LiNGAM.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct IcaConfig {
    /// Maximum fixed-point iterations. Default: 1000.
    pub max_iter: Option<usize>,
    /// Convergence tolerance. Default: 1e-4.
    pub tol: Option<f64>,
    /// Contrast function: "logcosh", "exp" or "cube". Default: "logcosh".
    pub fun: Option<String>,
    /// Seed for the random initial unmixing matrix.
    pub seed: Option<u64>,
}

impl IcaConfig {
    pub fn effective_max_iter(&self) -> usize {
        self.max_iter.unwrap_or(DEFAULT_MAX_ITER)
    }

    pub fn effective_tol(&self) -> f64 {
        self.tol.unwrap_or(DEFAULT_TOL)
    }

    pub fn effective_fun(&self) -> IcaFunction {
        self.fun
            .as_deref()
            .and_then(IcaFunction::parse)
            .unwrap_or(IcaFunction::LogCosh)
    }

    /// Returns the effective seed. A missing or zero seed maps to `DEFAULT_SEED`.
    pub fn effective_seed(&self) -> u64 {
        match self.seed {
            Some(0) | None => DEFAULT_SEED,
            Some(s) => s,
        }
    }
}
