//! Coefficient estimation configuration.

use serde::{Deserialize, Serialize};

/// Configuration for estimating the adjacency matrix from a causal order.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RegressionConfig {
    /// Prune with adaptive lasso (true) or keep every OLS coefficient (false). Default: true.
    pub prune: Option<bool>,
    /// Exponent of the adaptive lasso weights. Default: 1.0.
    pub gamma: Option<f64>,
}

impl RegressionConfig {
    pub fn effective_prune(&self) -> bool {
        self.prune.unwrap_or(true)
    }

    pub fn effective_gamma(&self) -> f64 {
        self.gamma.unwrap_or(1.0)
    }
}
