//! Discovery configuration: which estimator runs and how it orders variables.

use serde::{Deserialize, Serialize};

use crate::models::{Measure, Method};

/// Configuration for causal-order search.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DiscoveryConfig {
    /// Estimator: "direct" or "ica". Default: "direct".
    pub method: Option<String>,
    /// DirectLiNGAM independence measure: "pwling" or "kernel". Default: "pwling".
    pub measure: Option<String>,
    /// Treat prior knowledge as soft guidance instead of hard ordering. Default: false.
    pub apply_prior_knowledge_softly: Option<bool>,
}

impl DiscoveryConfig {
    /// Returns the effective method, defaulting to DirectLiNGAM.
    /// Unknown names are caught by `LingamConfig::validate`.
    pub fn effective_method(&self) -> Method {
        self.method
            .as_deref()
            .and_then(Method::parse)
            .unwrap_or(Method::Direct)
    }

    /// Returns the effective measure, defaulting to pwling.
    pub fn effective_measure(&self) -> Measure {
        self.measure
            .as_deref()
            .and_then(Measure::parse)
            .unwrap_or(Measure::Pwling)
    }

    pub fn effective_soft_prior(&self) -> bool {
        self.apply_prior_knowledge_softly.unwrap_or(false)
    }
}
