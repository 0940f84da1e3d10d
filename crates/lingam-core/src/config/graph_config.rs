//! Graph output configuration.

use serde::{Deserialize, Serialize};

/// Configuration for turning an adjacency matrix into a graph.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct GraphConfig {
    /// Edges with |weight| at or below this value are dropped. Default: 0.0.
    pub edge_threshold: Option<f64>,
}

impl GraphConfig {
    pub fn effective_edge_threshold(&self) -> f64 {
        self.edge_threshold.unwrap_or(0.0)
    }
}
