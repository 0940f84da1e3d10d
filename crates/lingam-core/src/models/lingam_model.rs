//! Fitted LiNGAM structure.

use serde::{Deserialize, Serialize};

use super::{AdjacencyMatrix, CausalOrder, Method};
use crate::errors::{DataError, EstimationError};

/// The result of fitting a LiNGAM estimator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawLingamModel")]
pub struct LingamModel {
    pub method: Method,
    pub causal_order: CausalOrder,
    pub adjacency: AdjacencyMatrix,
    pub variable_names: Vec<String>,
}

#[derive(Deserialize)]
struct RawLingamModel {
    method: Method,
    causal_order: CausalOrder,
    adjacency: AdjacencyMatrix,
    #[serde(default)]
    variable_names: Vec<String>,
}

impl TryFrom<RawLingamModel> for LingamModel {
    type Error = EstimationError;

    /// Order and adjacency must cover the same variables. Names are either
    /// absent or one per variable.
    fn try_from(raw: RawLingamModel) -> Result<Self, Self::Error> {
        let n = raw.adjacency.dim();
        if raw.causal_order.len() != n {
            return Err(EstimationError::DimensionMismatch {
                expected: n,
                actual: raw.causal_order.len(),
            });
        }
        if !raw.variable_names.is_empty() && raw.variable_names.len() != n {
            return Err(DataError::InvalidNames {
                reason: format!(
                    "{} names given for {} variables",
                    raw.variable_names.len(),
                    n
                ),
            }
            .into());
        }
        Ok(Self {
            method: raw.method,
            causal_order: raw.causal_order,
            adjacency: raw.adjacency,
            variable_names: raw.variable_names,
        })
    }
}

impl LingamModel {
    pub fn n_variables(&self) -> usize {
        self.adjacency.dim()
    }

    /// Name of variable `i`, falling back to `x{i}`.
    pub fn name(&self, i: usize) -> String {
        self.variable_names
            .get(i)
            .cloned()
            .unwrap_or_else(|| format!("x{i}"))
    }

    /// Causal order rendered with variable names.
    pub fn named_order(&self) -> Vec<String> {
        self.causal_order
            .as_slice()
            .iter()
            .map(|&i| self.name(i))
            .collect()
    }
}
