//! Adjacency matrix from a causal order.

use rayon::prelude::*;

use lingam_core::config::RegressionConfig;
use lingam_core::errors::EstimationError;
use lingam_core::models::{AdjacencyMatrix, CausalOrder, DataMatrix, Knowledge, PriorKnowledge};

use super::{adaptive_lasso, ols};

/// How coefficients are estimated once the order is known.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegressionOptions {
    /// Prune with adaptive lasso; otherwise keep every OLS coefficient.
    pub prune: bool,
    /// Adaptive lasso weight exponent.
    pub gamma: f64,
}

impl RegressionOptions {
    pub fn from_config(config: &RegressionConfig) -> Self {
        Self {
            prune: config.effective_prune(),
            gamma: config.effective_gamma(),
        }
    }
}

impl Default for RegressionOptions {
    fn default() -> Self {
        Self::from_config(&RegressionConfig::default())
    }
}

/// Regress every variable on its predecessors in `order`.
///
/// Predecessors marked `NoPath` in `prior` are excluded. Targets are fitted
/// in parallel; each one only writes its own row.
pub fn estimate_adjacency(
    data: &DataMatrix,
    order: &CausalOrder,
    prior: Option<&PriorKnowledge>,
    options: RegressionOptions,
) -> Result<AdjacencyMatrix, EstimationError> {
    let n = data.n_variables();
    if order.len() != n {
        return Err(EstimationError::DimensionMismatch {
            expected: n,
            actual: order.len(),
        });
    }
    if let Some(pk) = prior {
        pk.ensure_dimension(n)?;
    }

    let standardized = if options.prune {
        Some(data.standardized()?)
    } else {
        None
    };

    type Row = (usize, Vec<usize>, Vec<f64>);
    let rows: Vec<Row> = order
        .as_slice()
        .par_iter()
        .enumerate()
        .skip(1)
        .map(|(pos, &target)| -> Result<Row, EstimationError> {
            let predictors: Vec<usize> = order.as_slice()[..pos]
                .iter()
                .copied()
                .filter(|&p| prior.map_or(true, |pk| pk.get(target, p) != Knowledge::NoPath))
                .collect();
            let coef = match &standardized {
                Some(std) => adaptive_lasso(
                    std.columns(),
                    data.columns(),
                    &predictors,
                    target,
                    options.gamma,
                )?,
                None => ols(data.columns(), &predictors, target)?,
            };
            Ok((target, predictors, coef))
        })
        .collect::<Result<_, _>>()?;

    let mut b = AdjacencyMatrix::zeros(n);
    for (target, predictors, coef) in rows {
        for (p, c) in predictors.into_iter().zip(coef) {
            b.set(target, p, c);
        }
    }
    Ok(b)
}
