//! Synthetic data from linear structural equation models.

use std::fmt;

use serde::{Deserialize, Serialize};

use lingam_core::errors::LingamResult;
use lingam_core::models::{AdjacencyMatrix, DataMatrix};
use lingam_core::SimpleRng;

use crate::graph::CausalGraph;

/// Distribution of the exogenous noise terms.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Noise {
    /// Uniform on `[-1, 1]`.
    #[default]
    Uniform,
    /// Laplace with unit scale.
    Laplace,
    /// Standard normal. LiNGAM's identifiability assumption fails for this one.
    Gaussian,
}

impl Noise {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "uniform" => Some(Self::Uniform),
            "laplace" => Some(Self::Laplace),
            "gaussian" | "normal" => Some(Self::Gaussian),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Uniform => "uniform",
            Self::Laplace => "laplace",
            Self::Gaussian => "gaussian",
        }
    }

    fn sample(&self, rng: &mut SimpleRng) -> f64 {
        match self {
            Self::Uniform => rng.uniform(-1.0, 1.0),
            Self::Laplace => rng.laplace(1.0),
            Self::Gaussian => rng.normal(),
        }
    }
}

impl fmt::Display for Noise {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Draw `n_samples` rows from `x = B x + e`.
///
/// `adjacency` must describe a DAG; a cycle is a `GraphError::CycleDetected`.
pub fn simulate_linear_sem(
    adjacency: &AdjacencyMatrix,
    n_samples: usize,
    noise: Noise,
    seed: u64,
) -> LingamResult<DataMatrix> {
    let p = adjacency.dim();
    let order = CausalGraph::from_adjacency(adjacency, &[], 0.0).topological_order()?;

    let mut rng = SimpleRng::new(seed);
    let mut columns: Vec<Vec<f64>> = (0..p)
        .map(|_| (0..n_samples).map(|_| noise.sample(&mut rng)).collect())
        .collect();

    for &v in &order {
        for parent in adjacency.parents(v) {
            let w = adjacency.get(v, parent);
            let (target, source) = if v < parent {
                let (lo, hi) = columns.split_at_mut(parent);
                (&mut lo[v], &hi[0])
            } else {
                let (lo, hi) = columns.split_at_mut(v);
                (&mut hi[0], &lo[parent])
            };
            for (t, s) in target.iter_mut().zip(source.iter()) {
                *t += w * s;
            }
        }
    }

    Ok(DataMatrix::from_columns(columns)?)
}

/// Random DAG over `p` variables: each pair in a shuffled order gets an
/// edge with probability `density`, weighted uniformly in `±[0.5, 1.5]`.
pub fn random_dag(p: usize, density: f64, seed: u64) -> AdjacencyMatrix {
    let density = density.clamp(0.0, 1.0);
    let mut rng = SimpleRng::new(seed);
    let mut order: Vec<usize> = (0..p).collect();
    rng.shuffle(&mut order);

    let mut b = AdjacencyMatrix::zeros(p);
    for (a, &from) in order.iter().enumerate() {
        for &to in &order[a + 1..] {
            if rng.next_f64() < density {
                let magnitude = rng.uniform(0.5, 1.5);
                let w = if rng.next_f64() < 0.5 { -magnitude } else { magnitude };
                b.set(to, from, w);
            }
        }
    }
    b
}
