//! Weighted adjacency matrix. `B[to][from]` is the direct effect of `from` on `to`.

use serde::{Deserialize, Serialize};

use crate::errors::EstimationError;

/// A directed, weighted edge `from -> to`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub from: usize,
    pub to: usize,
    pub weight: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawAdjacency")]
pub struct AdjacencyMatrix {
    n: usize,
    data: Vec<f64>,
}

#[derive(Deserialize)]
struct RawAdjacency {
    n: usize,
    data: Vec<f64>,
}

impl TryFrom<RawAdjacency> for AdjacencyMatrix {
    type Error = EstimationError;

    fn try_from(raw: RawAdjacency) -> Result<Self, Self::Error> {
        let expected = raw.n.checked_mul(raw.n).unwrap_or(usize::MAX);
        if raw.data.len() != expected {
            return Err(EstimationError::DimensionMismatch {
                expected,
                actual: raw.data.len(),
            });
        }
        Ok(Self {
            n: raw.n,
            data: raw.data,
        })
    }
}

impl AdjacencyMatrix {
    pub fn zeros(n: usize) -> Self {
        Self {
            n,
            data: vec![0.0; n * n],
        }
    }

    /// Build from square rows.
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self, EstimationError> {
        let n = rows.len();
        let mut data = Vec::with_capacity(n * n);
        for row in rows {
            if row.len() != n {
                return Err(EstimationError::DimensionMismatch {
                    expected: n,
                    actual: row.len(),
                });
            }
            data.extend_from_slice(row);
        }
        Ok(Self { n, data })
    }

    pub fn dim(&self) -> usize {
        self.n
    }

    pub fn get(&self, to: usize, from: usize) -> f64 {
        self.data[to * self.n + from]
    }

    pub fn set(&mut self, to: usize, from: usize, weight: f64) {
        self.data[to * self.n + from] = weight;
    }

    /// Row `to`: the direct effects on `to`.
    pub fn row(&self, to: usize) -> &[f64] {
        &self.data[to * self.n..(to + 1) * self.n]
    }

    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        (0..self.n).map(|i| self.row(i).to_vec()).collect()
    }

    /// Variables with a nonzero direct effect on `to`.
    pub fn parents(&self, to: usize) -> Vec<usize> {
        (0..self.n).filter(|&j| self.get(to, j) != 0.0).collect()
    }

    /// Variables directly affected by `from`.
    pub fn children(&self, from: usize) -> Vec<usize> {
        (0..self.n).filter(|&i| self.get(i, from) != 0.0).collect()
    }

    /// Edges with |weight| strictly above `threshold`, ordered by (to, from).
    pub fn edges(&self, threshold: f64) -> Vec<Edge> {
        let mut out = Vec::new();
        for to in 0..self.n {
            for from in 0..self.n {
                let weight = self.get(to, from);
                if weight.abs() > threshold {
                    out.push(Edge { from, to, weight });
                }
            }
        }
        out
    }

    pub fn edge_count(&self, threshold: f64) -> usize {
        self.data.iter().filter(|w| w.abs() > threshold).count()
    }

    /// Copy with entries at or below `threshold` in magnitude set to zero.
    pub fn thresholded(&self, threshold: f64) -> Self {
        Self {
            n: self.n,
            data: self
                .data
                .iter()
                .map(|&w| if w.abs() > threshold { w } else { 0.0 })
                .collect(),
        }
    }

    /// Largest absolute elementwise difference. Dimensions must match.
    pub fn max_abs_diff(&self, other: &AdjacencyMatrix) -> Result<f64, EstimationError> {
        if self.n != other.n {
            return Err(EstimationError::DimensionMismatch {
                expected: self.n,
                actual: other.n,
            });
        }
        Ok(self
            .data
            .iter()
            .zip(&other.data)
            .map(|(a, b)| (a - b).abs())
            .fold(0.0, f64::max))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edges_respect_threshold() {
        let b = AdjacencyMatrix::from_rows(&[
            vec![0.0, 0.0, 0.0],
            vec![0.8, 0.0, 0.0],
            vec![0.05, -1.2, 0.0],
        ])
        .unwrap();
        let edges = b.edges(0.1);
        assert_eq!(edges.len(), 2);
        assert_eq!(edges[1], Edge { from: 1, to: 2, weight: -1.2 });
        assert_eq!(b.parents(2), vec![0, 1]);
        assert_eq!(b.thresholded(0.1).parents(2), vec![1]);
    }
}
