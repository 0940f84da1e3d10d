//! Causal order: a permutation where no later variable causes an earlier one.

use serde::{Deserialize, Serialize};

use super::AdjacencyMatrix;
use crate::errors::EstimationError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "Vec<usize>", try_from = "Vec<usize>")]
pub struct CausalOrder(Vec<usize>);

impl TryFrom<Vec<usize>> for CausalOrder {
    type Error = EstimationError;

    fn try_from(order: Vec<usize>) -> Result<Self, Self::Error> {
        Self::new(order)
    }
}

impl From<CausalOrder> for Vec<usize> {
    fn from(order: CausalOrder) -> Self {
        order.0
    }
}

impl CausalOrder {
    /// Wrap an ordering, checking that it is a permutation of `0..n`.
    pub fn new(order: Vec<usize>) -> Result<Self, EstimationError> {
        let n = order.len();
        let mut seen = vec![false; n];
        for &v in &order {
            if v >= n || seen[v] {
                return Err(EstimationError::OrderSearchFailed {
                    reason: format!("{order:?} is not a permutation of 0..{n}"),
                });
            }
            seen[v] = true;
        }
        Ok(Self(order))
    }

    /// Identity order `0..n`.
    pub fn identity(n: usize) -> Self {
        Self((0..n).collect())
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Position of `var` in the order.
    pub fn position(&self, var: usize) -> Option<usize> {
        self.0.iter().position(|&v| v == var)
    }

    /// Variables strictly before `var`.
    pub fn predecessors(&self, var: usize) -> &[usize] {
        match self.position(var) {
            Some(p) => &self.0[..p],
            None => &[],
        }
    }

    /// True if every nonzero `B[to][from]` has `from` earlier than `to`.
    pub fn is_consistent_with(&self, adjacency: &AdjacencyMatrix) -> bool {
        let n = adjacency.dim();
        if n != self.0.len() {
            return false;
        }
        let mut pos = vec![0usize; n];
        for (p, &v) in self.0.iter().enumerate() {
            pos[v] = p;
        }
        (0..n).all(|to| {
            (0..n).all(|from| adjacency.get(to, from) == 0.0 || pos[from] < pos[to])
        })
    }

    pub fn into_inner(self) -> Vec<usize> {
        self.0
    }
}
