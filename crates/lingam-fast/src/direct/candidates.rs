//! Candidate roots under prior knowledge.

use lingam_core::errors::{DataError, EstimationError};
use lingam_core::models::{Knowledge, PriorKnowledge};

/// Prior knowledge as seen by the order search.
#[derive(Debug, Clone)]
pub(crate) struct CandidateFilter {
    knowledge: Option<PriorKnowledge>,
    soft: bool,
    /// Remaining `(from, to)` constraints; strict mode only.
    partial_orders: Vec<(usize, usize)>,
}

/// Candidate roots `Uc` and the non-candidates `Vj` known to have no path
/// from any candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Candidates {
    pub roots: Vec<usize>,
    pub independent: Vec<usize>,
}

impl CandidateFilter {
    pub fn new(knowledge: Option<&PriorKnowledge>, soft: bool) -> Result<Self, DataError> {
        let partial_orders = match knowledge {
            Some(pk) if !soft => pk.partial_orders()?,
            _ => Vec::new(),
        };
        Ok(Self {
            knowledge: knowledge.cloned(),
            soft,
            partial_orders,
        })
    }

    /// Candidates among the remaining variables `remaining` (ascending).
    pub fn candidates(&self, remaining: &[usize]) -> Result<Candidates, EstimationError> {
        let Some(pk) = &self.knowledge else {
            return Ok(Candidates {
                roots: remaining.to_vec(),
                independent: Vec::new(),
            });
        };

        if !self.soft {
            let roots: Vec<usize> = remaining
                .iter()
                .copied()
                .filter(|&v| !self.partial_orders.iter().any(|&(_, to)| to == v))
                .collect();
            if roots.is_empty() {
                return Err(EstimationError::OrderSearchFailed {
                    reason: "prior knowledge orders the remaining variables in a cycle".to_string(),
                });
            }
            return Ok(Candidates {
                roots,
                independent: Vec::new(),
            });
        }

        let others = |v: usize| remaining.iter().copied().filter(move |&o| o != v);

        // Exogenous: known to have no path from any other remaining variable.
        let mut roots: Vec<usize> = remaining
            .iter()
            .copied()
            .filter(|&v| others(v).all(|o| pk.get(v, o) == Knowledge::NoPath))
            .collect();

        if roots.is_empty() {
            let endogenous = |v: usize| others(v).any(|o| pk.get(v, o) == Knowledge::Path);
            let sink = |v: usize| others(v).all(|o| pk.get(o, v) == Knowledge::NoPath);
            roots = remaining
                .iter()
                .copied()
                .filter(|&v| !endogenous(v) && !sink(v))
                .collect();
        }

        if roots.is_empty() {
            tracing::debug!(
                remaining = remaining.len(),
                "soft prior knowledge excludes every variable; searching all"
            );
            roots = remaining.to_vec();
        }

        let independent = remaining
            .iter()
            .copied()
            .filter(|v| !roots.contains(v))
            .filter(|&v| roots.iter().all(|&r| pk.get(v, r) == Knowledge::NoPath))
            .collect();

        Ok(Candidates { roots, independent })
    }

    /// Drop the constraints that `root` satisfied by being placed.
    pub fn remove_root(&mut self, root: usize) {
        self.partial_orders.retain(|&(from, _)| from != root);
    }
}
