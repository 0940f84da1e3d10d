//! Aggregation of bootstrap fits.

use std::collections::BTreeMap;

use serde::Serialize;

use lingam_core::models::AdjacencyMatrix;

use crate::graph::CausalGraph;

/// How often a single directed edge appeared.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DirectionCount {
    pub from: usize,
    pub to: usize,
    /// Sign of the coefficient, when counts are split by sign.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sign: Option<i8>,
    pub count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct SignedEdge {
    pub from: usize,
    pub to: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sign: Option<i8>,
}

/// How often a whole edge set appeared.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DagCount {
    pub edges: Vec<SignedEdge>,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TotalEffectSummary {
    pub from: usize,
    pub to: usize,
    /// Median over the resamples where the effect was nonzero.
    pub effect: f64,
    pub probability: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathSummary {
    pub path: Vec<usize>,
    /// Median product of edge weights along the path.
    pub effect: f64,
    pub probability: f64,
}

/// Fitted adjacency and total-effect matrices of every successful resample.
#[derive(Debug, Clone, Serialize)]
pub struct BootstrapResult {
    adjacency_matrices: Vec<AdjacencyMatrix>,
    /// `total_effects[k][to][from]`.
    total_effects: Vec<Vec<Vec<f64>>>,
    resampled_indices: Vec<Vec<usize>>,
    variable_names: Vec<String>,
}

impl BootstrapResult {
    pub fn new(
        adjacency_matrices: Vec<AdjacencyMatrix>,
        total_effects: Vec<Vec<Vec<f64>>>,
        resampled_indices: Vec<Vec<usize>>,
        variable_names: Vec<String>,
    ) -> Self {
        Self {
            adjacency_matrices,
            total_effects,
            resampled_indices,
            variable_names,
        }
    }

    pub fn n_fits(&self) -> usize {
        self.adjacency_matrices.len()
    }

    pub fn adjacency_matrices(&self) -> &[AdjacencyMatrix] {
        &self.adjacency_matrices
    }

    pub fn total_effects(&self) -> &[Vec<Vec<f64>>] {
        &self.total_effects
    }

    pub fn resampled_indices(&self) -> &[Vec<usize>] {
        &self.resampled_indices
    }

    pub fn variable_names(&self) -> &[String] {
        &self.variable_names
    }

    fn n_variables(&self) -> usize {
        self.adjacency_matrices.first().map_or(0, AdjacencyMatrix::dim)
    }

    /// Edges `from -> to` with `|B[to][from]| > min_causal_effect` of one fit.
    fn edge_set(b: &AdjacencyMatrix, min_causal_effect: f64, split_by_sign: bool) -> Vec<SignedEdge> {
        let mut edges: Vec<SignedEdge> = b
            .edges(min_causal_effect)
            .into_iter()
            .filter(|e| e.weight.is_finite())
            .map(|e| SignedEdge {
                from: e.from,
                to: e.to,
                sign: split_by_sign.then(|| sign(e.weight)),
            })
            .collect();
        edges.sort_by_key(|e| (e.to, e.from, e.sign));
        edges
    }

    /// Edge frequencies, most frequent first. Ties keep `(to, from)` order.
    pub fn causal_direction_counts(
        &self,
        n_directions: Option<usize>,
        min_causal_effect: f64,
        split_by_sign: bool,
    ) -> Vec<DirectionCount> {
        let mut counts: BTreeMap<(usize, usize, Option<i8>), usize> = BTreeMap::new();
        for b in &self.adjacency_matrices {
            for e in Self::edge_set(b, min_causal_effect, split_by_sign) {
                *counts.entry((e.to, e.from, e.sign)).or_default() += 1;
            }
        }
        let mut out: Vec<DirectionCount> = counts
            .into_iter()
            .map(|((to, from, sign), count)| DirectionCount {
                from,
                to,
                sign,
                count,
            })
            .collect();
        out.sort_by(|a, b| b.count.cmp(&a.count));
        if let Some(k) = n_directions {
            out.truncate(k);
        }
        out
    }

    /// Frequencies of whole edge sets, most frequent first.
    pub fn dag_counts(
        &self,
        n_dags: Option<usize>,
        min_causal_effect: f64,
        split_by_sign: bool,
    ) -> Vec<DagCount> {
        let mut counts: BTreeMap<Vec<SignedEdge>, usize> = BTreeMap::new();
        for b in &self.adjacency_matrices {
            *counts
                .entry(Self::edge_set(b, min_causal_effect, split_by_sign))
                .or_default() += 1;
        }
        let mut out: Vec<DagCount> = counts
            .into_iter()
            .map(|(edges, count)| DagCount { edges, count })
            .collect();
        out.sort_by(|a, b| b.count.cmp(&a.count));
        if let Some(k) = n_dags {
            out.truncate(k);
        }
        out
    }

    /// `P[to][from]`: fraction of fits with `|B[to][from]| > min_causal_effect`.
    pub fn probabilities(&self, min_causal_effect: f64) -> Vec<Vec<f64>> {
        let p = self.n_variables();
        let mut out = vec![vec![0.0; p]; p];
        if self.adjacency_matrices.is_empty() {
            return out;
        }
        for b in &self.adjacency_matrices {
            for e in b.edges(min_causal_effect) {
                if e.weight.is_finite() {
                    out[e.to][e.from] += 1.0;
                }
            }
        }
        let n = self.n_fits() as f64;
        out.iter_mut().flatten().for_each(|v| *v /= n);
        out
    }

    /// Total effects that appeared in at least one fit, by probability
    /// descending. The effect is the median over fits where it was nonzero.
    pub fn total_causal_effects(&self, min_causal_effect: f64) -> Vec<TotalEffectSummary> {
        let p = self.n_variables();
        let n = self.total_effects.len() as f64;
        let mut out = Vec::new();
        for to in 0..p {
            for from in 0..p {
                let values: Vec<f64> = self
                    .total_effects
                    .iter()
                    .map(|t| t[to][from])
                    .filter(|v| v.is_finite())
                    .collect();
                let hits = values.iter().filter(|v| v.abs() > min_causal_effect).count();
                if hits == 0 {
                    continue;
                }
                let nonzero: Vec<f64> = values.into_iter().filter(|v| *v != 0.0).collect();
                out.push(TotalEffectSummary {
                    from,
                    to,
                    effect: median(nonzero),
                    probability: hits as f64 / n,
                });
            }
        }
        out.sort_by(|a, b| b.probability.total_cmp(&a.probability));
        out
    }

    /// Distinct directed paths `from -> ... -> to` over all fits, most
    /// frequent first.
    pub fn paths(&self, from: usize, to: usize, min_causal_effect: f64) -> Vec<PathSummary> {
        let mut found: BTreeMap<Vec<usize>, Vec<f64>> = BTreeMap::new();
        for b in &self.adjacency_matrices {
            let graph = CausalGraph::from_adjacency(b, &self.variable_names, min_causal_effect);
            let Ok(paths) = graph.all_paths(from, to) else {
                continue;
            };
            for path in paths {
                found.entry(path.nodes).or_default().push(path.effect);
            }
        }
        let n = self.n_fits() as f64;
        let mut out: Vec<PathSummary> = found
            .into_iter()
            .map(|(path, effects)| PathSummary {
                path,
                probability: effects.len() as f64 / n,
                effect: median(effects),
            })
            .collect();
        out.sort_by(|a, b| b.probability.total_cmp(&a.probability));
        out
    }
}

fn sign(w: f64) -> i8 {
    if w > 0.0 {
        1
    } else if w < 0.0 {
        -1
    } else {
        0
    }
}

/// Median; NaN for an empty sample.
fn median(mut values: Vec<f64>) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.sort_by(f64::total_cmp);
    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        (values[mid - 1] + values[mid]) / 2.0
    } else {
        values[mid]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn adj(rows: &[Vec<f64>]) -> AdjacencyMatrix {
        AdjacencyMatrix::from_rows(rows).unwrap()
    }

    /// Three fits: x0 -> x1 twice, x1 -> x0 once (negative).
    fn result() -> BootstrapResult {
        let forward = adj(&[vec![0.0, 0.0], vec![0.8, 0.0]]);
        let forward2 = adj(&[vec![0.0, 0.0], vec![1.2, 0.0]]);
        let backward = adj(&[vec![0.0, -0.4], vec![0.0, 0.0]]);
        let te = |b: &AdjacencyMatrix| b.to_rows();
        BootstrapResult::new(
            vec![forward.clone(), forward2.clone(), backward.clone()],
            vec![te(&forward), te(&forward2), te(&backward)],
            vec![vec![0, 1], vec![1, 1], vec![0, 0]],
            vec!["a".into(), "b".into()],
        )
    }

    #[test]
    fn direction_counts_sorted_by_frequency() {
        let c = result().causal_direction_counts(None, 0.0, false);
        assert_eq!(c.len(), 2);
        assert_eq!((c[0].from, c[0].to, c[0].count), (0, 1, 2));
        assert_eq!((c[1].from, c[1].to, c[1].count), (1, 0, 1));
        assert_eq!(result().causal_direction_counts(Some(1), 0.0, false).len(), 1);
    }

    #[test]
    fn direction_counts_split_by_sign() {
        let c = result().causal_direction_counts(None, 0.0, true);
        assert_eq!(c[1].sign, Some(-1));
        assert_eq!(c[0].sign, Some(1));
    }

    #[test]
    fn min_effect_filters_weak_edges() {
        let c = result().causal_direction_counts(None, 1.0, false);
        assert_eq!(c.len(), 1);
        assert_eq!(c[0].count, 1);
    }

    #[test]
    fn dag_counts_group_identical_graphs() {
        let d = result().dag_counts(None, 0.0, false);
        assert_eq!(d.len(), 2);
        assert_eq!(d[0].count, 2);
        assert_eq!(d[0].edges, vec![SignedEdge { from: 0, to: 1, sign: None }]);
    }

    #[test]
    fn probabilities_are_frequencies() {
        let p = result().probabilities(0.0);
        assert!((p[1][0] - 2.0 / 3.0).abs() < 1e-12);
        assert!((p[0][1] - 1.0 / 3.0).abs() < 1e-12);
        assert_eq!(p[0][0], 0.0);
    }

    #[test]
    fn total_effects_use_median_of_nonzero() {
        let t = result().total_causal_effects(0.0);
        assert_eq!((t[0].from, t[0].to), (0, 1));
        assert!((t[0].effect - 1.0).abs() < 1e-12);
        assert!((t[0].probability - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn paths_counted_across_fits() {
        let paths = result().paths(0, 1, 0.0);
        assert_eq!(paths.len(), 1);
        assert_eq!(paths[0].path, vec![0, 1]);
        assert!((paths[0].probability - 2.0 / 3.0).abs() < 1e-12);
        assert!((paths[0].effect - 1.0).abs() < 1e-12);
    }

    #[test]
    fn median_of_even_and_odd() {
        assert_eq!(median(vec![3.0, 1.0, 2.0]), 2.0);
        assert_eq!(median(vec![4.0, 1.0]), 2.5);
        assert!(median(Vec::new()).is_nan());
    }
}
