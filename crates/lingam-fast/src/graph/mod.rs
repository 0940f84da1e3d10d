//! Causal graph built from a fitted model.

mod dot;
mod paths;

use petgraph::algo::{is_cyclic_directed, tarjan_scc, toposort};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;

use lingam_core::errors::GraphError;
use lingam_core::models::{AdjacencyMatrix, Edge, LingamModel};

pub use paths::CausalPath;

/// Directed graph with one node per variable (node `i` is variable `i`) and
/// one edge per coefficient above the threshold, weighted by the coefficient.
#[derive(Debug, Clone)]
pub struct CausalGraph {
    graph: DiGraph<String, f64>,
}

impl CausalGraph {
    pub fn from_model(model: &LingamModel, threshold: f64) -> Self {
        let names: Vec<String> = (0..model.n_variables()).map(|i| model.name(i)).collect();
        Self::from_adjacency(&model.adjacency, &names, threshold)
    }

    /// Missing names fall back to `x{i}`.
    pub fn from_adjacency(adjacency: &AdjacencyMatrix, names: &[String], threshold: f64) -> Self {
        let n = adjacency.dim();
        let mut graph = DiGraph::with_capacity(n, adjacency.edge_count(threshold));
        for i in 0..n {
            let name = names.get(i).cloned().unwrap_or_else(|| format!("x{i}"));
            graph.add_node(name);
        }
        for e in adjacency.edges(threshold) {
            graph.add_edge(NodeIndex::new(e.from), NodeIndex::new(e.to), e.weight);
        }
        Self { graph }
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn name(&self, var: usize) -> Option<&str> {
        self.graph.node_weight(NodeIndex::new(var)).map(String::as_str)
    }

    pub fn index_of(&self, name: &str) -> Result<usize, GraphError> {
        self.graph
            .node_indices()
            .find(|&n| self.graph[n] == name)
            .map(NodeIndex::index)
            .ok_or_else(|| GraphError::UnknownVariable {
                name: name.to_string(),
            })
    }

    /// Edges ordered by `(from, to)`.
    pub fn edges(&self) -> Vec<Edge> {
        let mut out: Vec<Edge> = self
            .graph
            .edge_references()
            .map(|e| Edge {
                from: e.source().index(),
                to: e.target().index(),
                weight: *e.weight(),
            })
            .collect();
        out.sort_by_key(|e| (e.from, e.to));
        out
    }

    pub fn parents(&self, var: usize) -> Result<Vec<usize>, GraphError> {
        self.neighbors(var, Direction::Incoming)
    }

    pub fn children(&self, var: usize) -> Result<Vec<usize>, GraphError> {
        self.neighbors(var, Direction::Outgoing)
    }

    fn neighbors(&self, var: usize, dir: Direction) -> Result<Vec<usize>, GraphError> {
        let node = self.node(var)?;
        let mut out: Vec<usize> = self
            .graph
            .neighbors_directed(node, dir)
            .map(NodeIndex::index)
            .collect();
        out.sort_unstable();
        Ok(out)
    }

    pub(crate) fn node(&self, var: usize) -> Result<NodeIndex, GraphError> {
        if var < self.graph.node_count() {
            Ok(NodeIndex::new(var))
        } else {
            Err(GraphError::UnknownVariable {
                name: format!("#{var}"),
            })
        }
    }

    pub fn is_dag(&self) -> bool {
        !is_cyclic_directed(&self.graph)
    }

    /// A topological order of the variables.
    pub fn topological_order(&self) -> Result<Vec<usize>, GraphError> {
        match toposort(&self.graph, None) {
            Ok(nodes) => Ok(nodes.into_iter().map(NodeIndex::index).collect()),
            Err(cycle) => {
                let start = cycle.node_id().index();
                let path = self
                    .find_cycles()
                    .into_iter()
                    .find(|scc| scc.contains(&start))
                    .unwrap_or_else(|| vec![start]);
                Err(GraphError::CycleDetected {
                    path: self.render_path(&path),
                })
            }
        }
    }

    /// Strongly connected components with more than one node, plus
    /// self-loops. Each component is sorted.
    pub fn find_cycles(&self) -> Vec<Vec<usize>> {
        let mut cycles: Vec<Vec<usize>> = tarjan_scc(&self.graph)
            .into_iter()
            .filter(|scc| {
                scc.len() > 1 || self.graph.find_edge(scc[0], scc[0]).is_some()
            })
            .map(|scc| {
                let mut c: Vec<usize> = scc.into_iter().map(NodeIndex::index).collect();
                c.sort_unstable();
                c
            })
            .collect();
        cycles.sort();
        cycles
    }

    pub(crate) fn render_path(&self, vars: &[usize]) -> String {
        vars.iter()
            .map(|&v| self.name(v).unwrap_or("?").to_string())
            .collect::<Vec<_>>()
            .join(" -> ")
    }

    pub(crate) fn inner(&self) -> &DiGraph<String, f64> {
        &self.graph
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph(rows: &[Vec<f64>]) -> CausalGraph {
        let adj = AdjacencyMatrix::from_rows(rows).unwrap();
        CausalGraph::from_adjacency(&adj, &[], 0.0)
    }

    #[test]
    fn edges_follow_adjacency_convention() {
        // B[1][0] = 0.5 means x0 -> x1.
        let g = graph(&[vec![0.0, 0.0], vec![0.5, 0.0]]);
        assert_eq!(g.edges(), vec![Edge { from: 0, to: 1, weight: 0.5 }]);
        assert_eq!(g.parents(1).unwrap(), vec![0]);
        assert_eq!(g.children(0).unwrap(), vec![1]);
        assert!(g.is_dag());
    }

    #[test]
    fn threshold_drops_weak_edges() {
        let adj = AdjacencyMatrix::from_rows(&[vec![0.0, 0.05], vec![0.5, 0.0]]).unwrap();
        let g = CausalGraph::from_adjacency(&adj, &[], 0.1);
        assert_eq!(g.edge_count(), 1);
        assert!(g.is_dag());
    }

    #[test]
    fn cycle_is_reported() {
        let g = graph(&[
            vec![0.0, 0.0, 0.7],
            vec![0.5, 0.0, 0.0],
            vec![0.0, 0.3, 0.0],
        ]);
        assert!(!g.is_dag());
        assert_eq!(g.find_cycles(), vec![vec![0, 1, 2]]);
        match g.topological_order() {
            Err(GraphError::CycleDetected { path }) => assert!(path.contains("x0")),
            other => panic!("expected cycle, got {other:?}"),
        }
    }

    #[test]
    fn unknown_names_and_indices() {
        let g = graph(&[vec![0.0]]);
        assert_eq!(g.index_of("x0").unwrap(), 0);
        assert!(g.index_of("y").is_err());
        assert!(g.parents(3).is_err());
    }
}
