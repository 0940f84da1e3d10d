//! Enumeration of directed paths between two variables.

use petgraph::graph::NodeIndex;
use petgraph::visit::EdgeRef;
use serde::Serialize;

use lingam_core::errors::GraphError;

use super::CausalGraph;

/// A directed path and the product of its edge weights.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CausalPath {
    pub nodes: Vec<usize>,
    pub effect: f64,
}

impl CausalGraph {
    /// Every simple directed path `from -> ... -> to`, sorted by length and
    /// then lexicographically.
    pub fn all_paths(&self, from: usize, to: usize) -> Result<Vec<CausalPath>, GraphError> {
        let start = self.node(from)?;
        let goal = self.node(to)?;
        let mut out = Vec::new();
        if start == goal {
            return Ok(out);
        }
        let mut visited = vec![false; self.node_count()];
        let mut stack = vec![from];
        visited[from] = true;
        self.walk(start, goal, 1.0, &mut visited, &mut stack, &mut out);
        out.sort_by(|a, b| a.nodes.len().cmp(&b.nodes.len()).then_with(|| a.nodes.cmp(&b.nodes)));
        Ok(out)
    }

    fn walk(
        &self,
        node: NodeIndex,
        goal: NodeIndex,
        effect: f64,
        visited: &mut [bool],
        stack: &mut Vec<usize>,
        out: &mut Vec<CausalPath>,
    ) {
        for edge in self.inner().edges(node) {
            let next = edge.target();
            let effect = effect * edge.weight();
            if next == goal {
                let mut nodes = stack.clone();
                nodes.push(next.index());
                out.push(CausalPath { nodes, effect });
                continue;
            }
            if visited[next.index()] {
                continue;
            }
            visited[next.index()] = true;
            stack.push(next.index());
            self.walk(next, goal, effect, visited, stack, out);
            stack.pop();
            visited[next.index()] = false;
        }
    }
}
