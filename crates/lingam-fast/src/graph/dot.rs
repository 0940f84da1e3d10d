//! Graphviz rendering.

use std::fmt::Write;

use super::CausalGraph;

impl CausalGraph {
    /// DOT source with one node per variable and edges labelled with their
    /// coefficient to two decimals.
    pub fn to_dot(&self) -> String {
        let mut out = String::from("digraph {\n");
        for i in 0..self.node_count() {
            let _ = writeln!(out, "    \"{}\";", escape(self.name(i).unwrap_or("?")));
        }
        for e in self.edges() {
            let _ = writeln!(
                out,
                "    \"{}\" -> \"{}\" [label=\"{:.2}\"];",
                escape(self.name(e.from).unwrap_or("?")),
                escape(self.name(e.to).unwrap_or("?")),
                e.weight
            );
        }
        out.push_str("}\n");
        out
    }
}

fn escape(name: &str) -> String {
    name.replace('\\', "\\\\").replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use super::*;
    use lingam_core::models::AdjacencyMatrix;

    #[test]
    fn renders_labelled_edges() {
        let adj = AdjacencyMatrix::from_rows(&[vec![0.0, 0.0], vec![1.234, 0.0]]).unwrap();
        let names = vec!["rain".to_string(), "wet \"grass\"".to_string()];
        let dot = CausalGraph::from_adjacency(&adj, &names, 0.0).to_dot();
        assert!(dot.starts_with("digraph {\n"));
        assert!(dot.contains("\"rain\" -> \"wet \\\"grass\\\"\" [label=\"1.23\"];"));
        assert!(dot.ends_with("}\n"));
    }
}
