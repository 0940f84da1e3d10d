//! `lingam fit`

use serde::Serialize;

use lingam_core::config::LingamConfig;
use lingam_core::models::LingamModel;
use lingam_fast::CausalGraph;

use super::prepare;
use crate::cli::{FitArgs, OutputFormat};
use crate::output::{emit, format_matrix, to_json};

#[derive(Debug, Serialize)]
struct FitReport<'a> {
    method: &'static str,
    variables: &'a [String],
    causal_order: Vec<String>,
    /// `adjacency[to][from]`, unthresholded.
    adjacency: Vec<Vec<f64>>,
    edges: Vec<NamedEdge>,
}

#[derive(Debug, Serialize)]
struct NamedEdge {
    from: String,
    to: String,
    weight: f64,
}

pub fn run(args: &FitArgs, config: &LingamConfig) -> anyhow::Result<()> {
    let (data, estimator) = prepare(&args.input, &args.model, config)?;
    let model = estimator.fit(&data)?;
    let rendered = render(&model, config.graph.effective_edge_threshold(), args.format)?;
    emit(args.output.as_deref(), &rendered)
}

/// Render a fitted model. Edges with `|weight| <= threshold` are left out
/// of the edge list and the DOT graph.
pub fn render(model: &LingamModel, threshold: f64, format: OutputFormat) -> anyhow::Result<String> {
    let graph = CausalGraph::from_model(model, threshold);
    let edges: Vec<NamedEdge> = graph
        .edges()
        .into_iter()
        .map(|e| NamedEdge {
            from: model.name(e.from),
            to: model.name(e.to),
            weight: e.weight,
        })
        .collect();

    match format {
        OutputFormat::Json => to_json(&FitReport {
            method: model.method.as_str(),
            variables: &model.variable_names,
            causal_order: model.named_order(),
            adjacency: model.adjacency.to_rows(),
            edges,
        }),
        OutputFormat::Dot => Ok(graph.to_dot()),
        OutputFormat::Text => {
            let mut out = format!("method: {}\n", model.method.as_str());
            out.push_str(&format!("causal order: {}\n", model.named_order().join(" -> ")));
            out.push_str(&format!("edges (|weight| > {threshold}):\n"));
            if edges.is_empty() {
                out.push_str("  (none)\n");
            }
            for e in &edges {
                out.push_str(&format!("  {} -> {}  {:.3}\n", e.from, e.to, e.weight));
            }
            out.push_str("adjacency (row = to, column = from):\n");
            out.push_str(&format_matrix(&model.variable_names, &model.adjacency.to_rows()));
            Ok(out)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lingam_core::models::{AdjacencyMatrix, CausalOrder, Method};

    fn model() -> LingamModel {
        LingamModel {
            method: Method::Direct,
            causal_order: CausalOrder::new(vec![1, 0]).unwrap(),
            adjacency: AdjacencyMatrix::from_rows(&[vec![0.0, 0.8], vec![0.0, 0.0]]).unwrap(),
            variable_names: vec!["y".into(), "x".into()],
        }
    }

    #[test]
    fn json_lists_named_edges() {
        let json: serde_json::Value =
            serde_json::from_str(&render(&model(), 0.0, OutputFormat::Json).unwrap()).unwrap();
        assert_eq!(json["method"], "direct");
        assert_eq!(json["causal_order"], serde_json::json!(["x", "y"]));
        assert_eq!(json["edges"][0]["from"], "x");
        assert_eq!(json["edges"][0]["to"], "y");
    }

    #[test]
    fn threshold_hides_weak_edges() {
        let text = render(&model(), 0.9, OutputFormat::Text).unwrap();
        assert!(text.contains("(none)"));
        assert!(text.contains("causal order: x -> y"));
    }

    #[test]
    fn dot_output() {
        let dot = render(&model(), 0.0, OutputFormat::Dot).unwrap();
        assert!(dot.contains("\"x\" -> \"y\" [label=\"0.80\"]"));
    }
}
