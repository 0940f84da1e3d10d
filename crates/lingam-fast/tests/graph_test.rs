//! Graph output from fitted models.

use lingam_core::models::AdjacencyMatrix;
use lingam_core::CausalDiscovery;
use lingam_fast::{error_independence_p_values, simulate_linear_sem, CausalGraph, DirectLingam, Noise};

fn model() -> (lingam_core::DataMatrix, lingam_core::LingamModel) {
    let b = AdjacencyMatrix::from_rows(&[
        vec![0.0, 0.0, 0.0],
        vec![0.9, 0.0, 0.0],
        vec![0.0, 1.1, 0.0],
    ])
    .unwrap();
    let data = simulate_linear_sem(&b, 1500, Noise::Uniform, 8)
        .unwrap()
        .with_names(vec!["cloud".into(), "rain".into(), "flood".into()])
        .unwrap();
    let model = DirectLingam::new().fit(&data).unwrap();
    (data, model)
}

#[test]
fn fitted_graph_is_a_dag_matching_the_order() {
    let (_, model) = model();
    let g = CausalGraph::from_model(&model, 0.05);
    assert!(g.is_dag());
    assert!(g.find_cycles().is_empty());
    let topo = g.topological_order().unwrap();
    for e in g.edges() {
        let pos = |v| topo.iter().position(|&x| x == v).unwrap();
        assert!(pos(e.from) < pos(e.to));
    }
    assert_eq!(g.index_of("rain").unwrap(), 1);
}

#[test]
fn dot_uses_variable_names() {
    let (_, model) = model();
    let dot = CausalGraph::from_model(&model, 0.05).to_dot();
    assert!(dot.contains("\"cloud\" -> \"rain\""));
    assert!(dot.contains("\"rain\" -> \"flood\""));
}

#[test]
fn chain_path_effect_is_product() {
    let (_, model) = model();
    let g = CausalGraph::from_model(&model, 0.05);
    let paths = g.all_paths(0, 2).unwrap();
    assert_eq!(paths.len(), 1);
    assert!((paths[0].effect - 0.99).abs() < 0.15);
}

#[test]
fn residuals_of_correct_model_look_independent() {
    let (data, model) = model();
    let pv = error_independence_p_values(&data, &model).unwrap();
    assert!(pv[0][1] > 0.001, "{pv:?}");
    assert!(pv[1][2] > 0.001, "{pv:?}");
}
