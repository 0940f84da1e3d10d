//! Property tests: structural invariants of fitted models and the numeric
//! building blocks they rely on.

use proptest::prelude::*;

use lingam_core::models::CausalOrder;
use lingam_core::CausalDiscovery;
use lingam_fast::linalg::{linear_sum_assignment, Matrix};
use lingam_fast::stats::{covariance, residual};
use lingam_fast::{random_dag, simulate_linear_sem, CausalGraph, DirectLingam, IcaLingam, Noise};

fn is_lower_triangular_in(order: &CausalOrder, b: &lingam_core::AdjacencyMatrix) -> bool {
    let o = order.as_slice();
    for a in 0..o.len() {
        for c in a..o.len() {
            if b.get(o[a], o[c]) != 0.0 {
                return false;
            }
        }
    }
    true
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn direct_fit_is_acyclic_and_follows_order(
        p in 2usize..5,
        density in 0.0f64..1.0,
        seed in 1u64..10_000,
    ) {
        let truth = random_dag(p, density, seed);
        let data = simulate_linear_sem(&truth, 200, Noise::Uniform, seed).unwrap();
        let model = DirectLingam::new().fit(&data).unwrap();
        prop_assert_eq!(model.causal_order.len(), p);
        prop_assert!(is_lower_triangular_in(&model.causal_order, &model.adjacency));
        prop_assert!(model.causal_order.is_consistent_with(&model.adjacency));
        prop_assert!(CausalGraph::from_model(&model, 0.0).is_dag());
    }

    #[test]
    fn ica_fit_is_acyclic_and_follows_order(
        p in 2usize..4,
        seed in 1u64..10_000,
    ) {
        let truth = random_dag(p, 0.7, seed);
        let data = simulate_linear_sem(&truth, 300, Noise::Laplace, seed).unwrap();
        let model = IcaLingam::new().fit(&data).unwrap();
        prop_assert!(is_lower_triangular_in(&model.causal_order, &model.adjacency));
    }
}

proptest! {
    #[test]
    fn assignment_is_a_permutation(
        n in 1usize..7,
        values in prop::collection::vec(0.0f64..100.0, 49),
    ) {
        let rows: Vec<Vec<f64>> = (0..n).map(|i| values[i * n..(i + 1) * n].to_vec()).collect();
        let cost = Matrix::from_rows(&rows).unwrap();
        let mut assignment = linear_sum_assignment(&cost).unwrap();
        assignment.sort_unstable();
        prop_assert_eq!(assignment, (0..n).collect::<Vec<_>>());
    }

    #[test]
    fn residual_is_uncorrelated_with_regressor(
        pairs in prop::collection::vec((-10.0f64..10.0, -10.0f64..10.0), 5..60),
    ) {
        let x: Vec<f64> = pairs.iter().map(|p| p.0).collect();
        let y: Vec<f64> = pairs.iter().map(|p| p.1).collect();
        let r = residual(&y, &x);
        let scale = 1.0 + covariance(&x, &x).abs() + covariance(&y, &y).abs();
        prop_assert!(covariance(&r, &x).abs() < 1e-9 * scale);
    }
}
