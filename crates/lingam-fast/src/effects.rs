//! Total causal effects and residual independence diagnostics.

use rayon::prelude::*;

use lingam_core::errors::EstimationError;
use lingam_core::models::{DataMatrix, LingamModel};

use crate::regression::ols;
use crate::stats::hsic_test_gamma;

fn check_variable(index: usize, n_variables: usize) -> Result<(), EstimationError> {
    if index >= n_variables {
        return Err(EstimationError::VariableOutOfRange { index, n_variables });
    }
    Ok(())
}

fn check_shape(data: &DataMatrix, model: &LingamModel) -> Result<(), EstimationError> {
    if data.n_variables() != model.n_variables() {
        return Err(EstimationError::DimensionMismatch {
            expected: model.n_variables(),
            actual: data.n_variables(),
        });
    }
    Ok(())
}

/// Total effect of `from` on `to`: the coefficient of `from` when `to` is
/// regressed on `from` and the parents of `from`.
pub fn estimate_total_effect(
    data: &DataMatrix,
    model: &LingamModel,
    from: usize,
    to: usize,
) -> Result<f64, EstimationError> {
    check_shape(data, model)?;
    let p = model.n_variables();
    check_variable(from, p)?;
    check_variable(to, p)?;

    let order = &model.causal_order;
    if order.position(from) > order.position(to) {
        tracing::warn!(
            from = %model.name(from),
            to = %model.name(to),
            "source variable comes after the destination in the causal order; \
             the estimated effect is likely meaningless"
        );
    }

    let mut predictors = vec![from];
    predictors.extend(model.adjacency.parents(from));
    let coef = ols(data.columns(), &predictors, to)?;
    Ok(coef[0])
}

/// Total effects `T[to][from]` for every pair where `from` precedes `to` in
/// the model's causal order. Other entries are zero.
pub fn total_effect_matrix(
    data: &DataMatrix,
    model: &LingamModel,
) -> Result<Vec<Vec<f64>>, EstimationError> {
    check_shape(data, model)?;
    let p = model.n_variables();
    let order = model.causal_order.as_slice();
    let pairs: Vec<(usize, usize)> = order
        .iter()
        .enumerate()
        .flat_map(|(k, &from)| order[k + 1..].iter().map(move |&to| (from, to)))
        .collect();

    let effects = pairs
        .par_iter()
        .map(|&(from, to)| estimate_total_effect(data, model, from, to).map(|e| (from, to, e)))
        .collect::<Result<Vec<_>, _>>()?;

    let mut out = vec![vec![0.0; p]; p];
    for (from, to, e) in effects {
        out[to][from] = e;
    }
    Ok(out)
}

/// Residuals `e_i = x_i - sum_j B[i][j] x_j`, one column per variable.
pub fn residuals(data: &DataMatrix, model: &LingamModel) -> Result<Vec<Vec<f64>>, EstimationError> {
    check_shape(data, model)?;
    let b = &model.adjacency;
    Ok((0..data.n_variables())
        .map(|i| {
            let mut e = data.column(i).to_vec();
            for j in b.parents(i) {
                let w = b.get(i, j);
                for (ev, xv) in e.iter_mut().zip(data.column(j)) {
                    *ev -= w * xv;
                }
            }
            e
        })
        .collect())
}

/// Symmetric matrix of HSIC p-values between pairs of residuals. The
/// diagonal is NaN.
pub fn error_independence_p_values(
    data: &DataMatrix,
    model: &LingamModel,
) -> Result<Vec<Vec<f64>>, EstimationError> {
    let e = residuals(data, model)?;
    let p = e.len();
    let pairs: Vec<(usize, usize)> = (0..p)
        .flat_map(|i| ((i + 1)..p).map(move |j| (i, j)))
        .collect();
    let results: Vec<(usize, usize, f64)> = pairs
        .par_iter()
        .map(|&(i, j)| (i, j, hsic_test_gamma(&e[i], &e[j]).p_value))
        .collect();

    let mut out = vec![vec![0.0; p]; p];
    for (i, row) in out.iter_mut().enumerate() {
        row[i] = f64::NAN;
    }
    for (i, j, pv) in results {
        out[i][j] = pv;
        out[j][i] = pv;
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lingam_core::models::{AdjacencyMatrix, CausalOrder, Method};
    use lingam_core::SimpleRng;

    /// x0 -> x1 -> x2, total effect of x0 on x2 is 2 * 3 = 6.
    fn fixture(n: usize) -> (DataMatrix, LingamModel) {
        let mut rng = SimpleRng::new(21);
        let x0: Vec<f64> = (0..n).map(|_| rng.uniform(-1.0, 1.0)).collect();
        let x1: Vec<f64> = x0.iter().map(|v| 2.0 * v + rng.uniform(-1.0, 1.0)).collect();
        let x2: Vec<f64> = x1.iter().map(|v| 3.0 * v + rng.uniform(-1.0, 1.0)).collect();
        let data = DataMatrix::from_columns(vec![x0, x1, x2]).unwrap();
        let adjacency = AdjacencyMatrix::from_rows(&[
            vec![0.0, 0.0, 0.0],
            vec![2.0, 0.0, 0.0],
            vec![0.0, 3.0, 0.0],
        ])
        .unwrap();
        let model = LingamModel {
            method: Method::Direct,
            causal_order: CausalOrder::new(vec![0, 1, 2]).unwrap(),
            adjacency,
            variable_names: data.names().to_vec(),
        };
        (data, model)
    }

    #[test]
    fn total_effect_multiplies_along_chain() {
        let (data, model) = fixture(2000);
        let te = estimate_total_effect(&data, &model, 0, 2).unwrap();
        assert!((te - 6.0).abs() < 0.3, "te = {te}");
    }

    #[test]
    fn total_effect_matrix_is_lower_in_order() {
        let (data, model) = fixture(500);
        let t = total_effect_matrix(&data, &model).unwrap();
        assert_eq!(t[0][1], 0.0);
        assert_eq!(t[0][2], 0.0);
        assert!(t[2][0] > 4.0);
        assert!((t[1][0] - 2.0).abs() < 0.3);
    }

    #[test]
    fn out_of_range_index() {
        let (data, model) = fixture(50);
        assert!(matches!(
            estimate_total_effect(&data, &model, 0, 3),
            Err(EstimationError::VariableOutOfRange { index: 3, .. })
        ));
    }

    #[test]
    fn p_values_are_symmetric_with_nan_diagonal() {
        let (data, model) = fixture(200);
        let pv = error_independence_p_values(&data, &model).unwrap();
        for i in 0..3 {
            assert!(pv[i][i].is_nan());
            for j in 0..3 {
                if i != j {
                    assert_eq!(pv[i][j], pv[j][i]);
                    assert!((0.0..=1.0).contains(&pv[i][j]));
                }
            }
        }
    }
}
