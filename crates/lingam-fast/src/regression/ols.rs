//! Ordinary least squares with intercept.

use lingam_core::errors::EstimationError;

use crate::linalg::{solve_spd, Matrix};
use crate::stats::mean;

/// Coefficients of `target` regressed on `predictors` (intercept fitted and
/// dropped). Returns one coefficient per predictor, in the given order.
pub fn ols(
    columns: &[Vec<f64>],
    predictors: &[usize],
    target: usize,
) -> Result<Vec<f64>, EstimationError> {
    if predictors.is_empty() {
        return Ok(Vec::new());
    }
    let cols: Vec<&[f64]> = predictors.iter().map(|&p| columns[p].as_slice()).collect();
    ols_on(&cols, &columns[target])
}

/// Least squares on explicit predictor columns.
pub(crate) fn ols_on(predictors: &[&[f64]], y: &[f64]) -> Result<Vec<f64>, EstimationError> {
    let k = predictors.len();
    if k == 0 {
        return Ok(Vec::new());
    }
    let centered: Vec<Vec<f64>> = predictors.iter().map(|c| center(c)).collect();
    let yc = center(y);

    let mut xtx = Matrix::zeros(k, k);
    let mut xty = vec![0.0; k];
    for a in 0..k {
        xty[a] = dot(&centered[a], &yc);
        for b in 0..=a {
            let v = dot(&centered[a], &centered[b]);
            xtx[(a, b)] = v;
            xtx[(b, a)] = v;
        }
    }
    solve_spd(&xtx, &xty).map_err(|_| EstimationError::SingularMatrix {
        context: "least squares normal equations".to_string(),
    })
}

pub(crate) fn center(x: &[f64]) -> Vec<f64> {
    let m = mean(x);
    x.iter().map(|v| v - m).collect()
}

pub(crate) fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recovers_exact_linear_relation() {
        let x0 = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let x1 = vec![2.0, -1.0, 0.5, 3.0, 1.0, -2.0];
        let y: Vec<f64> = x0
            .iter()
            .zip(&x1)
            .map(|(a, b)| 10.0 + 1.5 * a - 0.5 * b)
            .collect();
        let columns = vec![x0, x1, y];
        let beta = ols(&columns, &[0, 1], 2).unwrap();
        assert!((beta[0] - 1.5).abs() < 1e-10);
        assert!((beta[1] + 0.5).abs() < 1e-10);
    }

    #[test]
    fn collinear_predictors_are_singular() {
        let x0 = vec![1.0, 2.0, 3.0, 4.0];
        let x1: Vec<f64> = x0.iter().map(|v| 2.0 * v).collect();
        let y = vec![1.0, 0.0, 1.0, 0.0];
        let columns = vec![x0, x1, y];
        assert!(matches!(
            ols(&columns, &[0, 1], 2),
            Err(EstimationError::SingularMatrix { .. })
        ));
    }
}
