//! Lasso by coordinate descent with BIC model selection, and the adaptive
//! lasso used to prune the adjacency matrix.

use lingam_core::errors::EstimationError;

use super::ols::{center, dot, ols_on};

/// Penalties on the path, geometric from `lambda_max` down.
const PATH_LENGTH: usize = 100;
/// Smallest penalty on the path relative to `lambda_max`.
const PATH_EPS: f64 = 1e-3;
const CD_MAX_ITER: usize = 1000;
const CD_TOL: f64 = 1e-8;

/// Lasso fit chosen by BIC over a penalty path (the unpenalized fit included).
///
/// Minimizes `1/(2n) ||y - X b||^2 + lambda ||b||_1` on centred data for each
/// penalty and keeps the fit with the lowest `n ln(RSS/n) + ln(n) df`, where
/// `df` counts nonzero coefficients.
pub fn lasso_bic(predictors: &[Vec<f64>], y: &[f64]) -> Result<Vec<f64>, EstimationError> {
    let k = predictors.len();
    if k == 0 {
        return Ok(Vec::new());
    }
    let n = y.len();
    let nf = n as f64;
    let x: Vec<Vec<f64>> = predictors.iter().map(|c| center(c)).collect();
    let yc = center(y);
    let sq_norms: Vec<f64> = x.iter().map(|c| dot(c, c) / nf).collect();

    let lambda_max = x
        .iter()
        .map(|c| (dot(c, &yc) / nf).abs())
        .fold(0.0, f64::max);

    let bic = |beta: &[f64]| {
        let rss = rss(&x, &yc, beta).max(f64::MIN_POSITIVE);
        let df = beta.iter().filter(|b| **b != 0.0).count() as f64;
        nf * (rss / nf).ln() + nf.ln() * df
    };

    // The all-zero model is the start of every path.
    let mut best = vec![0.0; k];
    let mut best_bic = bic(&best);

    if lambda_max > 0.0 {
        let mut beta = vec![0.0; k];
        let ratio = PATH_EPS.powf(1.0 / (PATH_LENGTH - 1) as f64);
        let mut lambda = lambda_max;
        for _ in 0..PATH_LENGTH {
            coordinate_descent(&x, &yc, &sq_norms, lambda, &mut beta);
            let score = bic(&beta);
            if score < best_bic {
                best_bic = score;
                best.copy_from_slice(&beta);
            }
            lambda *= ratio;
        }
    }

    // Unpenalized end of the path, when it is well defined.
    let active: Vec<usize> = (0..k).filter(|&j| sq_norms[j] > 0.0).collect();
    let cols: Vec<&[f64]> = active.iter().map(|&j| x[j].as_slice()).collect();
    if let Ok(coef) = ols_on(&cols, &yc) {
        let mut full = vec![0.0; k];
        for (&j, c) in active.iter().zip(coef) {
            full[j] = c;
        }
        if bic(&full) < best_bic {
            best = full;
        }
    }

    Ok(best)
}

/// Warm-started cyclic coordinate descent at a single penalty.
fn coordinate_descent(
    x: &[Vec<f64>],
    y: &[f64],
    sq_norms: &[f64],
    lambda: f64,
    beta: &mut [f64],
) {
    let nf = y.len() as f64;
    let mut resid: Vec<f64> = y.to_vec();
    for (j, col) in x.iter().enumerate() {
        if beta[j] != 0.0 {
            for (r, v) in resid.iter_mut().zip(col) {
                *r -= beta[j] * v;
            }
        }
    }

    for _ in 0..CD_MAX_ITER {
        let mut max_change: f64 = 0.0;
        for (j, col) in x.iter().enumerate() {
            if sq_norms[j] <= 0.0 {
                beta[j] = 0.0;
                continue;
            }
            let old = beta[j];
            let rho = dot(col, &resid) / nf + sq_norms[j] * old;
            let new = soft_threshold(rho, lambda) / sq_norms[j];
            if new != old {
                let delta = new - old;
                for (r, v) in resid.iter_mut().zip(col) {
                    *r -= delta * v;
                }
                beta[j] = new;
                max_change = max_change.max(delta.abs() * sq_norms[j].sqrt());
            }
        }
        if max_change < CD_TOL {
            break;
        }
    }
}

fn soft_threshold(z: f64, gamma: f64) -> f64 {
    if z > gamma {
        z - gamma
    } else if z < -gamma {
        z + gamma
    } else {
        0.0
    }
}

fn rss(x: &[Vec<f64>], y: &[f64], beta: &[f64]) -> f64 {
    (0..y.len())
        .map(|i| {
            let fit: f64 = x.iter().zip(beta).map(|(c, b)| c[i] * b).sum();
            (y[i] - fit).powi(2)
        })
        .sum()
}

/// Adaptive lasso coefficients of `target` on `predictors`.
///
/// `standardized` and `raw` hold the same variables. OLS on standardized
/// data sets per-predictor weights `|b|^gamma`, a BIC-selected lasso on the
/// weighted predictors picks the support, and the surviving predictors are
/// refit with OLS on raw data. Pruned predictors get exactly 0.
pub fn adaptive_lasso(
    standardized: &[Vec<f64>],
    raw: &[Vec<f64>],
    predictors: &[usize],
    target: usize,
    gamma: f64,
) -> Result<Vec<f64>, EstimationError> {
    if predictors.is_empty() {
        return Ok(Vec::new());
    }
    let std_cols: Vec<&[f64]> = predictors
        .iter()
        .map(|&p| standardized[p].as_slice())
        .collect();
    let initial = ols_on(&std_cols, &standardized[target])?;
    let weights: Vec<f64> = initial.iter().map(|b| b.abs().powf(gamma)).collect();

    let weighted: Vec<Vec<f64>> = std_cols
        .iter()
        .zip(&weights)
        .map(|(c, w)| c.iter().map(|v| v * w).collect())
        .collect();
    let coef = lasso_bic(&weighted, &standardized[target])?;

    let selected: Vec<usize> = (0..predictors.len())
        .filter(|&j| (coef[j] * weights[j]).abs() > 0.0)
        .collect();

    let mut out = vec![0.0; predictors.len()];
    if selected.is_empty() {
        return Ok(out);
    }
    let raw_cols: Vec<&[f64]> = selected
        .iter()
        .map(|&j| raw[predictors[j]].as_slice())
        .collect();
    let refit = ols_on(&raw_cols, &raw[target])?;
    for (&j, b) in selected.iter().zip(refit) {
        out[j] = b;
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lingam_core::SimpleRng;

    fn standardize(c: &[f64]) -> Vec<f64> {
        crate::stats::standardize(c).unwrap()
    }

    #[test]
    fn soft_threshold_shrinks_towards_zero() {
        assert_eq!(soft_threshold(3.0, 1.0), 2.0);
        assert_eq!(soft_threshold(-3.0, 1.0), -2.0);
        assert_eq!(soft_threshold(0.5, 1.0), 0.0);
    }

    #[test]
    fn lasso_bic_drops_irrelevant_predictor() {
        let mut rng = SimpleRng::new(8);
        let n = 500;
        let x0: Vec<f64> = (0..n).map(|_| rng.normal()).collect();
        let x1: Vec<f64> = (0..n).map(|_| rng.normal()).collect();
        let y: Vec<f64> = x0.iter().map(|v| 2.0 * v + 0.5 * rng.normal()).collect();
        let beta = lasso_bic(&[x0, x1], &y).unwrap();
        assert!((beta[0] - 2.0).abs() < 0.2);
        assert!(beta[1].abs() < 0.1);
    }

    #[test]
    fn adaptive_lasso_prunes_to_exact_zero() {
        let mut rng = SimpleRng::new(9);
        let n = 1000;
        let x0: Vec<f64> = (0..n).map(|_| rng.uniform(-1.0, 1.0)).collect();
        let x1: Vec<f64> = (0..n).map(|_| rng.uniform(-1.0, 1.0)).collect();
        let y: Vec<f64> = x0
            .iter()
            .map(|v| 1.5 * v + 0.3 * rng.uniform(-1.0, 1.0))
            .collect();
        let raw = vec![x0, x1, y];
        let std: Vec<Vec<f64>> = raw.iter().map(|c| standardize(c)).collect();

        let coef = adaptive_lasso(&std, &raw, &[0, 1], 2, 1.0).unwrap();
        assert!((coef[0] - 1.5).abs() < 0.05, "coef {coef:?}");
        assert_eq!(coef[1], 0.0);
    }
}
