//! Root selection scores for one step of the order search.

use rayon::prelude::*;

use lingam_core::errors::EstimationError;

use super::candidates::Candidates;
use crate::stats::{diff_mutual_info, kernel_mutual_information, residual, standardize};

/// Above this many samples the kernel measure uses the narrower parameters.
const KERNEL_LARGE_SAMPLE: usize = 1000;

/// Pick the candidate with the highest pairwise likelihood-ratio score
/// `-sum_j min(0, diff_mutual_info(i, j))^2`.
pub(crate) fn pwling_root(columns: &[Vec<f64>], remaining: &[usize], cand: &Candidates) -> usize {
    let mut standardized = vec![Vec::new(); columns.len()];
    for &v in remaining {
        standardized[v] = standardize_or_zero(&columns[v]);
    }

    let scores: Vec<f64> = cand
        .roots
        .par_iter()
        .map(|&i| {
            let xi = &standardized[i];
            let mut m = 0.0;
            for &j in remaining {
                if j == i {
                    continue;
                }
                let xj = &standardized[j];
                let ri_j = residual(xi, xj);
                let rj_i = if cand.independent.contains(&j) {
                    xj.to_vec()
                } else {
                    residual(xj, xi)
                };
                let d = diff_mutual_info(xi, xj, &ri_j, &rj_i).min(0.0);
                m += d * d;
            }
            -m
        })
        .collect();

    cand.roots[best_index(&scores, |a, b| a > b)]
}

/// Pick the candidate whose residuals carry the least kernel mutual
/// information with it. `columns` are expected to be standardized.
pub(crate) fn kernel_root(
    columns: &[Vec<f64>],
    remaining: &[usize],
    cand: &Candidates,
) -> Result<usize, EstimationError> {
    let n = columns.first().map(Vec::len).unwrap_or(0);
    let (kappa, sigma) = if n > KERNEL_LARGE_SAMPLE {
        (2e-3, 0.5)
    } else {
        (2e-2, 1.0)
    };

    let scores: Vec<f64> = cand
        .roots
        .par_iter()
        .map(|&j| -> Result<f64, EstimationError> {
            let mut t = 0.0;
            for &i in remaining {
                if i == j {
                    continue;
                }
                let ri_j = residual(&columns[i], &columns[j]);
                t += kernel_mutual_information(&columns[j], &ri_j, kappa, sigma)?;
            }
            Ok(t)
        })
        .collect::<Result<_, _>>()?;

    Ok(cand.roots[best_index(&scores, |a, b| a < b)])
}

/// First index whose score beats every earlier one under `better`.
fn best_index(scores: &[f64], better: impl Fn(f64, f64) -> bool) -> usize {
    let mut best = 0;
    for (k, &s) in scores.iter().enumerate().skip(1) {
        if better(s, scores[best]) {
            best = k;
        }
    }
    best
}

/// A column whose residualization left it constant carries no signal.
fn standardize_or_zero(x: &[f64]) -> Vec<f64> {
    standardize(x).unwrap_or_else(|| vec![0.0; x.len()])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn best_index_breaks_ties_towards_first() {
        assert_eq!(best_index(&[1.0, 3.0, 3.0], |a, b| a > b), 1);
        assert_eq!(best_index(&[2.0, 1.0, 1.0], |a, b| a < b), 1);
        assert_eq!(best_index(&[5.0], |a, b| a > b), 0);
    }

    #[test]
    fn nan_scores_never_win() {
        assert_eq!(best_index(&[1.0, f64::NAN, 2.0], |a, b| a > b), 2);
    }
}
