//! Hilbert-Schmidt independence criterion with a Gamma-approximated null.

use statrs::distribution::{ContinuousCDF, Gamma};

use super::kernel::gaussian_gram;
use crate::linalg::Matrix;

/// Samples used for the median-heuristic kernel width.
const WIDTH_SAMPLES: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HsicResult {
    pub statistic: f64,
    /// Probability of a statistic this large under independence.
    pub p_value: f64,
}

/// HSIC independence test between two univariate samples.
///
/// Degenerate inputs (too few samples, zero null variance) give a p-value
/// of 1.0: independence cannot be rejected.
pub fn hsic_test_gamma(x: &[f64], y: &[f64]) -> HsicResult {
    let n = x.len().min(y.len());
    let x = &x[..n];
    let y = &y[..n];
    let degenerate = HsicResult {
        statistic: 0.0,
        p_value: 1.0,
    };
    if n < 6 {
        return degenerate;
    }
    let nf = n as f64;

    let k = gaussian_gram(x, kernel_width(x));
    let l = gaussian_gram(y, kernel_width(y));
    let kc = center(&k);
    let lc = center(&l);

    let statistic = kc
        .as_slice()
        .iter()
        .zip(lc.as_slice())
        .map(|(a, b)| a * b)
        .sum::<f64>()
        / nf;

    // Variance of the statistic under the null.
    let mut var_sum = 0.0;
    let mut var_trace = 0.0;
    for i in 0..n {
        for j in 0..n {
            let v = (kc[(i, j)] * lc[(i, j)] / 6.0).powi(2);
            var_sum += v;
            if i == j {
                var_trace += v;
            }
        }
    }
    let var = (var_sum - var_trace) / nf / (nf - 1.0);
    let var = 72.0 * (nf - 4.0) * (nf - 5.0) / nf / (nf - 1.0) / (nf - 2.0) / (nf - 3.0) * var;

    let off_diag_mean = |m: &Matrix| {
        let total: f64 = m.as_slice().iter().sum();
        (total - m.diagonal().iter().sum::<f64>()) / nf / (nf - 1.0)
    };
    let mu_x = off_diag_mean(&k);
    let mu_y = off_diag_mean(&l);
    let mean = (1.0 + mu_x * mu_y - mu_x - mu_y) / nf;

    if !(var > 0.0 && mean > 0.0 && var.is_finite() && mean.is_finite()) {
        return HsicResult {
            statistic,
            p_value: 1.0,
        };
    }

    let shape = mean * mean / var;
    let scale = var * nf / mean;
    let p_value = match Gamma::new(shape, 1.0 / scale) {
        Ok(dist) => (1.0 - dist.cdf(statistic)).clamp(0.0, 1.0),
        Err(_) => 1.0,
    };

    HsicResult { statistic, p_value }
}

/// Median heuristic on pairwise distances of the first `WIDTH_SAMPLES` points.
fn kernel_width(x: &[f64]) -> f64 {
    let m = x.len().min(WIDTH_SAMPLES);
    let mut dists = Vec::with_capacity(m * (m - 1) / 2);
    for i in 0..m {
        for j in (i + 1)..m {
            let d = (x[i] - x[j]).powi(2);
            if d > 0.0 {
                dists.push(d);
            }
        }
    }
    if dists.is_empty() {
        return 1.0;
    }
    dists.sort_by(f64::total_cmp);
    let mid = dists.len() / 2;
    let median = if dists.len() % 2 == 0 {
        (dists[mid - 1] + dists[mid]) / 2.0
    } else {
        dists[mid]
    };
    (0.5 * median).sqrt()
}

/// `H K H` with `H = I - 11^T / n`.
fn center(k: &Matrix) -> Matrix {
    let n = k.rows();
    let nf = n as f64;
    let row_means: Vec<f64> = (0..n).map(|i| k.row(i).iter().sum::<f64>() / nf).collect();
    let total_mean = row_means.iter().sum::<f64>() / nf;
    let mut out = Matrix::zeros(n, n);
    for i in 0..n {
        for j in 0..n {
            // K is symmetric, so column means equal row means.
            out[(i, j)] = k[(i, j)] - row_means[i] - row_means[j] + total_mean;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use lingam_core::SimpleRng;

    #[test]
    fn independent_samples_have_large_p_value() {
        let mut rng = SimpleRng::new(21);
        let x: Vec<f64> = (0..200).map(|_| rng.normal()).collect();
        let y: Vec<f64> = (0..200).map(|_| rng.normal()).collect();
        let r = hsic_test_gamma(&x, &y);
        assert!(r.p_value > 0.01, "p = {}", r.p_value);
    }

    #[test]
    fn dependent_samples_have_small_p_value() {
        let mut rng = SimpleRng::new(22);
        let x: Vec<f64> = (0..200).map(|_| rng.normal()).collect();
        let y: Vec<f64> = x.iter().map(|v| v * v + 0.1 * rng.normal()).collect();
        let r = hsic_test_gamma(&x, &y);
        assert!(r.p_value < 0.01, "p = {}", r.p_value);
    }

    #[test]
    fn tiny_samples_are_degenerate() {
        let r = hsic_test_gamma(&[1.0, 2.0, 3.0], &[3.0, 1.0, 2.0]);
        assert_eq!(r.p_value, 1.0);
    }
}
