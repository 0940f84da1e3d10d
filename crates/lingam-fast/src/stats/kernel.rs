//! Kernel-based mutual information (regularized kernel generalized variance).

use lingam_core::errors::EstimationError;

use crate::linalg::{log_det_spd, Matrix};

/// Gaussian Gram matrix `exp(-(xi - xj)^2 / (2 sigma^2))`.
pub(crate) fn gaussian_gram(x: &[f64], sigma: f64) -> Matrix {
    let n = x.len();
    let inv = 1.0 / (2.0 * sigma * sigma);
    let mut k = Matrix::zeros(n, n);
    for i in 0..n {
        k[(i, i)] = 1.0;
        for j in 0..i {
            let d = x[i] - x[j];
            let v = (-d * d * inv).exp();
            k[(i, j)] = v;
            k[(j, i)] = v;
        }
    }
    k
}

/// Mutual information estimate between `x1` and `x2`:
/// `-1/2 (ln det K_kappa - ln det D_kappa)`.
///
/// `kappa` regularizes the Gram matrices and `sigma` is the Gaussian kernel
/// width. Cost is O(n^3) in the number of samples.
pub fn kernel_mutual_information(
    x1: &[f64],
    x2: &[f64],
    kappa: f64,
    sigma: f64,
) -> Result<f64, EstimationError> {
    let n = x1.len();
    if x2.len() != n {
        return Err(EstimationError::DimensionMismatch {
            expected: n,
            actual: x2.len(),
        });
    }
    let k1 = gaussian_gram(x1, sigma);
    let k2 = gaussian_gram(x2, sigma);

    let reg = n as f64 * kappa / 2.0;
    let mut t1 = k1.clone();
    t1.add_diagonal(reg);
    let mut t2 = k2.clone();
    t2.add_diagonal(reg);

    let t1_sq = t1.matmul(&t1);
    let t2_sq = t2.matmul(&t2);
    let k12 = k1.matmul(&k2);

    let mut big = Matrix::zeros(2 * n, 2 * n);
    for i in 0..n {
        for j in 0..n {
            big[(i, j)] = t1_sq[(i, j)];
            big[(n + i, n + j)] = t2_sq[(i, j)];
            // K2 K1 = (K1 K2)^T, written from one product to keep symmetry exact.
            big[(i, n + j)] = k12[(i, j)];
            big[(n + j, i)] = k12[(i, j)];
        }
    }

    let log_det_k = log_det_spd(&big)?;
    let log_det_d = 2.0 * (log_det_spd(&t1)? + log_det_spd(&t2)?);
    Ok(-0.5 * (log_det_k - log_det_d))
}
