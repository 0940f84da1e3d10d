//! Parallel (symmetric) FastICA.
//!
//! Data are centred and whitened with the covariance eigendecomposition,
//! then all components are updated together by the fixed-point rule and
//! re-orthogonalized with `W <- (W W^T)^(-1/2) W` after every step.

use lingam_core::config::IcaConfig;
use lingam_core::errors::EstimationError;
use lingam_core::models::{DataMatrix, IcaFunction};
use lingam_core::SimpleRng;

use crate::linalg::{symmetric_eigen, Matrix};
use crate::stats::mean;

/// Relative eigenvalue floor below which whitening is ill-posed.
const WHITENING_EPS: f64 = 1e-12;

#[derive(Debug, Clone, Copy)]
pub struct FastIcaOptions {
    pub max_iter: usize,
    pub tol: f64,
    pub fun: IcaFunction,
    pub seed: u64,
}

impl FastIcaOptions {
    pub fn from_config(config: &IcaConfig) -> Self {
        Self {
            max_iter: config.effective_max_iter(),
            tol: config.effective_tol(),
            fun: config.effective_fun(),
            seed: config.effective_seed(),
        }
    }
}

impl Default for FastIcaOptions {
    fn default() -> Self {
        Self::from_config(&IcaConfig::default())
    }
}

#[derive(Debug, Clone)]
pub struct IcaResult {
    /// `p x p` unmixing matrix for centred data: `s = W (x - mean)`.
    pub unmixing: Matrix,
    pub n_iter: usize,
    pub converged: bool,
}

/// Estimate the unmixing matrix of `data`.
pub fn fast_ica(data: &DataMatrix, options: &FastIcaOptions) -> Result<IcaResult, EstimationError> {
    let p = data.n_variables();
    let n = data.n_samples();
    let nf = n as f64;

    let centered: Vec<Vec<f64>> = data
        .columns()
        .iter()
        .map(|c| {
            let m = mean(c);
            c.iter().map(|v| v - m).collect()
        })
        .collect();

    // Whitening matrix K: rows are eigenvectors scaled by 1/sqrt(eigenvalue).
    let mut cov = Matrix::zeros(p, p);
    for a in 0..p {
        for b in 0..=a {
            let v = centered[a]
                .iter()
                .zip(&centered[b])
                .map(|(x, y)| x * y)
                .sum::<f64>()
                / nf;
            cov[(a, b)] = v;
            cov[(b, a)] = v;
        }
    }
    let eig = symmetric_eigen(&cov)?;
    let top = eig.values.first().copied().unwrap_or(0.0);
    let mut whitening = Matrix::zeros(p, p);
    for k in 0..p {
        let lambda = eig.values[k];
        if lambda <= WHITENING_EPS * top.max(f64::MIN_POSITIVE) {
            return Err(EstimationError::SingularMatrix {
                context: "ICA whitening (linearly dependent variables)".to_string(),
            });
        }
        let s = 1.0 / lambda.sqrt();
        for j in 0..p {
            whitening[(k, j)] = eig.vectors[(j, k)] * s;
        }
    }

    // Whitened signals, p x n.
    let mut z = Matrix::zeros(p, n);
    for k in 0..p {
        let row = z.row_mut(k);
        for (j, col) in centered.iter().enumerate() {
            let w = whitening[(k, j)];
            for (zt, x) in row.iter_mut().zip(col) {
                *zt += w * x;
            }
        }
    }
    let z_t = z.transpose();

    let mut rng = SimpleRng::new(options.seed);
    let mut w_init = Matrix::zeros(p, p);
    for i in 0..p {
        for j in 0..p {
            w_init[(i, j)] = rng.normal();
        }
    }
    let mut w = sym_decorrelation(&w_init)?;

    let mut converged = false;
    let mut n_iter = 0;
    for it in 0..options.max_iter {
        n_iter = it + 1;
        let wz = w.matmul(&z);
        let mut g = Matrix::zeros(p, n);
        let mut g_prime_mean = vec![0.0; p];
        for i in 0..p {
            let mut acc = 0.0;
            for (t, &u) in wz.row(i).iter().enumerate() {
                let (gv, gp) = contrast(options.fun, u);
                g[(i, t)] = gv;
                acc += gp;
            }
            g_prime_mean[i] = acc / nf;
        }

        let mut w1 = g.matmul(&z_t);
        w1.scale(1.0 / nf);
        for i in 0..p {
            for j in 0..p {
                w1[(i, j)] -= g_prime_mean[i] * w[(i, j)];
            }
        }
        let w1 = sym_decorrelation(&w1)?;

        let lim = (0..p)
            .map(|i| {
                let d: f64 = w1.row(i).iter().zip(w.row(i)).map(|(a, b)| a * b).sum();
                (d.abs() - 1.0).abs()
            })
            .fold(0.0, f64::max);
        w = w1;
        if lim < options.tol {
            converged = true;
            break;
        }
    }

    if !converged {
        tracing::warn!(
            max_iter = options.max_iter,
            "FastICA did not converge; consider raising ica.max_iter or ica.tol"
        );
    }

    Ok(IcaResult {
        unmixing: w.matmul(&whitening),
        n_iter,
        converged,
    })
}

/// Contrast function value and derivative.
fn contrast(fun: IcaFunction, u: f64) -> (f64, f64) {
    match fun {
        IcaFunction::LogCosh => {
            let t = u.tanh();
            (t, 1.0 - t * t)
        }
        IcaFunction::Exp => {
            let e = (-u * u / 2.0).exp();
            (u * e, (1.0 - u * u) * e)
        }
        IcaFunction::Cube => (u * u * u, 3.0 * u * u),
    }
}

/// `(W W^T)^(-1/2) W`.
fn sym_decorrelation(w: &Matrix) -> Result<Matrix, EstimationError> {
    let eig = symmetric_eigen(&w.gram())?;
    let p = w.rows();
    let mut inv_sqrt = Matrix::zeros(p, p);
    for k in 0..p {
        let s = eig.values[k];
        if s <= f64::MIN_POSITIVE {
            return Err(EstimationError::SingularMatrix {
                context: "ICA symmetric decorrelation".to_string(),
            });
        }
        let f = 1.0 / s.sqrt();
        for i in 0..p {
            for j in 0..p {
                inv_sqrt[(i, j)] += eig.vectors[(i, k)] * f * eig.vectors[(j, k)];
            }
        }
    }
    Ok(inv_sqrt.matmul(w))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sym_decorrelation_is_orthogonal() {
        let w = Matrix::from_rows(&[vec![2.0, 1.0], vec![0.5, 3.0]]).unwrap();
        let d = sym_decorrelation(&w).unwrap();
        assert!(d.gram().sub(&Matrix::identity(2)).max_abs() < 1e-10);
    }

    #[test]
    fn recovers_mixing_up_to_permutation_and_scale() {
        let mut rng = SimpleRng::new(17);
        let n = 3000;
        let s0: Vec<f64> = (0..n).map(|_| rng.uniform(-1.0, 1.0)).collect();
        let s1: Vec<f64> = (0..n).map(|_| rng.laplace(1.0)).collect();
        let x0: Vec<f64> = s0.iter().zip(&s1).map(|(a, b)| a + 0.5 * b).collect();
        let x1: Vec<f64> = s0.iter().zip(&s1).map(|(a, b)| 0.3 * a + b).collect();
        let data = DataMatrix::from_columns(vec![x0, x1]).unwrap();

        let res = fast_ica(&data, &FastIcaOptions::default()).unwrap();
        assert!(res.converged);

        // W A should be a scaled permutation matrix.
        let a = Matrix::from_rows(&[vec![1.0, 0.5], vec![0.3, 1.0]]).unwrap();
        let wa = res.unmixing.matmul(&a);
        for i in 0..2 {
            let row = wa.row(i);
            let (big, small) = if row[0].abs() > row[1].abs() {
                (row[0].abs(), row[1].abs())
            } else {
                (row[1].abs(), row[0].abs())
            };
            assert!(small / big < 0.1, "row {i}: {row:?}");
        }
    }

    #[test]
    fn same_seed_gives_identical_unmixing() {
        let mut rng = SimpleRng::new(5);
        let s0: Vec<f64> = (0..500).map(|_| rng.uniform(-1.0, 1.0)).collect();
        let s1: Vec<f64> = (0..500).map(|_| rng.laplace(1.0)).collect();
        let x1: Vec<f64> = s0.iter().zip(&s1).map(|(a, b)| a + b).collect();
        let data = DataMatrix::from_columns(vec![s0, x1]).unwrap();

        let options = FastIcaOptions {
            seed: 11,
            ..FastIcaOptions::default()
        };
        let first = fast_ica(&data, &options).unwrap();
        let second = fast_ica(&data, &options).unwrap();
        assert_eq!(first.unmixing, second.unmixing);
        assert_eq!(first.n_iter, second.n_iter);
    }

    #[test]
    fn dependent_columns_fail_whitening() {
        let x0 = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let x1: Vec<f64> = x0.iter().map(|v| 2.0 * v).collect();
        let data = DataMatrix::from_columns(vec![x0, x1]).unwrap();
        assert!(matches!(
            fast_ica(&data, &FastIcaOptions::default()),
            Err(EstimationError::SingularMatrix { .. })
        ));
    }
}
