//! Cholesky, Jacobi eigendecomposition, and Gauss-Jordan inversion.

use lingam_core::errors::EstimationError;

use super::Matrix;

const JACOBI_MAX_SWEEPS: usize = 100;

fn singular(context: &str) -> EstimationError {
    EstimationError::SingularMatrix {
        context: context.to_string(),
    }
}

/// Lower-triangular `L` with `A = L L^T`. `A` must be symmetric positive definite.
pub fn cholesky(a: &Matrix) -> Result<Matrix, EstimationError> {
    if !a.is_square() {
        return Err(EstimationError::DimensionMismatch {
            expected: a.rows(),
            actual: a.cols(),
        });
    }
    let n = a.rows();
    let mut l = Matrix::zeros(n, n);
    for j in 0..n {
        let mut d = a[(j, j)];
        for k in 0..j {
            d -= l[(j, k)] * l[(j, k)];
        }
        // Relative pivot tolerance catches rank deficiency lost to rounding.
        if !d.is_finite() || d <= 1e-12 * a[(j, j)].abs() {
            return Err(singular("cholesky"));
        }
        let d = d.sqrt();
        l[(j, j)] = d;
        for i in (j + 1)..n {
            let mut s = a[(i, j)];
            for k in 0..j {
                s -= l[(i, k)] * l[(j, k)];
            }
            l[(i, j)] = s / d;
        }
    }
    Ok(l)
}

/// Solve `A x = b` for symmetric positive definite `A`.
pub fn solve_spd(a: &Matrix, b: &[f64]) -> Result<Vec<f64>, EstimationError> {
    let l = cholesky(a)?;
    let n = l.rows();
    if b.len() != n {
        return Err(EstimationError::DimensionMismatch {
            expected: n,
            actual: b.len(),
        });
    }
    // Forward: L y = b
    let mut y = vec![0.0; n];
    for i in 0..n {
        let s: f64 = (0..i).map(|k| l[(i, k)] * y[k]).sum();
        y[i] = (b[i] - s) / l[(i, i)];
    }
    // Backward: L^T x = y
    let mut x = vec![0.0; n];
    for i in (0..n).rev() {
        let s: f64 = ((i + 1)..n).map(|k| l[(k, i)] * x[k]).sum();
        x[i] = (y[i] - s) / l[(i, i)];
    }
    Ok(x)
}

/// `ln det A` for symmetric positive definite `A`.
pub fn log_det_spd(a: &Matrix) -> Result<f64, EstimationError> {
    let l = cholesky(a)?;
    Ok(2.0 * l.diagonal().iter().map(|d| d.ln()).sum::<f64>())
}

/// Eigendecomposition of a symmetric matrix: `A = V diag(values) V^T`.
/// Eigenvalues are sorted in descending order; column `k` of `vectors`
/// belongs to `values[k]`.
#[derive(Debug, Clone)]
pub struct SymmetricEigen {
    pub values: Vec<f64>,
    pub vectors: Matrix,
}

/// Cyclic Jacobi rotations.
pub fn symmetric_eigen(a: &Matrix) -> Result<SymmetricEigen, EstimationError> {
    if !a.is_square() {
        return Err(EstimationError::DimensionMismatch {
            expected: a.rows(),
            actual: a.cols(),
        });
    }
    let n = a.rows();
    let mut m = a.clone();
    let mut v = Matrix::identity(n);
    let scale = a.max_abs().max(f64::MIN_POSITIVE);

    for _ in 0..JACOBI_MAX_SWEEPS {
        let off: f64 = (0..n)
            .flat_map(|i| ((i + 1)..n).map(move |j| (i, j)))
            .map(|(i, j)| m[(i, j)] * m[(i, j)])
            .sum();
        if off.sqrt() <= 1e-14 * scale {
            break;
        }
        for p in 0..n {
            for q in (p + 1)..n {
                let apq = m[(p, q)];
                if apq.abs() <= f64::MIN_POSITIVE {
                    continue;
                }
                let theta = (m[(q, q)] - m[(p, p)]) / (2.0 * apq);
                let t = theta.signum() / (theta.abs() + (theta * theta + 1.0).sqrt());
                let c = 1.0 / (t * t + 1.0).sqrt();
                let s = t * c;

                for k in 0..n {
                    let mkp = m[(k, p)];
                    let mkq = m[(k, q)];
                    m[(k, p)] = c * mkp - s * mkq;
                    m[(k, q)] = s * mkp + c * mkq;
                }
                for k in 0..n {
                    let mpk = m[(p, k)];
                    let mqk = m[(q, k)];
                    m[(p, k)] = c * mpk - s * mqk;
                    m[(q, k)] = s * mpk + c * mqk;
                }
                for k in 0..n {
                    let vkp = v[(k, p)];
                    let vkq = v[(k, q)];
                    v[(k, p)] = c * vkp - s * vkq;
                    v[(k, q)] = s * vkp + c * vkq;
                }
            }
        }
    }

    let mut idx: Vec<usize> = (0..n).collect();
    idx.sort_by(|&i, &j| m[(j, j)].total_cmp(&m[(i, i)]));
    let values = idx.iter().map(|&i| m[(i, i)]).collect();
    let vectors = v.select(&(0..n).collect::<Vec<_>>(), &idx);
    Ok(SymmetricEigen { values, vectors })
}

/// Inverse by Gauss-Jordan elimination with partial pivoting.
///
/// Test-only: checks the SPD solvers against an independent inverse.
#[cfg(test)]
pub(crate) fn inverse(a: &Matrix) -> Result<Matrix, EstimationError> {
    if !a.is_square() {
        return Err(EstimationError::DimensionMismatch {
            expected: a.rows(),
            actual: a.cols(),
        });
    }
    let n = a.rows();
    let mut m = a.clone();
    let mut inv = Matrix::identity(n);
    let tol = 1e-12 * a.max_abs().max(1.0);

    for col in 0..n {
        let pivot = (col..n)
            .max_by(|&i, &j| m[(i, col)].abs().total_cmp(&m[(j, col)].abs()))
            .unwrap_or(col);
        if m[(pivot, col)].abs() <= tol {
            return Err(singular("inverse"));
        }
        if pivot != col {
            for k in 0..n {
                let tmp = m[(col, k)];
                m[(col, k)] = m[(pivot, k)];
                m[(pivot, k)] = tmp;
                let tmp = inv[(col, k)];
                inv[(col, k)] = inv[(pivot, k)];
                inv[(pivot, k)] = tmp;
            }
        }
        let d = m[(col, col)];
        for k in 0..n {
            m[(col, k)] /= d;
            inv[(col, k)] /= d;
        }
        for i in 0..n {
            if i == col {
                continue;
            }
            let f = m[(i, col)];
            if f == 0.0 {
                continue;
            }
            for k in 0..n {
                m[(i, k)] -= f * m[(col, k)];
                inv[(i, k)] -= f * inv[(col, k)];
            }
        }
    }
    Ok(inv)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spd() -> Matrix {
        Matrix::from_rows(&[
            vec![4.0, 1.0, 0.5],
            vec![1.0, 3.0, 0.2],
            vec![0.5, 0.2, 2.0],
        ])
        .unwrap()
    }

    #[test]
    fn cholesky_reconstructs() {
        let a = spd();
        let l = cholesky(&a).unwrap();
        let back = l.matmul(&l.transpose());
        assert!(back.sub(&a).max_abs() < 1e-12);
    }

    #[test]
    fn cholesky_rejects_indefinite() {
        let a = Matrix::from_rows(&[vec![1.0, 2.0], vec![2.0, 1.0]]).unwrap();
        assert!(cholesky(&a).is_err());
    }

    #[test]
    fn solve_spd_solves() {
        let a = spd();
        let x = solve_spd(&a, &[1.0, 2.0, 3.0]).unwrap();
        let b = a.mat_vec(&x);
        for (bi, ei) in b.iter().zip([1.0, 2.0, 3.0]) {
            assert!((bi - ei).abs() < 1e-10);
        }
    }

    #[test]
    fn eigen_reconstructs_and_sorts() {
        let a = spd();
        let e = symmetric_eigen(&a).unwrap();
        assert!(e.values.windows(2).all(|w| w[0] >= w[1]));
        let mut d = Matrix::zeros(3, 3);
        for i in 0..3 {
            d[(i, i)] = e.values[i];
        }
        let back = e.vectors.matmul(&d).matmul(&e.vectors.transpose());
        assert!(back.sub(&a).max_abs() < 1e-10);
    }

    #[test]
    fn inverse_times_matrix_is_identity() {
        let a = Matrix::from_rows(&[vec![0.0, 2.0], vec![3.0, 1.0]]).unwrap();
        let inv = inverse(&a).unwrap();
        assert!(a.matmul(&inv).sub(&Matrix::identity(2)).max_abs() < 1e-12);
    }

    #[test]
    fn inverse_rejects_singular() {
        let a = Matrix::from_rows(&[vec![1.0, 2.0], vec![2.0, 4.0]]).unwrap();
        assert!(matches!(
            inverse(&a),
            Err(EstimationError::SingularMatrix { .. })
        ));
    }

    #[test]
    fn solve_spd_agrees_with_inverse() {
        let a = spd();
        let b = [0.5, -1.0, 2.0];
        let x = solve_spd(&a, &b).unwrap();
        let expected = inverse(&a).unwrap().mat_vec(&b);
        for (xi, ei) in x.iter().zip(&expected) {
            assert!((xi - ei).abs() < 1e-10);
        }
    }

    #[test]
    fn log_det_matches_product_of_eigenvalues() {
        let a = spd();
        let e = symmetric_eigen(&a).unwrap();
        let expected: f64 = e.values.iter().map(|v| v.ln()).sum();
        assert!((log_det_spd(&a).unwrap() - expected).abs() < 1e-10);
    }
}
