//! Sample moments with population (1/n) normalization.

pub fn mean(x: &[f64]) -> f64 {
    if x.is_empty() {
        return 0.0;
    }
    x.iter().sum::<f64>() / x.len() as f64
}

pub fn variance(x: &[f64]) -> f64 {
    if x.is_empty() {
        return 0.0;
    }
    let m = mean(x);
    x.iter().map(|v| (v - m) * (v - m)).sum::<f64>() / x.len() as f64
}

pub fn std_dev(x: &[f64]) -> f64 {
    variance(x).sqrt()
}

pub fn covariance(x: &[f64], y: &[f64]) -> f64 {
    let n = x.len().min(y.len());
    if n == 0 {
        return 0.0;
    }
    let mx = mean(&x[..n]);
    let my = mean(&y[..n]);
    x.iter()
        .zip(y)
        .map(|(a, b)| (a - mx) * (b - my))
        .sum::<f64>()
        / n as f64
}

/// Zero mean, unit variance. `None` for a constant input.
pub fn standardize(x: &[f64]) -> Option<Vec<f64>> {
    let m = mean(x);
    let s = std_dev(x);
    if s <= f64::EPSILON * m.abs().max(1.0) || !s.is_finite() {
        return None;
    }
    Some(x.iter().map(|v| (v - m) / s).collect())
}

/// Residual of `xi` after least-squares regression on `xj`:
/// `xi - cov(xi, xj) / var(xj) * xj`.
///
/// A constant `xj` explains nothing, so `xi` is returned unchanged.
pub fn residual(xi: &[f64], xj: &[f64]) -> Vec<f64> {
    let var_j = variance(xj);
    if var_j <= f64::MIN_POSITIVE {
        return xi.to_vec();
    }
    let beta = covariance(xi, xj) / var_j;
    xi.iter().zip(xj).map(|(a, b)| a - beta * b).collect()
}
