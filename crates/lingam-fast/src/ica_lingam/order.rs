//! Causal order from an estimated `B = I - W`.

use lingam_core::models::CausalOrder;

use crate::linalg::Matrix;

/// Zero the smallest entries of `b` until it can be permuted to strictly
/// lower triangular form, and return that permutation.
///
/// Starts by zeroing the `p(p+1)/2` smallest entries (the count a strictly
/// lower triangular matrix must have) and then one more at a time. Ties in
/// magnitude are broken by row-major position.
pub(crate) fn order_from_b(b: &Matrix) -> Option<CausalOrder> {
    let p = b.rows();
    let mut m = b.clone();

    let mut positions: Vec<(usize, usize)> =
        (0..p).flat_map(|i| (0..p).map(move |j| (i, j))).collect();
    positions.sort_by(|&(i1, j1), &(i2, j2)| b[(i1, j1)].abs().total_cmp(&b[(i2, j2)].abs()));

    let initial = (p * (p + 1) / 2).min(positions.len());
    for &(i, j) in &positions[..initial] {
        m[(i, j)] = 0.0;
    }
    for &(i, j) in &positions[initial..] {
        if let Some(order) = permute_to_lower_triangular(&m) {
            return Some(order);
        }
        m[(i, j)] = 0.0;
    }
    permute_to_lower_triangular(&m)
}

/// Repeatedly take the first remaining row whose remaining entries are all
/// zero. Fails if at some point no such row exists.
fn permute_to_lower_triangular(m: &Matrix) -> Option<CausalOrder> {
    let p = m.rows();
    let mut remaining: Vec<usize> = (0..p).collect();
    let mut order = Vec::with_capacity(p);
    while !remaining.is_empty() {
        let pos = remaining
            .iter()
            .position(|&i| remaining.iter().all(|&j| m[(i, j)] == 0.0))?;
        order.push(remaining.remove(pos));
    }
    CausalOrder::new(order).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn permutes_lower_triangular_after_pruning_noise() {
        // True structure 2 -> 0 -> 1 with small spurious entries.
        let b = Matrix::from_rows(&[
            vec![0.01, 0.02, 0.9],
            vec![1.2, 0.03, 0.05],
            vec![0.04, 0.015, 0.02],
        ])
        .unwrap();
        let order = order_from_b(&b).unwrap();
        assert_eq!(order.as_slice(), &[2, 0, 1]);
    }

    #[test]
    fn keeps_zeroing_until_acyclic() {
        // A 2-cycle between 0 and 1; the weaker direction is removed.
        let b = Matrix::from_rows(&[vec![0.0, 0.3], vec![0.8, 0.0]]).unwrap();
        let order = order_from_b(&b).unwrap();
        assert_eq!(order.as_slice(), &[0, 1]);
    }

    #[test]
    fn single_variable() {
        let b = Matrix::from_rows(&[vec![0.4]]).unwrap();
        assert_eq!(order_from_b(&b).unwrap().as_slice(), &[0]);
    }
}
