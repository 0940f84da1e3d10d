//! Minimum-cost assignment (Hungarian algorithm with potentials, O(n^3)).

use lingam_core::errors::EstimationError;

use super::Matrix;

/// Solve the linear sum assignment problem on a square cost matrix.
///
/// Returns `col_for_row`: row `i` is assigned column `col_for_row[i]` and
/// the total cost is minimal. Costs must be finite.
pub fn linear_sum_assignment(cost: &Matrix) -> Result<Vec<usize>, EstimationError> {
    if !cost.is_square() {
        return Err(EstimationError::DimensionMismatch {
            expected: cost.rows(),
            actual: cost.cols(),
        });
    }
    let n = cost.rows();
    if n == 0 {
        return Ok(Vec::new());
    }

    // 1-based arrays; index 0 is the virtual start column.
    let mut u = vec![0.0f64; n + 1];
    let mut v = vec![0.0f64; n + 1];
    let mut row_of_col = vec![0usize; n + 1];
    let mut way = vec![0usize; n + 1];

    for i in 1..=n {
        row_of_col[0] = i;
        let mut j0 = 0usize;
        let mut min_v = vec![f64::INFINITY; n + 1];
        let mut used = vec![false; n + 1];
        loop {
            used[j0] = true;
            let i0 = row_of_col[j0];
            let mut delta = f64::INFINITY;
            let mut j1 = 0usize;
            for j in 1..=n {
                if used[j] {
                    continue;
                }
                let cur = cost[(i0 - 1, j - 1)] - u[i0] - v[j];
                if cur < min_v[j] {
                    min_v[j] = cur;
                    way[j] = j0;
                }
                if min_v[j] < delta {
                    delta = min_v[j];
                    j1 = j;
                }
            }
            if j1 == 0 {
                return Err(EstimationError::OrderSearchFailed {
                    reason: "assignment cost matrix contains non-finite values".to_string(),
                });
            }
            for j in 0..=n {
                if used[j] {
                    u[row_of_col[j]] += delta;
                    v[j] -= delta;
                } else {
                    min_v[j] -= delta;
                }
            }
            j0 = j1;
            if row_of_col[j0] == 0 {
                break;
            }
        }
        loop {
            let j1 = way[j0];
            row_of_col[j0] = row_of_col[j1];
            j0 = j1;
            if j0 == 0 {
                break;
            }
        }
    }

    let mut col_for_row = vec![0usize; n];
    for j in 1..=n {
        col_for_row[row_of_col[j] - 1] = j - 1;
    }
    Ok(col_for_row)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn total(cost: &Matrix, assignment: &[usize]) -> f64 {
        assignment
            .iter()
            .enumerate()
            .map(|(i, &j)| cost[(i, j)])
            .sum()
    }

    #[test]
    fn classic_example() {
        let cost = Matrix::from_rows(&[
            vec![4.0, 1.0, 3.0],
            vec![2.0, 0.0, 5.0],
            vec![3.0, 2.0, 2.0],
        ])
        .unwrap();
        let a = linear_sum_assignment(&cost).unwrap();
        assert_eq!(a, vec![1, 0, 2]);
        assert_eq!(total(&cost, &a), 5.0);
    }

    #[test]
    fn matches_brute_force_on_4x4() {
        let cost = Matrix::from_rows(&[
            vec![9.0, 2.0, 7.0, 8.0],
            vec![6.0, 4.0, 3.0, 7.0],
            vec![5.0, 8.0, 1.0, 8.0],
            vec![7.0, 6.0, 9.0, 4.0],
        ])
        .unwrap();
        let a = linear_sum_assignment(&cost).unwrap();

        let mut best = f64::INFINITY;
        let mut perm = vec![0, 1, 2, 3];
        permute(&mut perm, 0, &mut |p| best = best.min(total(&cost, p)));
        assert_eq!(total(&cost, &a), best);
    }

    fn permute(items: &mut Vec<usize>, k: usize, f: &mut dyn FnMut(&[usize])) {
        if k == items.len() {
            f(items);
            return;
        }
        for i in k..items.len() {
            items.swap(k, i);
            permute(items, k + 1, f);
            items.swap(k, i);
        }
    }
}
