//! Dense linear algebra on small row-major matrices.
//!
//! Sizes here are `p x p` with `p` the number of variables, or `n x n` for
//! kernel Gram matrices, so straightforward O(n^3) routines are enough.

pub mod assignment;
pub mod decomposition;
pub mod matrix;

pub use assignment::linear_sum_assignment;
pub use decomposition::{cholesky, log_det_spd, solve_spd, symmetric_eigen, SymmetricEigen};
pub use matrix::Matrix;
