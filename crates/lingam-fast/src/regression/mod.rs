//! Coefficient estimation: given a causal order, regress each variable on
//! its predecessors to fill the adjacency matrix.

pub mod adjacency;
pub mod lasso;
pub mod ols;

pub use adjacency::{estimate_adjacency, RegressionOptions};
pub use lasso::{adaptive_lasso, lasso_bic};
pub use ols::ols;
