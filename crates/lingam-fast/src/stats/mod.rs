//! Statistics used by the order search and diagnostics.

pub mod entropy;
pub mod hsic;
pub mod kernel;
pub mod moments;

pub use entropy::{diff_mutual_info, entropy};
pub use hsic::{hsic_test_gamma, HsicResult};
pub use kernel::kernel_mutual_information;
pub use moments::{covariance, mean, residual, standardize, std_dev, variance};
