//! # lingam-fast
//!
//! Linear Non-Gaussian Acyclic Model estimation.
//!
//! * [`DirectLingam`] orders variables by repeatedly extracting the most
//!   exogenous one; [`IcaLingam`] reads the order from a FastICA unmixing
//!   matrix.
//! * Coefficients are estimated along the order by OLS or adaptive lasso
//!   ([`regression`]).
//! * [`bootstrap()`] measures edge stability, [`effects`] computes total
//!   effects and residual independence p-values, and [`graph`] turns a
//!   model into a petgraph `DiGraph` with DOT output.

pub mod bootstrap;
pub mod direct;
pub mod effects;
pub mod estimator;
pub mod graph;
pub mod ica;
pub mod ica_lingam;
pub mod linalg;
pub mod regression;
pub mod stats;
pub mod synthetic;

pub use bootstrap::{bootstrap, BootstrapOptions, BootstrapResult};
pub use direct::DirectLingam;
pub use effects::{error_independence_p_values, estimate_total_effect, total_effect_matrix};
pub use estimator::build_estimator;
pub use graph::{CausalGraph, CausalPath};
pub use ica_lingam::IcaLingam;
pub use regression::{estimate_adjacency, RegressionOptions};
pub use synthetic::{random_dag, simulate_linear_sem, Noise};
