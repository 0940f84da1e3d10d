//! Trait seams between the data model and the estimators.

use crate::errors::EstimationError;
use crate::models::{DataMatrix, LingamModel, Method};

/// A causal discovery estimator that fits a LiNGAM model to data.
///
/// Implementations must be `Send + Sync` so bootstrap can fit resamples on
/// a rayon pool with a shared estimator.
pub trait CausalDiscovery: Send + Sync {
    /// Which method this estimator implements.
    fn method(&self) -> Method;

    /// Fit the model to `data`.
    fn fit(&self, data: &DataMatrix) -> Result<LingamModel, EstimationError>;
}
