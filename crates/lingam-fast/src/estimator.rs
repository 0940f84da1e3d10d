//! Estimator construction from configuration.

use lingam_core::config::LingamConfig;
use lingam_core::models::{Method, PriorKnowledge};
use lingam_core::traits::CausalDiscovery;

use crate::direct::DirectLingam;
use crate::ica::FastIcaOptions;
use crate::ica_lingam::IcaLingam;
use crate::regression::RegressionOptions;

/// Build the estimator selected by `config.discovery.method`.
///
/// ICA-LiNGAM does not use prior knowledge; passing some is logged and
/// otherwise ignored.
pub fn build_estimator(
    config: &LingamConfig,
    prior_knowledge: Option<PriorKnowledge>,
) -> Box<dyn CausalDiscovery> {
    let regression = RegressionOptions::from_config(&config.regression);
    match config.discovery.effective_method() {
        Method::Direct => {
            let mut est = DirectLingam::new()
                .with_measure(config.discovery.effective_measure())
                .with_soft_prior(config.discovery.effective_soft_prior())
                .with_regression(regression);
            if let Some(pk) = prior_knowledge {
                est = est.with_prior_knowledge(pk);
            }
            Box::new(est)
        }
        Method::Ica => {
            if prior_knowledge.is_some() {
                tracing::warn!("prior knowledge is ignored by ICA-LiNGAM");
            }
            Box::new(
                IcaLingam::new()
                    .with_ica_options(FastIcaOptions::from_config(&config.ica))
                    .with_regression(regression),
            )
        }
    }
}
