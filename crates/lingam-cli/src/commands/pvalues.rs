//! `lingam pvalues`

use serde::Serialize;

use lingam_core::config::LingamConfig;
use lingam_fast::error_independence_p_values;

use super::prepare;
use crate::cli::{PvaluesArgs, ReportFormat};
use crate::output::{emit, format_matrix, to_json};

#[derive(Debug, Serialize)]
struct PvalueReport<'a> {
    method: &'static str,
    variables: &'a [String],
    /// Symmetric; the diagonal is `null`.
    p_values: Vec<Vec<f64>>,
}

pub fn run(args: &PvaluesArgs, config: &LingamConfig) -> anyhow::Result<()> {
    let (data, estimator) = prepare(&args.input, &args.model, config)?;
    let model = estimator.fit(&data)?;
    let p_values = error_independence_p_values(&data, &model)?;

    let rendered = match args.format {
        ReportFormat::Json => to_json(&PvalueReport {
            method: model.method.as_str(),
            variables: data.names(),
            p_values,
        })?,
        ReportFormat::Text => {
            let mut out = String::from("HSIC p-values between residuals:\n");
            out.push_str(&format_matrix(data.names(), &p_values));
            out
        }
    };
    emit(args.output.as_deref(), &rendered)
}
