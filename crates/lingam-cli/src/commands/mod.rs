//! Subcommand implementations.

pub mod bootstrap;
pub mod fit;
pub mod pvalues;
pub mod simulate;

use std::fs;

use lingam_core::config::LingamConfig;
use lingam_core::errors::{DataError, GraphError};
use lingam_core::models::{CsvOptions, DataMatrix, PriorKnowledge};
use lingam_core::traits::CausalDiscovery;
use lingam_fast::build_estimator;

use crate::cli::{InputArgs, ModelArgs};

/// Read the input table.
pub fn read_data(input: &InputArgs) -> Result<DataMatrix, DataError> {
    let options = CsvOptions {
        delimiter: input.delimiter,
        has_header: !input.no_header,
    };
    DataMatrix::from_csv_path(&input.input, &options)
}

/// Read `--prior`, if given, and check it against the data width.
pub fn read_prior(
    model: &ModelArgs,
    delimiter: char,
    n_variables: usize,
) -> Result<Option<PriorKnowledge>, DataError> {
    let Some(path) = &model.prior else {
        return Ok(None);
    };
    let text = fs::read_to_string(path).map_err(|e| DataError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    let pk = PriorKnowledge::from_csv_str(&text, delimiter)?;
    pk.ensure_dimension(n_variables)?;
    Ok(Some(pk))
}

/// Data and the configured estimator for commands that fit a model.
pub fn prepare(
    input: &InputArgs,
    model: &ModelArgs,
    config: &LingamConfig,
) -> Result<(DataMatrix, Box<dyn CausalDiscovery>), DataError> {
    let data = read_data(input)?;
    let prior = read_prior(model, input.delimiter, data.n_variables())?;
    tracing::debug!(
        samples = data.n_samples(),
        variables = data.n_variables(),
        prior = prior.is_some(),
        "loaded input"
    );
    Ok((data, build_estimator(config, prior)))
}

/// Resolve a variable given by name, falling back to a column index.
pub fn resolve_variable(data: &DataMatrix, key: &str) -> Result<usize, GraphError> {
    data.index_of(key)
        .or_else(|| key.parse::<usize>().ok().filter(|&i| i < data.n_variables()))
        .ok_or_else(|| GraphError::UnknownVariable {
            name: key.to_string(),
        })
}
