//! Observational data table, stored by column.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::MIN_SAMPLES;
use crate::errors::DataError;

/// Options for reading delimited text.
#[derive(Debug, Clone)]
pub struct CsvOptions {
    pub delimiter: char,
    /// First non-blank line holds variable names.
    pub has_header: bool,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            delimiter: ',',
            has_header: true,
        }
    }
}

/// `n_samples x n_variables` numeric table.
///
/// Columns are stored contiguously since every estimator works one
/// variable at a time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawDataMatrix")]
pub struct DataMatrix {
    names: Vec<String>,
    columns: Vec<Vec<f64>>,
    n_samples: usize,
}

#[derive(Deserialize)]
struct RawDataMatrix {
    names: Vec<String>,
    columns: Vec<Vec<f64>>,
    n_samples: usize,
}

impl TryFrom<RawDataMatrix> for DataMatrix {
    type Error = DataError;

    fn try_from(raw: RawDataMatrix) -> Result<Self, Self::Error> {
        let data = Self::from_columns(raw.columns)?;
        if data.n_samples != raw.n_samples {
            return Err(DataError::RaggedColumn {
                variable: 0,
                expected: raw.n_samples,
                actual: data.n_samples,
            });
        }
        data.with_names(raw.names)
    }
}

impl DataMatrix {
    /// Build from sample rows. Every row must have the same length.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, DataError> {
        if rows.is_empty() {
            return Err(DataError::TooFewSamples {
                min: MIN_SAMPLES,
                actual: 0,
            });
        }
        let n_variables = rows.first().map(Vec::len).unwrap_or(0);
        if n_variables == 0 {
            return Err(DataError::NoVariables);
        }
        let mut columns = vec![Vec::with_capacity(rows.len()); n_variables];
        for (r, row) in rows.iter().enumerate() {
            if row.len() != n_variables {
                return Err(DataError::RaggedRow {
                    row: r,
                    expected: n_variables,
                    actual: row.len(),
                });
            }
            for (c, &value) in row.iter().enumerate() {
                columns[c].push(value);
            }
        }
        Self::from_columns(columns)
    }

    /// Build from variable columns. Every column must have the same length.
    pub fn from_columns(columns: Vec<Vec<f64>>) -> Result<Self, DataError> {
        if columns.is_empty() {
            return Err(DataError::NoVariables);
        }
        let n_samples = columns[0].len();
        for (c, column) in columns.iter().enumerate() {
            if column.len() != n_samples {
                return Err(DataError::RaggedColumn {
                    variable: c,
                    expected: n_samples,
                    actual: column.len(),
                });
            }
            if let Some(sample) = column.iter().position(|v| !v.is_finite()) {
                return Err(DataError::NonFinite {
                    sample,
                    variable: c,
                });
            }
        }
        if n_samples < MIN_SAMPLES {
            return Err(DataError::TooFewSamples {
                min: MIN_SAMPLES,
                actual: n_samples,
            });
        }
        let names = (0..columns.len()).map(|i| format!("x{i}")).collect();
        Ok(Self {
            names,
            columns,
            n_samples,
        })
    }

    /// Replace the default `x0..` names.
    pub fn with_names(mut self, names: Vec<String>) -> Result<Self, DataError> {
        if names.len() != self.columns.len() {
            return Err(DataError::InvalidNames {
                reason: format!(
                    "{} names given for {} variables",
                    names.len(),
                    self.columns.len()
                ),
            });
        }
        let mut seen = HashSet::new();
        for name in &names {
            if name.is_empty() {
                return Err(DataError::InvalidNames {
                    reason: "empty variable name".to_string(),
                });
            }
            if !seen.insert(name.as_str()) {
                return Err(DataError::InvalidNames {
                    reason: format!("duplicate variable name {name:?}"),
                });
            }
        }
        self.names = names;
        Ok(self)
    }

    /// Parse delimited text. Blank lines are skipped and cells are trimmed.
    pub fn from_csv_str(text: &str, options: &CsvOptions) -> Result<Self, DataError> {
        let mut names: Option<Vec<String>> = None;
        let mut rows = Vec::new();

        for (idx, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let cells = line.split(options.delimiter).map(str::trim);
            if options.has_header && names.is_none() {
                names = Some(cells.map(|c| c.trim_matches('"').to_string()).collect());
                continue;
            }
            let row = cells
                .enumerate()
                .map(|(col, cell)| {
                    cell.parse::<f64>().map_err(|_| DataError::Parse {
                        line: idx + 1,
                        column: col + 1,
                        value: cell.to_string(),
                    })
                })
                .collect::<Result<Vec<f64>, DataError>>()?;
            rows.push(row);
        }

        let data = Self::from_rows(rows)?;
        match names {
            Some(names) => data.with_names(names),
            None => Ok(data),
        }
    }

    /// Read and parse a delimited file.
    pub fn from_csv_path(path: &Path, options: &CsvOptions) -> Result<Self, DataError> {
        let text = std::fs::read_to_string(path).map_err(|e| DataError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_csv_str(&text, options)
    }

    /// Render as CSV with a header row.
    pub fn to_csv_string(&self, delimiter: char) -> String {
        let sep = delimiter.to_string();
        let mut out = self.names.join(&sep);
        out.push('\n');
        for r in 0..self.n_samples {
            let row: Vec<String> = self.columns.iter().map(|c| c[r].to_string()).collect();
            out.push_str(&row.join(&sep));
            out.push('\n');
        }
        out
    }

    pub fn n_samples(&self) -> usize {
        self.n_samples
    }

    pub fn n_variables(&self) -> usize {
        self.columns.len()
    }

    /// Column of variable `j`. Panics when `j` is out of range, like slice indexing.
    pub fn column(&self, j: usize) -> &[f64] {
        &self.columns[j]
    }

    pub fn columns(&self) -> &[Vec<f64>] {
        &self.columns
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn name(&self, j: usize) -> &str {
        &self.names[j]
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    /// One sample as a row vector.
    pub fn row(&self, r: usize) -> Vec<f64> {
        self.columns.iter().map(|c| c[r]).collect()
    }

    /// Select rows by index (with repetition), keeping names.
    ///
    /// Used for bootstrap resampling, so fewer than `MIN_SAMPLES` indices is
    /// rejected the same way as any other construction.
    pub fn resample(&self, indices: &[usize]) -> Result<Self, DataError> {
        let columns = self
            .columns
            .iter()
            .map(|c| indices.iter().map(|&i| c[i]).collect())
            .collect();
        let mut out = Self::from_columns(columns)?;
        out.names = self.names.clone();
        Ok(out)
    }

    /// Names of variables whose values never change.
    pub fn constant_columns(&self) -> Vec<&str> {
        self.columns
            .iter()
            .zip(&self.names)
            .filter(|(c, _)| c.iter().all(|&v| v == c[0]))
            .map(|(_, n)| n.as_str())
            .collect()
    }

    /// Every column shifted to zero mean and scaled to unit population std.
    pub fn standardized(&self) -> Result<Self, DataError> {
        let n = self.n_samples as f64;
        let mut columns = Vec::with_capacity(self.columns.len());
        for (column, name) in self.columns.iter().zip(&self.names) {
            let mean = column.iter().sum::<f64>() / n;
            let var = column.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
            let std = var.sqrt();
            if std <= f64::EPSILON * mean.abs().max(1.0) {
                return Err(DataError::ConstantColumn { name: name.clone() });
            }
            columns.push(column.iter().map(|v| (v - mean) / std).collect());
        }
        Ok(Self {
            names: self.names.clone(),
            columns,
            n_samples: self.n_samples,
        })
    }

    /// Fail with `ConstantColumn` if any variable has no variation.
    pub fn ensure_no_constant_columns(&self) -> Result<(), DataError> {
        match self.constant_columns().first() {
            Some(name) => Err(DataError::ConstantColumn {
                name: name.to_string(),
            }),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_and_columns_agree() {
        let a = DataMatrix::from_rows(vec![
            vec![1.0, 2.0],
            vec![3.0, 4.0],
            vec![5.0, 6.0],
        ])
        .unwrap();
        let b = DataMatrix::from_columns(vec![vec![1.0, 3.0, 5.0], vec![2.0, 4.0, 6.0]]).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.row(1), vec![3.0, 4.0]);
    }

    #[test]
    fn standardized_has_unit_variance() {
        let d = DataMatrix::from_columns(vec![vec![1.0, 2.0, 3.0, 4.0]]).unwrap();
        let s = d.standardized().unwrap();
        let col = s.column(0);
        let mean = col.iter().sum::<f64>() / 4.0;
        let var = col.iter().map(|v| v * v).sum::<f64>() / 4.0;
        assert!(mean.abs() < 1e-12);
        assert!((var - 1.0).abs() < 1e-12);
    }

    #[test]
    fn constant_column_detected() {
        let d = DataMatrix::from_columns(vec![vec![1.0, 2.0, 3.0], vec![7.0; 3]]).unwrap();
        assert_eq!(d.constant_columns(), vec!["x1"]);
        assert!(matches!(
            d.standardized(),
            Err(DataError::ConstantColumn { .. })
        ));
    }

    #[test]
    fn resample_repeats_rows() {
        let d = DataMatrix::from_columns(vec![vec![1.0, 2.0, 3.0]]).unwrap();
        let r = d.resample(&[2, 2, 0]).unwrap();
        assert_eq!(r.column(0), &[3.0, 3.0, 1.0]);
    }
}
