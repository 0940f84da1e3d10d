//! Prior knowledge about which directed paths may exist.
//!
//! Cell `[i][j]` states whether a directed path `j -> i` exists, matching the
//! row-is-target layout of `AdjacencyMatrix`. Numeric encoding: `-1` unknown,
//! `0` no path, `1` path.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::errors::DataError;

/// Knowledge about a single ordered pair of variables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Knowledge {
    Unknown,
    NoPath,
    Path,
}

impl Knowledge {
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            -1 => Some(Self::Unknown),
            0 => Some(Self::NoPath),
            1 => Some(Self::Path),
            _ => None,
        }
    }

    pub fn code(&self) -> i8 {
        match self {
            Self::Unknown => -1,
            Self::NoPath => 0,
            Self::Path => 1,
        }
    }
}

/// Square prior knowledge matrix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawPriorKnowledge")]
pub struct PriorKnowledge {
    n: usize,
    cells: Vec<Knowledge>,
}

#[derive(Deserialize)]
struct RawPriorKnowledge {
    n: usize,
    cells: Vec<Knowledge>,
}

impl TryFrom<RawPriorKnowledge> for PriorKnowledge {
    type Error = DataError;

    fn try_from(raw: RawPriorKnowledge) -> Result<Self, Self::Error> {
        if raw.n.checked_mul(raw.n) != Some(raw.cells.len()) {
            return Err(DataError::PriorKnowledgeShape {
                expected: raw.n,
                rows: raw.cells.len().checked_div(raw.n).unwrap_or(0),
                cols: raw.n,
            });
        }
        Ok(Self {
            n: raw.n,
            cells: raw.cells,
        })
    }
}

impl PriorKnowledge {
    /// All pairs unknown.
    pub fn unknown(n: usize) -> Self {
        Self {
            n,
            cells: vec![Knowledge::Unknown; n * n],
        }
    }

    pub fn builder(n: usize) -> PriorKnowledgeBuilder {
        PriorKnowledgeBuilder {
            n,
            exogenous: Vec::new(),
            sinks: Vec::new(),
            paths: Vec::new(),
            no_paths: Vec::new(),
        }
    }

    /// Build from the numeric `-1/0/1` form.
    pub fn from_numeric(rows: &[Vec<i64>]) -> Result<Self, DataError> {
        let n = rows.len();
        let mut cells = Vec::with_capacity(n * n);
        for (i, row) in rows.iter().enumerate() {
            if row.len() != n {
                return Err(DataError::PriorKnowledgeShape {
                    expected: n,
                    rows: n,
                    cols: row.len(),
                });
            }
            for (j, &value) in row.iter().enumerate() {
                let k = Knowledge::from_code(value).ok_or(DataError::PriorKnowledgeValue {
                    row: i,
                    col: j,
                    value,
                })?;
                cells.push(k);
            }
        }
        Ok(Self { n, cells })
    }

    /// Parse the numeric form from delimited text without a header.
    pub fn from_csv_str(text: &str, delimiter: char) -> Result<Self, DataError> {
        let mut rows = Vec::new();
        for (idx, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let row = line
                .split(delimiter)
                .map(str::trim)
                .enumerate()
                .map(|(col, cell)| {
                    cell.parse::<i64>().map_err(|_| DataError::Parse {
                        line: idx + 1,
                        column: col + 1,
                        value: cell.to_string(),
                    })
                })
                .collect::<Result<Vec<i64>, DataError>>()?;
            rows.push(row);
        }
        Self::from_numeric(&rows)
    }

    pub fn n_variables(&self) -> usize {
        self.n
    }

    /// Knowledge about a path `from -> to`.
    pub fn get(&self, to: usize, from: usize) -> Knowledge {
        self.cells[to * self.n + from]
    }

    pub fn set(&mut self, to: usize, from: usize, knowledge: Knowledge) {
        self.cells[to * self.n + from] = knowledge;
    }

    /// Numeric `-1/0/1` rows.
    pub fn to_numeric(&self) -> Vec<Vec<i8>> {
        self.cells
            .chunks(self.n.max(1))
            .take(self.n)
            .map(|row| row.iter().map(Knowledge::code).collect())
            .collect()
    }

    /// Check that this prior matches a dataset with `n` variables.
    pub fn ensure_dimension(&self, n: usize) -> Result<(), DataError> {
        if self.n != n {
            return Err(DataError::PriorKnowledgeShape {
                expected: n,
                rows: self.n,
                cols: self.n,
            });
        }
        Ok(())
    }

    /// Ordering constraints `(from, to)`: `from` must precede `to`.
    ///
    /// Every `Path` gives one constraint. A `NoPath` `j -> i` orders `i` before
    /// `j` unless `i -> j` is also `NoPath`, in which case the pair is left
    /// unordered. Paths declared in both directions are rejected.
    pub fn partial_orders(&self) -> Result<Vec<(usize, usize)>, DataError> {
        let n = self.n;
        let mut conflicts = Vec::new();
        let mut orders = BTreeSet::new();

        for to in 0..n {
            for from in 0..n {
                if to == from {
                    continue;
                }
                match self.get(to, from) {
                    Knowledge::Path => {
                        if self.get(from, to) == Knowledge::Path && from < to {
                            conflicts.push(format!("[{to}, {from}]"));
                        }
                        orders.insert((from, to));
                    }
                    Knowledge::NoPath => {
                        if self.get(from, to) != Knowledge::NoPath {
                            orders.insert((to, from));
                        }
                    }
                    Knowledge::Unknown => {}
                }
            }
        }

        if !conflicts.is_empty() {
            return Err(DataError::InconsistentPriorKnowledge {
                pairs: conflicts.join(", "),
            });
        }
        Ok(orders.into_iter().collect())
    }
}

/// Incremental construction of `PriorKnowledge`.
///
/// Application order when built: no-paths, paths, sinks, exogenous, then the
/// diagonal reset to unknown. Later rules override earlier ones.
#[derive(Debug, Clone)]
pub struct PriorKnowledgeBuilder {
    n: usize,
    exogenous: Vec<usize>,
    sinks: Vec<usize>,
    paths: Vec<(usize, usize)>,
    no_paths: Vec<(usize, usize)>,
}

impl PriorKnowledgeBuilder {
    /// Variable with no incoming path.
    pub fn exogenous(mut self, var: usize) -> Self {
        self.exogenous.push(var);
        self
    }

    /// Variable with no outgoing path.
    pub fn sink(mut self, var: usize) -> Self {
        self.sinks.push(var);
        self
    }

    pub fn path(mut self, from: usize, to: usize) -> Self {
        self.paths.push((from, to));
        self
    }

    pub fn no_path(mut self, from: usize, to: usize) -> Self {
        self.no_paths.push((from, to));
        self
    }

    pub fn build(self) -> Result<PriorKnowledge, DataError> {
        let n = self.n;
        let check = |v: usize| {
            if v < n {
                Ok(())
            } else {
                Err(DataError::PriorKnowledgeShape {
                    expected: n,
                    rows: v + 1,
                    cols: v + 1,
                })
            }
        };

        let mut pk = PriorKnowledge::unknown(n);
        for &(from, to) in &self.no_paths {
            check(from)?;
            check(to)?;
            pk.set(to, from, Knowledge::NoPath);
        }
        for &(from, to) in &self.paths {
            check(from)?;
            check(to)?;
            pk.set(to, from, Knowledge::Path);
        }
        for &var in &self.sinks {
            check(var)?;
            for row in 0..n {
                pk.set(row, var, Knowledge::NoPath);
            }
        }
        for &var in &self.exogenous {
            check(var)?;
            for col in 0..n {
                pk.set(var, col, Knowledge::NoPath);
            }
        }
        for i in 0..n {
            pk.set(i, i, Knowledge::Unknown);
        }
        Ok(pk)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_exogenous_clears_row() {
        let pk = PriorKnowledge::builder(3).exogenous(0).build().unwrap();
        assert_eq!(pk.get(0, 1), Knowledge::NoPath);
        assert_eq!(pk.get(0, 2), Knowledge::NoPath);
        assert_eq!(pk.get(0, 0), Knowledge::Unknown);
        assert_eq!(pk.get(1, 0), Knowledge::Unknown);
    }

    #[test]
    fn builder_sink_overrides_path() {
        let pk = PriorKnowledge::builder(3)
            .path(2, 1)
            .sink(2)
            .build()
            .unwrap();
        assert_eq!(pk.get(1, 2), Knowledge::NoPath);
    }

    #[test]
    fn partial_orders_from_path() {
        let pk = PriorKnowledge::builder(3).path(2, 0).build().unwrap();
        assert_eq!(pk.partial_orders().unwrap(), vec![(2, 0)]);
    }

    #[test]
    fn mutual_no_path_is_unordered() {
        let pk = PriorKnowledge::builder(2)
            .no_path(0, 1)
            .no_path(1, 0)
            .build()
            .unwrap();
        assert!(pk.partial_orders().unwrap().is_empty());
    }

    #[test]
    fn contradictory_paths_rejected() {
        let pk = PriorKnowledge::builder(2)
            .path(0, 1)
            .path(1, 0)
            .build()
            .unwrap();
        assert!(matches!(
            pk.partial_orders(),
            Err(DataError::InconsistentPriorKnowledge { .. })
        ));
    }

    #[test]
    fn numeric_rejects_bad_values() {
        let err = PriorKnowledge::from_numeric(&[vec![-1, 2], vec![0, -1]]).unwrap_err();
        assert!(matches!(err, DataError::PriorKnowledgeValue { value: 2, .. }));
    }
}
