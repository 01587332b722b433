//! Core-to-core latency matrices: header-less CSV, one row per core, holding one triangle of the
//! symmetric latency matrix in nanoseconds.

use crate::{
    crosstab::CrossTab,
    scan::{files_with_suffix, read_to_string, stem},
    table::parse_cell,
    wrapper::Named,
    Error, Result,
};
use csv::ReaderBuilder;
use std::path::Path;

//=================
// CoreMatrix

/// Square matrix indexed by core id, row-major, with optional cells.
#[derive(Debug, Clone, PartialEq)]
pub struct CoreMatrix {
    n: usize,
    cells: Vec<Option<f64>>,
}

impl CoreMatrix {
    /// Builds a square matrix from possibly ragged rows. The size is the larger of the row count and
    /// the longest row; absent cells are missing.
    pub fn from_rows(rows: Vec<Vec<Option<f64>>>) -> Self {
        let n = rows.iter().map(Vec::len).max().unwrap_or(0).max(rows.len());
        let mut cells = vec![None; n * n];
        for (i, row) in rows.into_iter().enumerate() {
            for (j, v) in row.into_iter().enumerate() {
                cells[i * n + j] = v;
            }
        }
        Self { n, cells }
    }

    /// Number of cores.
    pub fn size(&self) -> usize {
        self.n
    }

    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row >= self.n || col >= self.n {
            return None;
        }
        self.cells[row * self.n + col]
    }

    /// Fills every missing `(i, j)` cell from `(j, i)`.
    pub fn symmetrize(mut self) -> Self {
        let n = self.n;
        for i in 0..n {
            for j in 0..n {
                if self.cells[i * n + j].is_none() {
                    self.cells[i * n + j] = self.cells[j * n + i];
                }
            }
        }
        self
    }

    /// Element-wise mean of two matrices of the same size; a cell missing on either side stays missing.
    pub fn merge(&self, other: &CoreMatrix) -> Result<Self> {
        if self.n != other.n {
            return Err(Error::ShapeMismatch {
                left: (self.n, self.n),
                right: (other.n, other.n),
            });
        }
        let cells = self
            .cells
            .iter()
            .zip(&other.cells)
            .map(|(a, b)| Some((a.as_ref()? + b.as_ref()?) / 2.0))
            .collect();
        Ok(Self { n: self.n, cells })
    }

    /// Renumbers cores from Linux SMT ordering (all first hardware threads, then all siblings) to
    /// sibling-adjacent ordering, permuting rows and columns alike.
    pub fn reorder(&self) -> Self {
        let mapping = smt_sibling_mapping(self.n);
        let n = self.n;
        let mut cells = vec![None; n * n];
        for i in 0..n {
            for j in 0..n {
                cells[mapping[i] * n + mapping[j]] = self.cells[i * n + j];
            }
        }
        Self { n, cells }
    }

    /// Heatmap view with core ids as row and column labels.
    pub fn to_crosstab(&self) -> CrossTab {
        let labels = (0..self.n).map(|i| i.to_string()).collect();
        CrossTab::square(labels, |i, j| self.get(i, j))
    }
}

/// New id of each core when moving from Linux SMT numbering to sibling-adjacent numbering:
/// with `p = n / 2`, core `c < p` becomes `2c` and core `p + c` becomes `2c + 1`. A leftover core
/// of an odd count keeps its id.
pub fn smt_sibling_mapping(n: usize) -> Vec<usize> {
    let p = n / 2;
    (0..n)
        .map(|core| match core {
            c if c < p => 2 * c,
            c if c < 2 * p => 2 * (c - p) + 1,
            c => c,
        })
        .collect()
}

//=================
// C2cRun

/// One core-to-core latency measurement of a node.
#[derive(Debug, Clone, PartialEq)]
pub struct C2cRun {
    pub name: String,
    pub arch: String,
    pub matrix: CoreMatrix,
}

impl C2cRun {
    pub fn new(name: impl Into<String>, matrix: CoreMatrix) -> Self {
        Self {
            name: name.into(),
            arch: String::new(),
            matrix,
        }
    }

    pub fn set_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn set_arch(mut self, arch: impl Into<String>) -> Self {
        self.arch = arch.into();
        self
    }

    /// Averages this run with a repeated measurement of the same node.
    pub fn merge(mut self, other: &C2cRun) -> Result<Self> {
        self.matrix = self.matrix.merge(&other.matrix)?;
        Ok(self)
    }

    /// See [`CoreMatrix::reorder`].
    pub fn reorder(mut self) -> Self {
        self.matrix = self.matrix.reorder();
        self
    }
}

//=================
// Loading

/// Parses one matrix file and symmetrizes it.
pub fn parse(path: &Path, text: &str) -> Result<CoreMatrix> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|source| Error::Csv {
            path: path.to_owned(),
            source,
        })?;
        let row = record
            .iter()
            .map(|f| {
                parse_cell(f)
                    .map_err(|_| Error::format(path, format!("`{f}` is not a latency value")))
            })
            .collect::<Result<Vec<_>>>()?;
        rows.push(row);
    }

    let matrix = CoreMatrix::from_rows(rows).symmetrize();
    log::debug!("{}: {} cores", path.display(), matrix.size());
    Ok(matrix)
}

/// Loads every `.csv` matrix in `dir`, keyed by file stem.
pub fn load_runs(dir: &Path) -> Result<Named<C2cRun>> {
    let mut runs = Named::default();
    for file in files_with_suffix(dir, "csv")? {
        let name = stem(&file);
        let matrix = parse(&file, &read_to_string(&file)?)?;
        runs.insert(name.clone(), C2cRun::new(name, matrix));
    }
    Ok(runs)
}
