use crate::{wrapper::Named, Error, Result, Table};
use std::{fmt, path::PathBuf};

/// What a measurement's table holds, which decides how it is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeasurementKind {
    Latency,
    Bandwidth,
}

impl fmt::Display for MeasurementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Latency => f.write_str("latency"),
            Self::Bandwidth => f.write_str("bandwidth"),
        }
    }
}

/// One benchmark output file loaded as a table.
#[derive(Debug, Clone, PartialEq)]
pub struct Measurement {
    pub name: String,
    pub source: PathBuf,
    pub kind: MeasurementKind,
    /// MPI implementation the benchmark ran on, when known.
    pub mpi_type: Option<String>,
    pub table: Table,
}

/// Measurements loaded from one directory, keyed by measurement name.
pub type Measurements = Named<Measurement>;

impl Measurement {
    pub fn new(name: impl Into<String>, source: PathBuf, kind: MeasurementKind, table: Table) -> Self {
        Self {
            name: name.into(),
            source,
            kind,
            mpi_type: None,
            table,
        }
    }

    pub fn with_mpi_type(mut self, mpi_type: impl Into<String>) -> Self {
        self.mpi_type = Some(mpi_type.into());
        self
    }

    /// Keeps only the rows whose size lies in `[from, to]`.
    pub fn x_filter(mut self, from: f64, to: f64) -> Self {
        self.table = self.table.filter_index(from, to);
        self
    }

    /// Cell at size `at` in `column`, or [`Error::MissingValue`].
    pub fn value_at(&self, at: f64, column: &str) -> Result<f64> {
        self.table
            .value(at, column)
            .ok_or_else(|| Error::MissingValue {
                name: self.name.clone(),
                column: column.to_owned(),
                index: at,
            })
    }

    /// Name of the first data column, which single-metric tools use for their result.
    pub fn first_column(&self) -> Result<&str> {
        self.table
            .first_column()
            .ok_or_else(|| Error::EmptyData(format!("`{}` has no data columns", self.name)))
    }
}
