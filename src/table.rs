//! Numeric tables indexed by a size/region key, and the text-to-table plumbing shared by the
//! benchmark log loaders.

use crate::{Error, Result};
use csv::{ReaderBuilder, StringRecord};
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;

static RE_BLANKS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[ \t]+").expect("valid regex"));

//=================
// Table

/// Numeric table: an ordered `f64` index and named columns of optional cells.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    index_name: String,
    columns: Vec<String>,
    index: Vec<f64>,
    rows: Vec<Vec<Option<f64>>>,
}

impl Table {
    pub fn new(index_name: impl Into<String>, columns: Vec<String>) -> Self {
        Self {
            index_name: index_name.into(),
            columns,
            index: Vec::new(),
            rows: Vec::new(),
        }
    }

    /// Appends a row; `cells` is padded with missing values or truncated to the column count.
    pub fn push_row(&mut self, key: f64, mut cells: Vec<Option<f64>>) {
        cells.resize(self.columns.len(), None);
        self.index.push(key);
        self.rows.push(cells);
    }

    pub fn index_name(&self) -> &str {
        &self.index_name
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn first_column(&self) -> Option<&str> {
        self.columns.first().map(String::as_str)
    }

    pub fn index(&self) -> &[f64] {
        &self.index
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_position(name).is_some()
    }

    fn column_position(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// All cells of column `name`, in index order.
    pub fn column(&self, name: &str) -> Result<Vec<Option<f64>>> {
        let pos = self
            .column_position(name)
            .ok_or_else(|| Error::MissingColumn(name.to_owned()))?;
        Ok(self.rows.iter().map(|r| r[pos]).collect())
    }

    /// `(index, value)` pairs of column `name`, skipping missing cells.
    pub fn series(&self, name: &str) -> Result<Vec<(f64, f64)>> {
        Ok(self
            .index
            .iter()
            .zip(self.column(name)?)
            .filter_map(|(&k, v)| v.map(|v| (k, v)))
            .collect())
    }

    /// Cell at index key `key` in column `name`, if both exist and the cell is present.
    pub fn value(&self, key: f64, name: &str) -> Option<f64> {
        let pos = self.column_position(name)?;
        let row = self.index.iter().position(|&k| k == key)?;
        self.rows[row][pos]
    }

    /// Rows whose index lies in the inclusive range `[from, to]`.
    pub fn filter_index(&self, from: f64, to: f64) -> Table {
        let mut out = Table::new(self.index_name.clone(), self.columns.clone());
        for (k, row) in self.index.iter().zip(&self.rows) {
            if (from..=to).contains(k) {
                out.push_row(*k, row.clone());
            }
        }
        out
    }

    /// Left-joins `other`'s column `column` onto `self` under the name `renamed`, matching rows by
    /// index key. Rows with no counterpart in `other` get a missing cell.
    pub fn join_column(&mut self, other: &Table, column: &str, renamed: &str) -> Result<()> {
        let pos = other
            .column_position(column)
            .ok_or_else(|| Error::MissingColumn(column.to_owned()))?;
        for (k, row) in self.index.iter().zip(self.rows.iter_mut()) {
            let cell = other
                .index
                .iter()
                .position(|ok| ok == k)
                .and_then(|i| other.rows[i][pos]);
            row.push(cell);
        }
        self.columns.push(renamed.to_owned());
        Ok(())
    }

    /// Smallest and largest index keys.
    pub fn index_range(&self) -> Option<(f64, f64)> {
        let lo = self.index.iter().copied().reduce(f64::min)?;
        let hi = self.index.iter().copied().reduce(f64::max)?;
        Some((lo, hi))
    }
}

//=================
// Text plumbing

/// Re-delimits whitespace-separated text: leading blanks are stripped, every run of blanks
/// becomes `delimiter` and blank lines are dropped.
pub fn redelimit(text: &str, delimiter: char) -> String {
    let mut out = String::with_capacity(text.len());
    let mut buf = [0u8; 4];
    let delimiter = delimiter.encode_utf8(&mut buf);
    for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
        out.push_str(&RE_BLANKS.replace_all(line, &*delimiter));
        out.push('\n');
    }
    out
}

/// Parses a numeric cell. Empty and `NaN` cells are missing.
pub(crate) fn parse_cell(raw: &str) -> std::result::Result<Option<f64>, ()> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    match raw.parse::<f64>() {
        Ok(v) if v.is_nan() => Ok(None),
        Ok(v) => Ok(Some(v)),
        Err(_) => Err(()),
    }
}

fn record_line(record: &StringRecord) -> u64 {
    record.position().map(|p| p.line()).unwrap_or_default()
}

fn csv_error(path: &Path, source: csv::Error) -> Error {
    Error::Csv {
        path: path.to_owned(),
        source,
    }
}

/// Parses header-less delimited `text` into a [`Table`]. `names[0]` names the index (first field);
/// the remaining names label the data columns. `path` is only used in error reports.
pub fn parse_delimited(path: &Path, text: &str, delimiter: u8, names: &[String]) -> Result<Table> {
    let (index_name, columns) = names
        .split_first()
        .ok_or_else(|| Error::format(path, "no column names"))?;
    let mut table = Table::new(index_name.clone(), columns.to_vec());

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .delimiter(delimiter)
        .flexible(true)
        .from_reader(text.as_bytes());

    for record in reader.records() {
        let record = record.map_err(|e| csv_error(path, e))?;
        let line = record_line(&record);
        if record.len() > names.len() {
            return Err(Error::format(
                path,
                format!(
                    "line {line}: {} fields but {} column names",
                    record.len(),
                    names.len()
                ),
            ));
        }
        let mut fields = record.iter();
        let key = fields
            .next()
            .and_then(|f| parse_cell(f).ok().flatten())
            .ok_or_else(|| Error::format(path, format!("line {line}: bad index value")))?;
        let cells = fields
            .map(|f| {
                parse_cell(f).map_err(|_| {
                    Error::format(path, format!("line {line}: `{f}` is not a number"))
                })
            })
            .collect::<Result<Vec<_>>>()?;
        table.push_row(key, cells);
    }

    log::debug!(
        "{}: {} rows x {} columns",
        path.display(),
        table.len(),
        table.columns().len()
    );
    Ok(table)
}

/// Parses headed delimited `text` into a [`Table`] indexed by the column named `index_column`.
pub fn parse_headed(path: &Path, text: &str, delimiter: u8, index_column: &str) -> Result<Table> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .delimiter(delimiter)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| csv_error(path, e))?
        .iter()
        .map(str::to_owned)
        .collect();
    let index_pos = headers
        .iter()
        .position(|h| h == index_column)
        .ok_or_else(|| Error::format(path, format!("no `{index_column}` column")))?;
    let columns = headers
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != index_pos)
        .map(|(_, h)| h.clone())
        .collect();
    let mut table = Table::new(index_column, columns);

    for record in reader.records() {
        let record = record.map_err(|e| csv_error(path, e))?;
        let line = record_line(&record);
        let mut key = None;
        let mut cells = Vec::with_capacity(headers.len().saturating_sub(1));
        for (i, f) in record.iter().enumerate() {
            let cell = parse_cell(f).map_err(|_| {
                Error::format(path, format!("line {line}: `{f}` is not a number"))
            })?;
            if i == index_pos {
                key = cell;
            } else {
                cells.push(cell);
            }
        }
        let key = key.ok_or_else(|| {
            Error::format(path, format!("line {line}: missing `{index_column}` value"))
        })?;
        table.push_row(key, cells);
    }

    log::debug!(
        "{}: {} rows x {} columns",
        path.display(),
        table.len(),
        table.columns().len()
    );
    Ok(table)
}
