//! Cross-tabulation of `(row key, column key, value)` records.

use crate::{
    stats::{mean, sample_stdev},
    Error, Result,
};
use std::collections::{BTreeMap, BTreeSet};

/// How the values sharing a `(row, column)` pair are reduced to one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Agg {
    Mean,
    /// Sample standard deviation; missing for pairs with a single value.
    Std,
    /// The first value in record order.
    First,
}

impl Agg {
    fn apply(self, values: &[f64]) -> Option<f64> {
        match self {
            Agg::Mean => mean(values),
            Agg::Std => sample_stdev(values),
            Agg::First => values.first().copied(),
        }
    }
}

/// Matrix of optional cells with labeled rows and columns.
#[derive(Debug, Clone, PartialEq)]
pub struct CrossTab {
    rows: Vec<String>,
    cols: Vec<String>,
    cells: Vec<Vec<Option<f64>>>,
}

impl CrossTab {
    /// Aggregates `records` into a cross-tabulation. Row and column labels are the sorted distinct
    /// keys; pairs without records are missing cells. `NaN` values are ignored.
    pub fn build<R, C>(records: impl IntoIterator<Item = (R, C, f64)>, agg: Agg) -> Self
    where
        R: Into<String>,
        C: Into<String>,
    {
        let mut groups = BTreeMap::<(String, String), Vec<f64>>::new();
        let mut rows = BTreeSet::new();
        let mut cols = BTreeSet::new();
        for (r, c, v) in records {
            let (r, c) = (r.into(), c.into());
            rows.insert(r.clone());
            cols.insert(c.clone());
            let group = groups.entry((r, c)).or_default();
            if !v.is_nan() {
                group.push(v);
            }
        }

        let rows: Vec<String> = rows.into_iter().collect();
        let cols: Vec<String> = cols.into_iter().collect();
        let cells = rows
            .iter()
            .map(|r| {
                cols.iter()
                    .map(|c| {
                        groups
                            .get(&(r.clone(), c.clone()))
                            .and_then(|vs| agg.apply(vs))
                    })
                    .collect()
            })
            .collect();

        Self { rows, cols, cells }
    }

    /// Square cross-tabulation with `labels` on both axes, cell `(i, j)` taken from `cell`.
    pub(crate) fn square(labels: Vec<String>, cell: impl Fn(usize, usize) -> Option<f64>) -> Self {
        let n = labels.len();
        let cells = (0..n).map(|i| (0..n).map(|j| cell(i, j)).collect()).collect();
        Self {
            rows: labels.clone(),
            cols: labels,
            cells,
        }
    }

    /// Wraps an already aggregated matrix; every row must have one cell per column label.
    pub fn from_cells(
        rows: Vec<String>,
        cols: Vec<String>,
        cells: Vec<Vec<Option<f64>>>,
    ) -> Result<Self> {
        let bad_row = cells.iter().find(|r| r.len() != cols.len());
        if cells.len() != rows.len() || bad_row.is_some() {
            return Err(Error::ShapeMismatch {
                left: (rows.len(), cols.len()),
                right: (cells.len(), bad_row.map_or(cols.len(), Vec::len)),
            });
        }
        Ok(Self { rows, cols, cells })
    }

    pub fn rows(&self) -> &[String] {
        &self.rows
    }

    pub fn cols(&self) -> &[String] {
        &self.cols
    }

    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn n_cols(&self) -> usize {
        self.cols.len()
    }

    /// Cell at `(row, col)` positions; `None` when missing or out of bounds.
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        self.cells.get(row)?.get(col).copied().flatten()
    }

    /// Cell at `(row, col)` labels.
    pub fn get_by_label(&self, row: &str, col: &str) -> Option<f64> {
        let r = self.rows.iter().position(|l| l == row)?;
        let c = self.cols.iter().position(|l| l == col)?;
        self.get(r, c)
    }

    /// Smallest and largest present cell values.
    pub fn value_range(&self) -> Option<(f64, f64)> {
        let mut present = self.cells.iter().flatten().flatten().copied();
        let first = present.next()?;
        Some(present.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v))))
    }

    /// Annotation of cell `(row, col)`: its value, followed by `\n±<spread>` when a spread table
    /// is given. `None` when the cell is missing.
    pub fn cell_text(&self, spread: Option<&CrossTab>, row: usize, col: usize) -> Option<String> {
        let value = self.get(row, col)?;
        let mut text = format_cell(Some(value));
        if let Some(spread) = spread {
            text.push_str("\n±");
            text.push_str(&format_cell(spread.get(row, col)));
        }
        Some(text)
    }

    /// [`Self::cell_text`] for every cell, missing cells as empty strings.
    pub fn to_cells_text(&self, spread: Option<&CrossTab>) -> Vec<Vec<String>> {
        (0..self.n_rows())
            .map(|r| {
                (0..self.n_cols())
                    .map(|c| self.cell_text(spread, r, c).unwrap_or_default())
                    .collect()
            })
            .collect()
    }
}

/// Cell text: the value rounded to two decimals, or an empty string when missing.
/// Whole numbers keep one decimal (`10.0`).
pub fn format_cell(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => {
            let rounded = (v * 100.0).round() / 100.0;
            if rounded.fract() == 0.0 {
                format!("{rounded:.1}")
            } else {
                format!("{rounded}")
            }
        }
        _ => String::new(),
    }
}
