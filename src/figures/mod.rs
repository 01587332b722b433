//! Per-figure drivers. Each loads one measurement campaign from [`FigurePaths::data_dir`],
//! renders its figures into [`FigurePaths::figures_dir`] and returns the written paths.
//!
//! Campaign directory names, annotation positions and hardware facts are constants of the
//! driver that uses them.

pub mod c2c;
pub mod caches;
pub mod cxi;
pub mod iperf;
pub mod netperf;
pub mod osu;

use crate::{
    crosstab::CrossTab,
    measurement::Measurement,
    plot::{Callout, Series},
    stats::SummaryStats,
    Error, Result,
};

#[cfg(doc)]
use crate::FigurePaths;

//=================
// Callouts

/// A callout requested by a figure driver, resolved against the plotted measurements.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Annotation {
    /// Position of the measurement in the plotted list.
    pub series: usize,
    /// Column holding the value; the measurement's first column when `None`.
    pub column: Option<&'static str>,
    /// Index (message size, test size) of the annotated point.
    pub at: f64,
    /// Text position as multiples of the point's coordinates.
    pub offset: (f64, f64),
}

impl Annotation {
    pub const fn new(series: usize, at: f64, offset: (f64, f64)) -> Self {
        Self {
            series,
            column: None,
            at,
            offset,
        }
    }

    pub const fn in_column(self, column: &'static str) -> Self {
        Self {
            column: Some(column),
            ..self
        }
    }
}

/// Looks up the value of each annotation and turns it into a [`Callout`].
pub fn resolve_callouts(
    measurements: &[&Measurement],
    annotations: &[Annotation],
) -> Result<Vec<Callout>> {
    annotations
        .iter()
        .map(|a| {
            let m = measurements.get(a.series).ok_or_else(|| {
                Error::MissingMeasurement(format!("series #{} of the figure", a.series))
            })?;
            let column = match a.column {
                Some(c) => c,
                None => m.first_column()?,
            };
            let value = m.value_at(a.at, column)?;
            Ok(Callout::new((a.at, value), a.offset))
        })
        .collect()
}

//=================
// Series and logging helpers

/// Line of `column` of `m` against its index, labeled with the measurement name.
pub fn measurement_series(m: &Measurement, column: &str) -> Result<Series> {
    Ok(Series::line(m.name.as_str(), m.table.series(column)?))
}

/// Logs summary statistics of a cross-tabulation's present cells.
pub fn log_crosstab_summary(what: &str, table: &CrossTab) {
    let values: Vec<f64> = (0..table.n_rows())
        .flat_map(|r| (0..table.n_cols()).filter_map(move |c| table.get(r, c)))
        .collect();
    log_summary(what, &values);
}

/// Logs summary statistics of `values` at info level.
pub fn log_summary(what: &str, values: &[f64]) {
    match SummaryStats::new(values) {
        Some(s) => log::info!(
            "{what}: n={} mean={:.3} stdev={} min={:.3} max={:.3}",
            s.count,
            s.mean,
            s.stdev.map(|v| format!("{v:.3}")).unwrap_or_else(|| "-".to_owned()),
            s.min,
            s.max
        ),
        None => log::warn!("{what}: no values"),
    }
}
