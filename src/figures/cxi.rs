//! Figure 5: raw CXI (Slingshot NIC) latency and bandwidth tests.

use super::{resolve_callouts, Annotation};
use crate::{
    formats::cxi::{self, metric_column, BW_MBS, MEAN_US, STDDEV_US},
    measurement::{Measurement, MeasurementKind},
    plot::{save_figure, LegendPos, LogLogPlot, Series},
    Error, FigureCfg, FigurePaths, Result,
};
use std::path::PathBuf;

pub const CAMPAIGN: &str = "measurements_23-11-30T1546";
pub const X_LABEL: &str = "Size [B]";

const SIZE_IN: (f64, f64) = (9.0, 9.0);

const LATENCY: [&str; 3] = ["cxi_write_lat", "cxi_read_lat", "cxi_send_lat"];
const BANDWIDTH: [&str; 3] = ["cxi_write_bw", "cxi_read_bw", "cxi_send_bw"];

const LATENCY_CALLOUTS: [Annotation; 4] = [
    Annotation::new(0, 4194304.0, (0.35, 0.75)).in_column(MEAN_US),
    Annotation::new(2, 4194304.0, (0.75, 0.35)).in_column(MEAN_US),
    Annotation::new(0, 4.0, (0.5, 1.5)).in_column(MEAN_US),
    Annotation::new(2, 4.0, (1.75, 1.5)).in_column(MEAN_US),
];

const BANDWIDTH_CALLOUTS: [Annotation; 2] = [
    Annotation::new(0, 4194304.0, (0.15, 0.4)).in_column(BW_MBS),
    Annotation::new(2, 4194304.0, (1.0, 0.3)).in_column(BW_MBS),
];

/// Renders `cxi_latency` and `cxi_bandwidth`.
pub fn render(paths: &FigurePaths, cfg: &FigureCfg) -> Result<Vec<PathBuf>> {
    log::trace!("entering cxi::render");
    let measurements = cxi::load_measurements(&paths.data_dir, CAMPAIGN)?;

    let figures = [
        ("cxi_latency", "Mean Latency [us]", &LATENCY, &LATENCY_CALLOUTS[..]),
        ("cxi_bandwidth", "Bandwidth [MB/s]", &BANDWIDTH, &BANDWIDTH_CALLOUTS[..]),
    ];

    let mut written = Vec::new();
    for (name, y_label, members, annotations) in figures {
        let plotted = members
            .iter()
            .map(|m| measurements.require(m))
            .collect::<Result<Vec<_>>>()?;
        let plot = multiple(&plotted, y_label, annotations)?;
        written.push(save_figure(
            &paths.figures_dir,
            name,
            SIZE_IN,
            cfg,
            |root| plot.draw(root, cfg),
        )?);
    }
    Ok(written)
}

/// Chart of the measurements' metric columns; latency tests get standard deviation error bars.
pub fn multiple(
    measurements: &[&Measurement],
    y_label: &str,
    annotations: &[Annotation],
) -> Result<LogLogPlot> {
    let first = measurements
        .first()
        .ok_or_else(|| Error::EmptyData("no measurements to plot".to_owned()))?;
    let mut plot = LogLogPlot::new(X_LABEL, y_label)
        .with_max_x_ticks(first.table.len())
        .with_minor_x_grid()
        .with_legend(LegendPos::UpperLeft);
    for m in measurements {
        plot = plot.with_series(series(m)?);
    }
    for callout in resolve_callouts(measurements, annotations)? {
        plot = plot.with_callout(callout);
    }
    Ok(plot)
}

/// Metric column of `m`; for latency tests, with its standard deviation as error bars.
pub fn series(m: &Measurement) -> Result<Series> {
    let column = metric_column(m.kind);
    match m.kind {
        MeasurementKind::Bandwidth => Ok(Series::line(m.name.as_str(), m.table.series(column)?)),
        MeasurementKind::Latency => {
            let (points, errors): (Vec<_>, Vec<_>) = m
                .table
                .index()
                .iter()
                .zip(m.table.column(column)?)
                .zip(m.table.column(STDDEV_US)?)
                .filter_map(|((&x, y), e)| y.map(|y| ((x, y), e.unwrap_or(0.0))))
                .unzip();
            Ok(Series::line(m.name.as_str(), points).with_errors(errors))
        }
    }
}
