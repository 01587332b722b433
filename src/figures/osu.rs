//! Figures 3, 4 and 6: OSU micro-benchmarks over the frontend network (compute and
//! infrastructure node) and over Slingshot.

use super::{measurement_series, resolve_callouts, Annotation};
use crate::{
    formats::osu,
    measurement::Measurement,
    plot::{save_figure, LegendPos, LogLogPlot},
    Error, FigureCfg, FigurePaths, Result,
};
use std::path::PathBuf;

pub const X_LABEL: &str = "Message Size (byte)";

const SIZE_IN: (f64, f64) = (9.0, 9.0);
const SINGLE_SIZE_IN: (f64, f64) = (12.0, 6.0);

const BANDWIDTH: [&str; 2] = ["osu_bw", "osu_bibw"];
const LATENCY: [&str; 3] = ["osu_latency", "osu_gather", "osu_alltoall"];

/// One OSU measurement campaign and the callouts of its two figures.
#[derive(Debug, Clone, Copy)]
pub struct Campaign {
    pub dir: &'static str,
    /// Suffix of the figure names, `omb_bw_<suffix>` and `omb_latency_<suffix>`.
    pub suffix: &'static str,
    pub bandwidth_callouts: &'static [Annotation],
    pub latency_callouts: &'static [Annotation],
}

const LATENCY_INFRA_CALLOUTS: &[Annotation] = &[
    Annotation::new(1, 4.0, (2.0, 1.5)),
    Annotation::new(2, 4.0, (0.5, 1.5)),
    Annotation::new(0, 4194304.0, (1.0, 0.35)),
];

pub const CAMPAIGNS: [Campaign; 3] = [
    Campaign {
        dir: "measurements_osu_openmpi_cn_23-11-22T1111",
        suffix: "cn",
        bandwidth_callouts: &[
            Annotation::new(1, 32768.0, (1.0, 0.35)),
            Annotation::new(0, 4194304.0, (1.0, 0.35)),
        ],
        latency_callouts: &[
            Annotation::new(1, 4.0, (2.0, 1.5)),
            Annotation::new(0, 4.0, (0.5, 1.5)),
            Annotation::new(2, 4.0, (1.0, 1.5)),
            Annotation::new(0, 4194304.0, (1.0, 0.35)),
        ],
    },
    Campaign {
        dir: "measurements_osu_openmpi_infra_23-11-27T0955",
        suffix: "infra",
        bandwidth_callouts: &[
            Annotation::new(1, 32768.0, (1.0, 0.35)),
            Annotation::new(0, 4194304.0, (1.0, 0.35)),
        ],
        latency_callouts: LATENCY_INFRA_CALLOUTS,
    },
    Campaign {
        dir: "measurements_osu_openmpi-native_infra_23-11-30T1154",
        suffix: "infra_slingshot",
        bandwidth_callouts: &[
            Annotation::new(1, 4194304.0, (0.25, 0.5)),
            Annotation::new(0, 4194304.0, (1.0, 0.35)),
        ],
        latency_callouts: LATENCY_INFRA_CALLOUTS,
    },
];

/// Renders the bandwidth and latency figures of every campaign in [`CAMPAIGNS`].
pub fn render(paths: &FigurePaths, cfg: &FigureCfg) -> Result<Vec<PathBuf>> {
    let mut written = Vec::new();
    for campaign in &CAMPAIGNS {
        written.extend(render_campaign(paths, cfg, campaign)?);
    }
    Ok(written)
}

/// Renders `omb_bw_<suffix>` and `omb_latency_<suffix>` for one campaign.
pub fn render_campaign(
    paths: &FigurePaths,
    cfg: &FigureCfg,
    campaign: &Campaign,
) -> Result<Vec<PathBuf>> {
    log::trace!("entering osu::render_campaign({})", campaign.dir);
    let measurements = osu::load_measurements(&paths.data_dir, campaign.dir)?;

    let bandwidth = BANDWIDTH
        .iter()
        .map(|name| measurements.require(name))
        .collect::<Result<Vec<_>>>()?;
    let latency = LATENCY
        .iter()
        .map(|name| measurements.require(name))
        .collect::<Result<Vec<_>>>()?;

    let figures = [
        (
            format!("omb_bw_{}", campaign.suffix),
            bandwidth,
            campaign.bandwidth_callouts,
            LegendPos::LowerRight,
        ),
        (
            format!("omb_latency_{}", campaign.suffix),
            latency,
            campaign.latency_callouts,
            LegendPos::UpperLeft,
        ),
    ];

    let mut written = Vec::new();
    for (name, plotted, annotations, legend) in figures {
        let plot = multiple(&plotted, annotations)?.with_legend(legend);
        let path = save_figure(&paths.figures_dir, &name, SIZE_IN, cfg, |root| {
            plot.draw(root, cfg)
        })?;
        written.push(path);
    }
    Ok(written)
}

/// Chart of the first column of each measurement; the y label is the first measurement's.
pub fn multiple(measurements: &[&Measurement], annotations: &[Annotation]) -> Result<LogLogPlot> {
    let first = measurements
        .first()
        .ok_or_else(|| Error::EmptyData("no measurements to plot".to_owned()))?;
    let mut plot = LogLogPlot::new(X_LABEL, first.first_column()?)
        .with_max_x_ticks(first.table.len());
    for m in measurements {
        plot = plot.with_series(measurement_series(m, m.first_column()?)?);
    }
    for callout in resolve_callouts(measurements, annotations)? {
        plot = plot.with_callout(callout);
    }
    Ok(plot)
}

/// Renders one measurement with its name as title, to `<name>.<ext>`.
pub fn render_single(
    paths: &FigurePaths,
    cfg: &FigureCfg,
    measurement: &Measurement,
) -> Result<PathBuf> {
    let column = measurement.first_column()?;
    let plot = LogLogPlot::new(X_LABEL, column)
        .with_title(measurement.name.as_str())
        .with_series(measurement_series(measurement, column)?);
    save_figure(
        &paths.figures_dir,
        &measurement.name,
        SINGLE_SIZE_IN,
        cfg,
        |root| plot.draw(root, cfg),
    )
}
