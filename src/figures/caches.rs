//! Figure 9: memory access latency over the test size, with and without huge pages.

use super::{log_summary, resolve_callouts, Annotation};
use crate::{
    formats::caches::{self, CacheRun, LATENCY_HUGEPAGES_NS, LATENCY_NS},
    measurement::{Measurement, MeasurementKind},
    plot::{save_figure, LegendPos, LogLogPlot, Series},
    Error, FigureCfg, FigurePaths, Result,
};
use std::path::PathBuf;

/// Directory under the data directory holding the sweeps.
pub const DATA_SUBDIR: &str = "caches";

const SIZE_IN: (f64, f64) = (9.0, 7.0);
const Y_LIMITS: (f64, f64) = (1.0, 160.0);
/// Added to the largest test size for the right x limit.
const X_HEADROOM: f64 = 262144.0;
const CALLOUT_SIZES: [f64; 3] = [16.0, 256.0, 8192.0];
const CALLOUT_RAISE: f64 = 1.5;

/// One node: its sweep files, architecture and cache sizes in kB (from `lscpu` and the
/// processor manuals).
#[derive(Debug, Clone, Copy)]
pub struct Node {
    pub run: &'static str,
    pub hugepages_run: &'static str,
    pub arch: &'static str,
    pub cache_levels_kb: [f64; 3],
}

pub const NODES: [Node; 2] = [
    Node {
        run: "asm_test_cn03",
        hugepages_run: "asm_test_hugepages_cn03",
        arch: "Ampere Altra Max",
        cache_levels_kb: [64.0, 1024.0, 32768.0],
    },
    Node {
        run: "asm_test_infra2",
        hugepages_run: "asm_test_hugepages_infra2",
        arch: "AMD EPYC",
        cache_levels_kb: [32.0, 512.0, 32768.0],
    },
];

/// Renders `caches_<run>` for every node in [`NODES`].
pub fn render(paths: &FigurePaths, cfg: &FigureCfg) -> Result<Vec<PathBuf>> {
    log::trace!("entering caches::render");
    let runs = caches::load_runs(&paths.data_dir.join(DATA_SUBDIR))?;

    let mut written = Vec::new();
    for node in &NODES {
        let run = runs
            .require(node.run)?
            .clone()
            .set_arch(node.arch)
            .merge(runs.require(node.hugepages_run)?)?;
        if let Ok(latency) = run.table.series(LATENCY_NS) {
            let values: Vec<f64> = latency.iter().map(|p| p.1).collect();
            log_summary(&format!("{} ({}) latency [ns]", run.name, run.arch), &values);
        }
        let chart = plot(&run, &node.cache_levels_kb)?;
        written.push(save_figure(
            &paths.figures_dir,
            &format!("caches_{}", run.name),
            SIZE_IN,
            cfg,
            |root| chart.draw(root, cfg),
        )?);
    }
    Ok(written)
}

/// Chart of one run: default pages, huge pages behind it when present, and the cache sizes as
/// vertical lines. Huge pages values at [`CALLOUT_SIZES`] get callouts.
pub fn plot(run: &CacheRun, cache_levels_kb: &[f64]) -> Result<LogLogPlot> {
    let (lo, hi) = run
        .table
        .index_range()
        .ok_or_else(|| Error::EmptyData(format!("`{}` has no test sizes", run.name)))?;

    let mut plot = LogLogPlot::new("Test Size [kB]", "Latency [ns]")
        .with_y_limits(Y_LIMITS.0, Y_LIMITS.1)
        .with_x_limits(lo - 0.5, hi + X_HEADROOM)
        .with_max_x_ticks(run.table.len())
        .with_minor_x_grid()
        .with_series(Series::line("default", run.table.series(LATENCY_NS)?));
    for &level in cache_levels_kb {
        plot = plot.with_vline(level);
    }

    if run.has_hugepages() {
        plot = plot
            .with_series(Series::line("hugepages", run.table.series(LATENCY_HUGEPAGES_NS)?).behind())
            .with_legend(LegendPos::UpperLeft);

        let hugepages = Measurement::new(
            run.name.as_str(),
            PathBuf::from(&run.name),
            MeasurementKind::Latency,
            run.table.clone(),
        );
        let annotations: Vec<Annotation> = CALLOUT_SIZES
            .iter()
            .map(|&at| Annotation::new(0, at, (1.0, CALLOUT_RAISE)).in_column(LATENCY_HUGEPAGES_NS))
            .collect();
        for callout in resolve_callouts(&[&hugepages], &annotations)? {
            plot = plot.with_callout(callout);
        }
    } else {
        log::debug!("`{}` has no {} column", run.name, LATENCY_HUGEPAGES_NS);
    }
    Ok(plot)
}
