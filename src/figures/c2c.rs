//! Figures 7 and 8: core-to-core latency of the compute and infrastructure nodes.

use super::log_crosstab_summary;
use crate::{
    formats::c2c::{self, C2cRun},
    plot::{save_figure, Heatmap},
    FigureCfg, FigurePaths, Result,
};
use std::path::PathBuf;

/// Directory under the data directory holding the matrices.
pub const DATA_SUBDIR: &str = "c2c";

const SIZE_IN: (f64, f64) = (12.0, 12.0);
const CORE_ID: &str = "Core ID";
const COLORBAR_LABEL: &str = "Core-to-Core Latency [ns]";

/// How one run is drawn: tick step of the full view, and zoomed range with its tick step.
#[derive(Debug, Clone, Copy)]
pub struct Views {
    pub tick_step: usize,
    pub zoom: (usize, usize),
    pub zoom_tick_step: usize,
}

pub const COMPUTE_VIEWS: Views = Views {
    tick_step: 4,
    zoom: (0, 7),
    zoom_tick_step: 1,
};

pub const INFRA_VIEWS: Views = Views {
    tick_step: 2,
    zoom: (12, 19),
    zoom_tick_step: 1,
};

/// Renders `c2c_cn03c1[_zoom]` (two runs averaged) and `c2c_infra2c1[_zoom]` (SMT siblings
/// placed next to each other).
pub fn render(paths: &FigurePaths, cfg: &FigureCfg) -> Result<Vec<PathBuf>> {
    log::trace!("entering c2c::render");
    let runs = c2c::load_runs(&paths.data_dir.join(DATA_SUBDIR))?;

    // The compute node is noisier, so it was measured twice.
    let compute = runs
        .require("cn03c1_run1")?
        .clone()
        .set_arch("Ampere Altra Max")
        .merge(runs.require("cn03c1_run2")?)?
        .set_name("cn03c1");
    let infra = runs.require("infra2c1")?.clone().reorder();

    let mut written = render_run(paths, cfg, &compute, COMPUTE_VIEWS)?;
    written.extend(render_run(paths, cfg, &infra, INFRA_VIEWS)?);
    Ok(written)
}

/// Renders the full view `c2c_<name>` and the zoomed view `c2c_<name>_zoom` of one run.
pub fn render_run(
    paths: &FigurePaths,
    cfg: &FigureCfg,
    run: &C2cRun,
    views: Views,
) -> Result<Vec<PathBuf>> {
    let table = run.matrix.to_crosstab();
    log_crosstab_summary(&format!("c2c {} ({}) [ns]", run.name, run.arch), &table);

    let base = Heatmap::new(&table, COLORBAR_LABEL)
        .with_axis_labels(CORE_ID, CORE_ID)
        .with_rotated_x_labels();
    let full = base.clone().with_tick_step(views.tick_step);
    let zoomed = base
        .with_tick_step(views.zoom_tick_step)
        .with_zoom(views.zoom.0, views.zoom.1);

    let mut written = Vec::new();
    for (name, heatmap) in [
        (format!("c2c_{}", run.name), full),
        (format!("c2c_{}_zoom", run.name), zoomed),
    ] {
        written.push(save_figure(
            &paths.figures_dir,
            &name,
            SIZE_IN,
            cfg,
            |root| heatmap.draw(root, cfg),
        )?);
    }
    Ok(written)
}
