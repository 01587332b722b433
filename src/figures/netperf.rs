//! Figure 2 (right): netperf round trip latency between the frontend hosts.

use super::log_crosstab_summary;
use crate::{
    formats::netperf,
    plot::{save_figure, Heatmap},
    FigureCfg, FigurePaths, Result,
};
use std::path::PathBuf;

pub const CAMPAIGN: &str = "measurements_netperf_23-11-03T1606";
pub const FIGURE: &str = "netperf_frontend";

const SIZE_IN: (f64, f64) = (12.0, 12.0);

pub fn render(paths: &FigurePaths, cfg: &FigureCfg) -> Result<Vec<PathBuf>> {
    log::trace!("entering netperf::render");
    let rows = netperf::load_dir(&paths.data_dir.join(CAMPAIGN))?;
    let (mean, std) = netperf::latency_crosstabs(&rows);
    log_crosstab_summary("netperf mean latency [us]", &mean);

    let heatmap = Heatmap::new(&mean, "Latency [μs]").with_cell_text(Some(&std));
    let path = save_figure(&paths.figures_dir, FIGURE, SIZE_IN, cfg, |root| {
        heatmap.draw(root, cfg)
    })?;
    Ok(vec![path])
}
