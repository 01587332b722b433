//! Figure 2 (left): iperf3 throughput between the frontend hosts.

use super::log_crosstab_summary;
use crate::{
    formats::iperf,
    plot::{save_figure, Heatmap},
    FigureCfg, FigurePaths, Result,
};
use std::path::PathBuf;

pub const CAMPAIGN: &str = "measurements_iperf_23-11-03T1352";
pub const FIGURE: &str = "iperf3_frontend";

const SIZE_IN: (f64, f64) = (12.0, 12.0);

pub fn render(paths: &FigurePaths, cfg: &FigureCfg) -> Result<Vec<PathBuf>> {
    log::trace!("entering iperf::render");
    let records = iperf::load_dir(&paths.data_dir.join(CAMPAIGN))?;
    let (mean, std) = iperf::throughput_crosstabs(&records);
    log_crosstab_summary("iperf3 throughput [Gbit/s]", &mean);

    let heatmap = Heatmap::new(&mean, "Throughput [Gbit/sec]").with_cell_text(Some(&std));
    let path = save_figure(&paths.figures_dir, FIGURE, SIZE_IN, cfg, |root| {
        heatmap.draw(root, cfg)
    })?;
    Ok(vec![path])
}
