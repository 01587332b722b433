//! Renders the iperf3 throughput heatmap of figure 2.
//!
//! Usage: `fig2_iperf [DATA_DIR] [FIGURES_DIR]` (defaults: `data`, `figures`). Set `RUST_LOG=info`
//! to see each figure as it is written.

use anyhow::Context;
use bench_figures::{cmd_line_args, figures::iperf, FigureCfg};

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let paths = cmd_line_args();
    let written = iperf::render(&paths, &FigureCfg::default())
        .with_context(|| format!("rendering figure 2 (iperf3) from {}", paths.data_dir.display()))?;
    for path in written {
        println!("{}", path.display());
    }
    Ok(())
}
