//! Renders the raw CXI latency and bandwidth charts of figure 5.
//!
//! Usage: `fig5_cxi [DATA_DIR] [FIGURES_DIR]` (defaults: `data`, `figures`). Set `RUST_LOG=info`
//! to see each figure as it is written.

use anyhow::Context;
use bench_figures::{cmd_line_args, figures::cxi, FigureCfg};

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let paths = cmd_line_args();
    let written = cxi::render(&paths, &FigureCfg::default())
        .with_context(|| format!("rendering figure 5 (CXI) from {}", paths.data_dir.display()))?;
    for path in written {
        println!("{}", path.display());
    }
    Ok(())
}
