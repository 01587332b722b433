//! Renders the cache latency charts of figure 9.
//!
//! Sweeps are read from the `caches` subdirectory of the data directory.
//!
//! Usage: `fig9_caches [DATA_DIR] [FIGURES_DIR]` (defaults: `data`, `figures`). Set `RUST_LOG=info`
//! to see each figure as it is written.

use anyhow::Context;
use bench_figures::{cmd_line_args, figures::caches, FigureCfg};

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let paths = cmd_line_args();
    let written = caches::render(&paths, &FigureCfg::default())
        .with_context(|| format!("rendering figure 9 (caches) from {}", paths.data_dir.display()))?;
    for path in written {
        println!("{}", path.display());
    }
    Ok(())
}
