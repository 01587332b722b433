//! Renders the core-to-core latency heatmaps of figures 7 and 8.
//!
//! Matrices are read from the `c2c` subdirectory of the data directory.
//!
//! Usage: `fig7_8_c2c [DATA_DIR] [FIGURES_DIR]` (defaults: `data`, `figures`). Set `RUST_LOG=info`
//! to see each figure as it is written.

use anyhow::Context;
use bench_figures::{cmd_line_args, figures::c2c, FigureCfg};

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let paths = cmd_line_args();
    let written = c2c::render(&paths, &FigureCfg::default())
        .with_context(|| {
            format!(
                "rendering figures 7 and 8 (core-to-core) from {}",
                paths.data_dir.display()
            )
        })?;
    for path in written {
        println!("{}", path.display());
    }
    Ok(())
}
