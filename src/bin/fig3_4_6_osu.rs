//! Renders the OSU micro-benchmark charts of figures 3, 4 and 6.
//!
//! Usage: `fig3_4_6_osu [DATA_DIR] [FIGURES_DIR]` (defaults: `data`, `figures`). Set `RUST_LOG=info`
//! to see each figure as it is written.

use anyhow::Context;
use bench_figures::{cmd_line_args, figures::osu, FigureCfg};

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let paths = cmd_line_args();
    let written = osu::render(&paths, &FigureCfg::default())
        .with_context(|| {
            format!(
                "rendering figures 3, 4 and 6 (OSU) from {}",
                paths.data_dir.display()
            )
        })?;
    for path in written {
        println!("{}", path.display());
    }
    Ok(())
}
