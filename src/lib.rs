//! Parses the raw outputs of interconnect and memory benchmarks and renders them as figures.
//!
//! Supported tools:
//! - iperf3 JSON reports and netperf CSV summaries, drawn as host-to-host heatmaps;
//! - OSU micro-benchmark and raw CXI logs, drawn as log-log charts over the message size;
//! - core-to-core latency matrices, drawn as heatmaps;
//! - cache latency sweeps, drawn as log-log charts with the cache sizes marked.
//!
//! Each figure group has a driver in [`figures`] and a binary under `src/bin` that calls it with
//! the directories from [`cmd_line_args`]. Loaders live in [`formats`] and chart rendering in
//! [`plot`].
//!
//! Figures are written as PDF by default; [`FigureCfg::with_format`] switches to SVG.
#![deny(clippy::unwrap_used)]

mod cfg;
pub use cfg::*;

mod crosstab;
pub use crosstab::*;

mod error;
pub use error::*;

mod measurement;
pub use measurement::*;

mod scan;
pub use scan::*;

mod stats;
pub use stats::*;

mod table;
pub use table::*;

mod wrapper;
pub use wrapper::*;

pub mod figures;
pub mod formats;
pub mod plot;
