//! Chart rendering on top of [plotters](https://crates.io/crates/plotters).
//!
//! Charts are drawn into an in-memory SVG document, which is then written as is or converted to
//! PDF (see [`output`]).

pub mod axis;
pub mod colormap;
pub mod heatmap;
pub mod lines;
pub mod output;
pub mod style;

pub use heatmap::Heatmap;
pub use lines::{Callout, LegendPos, LogLogPlot, Series};
pub use output::{save_figure, OutputFormat};
