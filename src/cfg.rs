//! Rendering configuration and input/output locations.

use crate::plot::OutputFormat;
use std::path::PathBuf;

//==============
// FigureCfg

/// Settings shared by every figure. Figure sizes are given in inches by the figure drivers and
/// scaled by [`Self::dpi`]; font sizes are given in points.
#[derive(Debug, Clone, PartialEq)]
pub struct FigureCfg {
    pub dpi: f64,
    pub font_pt: f64,
    pub format: OutputFormat,
}

impl Default for FigureCfg {
    /// Instantiates a default [`FigureCfg`]. The defaults are:
    /// - `dpi` of 100.
    /// - `font_pt` of 22, the base font size of the paper's figures.
    /// - PDF output.
    fn default() -> Self {
        Self {
            dpi: 100.0,
            font_pt: 22.0,
            format: OutputFormat::Pdf,
        }
    }
}

impl FigureCfg {
    pub fn with_dpi(self, dpi: f64) -> Self {
        Self { dpi, ..self }
    }

    pub fn with_font_pt(self, font_pt: f64) -> Self {
        Self { font_pt, ..self }
    }

    pub fn with_format(self, format: OutputFormat) -> Self {
        Self { format, ..self }
    }

    /// Canvas size in pixels for a figure of `(width, height)` inches.
    pub fn pixels(&self, inches: (f64, f64)) -> (u32, u32) {
        (
            (inches.0 * self.dpi).round() as u32,
            (inches.1 * self.dpi).round() as u32,
        )
    }

    /// Pixel size of a `pt`-point font.
    pub fn font_px(&self, pt: f64) -> f64 {
        pt * self.dpi / 72.0
    }

    /// Pixel size of the base font.
    pub fn base_font_px(&self) -> f64 {
        self.font_px(self.font_pt)
    }
}

//==============
// FigurePaths

/// Where measurement data is read from and figures are written to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FigurePaths {
    pub data_dir: PathBuf,
    pub figures_dir: PathBuf,
}

impl Default for FigurePaths {
    /// `data/` and `figures/`, relative to the working directory.
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            figures_dir: PathBuf::from("figures"),
        }
    }
}

impl FigurePaths {
    pub fn new(data_dir: impl Into<PathBuf>, figures_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            figures_dir: figures_dir.into(),
        }
    }
}

/// Returns the [`FigurePaths`] for a figure binary: the 1st command line argument, if provided,
/// replaces the data directory and the 2nd replaces the figures directory.
pub fn cmd_line_args() -> FigurePaths {
    let default = FigurePaths::default();
    FigurePaths {
        data_dir: std::env::args_os()
            .nth(1)
            .map(PathBuf::from)
            .unwrap_or(default.data_dir),
        figures_dir: std::env::args_os()
            .nth(2)
            .map(PathBuf::from)
            .unwrap_or(default.figures_dir),
    }
}
