//! Figure files: SVG rendering and PDF conversion.

use crate::{Error, FigureCfg, Result};
use plotters::{coord::Shift, prelude::*};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// File format figures are written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Pdf,
    Svg,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Svg => "svg",
        }
    }
}

/// Drawing surface handed to chart renderers.
pub type Canvas<'a> = DrawingArea<SVGBackend<'a>, Shift>;

/// Creates `dir` (and its parents) if absent.
pub fn ensure_dir(dir: &Path) -> Result<()> {
    if !dir.is_dir() {
        log::debug!("creating {}", dir.display());
        fs::create_dir_all(dir).map_err(|e| Error::io(dir, e))?;
    }
    Ok(())
}

/// Renders `draw` on a white `size` pixel canvas and returns the SVG document.
pub fn render_svg(size: (u32, u32), draw: impl FnOnce(&Canvas<'_>) -> Result<()>) -> Result<String> {
    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, size).into_drawing_area();
        root.fill(&WHITE)?;
        draw(&root)?;
        root.present()?;
    }
    Ok(svg)
}

/// Converts an SVG document to a single-page PDF, resolving text against the system fonts.
pub fn svg_to_pdf(svg: &str) -> Result<Vec<u8>> {
    let mut options = svg2pdf::usvg::Options::default();
    options.fontdb_mut().load_system_fonts();
    let tree =
        svg2pdf::usvg::Tree::from_str(svg, &options).map_err(|e| Error::Pdf(e.to_string()))?;
    svg2pdf::to_pdf(
        &tree,
        svg2pdf::ConversionOptions::default(),
        svg2pdf::PageOptions::default(),
    )
    .map_err(|e| Error::Pdf(format!("{e:?}")))
}

/// Renders `draw` on a canvas of `inches` and writes it to `<dir>/<name>.<ext>`, creating `dir`
/// if needed. Returns the written path.
pub fn save_figure(
    dir: &Path,
    name: &str,
    inches: (f64, f64),
    cfg: &FigureCfg,
    draw: impl FnOnce(&Canvas<'_>) -> Result<()>,
) -> Result<PathBuf> {
    ensure_dir(dir)?;
    let svg = render_svg(cfg.pixels(inches), draw)?;
    let path = dir.join(format!("{name}.{}", cfg.format.extension()));
    let bytes = match cfg.format {
        OutputFormat::Svg => svg.into_bytes(),
        OutputFormat::Pdf => svg_to_pdf(&svg)?,
    };
    fs::write(&path, bytes).map_err(|e| Error::io(&path, e))?;
    log::info!("wrote {}", path.display());
    Ok(path)
}
