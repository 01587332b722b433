//! Annotated heatmaps of cross-tabulations, with a color bar.

use crate::{
    crosstab::CrossTab,
    plot::{
        axis::KeyedAxis,
        colormap::{viridis, Normalize},
        output::Canvas,
        style,
    },
    Error, FigureCfg, Result,
};
use plotters::prelude::*;
use std::ops::RangeInclusive;

/// Normalized values above this get black cell text, the rest white.
const TEXT_COLOR_THRESHOLD: f64 = 0.5;

/// Number of color bands in the color bar.
const COLORBAR_STEPS: usize = 256;

/// Heatmap of a [`CrossTab`], rows top to bottom and columns left to right.
#[derive(Debug, Clone)]
pub struct Heatmap<'a> {
    values: &'a CrossTab,
    spread: Option<&'a CrossTab>,
    annotate: bool,
    colorbar_label: String,
    x_label: Option<String>,
    y_label: Option<String>,
    rotate_x_labels: bool,
    tick_step: usize,
    zoom: Option<(usize, usize)>,
}

impl<'a> Heatmap<'a> {
    pub fn new(values: &'a CrossTab, colorbar_label: impl Into<String>) -> Self {
        Self {
            values,
            spread: None,
            annotate: false,
            colorbar_label: colorbar_label.into(),
            x_label: None,
            y_label: None,
            rotate_x_labels: false,
            tick_step: 1,
            zoom: None,
        }
    }

    /// Writes each cell's value into it, followed by `±<spread>` when a spread table is given.
    pub fn with_cell_text(self, spread: Option<&'a CrossTab>) -> Self {
        Self {
            annotate: true,
            spread,
            ..self
        }
    }

    pub fn with_axis_labels(self, x: impl Into<String>, y: impl Into<String>) -> Self {
        Self {
            x_label: Some(x.into()),
            y_label: Some(y.into()),
            ..self
        }
    }

    pub fn with_rotated_x_labels(self) -> Self {
        Self {
            rotate_x_labels: true,
            ..self
        }
    }

    /// Labels only every `step`-th row and column (by position).
    pub fn with_tick_step(self, step: usize) -> Self {
        Self {
            tick_step: step.max(1),
            ..self
        }
    }

    /// Restricts both axes to the positions `from..=to`.
    pub fn with_zoom(self, from: usize, to: usize) -> Self {
        Self {
            zoom: Some((from.min(to), from.max(to))),
            ..self
        }
    }

    /// Text lines drawn in cell `(row, col)`; `None` when the cell has no value.
    pub fn cell_text(&self, row: usize, col: usize) -> Option<Vec<String>> {
        let text = self.values.cell_text(self.spread, row, col)?;
        Some(text.lines().map(str::to_owned).collect())
    }

    fn visible(&self, n: usize) -> Option<RangeInclusive<usize>> {
        let last = n.checked_sub(1)?;
        match self.zoom {
            None => Some(0..=last),
            Some((from, _)) if from > last => None,
            Some((from, to)) => Some(from..=to.min(last)),
        }
    }

    pub fn draw(&self, root: &Canvas<'_>, cfg: &FigureCfg) -> Result<()> {
        let (lo, hi) = self
            .values
            .value_range()
            .ok_or_else(|| Error::EmptyData("heatmap without values".to_owned()))?;
        let norm = Normalize::new(lo, hi);

        let n_rows = self.values.n_rows();
        let rows = self
            .visible(n_rows)
            .ok_or_else(|| Error::EmptyData("no rows in view".to_owned()))?;
        let cols = self
            .visible(self.values.n_cols())
            .ok_or_else(|| Error::EmptyData("no columns in view".to_owned()))?;

        // Row 0 is drawn at the top.
        let flip = move |r: usize| (n_rows - 1 - r) as f64;

        let font = cfg.base_font_px();
        let margin = font * 0.5;
        let longest = |labels: &[String]| {
            labels.iter().map(|l| l.chars().count()).max().unwrap_or(1) as f64
        };
        let desc = |label: &Option<String>| if label.is_some() { font * 1.6 } else { 0.0 };
        let tick_area = if self.rotate_x_labels {
            longest(self.values.cols()) * 0.65 * font + font * 0.6
        } else {
            font * 1.6
        };
        let x_area = tick_area + desc(&self.x_label);
        let y_area = longest(self.values.rows()) * 0.65 * font + font * 0.6 + desc(&self.y_label);

        let (width, _) = root.dim_in_pixel();
        let bar_width = (font * 6.5) as u32;
        let (main, bar) = root.split_horizontally(width.saturating_sub(bar_width));

        let step = self.tick_step;
        let x_keys: Vec<f64> = cols
            .clone()
            .filter(|c| c % step == 0)
            .map(|c| c as f64)
            .collect();
        let y_keys: Vec<f64> = rows.clone().filter(|r| r % step == 0).map(flip).collect();
        let x_range = (*cols.start() as f64 - 0.5)..(*cols.end() as f64 + 0.5);
        let y_range = (flip(*rows.end()) - 0.5)..(flip(*rows.start()) + 0.5);

        let mut chart = ChartBuilder::on(&main)
            .margin(margin as u32)
            .top_x_label_area_size(x_area as u32)
            .y_label_area_size(y_area as u32)
            .build_cartesian_2d(
                KeyedAxis::new(x_range, x_keys),
                KeyedAxis::new(y_range, y_keys),
            )?;

        let col_labels = self.values.cols();
        let row_labels = self.values.rows();
        let x_fmt = |v: &f64| label_at(col_labels, *v);
        let y_fmt = |v: &f64| label_at(row_labels, (n_rows - 1) as f64 - *v);
        let x_label_style = if self.rotate_x_labels {
            style::rotated(font)
        } else {
            style::text(font)
        };

        {
            let mut mesh = chart.configure_mesh();
            mesh.disable_mesh()
                .x_label_formatter(&x_fmt)
                .y_label_formatter(&y_fmt)
                .x_label_style(x_label_style)
                .y_label_style(style::text(font))
                .axis_desc_style(style::text(font));
            if let Some(label) = &self.x_label {
                mesh.x_desc(label.as_str());
            }
            if let Some(label) = &self.y_label {
                mesh.y_desc(label.as_str());
            }
            mesh.draw()?;
        }

        let cells = rows
            .clone()
            .flat_map(|r| cols.clone().map(move |c| (r, c)))
            .filter_map(|(r, c)| {
                let v = self.values.get(r, c)?;
                let (x, y) = (c as f64, flip(r));
                Some(Rectangle::new(
                    [(x - 0.5, y + 0.5), (x + 0.5, y - 0.5)],
                    viridis(norm.apply(v)).filled(),
                ))
            });
        chart.draw_series(cells)?;

        if self.annotate {
            let line_px = (font * 1.15) as i32;
            for r in rows.clone() {
                for c in cols.clone() {
                    let (Some(v), Some(lines)) = (self.values.get(r, c), self.cell_text(r, c))
                    else {
                        log::debug!("no value at ({r}, {c}), cell left blank");
                        continue;
                    };
                    let text_style = style::centered(font, text_color(norm.apply(v)));
                    let n = lines.len() as i32;
                    for (k, line) in lines.into_iter().enumerate() {
                        let dy = (2 * k as i32 - (n - 1)) * line_px / 2;
                        let elem = EmptyElement::at((c as f64, flip(r)))
                            + Text::new(line, (0, dy), text_style.clone());
                        if let Err(e) = chart.plotting_area().draw(&elem) {
                            log::warn!("text of cell ({r}, {c}) not drawn: {e}");
                        }
                    }
                }
            }
        }

        self.draw_colorbar(&bar, norm, margin + x_area, margin, font)
    }

    fn draw_colorbar(
        &self,
        area: &Canvas<'_>,
        norm: Normalize,
        top: f64,
        bottom: f64,
        font: f64,
    ) -> Result<()> {
        let mut chart = ChartBuilder::on(area)
            .margin_top(top as u32)
            .margin_bottom(bottom as u32)
            .margin_left((font * 0.5) as u32)
            .right_y_label_area_size((font * 5.0) as u32)
            .build_cartesian_2d(0f64..1f64, norm.lo()..norm.hi())?;

        let span = norm.hi() - norm.lo();
        chart.draw_series((0..COLORBAR_STEPS).map(|i| {
            let at = |k: usize| norm.lo() + span * k as f64 / COLORBAR_STEPS as f64;
            Rectangle::new(
                [(0.0, at(i)), (1.0, at(i + 1))],
                viridis((i as f64 + 0.5) / COLORBAR_STEPS as f64).filled(),
            )
        }))?;

        let fmt = |v: &f64| style::linear_tick_label(*v, span);
        chart
            .configure_mesh()
            .disable_mesh()
            .disable_x_axis()
            .y_labels(6)
            .y_label_formatter(&fmt)
            .y_label_style(style::text(font))
            .axis_desc_style(style::text(font))
            .y_desc(self.colorbar_label.as_str())
            .draw()?;
        Ok(())
    }
}

/// Cell text color for a cell whose normalized value is `norm`.
pub fn text_color(norm: f64) -> RGBColor {
    if norm > TEXT_COLOR_THRESHOLD {
        BLACK
    } else {
        WHITE
    }
}

fn label_at(labels: &[String], pos: f64) -> String {
    let pos = pos.round();
    if pos < 0.0 {
        return String::new();
    }
    labels.get(pos as usize).cloned().unwrap_or_default()
}
