//! Log-log line charts (x in base 2, y in base 10) with error bars, marker lines and callouts.

use crate::{
    plot::{axis::KeyedAxis, output::Canvas, style},
    Error, FigureCfg, Result,
};
use plotters::prelude::*;

/// Fraction of the data span added on each side when limits are derived from the data.
const AUTO_MARGIN: f64 = 0.05;

//=================
// Series and callouts

/// One line of a chart, in data coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub label: String,
    pub points: Vec<(f64, f64)>,
    /// Symmetric error per point, drawn as vertical bars.
    pub errors: Option<Vec<f64>>,
    /// Drawn before the other series.
    pub behind: bool,
}

impl Series {
    pub fn line(label: impl Into<String>, points: Vec<(f64, f64)>) -> Self {
        Self {
            label: label.into(),
            points,
            errors: None,
            behind: false,
        }
    }

    pub fn with_errors(self, errors: Vec<f64>) -> Self {
        Self {
            errors: Some(errors),
            ..self
        }
    }

    pub fn behind(self) -> Self {
        Self {
            behind: true,
            ..self
        }
    }
}

/// A value label placed away from its data point, with an arrow pointing at the point.
#[derive(Debug, Clone, PartialEq)]
pub struct Callout {
    pub at: (f64, f64),
    pub text_at: (f64, f64),
    pub text: String,
}

impl Callout {
    /// Labels point `(x, y)` with `y` to two decimals, placing the text at `(x * ox, y * oy)`.
    pub fn new((x, y): (f64, f64), (ox, oy): (f64, f64)) -> Self {
        Self {
            at: (x, y),
            text_at: (x * ox, y * oy),
            text: format!("{y:.2}"),
        }
    }
}

/// Corner the legend is drawn in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegendPos {
    UpperLeft,
    UpperRight,
    LowerLeft,
    LowerRight,
}

impl From<LegendPos> for SeriesLabelPosition {
    fn from(pos: LegendPos) -> Self {
        match pos {
            LegendPos::UpperLeft => SeriesLabelPosition::UpperLeft,
            LegendPos::UpperRight => SeriesLabelPosition::UpperRight,
            LegendPos::LowerLeft => SeriesLabelPosition::LowerLeft,
            LegendPos::LowerRight => SeriesLabelPosition::LowerRight,
        }
    }
}

//=================
// LogLogPlot

/// A log-log chart under construction.
#[derive(Debug, Clone, PartialEq)]
pub struct LogLogPlot {
    series: Vec<Series>,
    x_label: String,
    y_label: String,
    title: Option<String>,
    x_limits: Option<(f64, f64)>,
    y_limits: Option<(f64, f64)>,
    max_x_ticks: Option<usize>,
    minor_x_grid: bool,
    vlines: Vec<f64>,
    callouts: Vec<Callout>,
    legend: Option<LegendPos>,
}

impl LogLogPlot {
    pub fn new(x_label: impl Into<String>, y_label: impl Into<String>) -> Self {
        Self {
            series: Vec::new(),
            x_label: x_label.into(),
            y_label: y_label.into(),
            title: None,
            x_limits: None,
            y_limits: None,
            max_x_ticks: None,
            minor_x_grid: false,
            vlines: Vec::new(),
            callouts: Vec::new(),
            legend: None,
        }
    }

    pub fn with_series(mut self, series: Series) -> Self {
        self.series.push(series);
        self
    }

    pub fn with_title(self, title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..self
        }
    }

    pub fn with_x_limits(self, lo: f64, hi: f64) -> Self {
        Self {
            x_limits: Some((lo, hi)),
            ..self
        }
    }

    pub fn with_y_limits(self, lo: f64, hi: f64) -> Self {
        Self {
            y_limits: Some((lo, hi)),
            ..self
        }
    }

    /// Caps the number of labeled powers of two on the x axis.
    pub fn with_max_x_ticks(self, n: usize) -> Self {
        Self {
            max_x_ticks: Some(n.max(1)),
            ..self
        }
    }

    /// Draws faint vertical lines between the labeled powers of two.
    pub fn with_minor_x_grid(self) -> Self {
        Self {
            minor_x_grid: true,
            ..self
        }
    }

    /// Adds a red vertical line at `x`.
    pub fn with_vline(mut self, x: f64) -> Self {
        self.vlines.push(x);
        self
    }

    pub fn with_callout(mut self, callout: Callout) -> Self {
        self.callouts.push(callout);
        self
    }

    pub fn with_legend(self, pos: LegendPos) -> Self {
        Self {
            legend: Some(pos),
            ..self
        }
    }

    pub fn series(&self) -> &[Series] {
        &self.series
    }

    pub fn callouts(&self) -> &[Callout] {
        &self.callouts
    }

    pub fn has_minor_x_grid(&self) -> bool {
        self.minor_x_grid
    }

    /// Axis limits in data coordinates: the configured ones, or the data extent (error bars
    /// included) widened by a small margin in log space.
    pub fn limits(&self) -> Result<((f64, f64), (f64, f64))> {
        let points = || {
            self.series
                .iter()
                .flat_map(|s| s.points.iter().copied())
                .filter(|&(x, y)| x > 0.0 && y > 0.0)
        };
        if points().next().is_none() {
            return Err(Error::EmptyData("no positive data points".to_owned()));
        }

        let x = match self.x_limits {
            Some(l) => l,
            None => padded_log_extent(points().map(|p| p.0), 2.0),
        };
        let y = match self.y_limits {
            Some(l) => l,
            None => {
                let bars = self.series.iter().flat_map(|s| {
                    let errors = s.errors.as_deref().unwrap_or(&[]);
                    s.points
                        .iter()
                        .zip(errors)
                        .flat_map(|(&(_, y), &e)| [y - e, y + e])
                });
                padded_log_extent(points().map(|p| p.1).chain(bars), 10.0)
            }
        };
        for (axis, (lo, hi)) in [("x", x), ("y", y)] {
            if !(lo > 0.0 && hi > lo) {
                return Err(Error::Render(format!(
                    "{axis} limits [{lo}, {hi}] are not a positive range"
                )));
            }
        }
        Ok((x, y))
    }

    pub fn draw(&self, root: &Canvas<'_>, cfg: &FigureCfg) -> Result<()> {
        let ((x_lo, x_hi), (y_lo, y_hi)) = self.limits()?;
        let (lx0, lx1) = (x_lo.log2(), x_hi.log2());
        let (ly0, ly1) = (y_lo.log10(), y_hi.log10());
        let to_log = |(x, y): (f64, f64)| (x.log2(), y.log10());

        let font = cfg.base_font_px();
        let tick_font = cfg.font_px(18.0);

        let x_keys = x_key_points(lx0, lx1, self.max_x_ticks);
        let x_minor = if self.minor_x_grid {
            x_minor_points(lx0, lx1, &x_keys)
        } else {
            Vec::new()
        };
        let y_keys = y_key_points(ly0, ly1);
        let widest_x = x_keys
            .iter()
            .map(|k| style::log_tick_label(k.exp2()).len())
            .max()
            .unwrap_or(1) as f64;
        let widest_y = y_keys
            .iter()
            .map(|k| style::log_tick_label(10f64.powf(*k)).len())
            .max()
            .unwrap_or(1) as f64;

        let mut builder = ChartBuilder::on(root);
        builder
            .margin((font * 0.6) as u32)
            .x_label_area_size((widest_x * 0.65 * tick_font + font * 2.2) as u32)
            .y_label_area_size((widest_y * 0.65 * font + font * 2.2) as u32);
        if let Some(title) = &self.title {
            builder.caption(title.as_str(), style::text(font));
        }
        let mut chart = builder.build_cartesian_2d(
            KeyedAxis::new(lx0..lx1, x_keys),
            KeyedAxis::new(ly0..ly1, y_keys),
        )?;

        let x_fmt = |v: &f64| style::log_tick_label(v.exp2());
        let y_fmt = |v: &f64| style::log_tick_label(10f64.powf(*v));
        chart
            .configure_mesh()
            .x_desc(self.x_label.as_str())
            .y_desc(self.y_label.as_str())
            .x_label_formatter(&x_fmt)
            .y_label_formatter(&y_fmt)
            .x_label_style(style::rotated(tick_font))
            .y_label_style(style::text(font))
            .axis_desc_style(style::text(font))
            .bold_line_style(BLACK.mix(0.15).stroke_width(1))
            .light_line_style(TRANSPARENT.stroke_width(0))
            .draw()?;

        // Minor y grid at 2..9 x 10^k.
        let minor = (ly0.floor() as i32..=ly1.ceil() as i32)
            .flat_map(|k| (2..=9).map(move |m| (m as f64 * 10f64.powi(k)).log10()))
            .filter(|ly| (ly0..=ly1).contains(ly));
        chart.draw_series(minor.map(|ly| {
            PathElement::new(vec![(lx0, ly), (lx1, ly)], BLACK.mix(0.06).stroke_width(1))
        }))?;
        chart.draw_series(x_minor.into_iter().map(|lx| {
            PathElement::new(vec![(lx, ly0), (lx, ly1)], BLACK.mix(0.06).stroke_width(1))
        }))?;

        chart.draw_series(self.vlines.iter().filter(|x| **x > 0.0).map(|x| {
            PathElement::new(vec![(x.log2(), ly0), (x.log2(), ly1)], RED.stroke_width(2))
        }))?;

        let mut order: Vec<usize> = (0..self.series.len()).collect();
        order.sort_by_key(|&i| !self.series[i].behind);
        for i in order {
            let series = &self.series[i];
            let color = style::series_color(i);
            let points: Vec<(f64, f64)> = series
                .points
                .iter()
                .copied()
                .filter(|&(x, y)| x > 0.0 && y > 0.0)
                .map(to_log)
                .collect();
            if points.len() < series.points.len() {
                log::warn!(
                    "`{}`: {} non-positive point(s) left out of the log-log chart",
                    series.label,
                    series.points.len() - points.len()
                );
            }

            if let Some(errors) = &series.errors {
                let bars = series
                    .points
                    .iter()
                    .zip(errors)
                    .filter(|(&(x, y), &e)| x > 0.0 && y > 0.0 && e > 0.0)
                    .map(|(&(x, y), &e)| {
                        let low = if y - e > 0.0 { (y - e).log10() } else { ly0 };
                        PathElement::new(
                            vec![(x.log2(), low.max(ly0)), (x.log2(), (y + e).log10())],
                            color.stroke_width(2),
                        )
                    });
                chart.draw_series(bars)?;
            }

            chart
                .draw_series(LineSeries::new(points, color.stroke_width(3)))?
                .label(series.label.as_str())
                .legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x + 24, y)], color.stroke_width(3))
                });
        }

        if let Some(pos) = self.legend {
            chart
                .configure_series_labels()
                .position(pos.into())
                .label_font(style::text(font))
                .background_style(WHITE.mix(0.8).filled())
                .border_style(BLACK.mix(0.3).stroke_width(1))
                .draw()?;
        }

        let callout_font = cfg.font_px(16.0);
        for callout in &self.callouts {
            let at = chart.plotting_area().map_coordinate(&to_log(callout.at));
            let text_at = chart.plotting_area().map_coordinate(&to_log(callout.text_at));
            draw_callout(root, at, text_at, &callout.text, callout_font)?;
        }
        Ok(())
    }
}

/// Arrow from the label at `text_at` to `at`, then the label itself; both on a white halo.
fn draw_callout(
    root: &Canvas<'_>,
    at: (i32, i32),
    text_at: (i32, i32),
    text: &str,
    px: f64,
) -> Result<()> {
    let (dx, dy) = ((at.0 - text_at.0) as f64, (at.1 - text_at.1) as f64);
    let len = dx.hypot(dy);
    // Leave room around the label and a small gap at the point.
    let start_gap = px * 0.9;
    if len > start_gap + 6.0 {
        let (ux, uy) = (dx / len, dy / len);
        let along = |d: f64| {
            (
                (text_at.0 as f64 + ux * d).round() as i32,
                (text_at.1 as f64 + uy * d).round() as i32,
            )
        };
        let start = along(start_gap);
        let tip = along(len - 2.0);
        let head = px * 0.5;
        let base = along(len - 2.0 - head);
        let (nx, ny) = (-uy * head * 0.45, ux * head * 0.45);
        let side = |s: f64| {
            (
                (base.0 as f64 + nx * s).round() as i32,
                (base.1 as f64 + ny * s).round() as i32,
            )
        };

        root.draw(&PathElement::new(vec![start, tip], WHITE.stroke_width(5)))?;
        root.draw(&PathElement::new(vec![start, base], BLACK.stroke_width(2)))?;
        root.draw(&Polygon::new(vec![tip, side(1.0), side(-1.0)], BLACK.filled()))?;
    }

    let halo = style::centered(px, WHITE);
    for (ox, oy) in [(-2, -2), (-2, 0), (-2, 2), (0, -2), (0, 2), (2, -2), (2, 0), (2, 2)] {
        root.draw(&Text::new(
            text.to_owned(),
            (text_at.0 + ox, text_at.1 + oy),
            halo.clone(),
        ))?;
    }
    root.draw(&Text::new(
        text.to_owned(),
        text_at,
        style::centered(px, BLACK),
    ))?;
    Ok(())
}

/// Extent of the positive `values` in log-`base` space, widened by [`AUTO_MARGIN`] on each side,
/// returned in data coordinates.
fn padded_log_extent(values: impl Iterator<Item = f64>, base: f64) -> (f64, f64) {
    let (lo, hi) = values
        .filter(|v| *v > 0.0 && v.is_finite())
        .map(|v| v.log(base))
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
    let pad = if hi > lo { (hi - lo) * AUTO_MARGIN } else { 0.5 };
    (base.powf(lo - pad), base.powf(hi + pad))
}

/// Whole log2 positions within `[lx0, lx1]`, thinned to at most `max` by a constant stride.
pub fn x_key_points(lx0: f64, lx1: f64, max: Option<usize>) -> Vec<f64> {
    let all: Vec<f64> = (lx0.ceil() as i64..=lx1.floor() as i64)
        .map(|k| k as f64)
        .collect();
    let stride = match max {
        Some(max) if all.len() > max => all.len().div_ceil(max),
        _ => 1,
    };
    all.into_iter().step_by(stride).collect()
}

/// Minor grid positions within `[lx0, lx1]`: the powers of two missing from `keys`, and the
/// points halfway between neighboring powers of two (`1.5 * 2^k`).
pub fn x_minor_points(lx0: f64, lx1: f64, keys: &[f64]) -> Vec<f64> {
    let in_range = |v: &f64| (lx0..=lx1).contains(v);
    let mut minor: Vec<f64> = (lx0.floor() as i64..=lx1.ceil() as i64)
        .flat_map(|k| {
            let k = k as f64;
            let unlabeled = (!keys.contains(&k)).then_some(k);
            unlabeled.into_iter().chain([k + 1.5f64.log2()])
        })
        .filter(in_range)
        .collect();
    minor.sort_by(f64::total_cmp);
    minor
}

/// Decades within `[ly0, ly1]`; when fewer than two fit, 2x and 5x steps are added.
pub fn y_key_points(ly0: f64, ly1: f64) -> Vec<f64> {
    let in_range = |v: &f64| (ly0..=ly1).contains(v);
    let decades: Vec<f64> = (ly0.ceil() as i64..=ly1.floor() as i64)
        .map(|k| k as f64)
        .collect();
    if decades.len() >= 2 {
        return decades;
    }
    let mut keys: Vec<f64> = (ly0.floor() as i64..=ly1.ceil() as i64)
        .flat_map(|k| [1.0, 2.0, 5.0].map(|m: f64| (m * 10f64.powi(k as i32)).log10()))
        .filter(in_range)
        .collect();
    keys.sort_by(f64::total_cmp);
    keys
}
