//! Fonts, colors and tick label formatting shared by the charts.

use plotters::{
    prelude::*,
    style::text_anchor::{HPos, Pos, VPos},
};

pub const FONT: &str = "sans-serif";

/// Qualitative palette for line series, in drawing order.
pub const SERIES_COLORS: [RGBColor; 10] = [
    RGBColor(31, 119, 180),
    RGBColor(255, 127, 14),
    RGBColor(44, 160, 44),
    RGBColor(214, 39, 40),
    RGBColor(148, 103, 189),
    RGBColor(140, 86, 75),
    RGBColor(227, 119, 194),
    RGBColor(127, 127, 127),
    RGBColor(188, 189, 34),
    RGBColor(23, 190, 207),
];

pub fn series_color(i: usize) -> RGBColor {
    SERIES_COLORS[i % SERIES_COLORS.len()]
}

/// Black text of `px` pixels.
pub fn text(px: f64) -> TextStyle<'static> {
    (FONT, px).into_font().color(&BLACK)
}

/// Text of `px` pixels in `color`, centered on its anchor point.
pub fn centered(px: f64, color: RGBColor) -> TextStyle<'static> {
    (FONT, px)
        .into_font()
        .color(&color)
        .pos(Pos::new(HPos::Center, VPos::Center))
}

/// Text of `px` pixels rotated a quarter turn, for crowded axes.
pub fn rotated(px: f64) -> TextStyle<'static> {
    (FONT, px)
        .into_font()
        .transform(FontTransform::Rotate90)
        .color(&BLACK)
}

/// Tick label for a value on a log axis: whole numbers without decimals, fractions with just
/// enough decimals to show their first significant digit.
pub fn log_tick_label(v: f64) -> String {
    if v >= 1.0 || v <= 0.0 {
        format!("{v:.0}")
    } else {
        let decimals = (-v.log10()).ceil() as usize;
        format!("{v:.decimals$}")
    }
}

/// Tick label for a linear axis spanning `span`.
pub fn linear_tick_label(v: f64, span: f64) -> String {
    match span {
        s if s >= 10.0 => format!("{v:.0}"),
        s if s >= 1.0 => format!("{v:.1}"),
        _ => format!("{v:.2}"),
    }
}
