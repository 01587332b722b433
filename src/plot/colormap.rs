//! The viridis color map and value normalization.

use plotters::style::RGBColor;

/// Viridis sampled at 0.0, 0.1, ..., 1.0.
const VIRIDIS: [(u8, u8, u8); 11] = [
    (68, 1, 84),
    (72, 36, 117),
    (65, 68, 135),
    (53, 95, 141),
    (42, 120, 142),
    (33, 145, 140),
    (34, 168, 132),
    (68, 191, 112),
    (122, 209, 81),
    (189, 223, 38),
    (253, 231, 37),
];

/// Color of `t` in `[0, 1]` (clamped), linearly interpolated between the sampled anchors.
pub fn viridis(t: f64) -> RGBColor {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    let pos = t * (VIRIDIS.len() - 1) as f64;
    let i = (pos.floor() as usize).min(VIRIDIS.len() - 2);
    let f = pos - i as f64;
    let (a, b) = (VIRIDIS[i], VIRIDIS[i + 1]);
    let lerp = |x: u8, y: u8| (x as f64 + (y as f64 - x as f64) * f).round() as u8;
    RGBColor(lerp(a.0, b.0), lerp(a.1, b.1), lerp(a.2, b.2))
}

/// Linear map of `[lo, hi]` onto `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Normalize {
    lo: f64,
    hi: f64,
}

impl Normalize {
    /// A degenerate range (`lo == hi`) is widened by 0.5 on both sides.
    pub fn new(lo: f64, hi: f64) -> Self {
        if hi > lo {
            Self { lo, hi }
        } else {
            Self {
                lo: lo - 0.5,
                hi: lo + 0.5,
            }
        }
    }

    pub fn lo(&self) -> f64 {
        self.lo
    }

    pub fn hi(&self) -> f64 {
        self.hi
    }

    /// Position of `v` within the range, clamped to `[0, 1]`.
    pub fn apply(&self, v: f64) -> f64 {
        ((v - self.lo) / (self.hi - self.lo)).clamp(0.0, 1.0)
    }
}
