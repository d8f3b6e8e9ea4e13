//! Utility functions for visualization: colors, axis ranges, tick formatting.

use log::warn;
use plotters::prelude::*;

use super::text::estimate_text_width_px;

/// Markers of individual benchmarks.
pub const POINT_GREEN: RGBColor = RGBColor(0, 128, 0);
/// Violin bodies and box outlines.
pub const BODY_BLUE: RGBColor = RGBColor(31, 119, 180);
pub const MEDIAN_ORANGE: RGBColor = RGBColor(255, 127, 14);
/// Bars for growth (>= 0).
pub const BAR_GREY: RGBColor = RGBColor(128, 128, 128);
/// Bars for shrinkage (< 0), `#A7E6BF`.
pub const BAR_MINT: RGBColor = RGBColor(167, 230, 191);
pub const MARK_RED: RGBColor = RGBColor(220, 20, 20);
pub const MARK_BLUE: RGBColor = RGBColor(20, 20, 220);
pub const PLOT_BACKGROUND: RGBColor = RGBColor(211, 211, 211);
pub const LEADER_GREY: RGBColor = RGBColor(60, 60, 60);

/// Bar color for a change value.
pub fn bar_color(value: f64) -> RGBColor {
    if value >= 0.0 { BAR_GREY } else { BAR_MINT }
}

/// Marker color for a change value of the overlaid metric.
pub fn mark_color(value: f64) -> RGBColor {
    if value >= 0.0 { MARK_RED } else { MARK_BLUE }
}

/// Min and max over finite values.
pub fn value_range<I: IntoIterator<Item = f64>>(values: I) -> Option<(f64, f64)> {
    values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

/// Pad `[min, max]` by `frac` of its span on both sides; a degenerate range is widened by one.
pub fn padded_range(min: f64, max: f64, frac: f64) -> (f64, f64) {
    if (max - min).abs() < f64::EPSILON {
        warn!("degenerate value range [{min}, {max}], widening by 1");
        return (min - 1.0, max + 1.0);
    }
    let pad = (max - min) * frac;
    (min - pad, max + pad)
}

/// Y tick label with magnitude-dependent precision.
pub fn y_tick_label(v: f64) -> String {
    let a = v.abs();
    let prec = if a >= 100.0 {
        0
    } else if a >= 10.0 {
        1
    } else {
        2
    };
    format!("{:.*}", prec, v)
}

/// Name for a category axis tick at `x`; ticks between categories stay blank.
pub fn category_label(names: &[String], x: f64) -> String {
    let idx = x.round();
    if (x - idx).abs() > 1e-6 || idx < 0.0 {
        return String::new();
    }
    names.get(idx as usize).cloned().unwrap_or_default()
}

/// Compute a tight left label area width for the Y axis (in pixels),
/// based on the formatted tick labels that will appear.
/// - `ymin..ymax`: the Y range passed to Plotters
/// - `ticks`: how many Y labels are requested
/// - `font_px`: font size used for axis labels
/// - `has_desc`: reserve room for a rotated axis description
///
/// Returns a width clamped to a sensible range to avoid extremes.
pub fn compute_left_label_area_px(
    ymin: f64,
    ymax: f64,
    ticks: usize,
    font_px: u32,
    has_desc: bool,
) -> u32 {
    let mut max_px = 0u32;
    for i in 0..=ticks {
        let t = if ticks == 0 {
            0.0
        } else {
            i as f64 / ticks as f64
        };
        let v = ymin + (ymax - ymin) * t;
        max_px = max_px.max(estimate_text_width_px(&y_tick_label(v), font_px));
    }

    // tick marks and breathing room, plus the rotated description
    let desc = if has_desc { font_px + 8 } else { 0 };
    max_px.saturating_add(18 + desc).clamp(48, 180)
}
