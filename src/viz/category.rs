//! Charts with a categorical x axis: one named column per integer position.

use anyhow::{Result, anyhow};
use plotters::coord::Shift;
use plotters::coord::ranged1d::{DefaultFormatting, KeyPointHint, Ranged};
use plotters::coord::types::RangedCoordf64;
use plotters::prelude::*;
use std::ops::Range;

use super::text::{max_text_width_px, truncate_to_width};
use super::types::Canvas;
use super::util::{category_label, compute_left_label_area_px, y_tick_label};

/// Continuous `f64` axis whose ticks sit exactly on the category positions.
///
/// Columns are drawn at fractional x (box and violin widths, bar edges), so the
/// axis stays continuous; only its key points are fixed.
pub(crate) struct CategoryRange {
    inner: RangedCoordf64,
    ticks: Vec<f64>,
}

impl CategoryRange {
    pub(crate) fn new(range: Range<f64>, ticks: Vec<f64>) -> Self {
        Self {
            inner: range.into(),
            ticks,
        }
    }
}

impl Ranged for CategoryRange {
    type FormatOption = DefaultFormatting;
    type ValueType = f64;

    fn map(&self, value: &f64, limit: (i32, i32)) -> i32 {
        self.inner.map(value, limit)
    }

    // Every category gets its tick, however many the mesh asks for.
    fn key_points<Hint: KeyPointHint>(&self, _hint: Hint) -> Vec<f64> {
        self.ticks.clone()
    }

    fn range(&self) -> Range<f64> {
        self.inner.range()
    }
}

pub(crate) type CategoryChart<'a, DB> =
    ChartContext<'a, DB, Cartesian2d<CategoryRange, RangedCoordf64>>;

/// Longest tick label drawn under a rotated category axis.
const MAX_CATEGORY_LABEL_PX: u32 = 160;

/// Axis layout of a category chart.
pub(crate) struct CategoryAxis<'a> {
    /// Tick label at position `i` of the x axis; blank entries get no label.
    pub names: Vec<String>,
    pub x_range: (f64, f64),
    pub y_range: (f64, f64),
    pub y_desc: &'a str,
    /// Draw tick labels vertically (for many, long names).
    pub rotate: bool,
    pub tick_pt: f64,
}

impl CategoryAxis<'_> {
    /// Build the chart and draw its mesh.
    pub(crate) fn build<'r, DB: DrawingBackend>(
        &self,
        root: &'r DrawingArea<DB, Shift>,
        canvas: &Canvas,
    ) -> Result<CategoryChart<'r, DB>> {
        let tick_px = canvas.font_px(self.tick_pt);
        let desc_px = canvas.font_px(self.tick_pt + 2.0);
        let (y_lo, y_hi) = self.y_range;
        let left = compute_left_label_area_px(y_lo, y_hi, 10, tick_px, !self.y_desc.is_empty());

        let names: Vec<String> = if self.rotate {
            self.names
                .iter()
                .map(|n| truncate_to_width(n, tick_px, MAX_CATEGORY_LABEL_PX))
                .collect()
        } else {
            self.names.clone()
        };
        let bottom = if self.rotate {
            max_text_width_px(names.iter().map(String::as_str), tick_px) + 12
        } else {
            tick_px * 3
        };

        let key_points: Vec<f64> = names
            .iter()
            .enumerate()
            .filter(|(_, n)| !n.is_empty())
            .map(|(i, _)| i as f64)
            .collect();

        let mut chart = ChartBuilder::on(root)
            .margin(16)
            .set_label_area_size(LabelAreaPosition::Left, left)
            .set_label_area_size(LabelAreaPosition::Bottom, bottom.max(24))
            .build_cartesian_2d(
                CategoryRange::new(self.x_range.0..self.x_range.1, key_points),
                y_lo..y_hi,
            )
            .map_err(|e| anyhow!("{:?}", e))?;

        let x_label_fmt = |x: &f64| category_label(&names, *x);
        let y_label_fmt = |v: &f64| y_tick_label(*v);
        let x_label_style = if self.rotate {
            ("sans-serif", tick_px)
                .into_font()
                .transform(FontTransform::Rotate90)
        } else {
            ("sans-serif", tick_px).into_font()
        };

        chart
            .configure_mesh()
            .disable_x_mesh()
            .y_labels(10)
            .x_label_formatter(&x_label_fmt)
            .y_label_formatter(&y_label_fmt)
            .x_label_style(x_label_style)
            .y_label_style(("sans-serif", tick_px))
            .y_desc(self.y_desc)
            .axis_desc_style(("sans-serif", desc_px))
            .draw()
            .map_err(|e| anyhow!("{:?}", e))?;
        Ok(chart)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticks_ignore_the_hint() {
        let range = CategoryRange::new(-0.5..11.5, (0..12).map(f64::from).collect());
        assert_eq!(range.key_points(4usize).len(), 12);
        assert_eq!(range.range(), -0.5..11.5);
        assert_eq!(range.map(&-0.5, (0, 1200)), 0);
        assert_eq!(range.map(&5.5, (0, 1200)), 600);
    }
}
