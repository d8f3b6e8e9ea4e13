//! Change-rate bar charts, optionally overlaid with `x` markers of a second metric.

use anyhow::{Result, anyhow, bail};
use log::debug;
use plotters::coord::Shift;
use plotters::prelude::*;
use std::path::Path;

use super::category::CategoryAxis;
use super::types::Canvas;
use super::util::{BAR_GREY, MARK_RED, bar_color, mark_color, padded_range, value_range};
use super::{Painter, render};
use crate::models::Labeled;
use crate::parse::sort_by_name;

const BAR_HALF_WIDTH: f64 = 0.4;
const TICK_PT: f64 = 6.5;
const LEGEND_PT: f64 = 6.0;

/// Bars and markers placed on shared category positions.
struct ChangeBars {
    names: Vec<String>,
    bars: Vec<(usize, f64)>,
    marks: Vec<(usize, f64)>,
    y_desc: String,
    bar_legend: Option<String>,
    mark_legend: Option<String>,
    canvas: Canvas,
}

impl ChangeBars {
    /// Value range including zero, so every bar has its base in view.
    fn y_range(&self) -> Result<(f64, f64)> {
        let (lo, hi) = value_range(
            self.bars
                .iter()
                .chain(&self.marks)
                .map(|(_, v)| *v)
                .chain([0.0]),
        )
        .ok_or_else(|| anyhow!("no numeric values to plot"))?;
        Ok(padded_range(lo, hi, 0.05))
    }
}

impl Painter for ChangeBars {
    fn paint<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>) -> Result<()> {
        let y_range = self.y_range()?;
        debug!(
            "bar chart: {} categories, y range {:?}",
            self.names.len(),
            y_range
        );
        let n = self.names.len() as f64;
        let mut chart = CategoryAxis {
            names: self.names.clone(),
            x_range: (-0.5, n - 0.5),
            y_range,
            y_desc: &self.y_desc,
            rotate: true,
            tick_pt: TICK_PT,
        }
        .build(root, &self.canvas)?;

        let bars = chart
            .draw_series(self.bars.iter().map(|(i, v)| {
                let x = *i as f64;
                Rectangle::new(
                    [(x - BAR_HALF_WIDTH, 0.0), (x + BAR_HALF_WIDTH, *v)],
                    bar_color(*v).filled(),
                )
            }))
            .map_err(|e| anyhow!("{:?}", e))?;
        if let Some(label) = &self.bar_legend {
            bars.label(label.as_str())
                .legend(|(x, y)| Rectangle::new([(x, y - 4), (x + 12, y + 4)], BAR_GREY.filled()));
        }

        if !self.marks.is_empty() {
            let size = (self.canvas.pt_to_px(2.0).round() as i32).max(3);
            let marks = chart
                .draw_series(self.marks.iter().map(|(i, v)| {
                    Cross::new((*i as f64, *v), size, mark_color(*v).stroke_width(1))
                }))
                .map_err(|e| anyhow!("{:?}", e))?;
            if let Some(label) = &self.mark_legend {
                marks
                    .label(label.as_str())
                    .legend(move |(x, y)| Cross::new((x + 6, y), size, MARK_RED.stroke_width(1)));
            }
        }

        if self.bar_legend.is_some() || self.mark_legend.is_some() {
            chart
                .configure_series_labels()
                .position(SeriesLabelPosition::LowerRight)
                .background_style(WHITE.mix(0.8))
                .border_style(BLACK)
                .label_font(("sans-serif", self.canvas.font_px(LEGEND_PT)))
                .draw()
                .map_err(|e| anyhow!("{:?}", e))?;
        }
        Ok(())
    }
}

/// Sorted copy of `data`, rejecting empty input.
fn sorted_by_name(data: &[Labeled]) -> Result<Vec<Labeled>> {
    if data.is_empty() {
        bail!("no change rates to plot");
    }
    let mut sorted = data.to_vec();
    sort_by_name(&mut sorted);
    Ok(sorted)
}

/// One bar per entry, ordered by case-insensitive name: grey for growth,
/// mint for shrinkage.
pub fn plot_change_bars<P: AsRef<Path>>(
    data: &[Labeled],
    canvas: &Canvas,
    y_desc: Option<&str>,
    legend: Option<&str>,
    out_path: P,
) -> Result<()> {
    let sorted = sorted_by_name(data)?;
    let painter = ChangeBars {
        bars: sorted.iter().enumerate().map(|(i, p)| (i, p.value)).collect(),
        names: sorted.into_iter().map(|p| p.name).collect(),
        marks: Vec::new(),
        y_desc: y_desc.unwrap_or_default().to_string(),
        bar_legend: legend.map(str::to_string),
        mark_legend: None,
        canvas: *canvas,
    };
    render(&painter, canvas, out_path.as_ref())
}

/// Bars of `bars` (legend `metric_a`) with `x` markers of `points` (legend
/// `metric_b`, red for growth, blue for shrinkage).
///
/// Names only present in `points` get their own category after the bars.
pub fn plot_change_overlay<P: AsRef<Path>>(
    bars: &[Labeled],
    points: &[Labeled],
    metric_a: &str,
    metric_b: &str,
    canvas: &Canvas,
    out_path: P,
) -> Result<()> {
    let bars = sorted_by_name(bars)?;
    let points = sorted_by_name(points)?;

    let mut names: Vec<String> = bars.iter().map(|p| p.name.clone()).collect();
    let mut marks = Vec::with_capacity(points.len());
    for p in &points {
        let idx = match names.iter().position(|n| *n == p.name) {
            Some(idx) => idx,
            None => {
                names.push(p.name.clone());
                names.len() - 1
            }
        };
        marks.push((idx, p.value));
    }

    let painter = ChangeBars {
        bars: bars.iter().enumerate().map(|(i, p)| (i, p.value)).collect(),
        names,
        marks,
        y_desc: String::new(),
        bar_legend: Some(metric_a.to_string()),
        mark_legend: Some(metric_b.to_string()),
        canvas: *canvas,
    };
    render(&painter, canvas, out_path.as_ref())
}
