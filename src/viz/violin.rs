//! Paired violin plots of log-transformed values with annotated points.

use anyhow::{Result, anyhow};
use log::debug;
use plotters::coord::Shift;
use plotters::prelude::*;
use std::path::Path;

use super::annotation::draw_point_labels;
use super::category::{CategoryAxis, CategoryChart};
use super::types::Canvas;
use super::util::{BODY_BLUE, MEDIAN_ORANGE, POINT_GREEN, padded_range, value_range};
use super::{Painter, render};
use crate::annotate::{AnnotateConfig, layout};
use crate::models::{AnnotatedPoint, Labeled};
use crate::stats::{gaussian_kde, median};

/// Half of a violin's maximal width, in x-axis units (columns are 1 apart).
const HALF_WIDTH: f64 = 0.25;
const KDE_STEPS: usize = 100;
const LABEL_FONT_PT: f64 = 9.0;

/// Two annotated columns at x = 1 and x = 2.
pub(crate) struct AnnotatedColumns<'a> {
    pub columns: [(&'a str, Vec<AnnotatedPoint>); 2],
    pub y_desc: &'a str,
    pub canvas: Canvas,
}

impl AnnotatedColumns<'_> {
    /// Chart with both columns' axes and mesh drawn, ready for the bodies.
    pub(crate) fn build_chart<'r, DB: DrawingBackend>(
        &self,
        root: &'r DrawingArea<DB, Shift>,
        y_range: (f64, f64),
    ) -> Result<CategoryChart<'r, DB>> {
        CategoryAxis {
            names: vec![
                String::new(),
                self.columns[0].0.to_string(),
                self.columns[1].0.to_string(),
            ],
            x_range: (0.4, 2.6),
            y_range,
            y_desc: self.y_desc,
            rotate: false,
            tick_pt: 8.0,
        }
        .build(root, &self.canvas)
    }

    /// Green markers and labels for both columns.
    pub(crate) fn draw_points<DB: DrawingBackend>(
        &self,
        root: &DrawingArea<DB, Shift>,
        chart: &mut CategoryChart<'_, DB>,
    ) -> Result<()> {
        let radius = (self.canvas.pt_to_px(1.0).round() as i32).max(2);
        for (i, (_, points)) in self.columns.iter().enumerate() {
            let x = (i + 1) as f64;
            chart
                .draw_series(
                    points
                        .iter()
                        .map(|p| Circle::new((x, p.value), radius, POINT_GREEN.filled())),
                )
                .map_err(|e| anyhow!("{:?}", e))?;
            draw_point_labels(root, chart, x, points, &self.canvas, LABEL_FONT_PT)?;
        }
        Ok(())
    }

    pub(crate) fn y_range(&self) -> Result<(f64, f64)> {
        let (lo, hi) = value_range(
            self.columns
                .iter()
                .flat_map(|(_, pts)| pts.iter().map(|p| p.value)),
        )
        .ok_or_else(|| anyhow!("no numeric values to plot"))?;
        Ok(padded_range(lo, hi, 0.08))
    }
}

struct ViolinPair<'a>(AnnotatedColumns<'a>);

impl Painter for ViolinPair<'_> {
    fn paint<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>) -> Result<()> {
        let cols = &self.0;
        let y_range = cols.y_range()?;
        debug!("violin y range: {:?}", y_range);
        let mut chart = cols.build_chart(root, y_range)?;

        for (i, (_, points)) in cols.columns.iter().enumerate() {
            let values: Vec<f64> = points.iter().map(|p| p.value).collect();
            draw_violin(&mut chart, (i + 1) as f64, &values)?;
        }
        cols.draw_points(root, &mut chart)
    }
}

/// Mirrored density outline between the column's extremes, with extrema bars
/// and a median bar.
fn draw_violin<DB: DrawingBackend>(
    chart: &mut CategoryChart<'_, DB>,
    x: f64,
    values: &[f64],
) -> Result<()> {
    let (lo, hi) = value_range(values.iter().copied())
        .ok_or_else(|| anyhow!("no numeric values for violin"))?;

    if hi > lo {
        let grid: Vec<f64> = (0..KDE_STEPS)
            .map(|i| lo + (hi - lo) * i as f64 / (KDE_STEPS - 1) as f64)
            .collect();
        let density = gaussian_kde(values, &grid)?;
        let peak = density.iter().copied().fold(0.0, f64::max);
        if peak > 0.0 {
            let widths: Vec<f64> = density.iter().map(|d| d / peak * HALF_WIDTH).collect();
            let mut outline: Vec<(f64, f64)> = grid
                .iter()
                .zip(&widths)
                .map(|(y, w)| (x + w, *y))
                .collect();
            outline.extend(grid.iter().zip(&widths).rev().map(|(y, w)| (x - w, *y)));

            chart
                .draw_series(std::iter::once(Polygon::new(
                    outline.clone(),
                    BODY_BLUE.mix(0.3).filled(),
                )))
                .map_err(|e| anyhow!("{:?}", e))?;
            if let Some(first) = outline.first().copied() {
                outline.push(first);
            }
            chart
                .draw_series(LineSeries::new(outline, BODY_BLUE.stroke_width(1)))
                .map_err(|e| anyhow!("{:?}", e))?;
        }
    }

    let med = median(values).unwrap_or(lo);
    let stroke = BODY_BLUE.stroke_width(1);
    let cap = HALF_WIDTH * 0.4;
    chart
        .draw_series([
            PathElement::new(vec![(x, lo), (x, hi)], stroke),
            PathElement::new(vec![(x - cap, lo), (x + cap, lo)], stroke),
            PathElement::new(vec![(x - cap, hi), (x + cap, hi)], stroke),
            PathElement::new(
                vec![(x - cap * 1.5, med), (x + cap * 1.5, med)],
                MEDIAN_ORANGE.stroke_width(2),
            ),
        ])
        .map_err(|e| anyhow!("{:?}", e))?;
    Ok(())
}

/// Violins of `ln(value)` for two benchmark groups, every point labeled with
/// its name.
///
/// `scale` is the label layout scale (7 matches a 7-inch figure).
pub fn plot_violin_pair<P: AsRef<Path>>(
    a: &[Labeled],
    b: &[Labeled],
    label_a: &str,
    label_b: &str,
    canvas: &Canvas,
    scale: f64,
    out_path: P,
) -> Result<()> {
    let config = AnnotateConfig::violin();
    let painter = ViolinPair(AnnotatedColumns {
        columns: [
            (label_a, layout(a, scale, &config)?),
            (label_b, layout(b, scale, &config)?),
        ],
        y_desc: "log (Binary Size (MB))",
        canvas: *canvas,
    });
    render(&painter, canvas, out_path.as_ref())
}
