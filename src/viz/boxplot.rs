//! Box plots: an annotated pair of benchmark groups, and one box per named
//! sample group of change rates.

use anyhow::{Result, anyhow, bail};
use log::debug;
use plotters::coord::Shift;
use plotters::prelude::*;
use std::path::Path;

use super::category::{CategoryAxis, CategoryChart};
use super::types::Canvas;
use super::util::{BODY_BLUE, MEDIAN_ORANGE, padded_range, value_range};
use super::violin::AnnotatedColumns;
use super::{Painter, render};
use crate::annotate::{AnnotateConfig, layout};
use crate::models::{Labeled, LabeledSamples};
use crate::parse::sort_samples_by_name;
use crate::stats::{BoxStats, box_stats};

const BOX_HALF_WIDTH: f64 = 0.25;

/// Draw one box with whiskers at `x`; outliers are drawn as hollow circles when
/// `fliers` is set.
fn draw_box<DB: DrawingBackend>(
    chart: &mut CategoryChart<'_, DB>,
    x: f64,
    stats: &BoxStats,
    fliers: bool,
) -> Result<()> {
    let w = BOX_HALF_WIDTH;
    let cap = w * 0.5;
    let stroke = BODY_BLUE.stroke_width(1);

    chart
        .draw_series(std::iter::once(Rectangle::new(
            [(x - w, stats.q1), (x + w, stats.q3)],
            stroke,
        )))
        .map_err(|e| anyhow!("{:?}", e))?;
    chart
        .draw_series([
            PathElement::new(vec![(x, stats.q1), (x, stats.whisker_low)], stroke),
            PathElement::new(vec![(x, stats.q3), (x, stats.whisker_high)], stroke),
            PathElement::new(
                vec![(x - cap, stats.whisker_low), (x + cap, stats.whisker_low)],
                stroke,
            ),
            PathElement::new(
                vec![(x - cap, stats.whisker_high), (x + cap, stats.whisker_high)],
                stroke,
            ),
            PathElement::new(
                vec![(x - w, stats.median), (x + w, stats.median)],
                MEDIAN_ORANGE.stroke_width(2),
            ),
        ])
        .map_err(|e| anyhow!("{:?}", e))?;

    if fliers && !stats.outliers.is_empty() {
        chart
            .draw_series(
                stats
                    .outliers
                    .iter()
                    .map(|v| Circle::new((x, *v), 3, BLACK.stroke_width(1))),
            )
            .map_err(|e| anyhow!("{:?}", e))?;
    }
    Ok(())
}

struct BoxPair<'a>(AnnotatedColumns<'a>);

impl Painter for BoxPair<'_> {
    fn paint<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>) -> Result<()> {
        let cols = &self.0;
        let y_range = cols.y_range()?;
        debug!("box pair y range: {:?}", y_range);
        let mut chart = cols.build_chart(root, y_range)?;

        for (i, (_, points)) in cols.columns.iter().enumerate() {
            let values: Vec<f64> = points.iter().map(|p| p.value).collect();
            draw_box(&mut chart, (i + 1) as f64, &box_stats(&values)?, true)?;
        }
        cols.draw_points(root, &mut chart)
    }
}

/// Box plots of raw values for two benchmark groups, every point labeled with
/// its name.
pub fn plot_box_pair<P: AsRef<Path>>(
    a: &[Labeled],
    b: &[Labeled],
    label_a: &str,
    label_b: &str,
    canvas: &Canvas,
    out_path: P,
) -> Result<()> {
    let config = AnnotateConfig::boxplot();
    let painter = BoxPair(AnnotatedColumns {
        columns: [
            (label_a, layout(a, 1.0, &config)?),
            (label_b, layout(b, 1.0, &config)?),
        ],
        y_desc: "Binary Size (MB)",
        canvas: *canvas,
    });
    render(&painter, canvas, out_path.as_ref())
}

struct ChangeBoxes {
    names: Vec<String>,
    stats: Vec<BoxStats>,
    y_desc: String,
    canvas: Canvas,
}

impl Painter for ChangeBoxes {
    fn paint<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>) -> Result<()> {
        // Fliers are hidden, so whiskers bound the visible data.
        let (lo, hi) = value_range(
            self.stats
                .iter()
                .flat_map(|s| [s.whisker_low, s.whisker_high]),
        )
        .ok_or_else(|| anyhow!("no numeric values to plot"))?;
        let y_range = padded_range(lo, hi, 0.05);
        debug!("change box y range: {:?}", y_range);

        let n = self.names.len() as f64;
        let mut chart = CategoryAxis {
            names: self.names.clone(),
            x_range: (-0.5, n - 0.5),
            y_range,
            y_desc: &self.y_desc,
            rotate: true,
            tick_pt: 10.0,
        }
        .build(root, &self.canvas)?;

        for (i, stats) in self.stats.iter().enumerate() {
            draw_box(&mut chart, i as f64, stats, false)?;
        }
        Ok(())
    }
}

/// One box per sample group, ordered by case-insensitive name, fliers hidden.
pub fn plot_change_boxes<P: AsRef<Path>>(
    groups: &[LabeledSamples],
    metric: &str,
    canvas: &Canvas,
    out_path: P,
) -> Result<()> {
    if groups.is_empty() {
        bail!("no sample groups to plot");
    }
    let mut sorted = groups.to_vec();
    sort_samples_by_name(&mut sorted);

    let stats = sorted
        .iter()
        .map(|g| box_stats(&g.values))
        .collect::<Result<Vec<_>, _>>()?;
    let painter = ChangeBoxes {
        names: sorted.into_iter().map(|g| g.name).collect(),
        stats,
        y_desc: format!("Change rate of {metric} (%)"),
        canvas: *canvas,
    };
    render(&painter, canvas, out_path.as_ref())
}
