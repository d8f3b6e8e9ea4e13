//! Labeled scatter plot of two principal components.

use anyhow::{Result, anyhow, bail};
use log::debug;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::path::Path;

use super::types::Canvas;
use super::util::{
    BODY_BLUE, PLOT_BACKGROUND, compute_left_label_area_px, padded_range, value_range,
    y_tick_label,
};
use super::{Painter, render};
use crate::models::PcaPoint;

/// Square canvas used by the PCA export.
pub const PCA_CANVAS: Canvas = Canvas::new(400, 400);

struct PcaScatter<'a> {
    points: &'a [PcaPoint],
    x_desc: String,
    y_desc: String,
    canvas: Canvas,
}

impl Painter for PcaScatter<'_> {
    fn paint<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>) -> Result<()> {
        let (x_lo, x_hi) = value_range(self.points.iter().map(|p| p.x))
            .ok_or_else(|| anyhow!("no numeric x values to plot"))?;
        let (y_lo, y_hi) = value_range(self.points.iter().map(|p| p.y))
            .ok_or_else(|| anyhow!("no numeric y values to plot"))?;
        let x_range = padded_range(x_lo, x_hi, 0.1);
        // Extra room below for the labels under the lowest points.
        let y_range = padded_range(y_lo, y_hi, 0.15);
        debug!("pca ranges: x {:?}, y {:?}", x_range, y_range);

        let tick_px = self.canvas.font_px(9.0);
        let left = compute_left_label_area_px(y_range.0, y_range.1, 8, tick_px, true);

        let mut chart = ChartBuilder::on(root)
            .margin(12)
            .set_label_area_size(LabelAreaPosition::Left, left)
            .set_label_area_size(LabelAreaPosition::Bottom, tick_px * 4)
            .build_cartesian_2d(x_range.0..x_range.1, y_range.0..y_range.1)
            .map_err(|e| anyhow!("{:?}", e))?;

        chart
            .plotting_area()
            .fill(&PLOT_BACKGROUND)
            .map_err(|e| anyhow!("{:?}", e))?;

        let tick_fmt = |v: &f64| y_tick_label(*v);
        chart
            .configure_mesh()
            .x_labels(8)
            .y_labels(8)
            .x_label_formatter(&tick_fmt)
            .y_label_formatter(&tick_fmt)
            .bold_line_style(WHITE.stroke_width(1))
            .light_line_style(TRANSPARENT)
            .x_desc(self.x_desc.as_str())
            .y_desc(self.y_desc.as_str())
            .label_style(("sans-serif", tick_px))
            .axis_desc_style(("sans-serif", tick_px + 2))
            .draw()
            .map_err(|e| anyhow!("{:?}", e))?;

        let radius = (self.canvas.pt_to_px(3.0).round() as i32).max(3);
        let label_style = ("sans-serif", tick_px)
            .into_font()
            .color(&BLACK)
            .pos(Pos::new(HPos::Center, VPos::Top));
        chart
            .draw_series(self.points.iter().map(|p| {
                EmptyElement::at((p.x, p.y))
                    + Circle::new((0, 0), radius, BODY_BLUE.filled())
                    + Text::new(p.label.clone(), (0, radius + 2), label_style.clone())
            }))
            .map_err(|e| anyhow!("{:?}", e))?;
        Ok(())
    }
}

/// Scatter of PCA coordinates with each label centered under its marker, axes
/// titled after the plotted components.
pub fn plot_pca_scatter<P: AsRef<Path>>(
    points: &[PcaPoint],
    pc_x: u32,
    pc_y: u32,
    canvas: &Canvas,
    out_path: P,
) -> Result<()> {
    if points.is_empty() {
        bail!("no PCA points to plot");
    }
    let painter = PcaScatter {
        points,
        x_desc: format!("Principal Component {pc_x}"),
        y_desc: format!("Principal Component {pc_y}"),
        canvas: *canvas,
    };
    render(&painter, canvas, out_path.as_ref())
}
