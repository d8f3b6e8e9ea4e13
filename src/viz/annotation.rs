//! Drawing of point labels at precomputed offsets.

use anyhow::{Result, anyhow};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use super::category::CategoryChart;
use super::text::estimate_text_width_px;
use super::types::Canvas;
use super::util::LEADER_GREY;
use crate::models::AnnotatedPoint;

/// `base + delta` in pixels, clamped to one canvas extent around the canvas.
fn shift_px(base: i32, delta: f64, extent: u32) -> i32 {
    let extent = f64::from(extent.max(1));
    (f64::from(base) + delta).round().clamp(-extent, 2.0 * extent) as i32
}

/// Label every point of the column at `x` with its name, shifted by the point's
/// offset and tied to it with a thin leader line.
///
/// Offsets are in points with `dy` pointing up, so they are converted to pixels
/// and `dy` is flipped for the backend's downward y axis.
pub(crate) fn draw_point_labels<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    chart: &CategoryChart<'_, DB>,
    x: f64,
    points: &[AnnotatedPoint],
    canvas: &Canvas,
    font_pt: f64,
) -> Result<()> {
    let font_px = canvas.font_px(font_pt);
    let leader = LEADER_GREY.stroke_width(1);

    for p in points {
        let (px, py) = chart.backend_coord(&(x, p.value));
        let offset = p.offset();
        let tx = shift_px(px, canvas.pt_to_px(offset.dx), canvas.width);
        let ty = shift_px(py, -canvas.pt_to_px(offset.dy), canvas.height);

        let width = estimate_text_width_px(&p.name, font_px) as i32;
        // Leader starts at the label edge nearest to the point.
        let edge_x = if tx.saturating_add(width) <= px {
            tx.saturating_add(width)
        } else {
            tx
        };
        let edge_y = ty - font_px as i32 / 2;

        root.draw(&PathElement::new(vec![(edge_x, edge_y), (px, py)], leader))
            .map_err(|e| anyhow!("{:?}", e))?;

        let style = ("sans-serif", font_px)
            .into_font()
            .color(&BLACK)
            .pos(Pos::new(HPos::Left, VPos::Bottom));
        root.draw(&Text::new(p.name.clone(), (tx, ty), style))
            .map_err(|e| anyhow!("{:?}", e))?;
    }
    Ok(())
}
