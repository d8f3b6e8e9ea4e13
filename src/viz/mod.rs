//! Chart rendering to **SVG** or bitmap (**PNG**, JPEG, BMP), chosen by file extension.
//!
//! - Paired violins of log-transformed sizes with annotated points
//! - Paired box plots with annotated points
//! - Change-rate bar charts, optionally overlaid with a second metric
//! - Grouped box plots of change-rate samples
//! - Labeled PCA scatter plots

mod annotation;
pub mod bars;
pub mod boxplot;
mod category;
pub mod scatter;
pub mod text;
pub mod types;
pub mod util;
pub mod violin;

pub use bars::{plot_change_bars, plot_change_overlay};
pub use boxplot::{plot_box_pair, plot_change_boxes};
pub use scatter::{PCA_CANVAS, plot_pca_scatter};
pub use types::Canvas;
pub use violin::plot_violin_pair;

use anyhow::{Result, anyhow, bail};
use log::info;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters_bitmap::BitMapBackend;
use plotters_svg::SVGBackend;
use std::path::Path;
use std::sync::Once;

/// One-time registration of the bundled "sans-serif" font for the `ab_glyph` text path,
/// which does not discover OS fonts.
static INIT_FONTS: Once = Once::new();

fn ensure_fonts_registered() {
    INIT_FONTS.call_once(|| {
        let _ = plotters::style::register_font(
            "sans-serif",
            plotters::style::FontStyle::Normal,
            include_bytes!("../../assets/DejaVuSans.ttf"),
        );
    });
}

/// A chart that can draw itself onto any Plotters backend.
pub(crate) trait Painter {
    fn paint<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>) -> Result<()>;
}

const BITMAP_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "bmp"];

/// Open the backend matching `out_path`'s extension, let `painter` draw, and write the file.
pub(crate) fn render<P: Painter>(painter: &P, canvas: &Canvas, out_path: &Path) -> Result<()> {
    canvas.validate()?;
    if canvas.width == 0 || canvas.height == 0 {
        bail!("chart size {}x{} has no area", canvas.width, canvas.height);
    }
    ensure_fonts_registered();
    let ext = out_path
        .extension()
        .and_then(|s| s.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    let size = (canvas.width, canvas.height);

    if ext == "svg" {
        let root = SVGBackend::new(out_path, size).into_drawing_area();
        root.fill(&WHITE).map_err(|e| anyhow!("{:?}", e))?;
        painter.paint(&root)?;
        root.present().map_err(|e| anyhow!("{:?}", e))?;
    } else if BITMAP_EXTENSIONS.contains(&ext.as_str()) {
        let root = BitMapBackend::new(out_path, size).into_drawing_area();
        root.fill(&WHITE).map_err(|e| anyhow!("{:?}", e))?;
        painter.paint(&root)?;
        root.present().map_err(|e| anyhow!("{:?}", e))?;
    } else {
        bail!(
            "unsupported image format '{}' for {} (use svg, png, jpg or bmp)",
            ext,
            out_path.display()
        );
    }

    info!(
        "wrote {}x{} chart to {}",
        canvas.width,
        canvas.height,
        out_path.display()
    );
    Ok(())
}
