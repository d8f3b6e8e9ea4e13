//! Public types and constants for the visualization module.

use crate::error::PlotError;

/// Default output resolution in dots per inch.
pub const DEFAULT_DPI: f64 = 100.0;

/// Figure size (in inches) of the annotated violin and box charts.
pub const DEFAULT_FIGURE_INCHES: f64 = 7.0;

/// Output size in pixels plus the resolution used to convert typographic
/// points (label offsets, font sizes) into pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
    pub dpi: f64,
}

impl Canvas {
    pub const fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            dpi: DEFAULT_DPI,
        }
    }

    /// Canvas of `width_in` x `height_in` inches at `dpi`.
    pub fn from_inches(width_in: f64, height_in: f64, dpi: f64) -> Self {
        Self {
            width: (width_in * dpi).round().max(1.0) as u32,
            height: (height_in * dpi).round().max(1.0) as u32,
            dpi,
        }
    }

    pub fn with_dpi(mut self, dpi: f64) -> Self {
        self.dpi = dpi;
        self
    }

    /// Reject resolutions that cannot size fonts and offsets.
    pub fn validate(&self) -> Result<(), PlotError> {
        if !self.dpi.is_finite() || self.dpi <= 0.0 {
            return Err(PlotError::InvalidDpi(self.dpi));
        }
        Ok(())
    }

    /// Points (1/72 inch) to pixels.
    pub fn pt_to_px(&self, pt: f64) -> f64 {
        pt * self.dpi / 72.0
    }

    /// Font size in pixels for a size given in points.
    pub fn font_px(&self, pt: f64) -> u32 {
        self.pt_to_px(pt).round().max(1.0) as u32
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new(800, 600)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inches_and_points() {
        let c = Canvas::from_inches(7.0, 7.0, 100.0);
        assert_eq!((c.width, c.height), (700, 700));
        assert_eq!(c.pt_to_px(72.0), 100.0);
        assert_eq!(c.font_px(9.0), 13);
        assert_eq!(Canvas::new(10, 10).with_dpi(72.0).pt_to_px(5.0), 5.0);
    }

    #[test]
    fn dpi_must_be_positive_and_finite() {
        assert!(Canvas::default().validate().is_ok());
        for dpi in [0.0, -72.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                Canvas::default().with_dpi(dpi).validate(),
                Err(PlotError::InvalidDpi(_))
            ));
        }
    }
}
