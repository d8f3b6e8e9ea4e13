//! Label placement for columns of annotated points.
//!
//! Points of one column are labeled alternately to the left (even indices) and
//! to the right (odd indices). Each side keeps its own vertical accumulator, and
//! a label is pushed away from its point when the value sits too close to the
//! same-side neighbour two positions back.
//!
//! ```
//! use benchplot_rs::annotate::{annotate, AnnotateConfig};
//!
//! let offsets = annotate(&[1.0, 2.0, 3.0, 4.0], 7.0, &AnnotateConfig::violin())?;
//! assert_eq!(offsets.len(), 4);
//! assert!(offsets[0].dx < 0.0 && offsets[1].dx > 0.0);
//! # Ok::<(), benchplot_rs::PlotError>(())
//! ```

use crate::error::PlotError;
use crate::models::{AnnotatedPoint, Labeled, Offset};
use crate::parse::sort_by_value;
use crate::stats::log_transform;

/// What happens to a side's offset once a gap is wide enough.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OffsetUpdate {
    /// The offset becomes `tolerance - gap`. This is negative, so the label may
    /// end up on the far side of its point.
    Reset,
    /// The offset shrinks by the excess over the tolerance, never below zero.
    Clamped,
}

/// Transform applied to values before they are laid out (and drawn).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueTransform {
    Identity,
    /// For long-tailed data shown on a log axis.
    NaturalLog,
}

/// Constants of the placement heuristic. All of them are combined with the
/// `scale` passed to [`annotate`]:
///
/// - scaled gap = `(v[i] - v[i-2]) * scale * multiplier`
/// - tolerance = `tolerance / scale`
/// - `dx` = `left_dx / scale` (even) or `right_dx / scale` (odd)
/// - starting offset = `initial_offset * scale`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnnotateConfig {
    pub multiplier: f64,
    pub tolerance: f64,
    pub left_dx: f64,
    pub right_dx: f64,
    pub initial_offset: f64,
    pub update: OffsetUpdate,
    pub transform: ValueTransform,
}

impl AnnotateConfig {
    /// Layout used next to violins of log-transformed sizes; meant for `scale = 7`.
    pub const fn violin() -> Self {
        Self {
            multiplier: 1.6,
            tolerance: 35.0,
            left_dx: -480.0,
            right_dx: 210.0,
            initial_offset: -2.0,
            update: OffsetUpdate::Reset,
            transform: ValueTransform::NaturalLog,
        }
    }

    /// Layout used next to box plots of raw values; meant for `scale = 1`.
    pub const fn boxplot() -> Self {
        Self {
            multiplier: 1.0,
            tolerance: 7.0,
            left_dx: -80.0,
            right_dx: 20.0,
            initial_offset: 0.0,
            update: OffsetUpdate::Clamped,
            transform: ValueTransform::Identity,
        }
    }

    /// Effective tolerance for a given scale.
    pub fn tolerance_at(&self, scale: f64) -> f64 {
        self.tolerance / scale
    }

    /// Offset every label starts from before any collision check.
    pub fn initial_offset_at(&self, scale: f64) -> Offset {
        Offset {
            dx: self.left_dx / scale,
            dy: self.initial_offset * scale,
        }
    }
}

impl Default for AnnotateConfig {
    fn default() -> Self {
        Self::violin()
    }
}

fn validate(values: &[f64], scale: f64) -> Result<(), PlotError> {
    if values.is_empty() {
        return Err(PlotError::EmptyInput);
    }
    if !scale.is_finite() || scale <= 0.0 {
        return Err(PlotError::InvalidScale(scale));
    }
    if let Some((index, &value)) = values.iter().enumerate().find(|(_, v)| !v.is_finite()) {
        return Err(PlotError::NonFiniteValue { index, value });
    }
    Ok(())
}

/// Compute one label offset per value.
///
/// `values` must be sorted ascending; that is not checked. The result has the
/// same length and order as `values`. Empty input, a non-positive `scale`, and
/// non-finite values are rejected, as are scales and spreads so extreme that an
/// offset would not be finite.
pub fn annotate(
    values: &[f64],
    scale: f64,
    config: &AnnotateConfig,
) -> Result<Vec<Offset>, PlotError> {
    validate(values, scale)?;

    let tolerance = config.tolerance_at(scale);
    let start = config.initial_offset * scale;
    // [left, right]
    let side_dx = [config.left_dx / scale, config.right_dx / scale];
    if !tolerance.is_finite() || !start.is_finite() || side_dx.iter().any(|d| !d.is_finite()) {
        return Err(PlotError::InvalidScale(scale));
    }
    let mut side = [start, start];
    let mut offsets = Vec::with_capacity(values.len());

    for (i, &value) in values.iter().enumerate() {
        let parity = i % 2;
        let mut cur = side[parity];

        if i >= 2 {
            let gap = (value - values[i - 2]) * scale * config.multiplier;
            if !gap.is_finite() {
                return Err(PlotError::OffsetOverflow { index: i });
            }
            cur = if gap < tolerance {
                cur + (tolerance - gap)
            } else {
                match config.update {
                    OffsetUpdate::Reset => tolerance - gap,
                    OffsetUpdate::Clamped => (cur - (gap - tolerance)).max(0.0),
                }
            };
            if !cur.is_finite() {
                return Err(PlotError::OffsetOverflow { index: i });
            }
        }

        side[parity] = cur;
        offsets.push(Offset {
            dx: side_dx[parity],
            dy: cur,
        });
    }

    Ok(offsets)
}

/// Sort labeled values, apply the config's transform, and annotate them.
///
/// The returned rows carry the transformed value, i.e. the y position the
/// point is drawn at.
pub fn layout(
    points: &[Labeled],
    scale: f64,
    config: &AnnotateConfig,
) -> Result<Vec<AnnotatedPoint>, PlotError> {
    if points.is_empty() {
        return Err(PlotError::EmptyInput);
    }
    let mut plotted = match config.transform {
        ValueTransform::Identity => points.to_vec(),
        ValueTransform::NaturalLog => log_transform(points)?,
    };
    sort_by_value(&mut plotted);

    let values: Vec<f64> = plotted.iter().map(|p| p.value).collect();
    let offsets = annotate(&values, scale, config)?;

    Ok(plotted
        .into_iter()
        .zip(offsets)
        .map(|(p, o)| AnnotatedPoint {
            name: p.name,
            value: p.value,
            dx: o.dx,
            dy: o.dy,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn reproduces_reference_arithmetic() {
        let cfg = AnnotateConfig::violin();
        assert!(close(cfg.tolerance_at(7.0), 5.0));

        let out = annotate(&[1.0, 2.0, 3.0, 4.0], 7.0, &cfg).unwrap();
        // gap 2.0 * 7 * 1.6 = 22.4 exceeds the tolerance of 5.0
        assert!(close(out[2].dy, 5.0 - 22.4), "got {}", out[2].dy);
        assert!(close(out[2].dy, -17.4));
        assert!(close(out[3].dy, -17.4));
    }

    #[test]
    fn short_inputs_keep_initial_offset() {
        for cfg in [AnnotateConfig::violin(), AnnotateConfig::boxplot()] {
            for values in [vec![3.0], vec![1.0, 1.0], vec![0.5, 9.0]] {
                let scale = 7.0;
                let out = annotate(&values, scale, &cfg).unwrap();
                let init = cfg.initial_offset_at(scale);
                assert_eq!(out.len(), values.len());
                for o in &out {
                    assert!(close(o.dy, init.dy));
                }
                assert!(close(out[0].dx, init.dx));
            }
        }
    }

    #[test]
    fn dx_alternates_by_parity() {
        let values: Vec<f64> = (0..9).map(|i| i as f64 * 0.3).collect();
        for scale in [0.5, 1.0, 7.0, 100.0] {
            for cfg in [AnnotateConfig::violin(), AnnotateConfig::boxplot()] {
                let out = annotate(&values, scale, &cfg).unwrap();
                assert_eq!(out.len(), values.len());
                for (i, o) in out.iter().enumerate() {
                    if i % 2 == 0 {
                        assert!(o.dx < 0.0);
                    } else {
                        assert!(o.dx > 0.0);
                    }
                }
            }
        }
    }

    #[test]
    fn crowded_values_spread_labels_without_bound() {
        // Every same-side gap is 0.02 * 7 * 1.6 = 0.224, far below the tolerance of 5.
        let values: Vec<f64> = (0..20).map(|i| 1.0 + i as f64 * 0.01).collect();
        let out = annotate(&values, 7.0, &AnnotateConfig::violin()).unwrap();
        for i in 2..out.len() {
            assert!(out[i].dy > out[i - 2].dy);
        }
        assert!(out[19].dy > 25.0);

        let out = annotate(&values, 1.0, &AnnotateConfig::boxplot()).unwrap();
        for i in 2..out.len() {
            assert!(out[i].dy > out[i - 2].dy);
        }
    }

    #[test]
    fn sparse_values_pack_labels_tightly() {
        let values: Vec<f64> = (0..12).map(|i| i as f64 * 10.0).collect();
        let out = annotate(&values, 7.0, &AnnotateConfig::violin()).unwrap();
        for o in &out[2..] {
            assert!(o.dy <= 0.0);
        }

        let out = annotate(&values, 1.0, &AnnotateConfig::boxplot()).unwrap();
        for o in &out[2..] {
            assert!(close(o.dy, 0.0));
        }
    }

    #[test]
    fn clamped_update_recovers_gradually() {
        // left column: 0, 1, 2 (crowded), then 30 (roomy)
        let values = [0.0, 100.0, 1.0, 101.0, 2.0, 102.0, 30.0, 103.0];
        let out = annotate(&values, 1.0, &AnnotateConfig::boxplot()).unwrap();
        assert!(close(out[2].dy, 6.0));
        assert!(close(out[4].dy, 12.0));
        // gap 28 exceeds the tolerance by 21, clamped at zero
        assert!(close(out[6].dy, 0.0));
        // the right column is independent
        assert!(close(out[3].dy, 6.0));
    }

    #[test]
    fn repeated_calls_agree() {
        let values = [0.1, 0.2, 0.25, 0.9, 1.4, 1.41, 3.0];
        let cfg = AnnotateConfig::violin();
        assert_eq!(
            annotate(&values, 7.0, &cfg).unwrap(),
            annotate(&values, 7.0, &cfg).unwrap()
        );
    }

    #[test]
    fn rejects_bad_input() {
        let cfg = AnnotateConfig::default();
        assert_eq!(annotate(&[], 7.0, &cfg), Err(PlotError::EmptyInput));
        assert_eq!(
            annotate(&[1.0], 0.0, &cfg),
            Err(PlotError::InvalidScale(0.0))
        );
        assert!(matches!(
            annotate(&[1.0], -3.0, &cfg),
            Err(PlotError::InvalidScale(_))
        ));
        assert!(matches!(
            annotate(&[1.0], f64::NAN, &cfg),
            Err(PlotError::InvalidScale(_))
        ));
        assert!(matches!(
            annotate(&[1.0, f64::INFINITY], 7.0, &cfg),
            Err(PlotError::NonFiniteValue { index: 1, .. })
        ));
    }

    #[test]
    fn rejects_offsets_that_overflow() {
        let cfg = AnnotateConfig::violin();
        // 35 / 1e-310 and -480 / 1e-310 are infinite
        assert_eq!(
            annotate(&[1.0, 2.0, 3.0], 1e-310, &cfg),
            Err(PlotError::InvalidScale(1e-310))
        );
        // the scaled gap 2e308 * 7 * 1.6 overflows
        assert_eq!(
            annotate(&[-1e308, 0.0, 1e308], 7.0, &cfg),
            Err(PlotError::OffsetOverflow { index: 2 })
        );
        assert_eq!(
            annotate(&[-1e308, 0.0, 1e308], 1.0, &AnnotateConfig::boxplot()),
            Err(PlotError::OffsetOverflow { index: 2 })
        );

        // tiny but workable scales still produce finite offsets
        let out = annotate(&[1.0, 2.0, 3.0], 1e-7, &cfg).unwrap();
        assert!(out.iter().all(|o| o.dx.is_finite() && o.dy.is_finite()));
    }

    #[test]
    fn layout_sorts_and_transforms() {
        let points = vec![
            Labeled::new("c", std::f64::consts::E * std::f64::consts::E),
            Labeled::new("a", 1.0),
            Labeled::new("b", std::f64::consts::E),
        ];
        let rows = layout(&points, 7.0, &AnnotateConfig::violin()).unwrap();
        let names: Vec<&str> = rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["a", "b", "c"]);
        assert!(close(rows[0].value, 0.0));
        assert!(close(rows[1].value, 1.0));
        assert!(close(rows[2].value, 2.0));
        // ln gap 2.0 -> 22.4 scaled
        assert!(close(rows[2].dy, -17.4));
    }

    #[test]
    fn layout_rejects_non_positive_for_log() {
        let points = vec![Labeled::new("zero", 0.0)];
        assert!(matches!(
            layout(&points, 7.0, &AnnotateConfig::violin()),
            Err(PlotError::NonPositive { .. })
        ));
        let rows = layout(&points, 1.0, &AnnotateConfig::boxplot()).unwrap();
        assert_eq!(rows.len(), 1);
    }
}
