use crate::error::PlotError;
use crate::models::{Labeled, LabeledSamples};
use crate::parse::{sort_by_name, sort_by_value};
use serde::{Deserialize, Serialize};

/// Five-number summary plus mean, as drawn by a box plot.
///
/// Whiskers reach the furthest datum within 1.5 IQR of the box; anything beyond
/// is an outlier.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BoxStats {
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub whisker_low: f64,
    pub whisker_high: f64,
    pub mean: f64,
    pub outliers: Vec<f64>,
}

pub fn arithmetic_mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

/// Geometric mean, computed in log space so long inputs do not overflow.
pub fn geometric_mean(values: &[f64]) -> Result<f64, PlotError> {
    if values.is_empty() {
        return Err(PlotError::EmptyInput);
    }
    let mut log_sum = 0.0;
    for (i, &v) in values.iter().enumerate() {
        if v <= 0.0 || v.is_nan() {
            return Err(PlotError::NonPositive {
                what: format!("value at index {i}"),
                value: v,
            });
        }
        log_sum += v.ln();
    }
    Ok((log_sum / values.len() as f64).exp())
}

fn sorted_copy(values: &[f64]) -> Vec<f64> {
    let mut v = values.to_vec();
    v.sort_by(f64::total_cmp);
    v
}

/// Percentile `p` in `[0, 1]` of already sorted values, interpolating linearly
/// between the two closest ranks.
fn percentile_sorted(sorted: &[f64], p: f64) -> f64 {
    let pos = p * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(percentile_sorted(&sorted_copy(values), 0.5))
}

/// `(q1, median, q3)`.
pub fn quartiles(values: &[f64]) -> Option<(f64, f64, f64)> {
    if values.is_empty() {
        return None;
    }
    let s = sorted_copy(values);
    Some((
        percentile_sorted(&s, 0.25),
        percentile_sorted(&s, 0.5),
        percentile_sorted(&s, 0.75),
    ))
}

pub fn box_stats(values: &[f64]) -> Result<BoxStats, PlotError> {
    if values.is_empty() {
        return Err(PlotError::EmptyInput);
    }
    let s = sorted_copy(values);
    let q1 = percentile_sorted(&s, 0.25);
    let median = percentile_sorted(&s, 0.5);
    let q3 = percentile_sorted(&s, 0.75);
    let iqr = q3 - q1;
    let (lo_fence, hi_fence) = (q1 - 1.5 * iqr, q3 + 1.5 * iqr);

    let whisker_low = s
        .iter()
        .copied()
        .find(|v| *v >= lo_fence)
        .unwrap_or(q1)
        .min(q1);
    let whisker_high = s
        .iter()
        .rev()
        .copied()
        .find(|v| *v <= hi_fence)
        .unwrap_or(q3)
        .max(q3);
    let outliers = s
        .iter()
        .copied()
        .filter(|v| *v < whisker_low || *v > whisker_high)
        .collect();

    Ok(BoxStats {
        q1,
        median,
        q3,
        whisker_low,
        whisker_high,
        mean: s.iter().sum::<f64>() / s.len() as f64,
        outliers,
    })
}

/// Replace every value by its natural logarithm.
pub fn log_transform(points: &[Labeled]) -> Result<Vec<Labeled>, PlotError> {
    points
        .iter()
        .map(|p| {
            if p.value <= 0.0 {
                Err(PlotError::NonPositive {
                    what: format!("value of '{}'", p.name),
                    value: p.value,
                })
            } else {
                Ok(Labeled::new(p.name.clone(), p.value.ln()))
            }
        })
        .collect()
}

/// Gaussian kernel density estimate of `values`, evaluated at each `grid` point.
///
/// Bandwidth follows Scott's rule, `n^(-1/5)` times the sample standard
/// deviation. A single value or zero spread falls back to a bandwidth derived
/// from the magnitude of the data.
pub fn gaussian_kde(values: &[f64], grid: &[f64]) -> Result<Vec<f64>, PlotError> {
    let n = values.len();
    if n == 0 {
        return Err(PlotError::EmptyInput);
    }
    let mean = values.iter().sum::<f64>() / n as f64;
    let std = if n > 1 {
        (values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1) as f64).sqrt()
    } else {
        0.0
    };
    let spread = if std > 0.0 {
        std
    } else if mean.abs() > 0.0 {
        mean.abs() * 0.1
    } else {
        1.0
    };
    let bw = (n as f64).powf(-0.2) * spread;
    let norm = 1.0 / (n as f64 * bw * (2.0 * std::f64::consts::PI).sqrt());

    Ok(grid
        .iter()
        .map(|&x| {
            values
                .iter()
                .map(|&xi| {
                    let z = (x - xi) / bw;
                    (-0.5 * z * z).exp()
                })
                .sum::<f64>()
                * norm
        })
        .collect())
}

/// `(name, value)` pairs in ascending value order, for console reports.
/// Equal values are listed by case-insensitive name.
pub fn rank_by_value(points: &[Labeled]) -> Vec<(String, f64)> {
    let mut sorted = points.to_vec();
    sort_by_name(&mut sorted);
    sort_by_value(&mut sorted);
    sorted.into_iter().map(|p| (p.name, p.value)).collect()
}

/// Per-group means, ranked ascending, and the mean of those means.
pub fn rank_sample_means(groups: &[LabeledSamples]) -> (Vec<(String, f64)>, Option<f64>) {
    let means: Vec<Labeled> = groups
        .iter()
        .filter_map(|g| arithmetic_mean(&g.values).map(|m| Labeled::new(g.name.clone(), m)))
        .collect();
    let overall = arithmetic_mean(&means.iter().map(|m| m.value).collect::<Vec<_>>());
    (rank_by_value(&means), overall)
}
