//! Decoding of the delimited data strings handed over by the benchmark collector.
//!
//! Three encodings are in use, all `;`-separated:
//! - `name,value` pairs (`"syn,1.25;serde,0.8"`)
//! - `name:v1,v2,...` sample groups (`"syn:1.0,2.5;serde:-0.3"`)
//! - `x,y,label` PCA coordinates, usually with a trailing `;`

use crate::error::PlotError;
use crate::models::{Labeled, LabeledSamples, PcaPoint};

fn entries(raw: &str) -> Result<Vec<&str>, PlotError> {
    let out: Vec<&str> = raw
        .split(';')
        .map(str::trim)
        .filter(|e| !e.is_empty())
        .collect();
    if out.is_empty() {
        return Err(PlotError::EmptyInput);
    }
    Ok(out)
}

fn parse_number(entry: &str, field: &str) -> Result<f64, PlotError> {
    let v = field
        .trim()
        .parse::<f64>()
        .map_err(|e| PlotError::parse(entry, format!("'{}' is not a number ({e})", field.trim())))?;
    if !v.is_finite() {
        return Err(PlotError::parse(entry, "value is not finite"));
    }
    Ok(v)
}

/// Parse `name,value;name,value;...`.
pub fn parse_pairs(raw: &str) -> Result<Vec<Labeled>, PlotError> {
    entries(raw)?
        .into_iter()
        .map(|entry| {
            let (name, value) = entry
                .split_once(',')
                .ok_or_else(|| PlotError::parse(entry, "expected 'name,value'"))?;
            let name = name.trim();
            if name.is_empty() {
                return Err(PlotError::parse(entry, "empty name"));
            }
            Ok(Labeled::new(name, parse_number(entry, value)?))
        })
        .collect()
}

/// Parse `name:v1,v2,...;name:v1,...`.
pub fn parse_samples(raw: &str) -> Result<Vec<LabeledSamples>, PlotError> {
    entries(raw)?
        .into_iter()
        .map(|entry| {
            let (name, rest) = entry
                .split_once(':')
                .ok_or_else(|| PlotError::parse(entry, "expected 'name:v1,v2,...'"))?;
            let name = name.trim();
            if name.is_empty() {
                return Err(PlotError::parse(entry, "empty name"));
            }
            let values = rest
                .split(',')
                .filter(|v| !v.trim().is_empty())
                .map(|v| parse_number(entry, v))
                .collect::<Result<Vec<f64>, PlotError>>()?;
            if values.is_empty() {
                return Err(PlotError::parse(entry, "no samples"));
            }
            Ok(LabeledSamples {
                name: name.to_string(),
                values,
            })
        })
        .collect()
}

/// Parse `x,y,label;x,y,label;`. Labels may not contain commas.
pub fn parse_pca_points(raw: &str) -> Result<Vec<PcaPoint>, PlotError> {
    entries(raw)?
        .into_iter()
        .map(|entry| {
            let fields: Vec<&str> = entry.split(',').collect();
            let [x, y, label] = fields.as_slice() else {
                return Err(PlotError::parse(entry, "expected 'x,y,label'"));
            };
            Ok(PcaPoint {
                x: parse_number(entry, x)?,
                y: parse_number(entry, y)?,
                label: label.trim().to_string(),
            })
        })
        .collect()
}

/// Ascending by value; ties keep their input order.
pub fn sort_by_value(points: &mut [Labeled]) {
    points.sort_by(|a, b| a.value.total_cmp(&b.value));
}

/// Case-insensitive by name, the order bar charts use.
pub fn sort_by_name(points: &mut [Labeled]) {
    points.sort_by_cached_key(|p| p.name.to_lowercase());
}

pub fn sort_samples_by_name(groups: &mut [LabeledSamples]) {
    groups.sort_by_cached_key(|g| g.name.to_lowercase());
}

/// Inverse of [`parse_pairs`]: `name,value` entries joined by `;`.
pub fn encode_pairs<'a, I>(pairs: I) -> String
where
    I: IntoIterator<Item = (&'a str, f64)>,
{
    pairs
        .into_iter()
        .map(|(k, v)| format!("{},{}", k, v))
        .collect::<Vec<String>>()
        .join(";")
}
