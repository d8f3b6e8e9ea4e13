use crate::models::AnnotatedPoint;
use anyhow::{Context, Result};
use csv::WriterBuilder;
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// One column of an annotated chart: its axis label and its laid-out points.
pub type LayoutGroup<'a> = (&'a str, &'a [AnnotatedPoint]);

#[derive(Serialize)]
struct LayoutRow<'a> {
    group: &'a str,
    #[serde(flatten)]
    point: &'a AnnotatedPoint,
}

/// Save label layouts as CSV with header.
pub fn save_layout_csv<P: AsRef<Path>>(groups: &[LayoutGroup<'_>], path: P) -> Result<()> {
    let path = path.as_ref();
    let mut wtr = WriterBuilder::new()
        .from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;
    wtr.serialize(("group", "name", "value", "dx", "dy"))?;
    for (group, points) in groups {
        for p in points.iter() {
            wtr.serialize((group, &p.name, p.value, p.dx, p.dy))?;
        }
    }
    wtr.flush()?;
    Ok(())
}

/// Save label layouts as a pretty JSON array of rows.
pub fn save_layout_json<P: AsRef<Path>>(groups: &[LayoutGroup<'_>], path: P) -> Result<()> {
    let path = path.as_ref();
    let rows: Vec<LayoutRow<'_>> = groups
        .iter()
        .flat_map(|(group, points)| points.iter().map(move |point| LayoutRow { group, point }))
        .collect();
    let mut f = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let s = serde_json::to_string_pretty(&rows)?;
    f.write_all(s.as_bytes())?;
    Ok(())
}

/// Pick CSV or JSON from the file extension (CSV when unknown).
pub fn save_layout<P: AsRef<Path>>(groups: &[LayoutGroup<'_>], path: P) -> Result<()> {
    let path = path.as_ref();
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("csv")
        .to_ascii_lowercase();
    match ext.as_str() {
        "json" => save_layout_json(groups, path),
        _ => save_layout_csv(groups, path),
    }
}
