use serde::{Deserialize, Serialize};

/// One `name,value` entry, e.g. a benchmark and its binary size in MB.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Labeled {
    pub name: String,
    pub value: f64,
}

impl Labeled {
    pub fn new(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// One `name:v1,v2,...` entry: repeated measurements of a single benchmark.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LabeledSamples {
    pub name: String,
    pub values: Vec<f64>,
}

/// A data row projected onto two principal components.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PcaPoint {
    pub x: f64,
    pub y: f64,
    pub label: String,
}

/// Displacement of a text label from its anchored point, in typographic points
/// (1/72 inch). Positive `dy` moves the label up.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Offset {
    pub dx: f64,
    pub dy: f64,
}

/// A plotted value together with the label offset computed for it.
///
/// `value` is the value as drawn, i.e. after the layout's transform was applied.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnnotatedPoint {
    pub name: String,
    pub value: f64,
    pub dx: f64,
    pub dy: f64,
}

impl AnnotatedPoint {
    pub fn offset(&self) -> Offset {
        Offset {
            dx: self.dx,
            dy: self.dy,
        }
    }
}
