//! Error type shared by the parsing, statistics, and annotation layers.
//!
//! Rendering and file I/O report through `anyhow` instead; these variants are
//! the input problems a caller can reasonably match on.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlotError {
    /// Nothing to parse, annotate, or plot.
    #[error("no values to work with")]
    EmptyInput,

    /// Scale factors drive divisions; zero, negative, and non-finite scales are rejected.
    #[error("scale must be a positive finite number, got {0}")]
    InvalidScale(f64),

    #[error("value at index {index} is not finite: {value}")]
    NonFiniteValue { index: usize, value: f64 },

    /// Values spread so far apart (relative to the scale) that a label offset
    /// is no longer a finite number.
    #[error("label offset at index {index} overflows")]
    OffsetOverflow { index: usize },

    #[error("dpi must be a positive finite number, got {0}")]
    InvalidDpi(f64),

    /// Logarithms and geometric means need strictly positive inputs.
    #[error("{what} must be positive, got {value}")]
    NonPositive { what: String, value: f64 },

    #[error("cannot parse entry '{entry}': {reason}")]
    Parse { entry: String, reason: String },
}

impl PlotError {
    pub(crate) fn parse(entry: &str, reason: impl Into<String>) -> Self {
        PlotError::Parse {
            entry: entry.to_string(),
            reason: reason.into(),
        }
    }
}
