//! benchplot_rs
//!
//! Charts for compiler benchmark results: binary sizes of two toolchains side by
//! side, per-benchmark change rates, and PCA projections of benchmark features.
//! Pairs with the `benchplot` CLI.
//!
//! ### Features
//! - Parse the `name,value;name,value` strings the benchmark collector emits
//! - Lay out point labels so neighbouring names do not collide
//! - Geometric / arithmetic means, quartiles, and kernel density estimates
//! - Generate SVG/PNG violin, box, bar, and scatter charts
//! - Save the computed label layout as CSV or JSON
//!
//! ### Example
//! ```no_run
//! use benchplot_rs::{AnnotateConfig, parse_pairs, viz};
//!
//! let rustc = parse_pairs("syn,1.9;serde,2.4;regex,3.1")?;
//! let gcc = parse_pairs("syn,1.7;serde,2.2;regex,2.9")?;
//! let canvas = viz::Canvas::from_inches(7.0, 7.0, 100.0);
//! viz::plot_violin_pair(&rustc, &gcc, "rustc", "gccrs", &canvas, 7.0, "sizes.svg")?;
//!
//! let layout = benchplot_rs::layout(&rustc, 7.0, &AnnotateConfig::violin())?;
//! println!("{:#?}", layout);
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod annotate;
pub mod error;
pub mod models;
pub mod parse;
pub mod stats;
pub mod storage;
pub mod viz;

pub use annotate::{AnnotateConfig, OffsetUpdate, ValueTransform, annotate, layout};
pub use error::PlotError;
pub use models::{AnnotatedPoint, Labeled, LabeledSamples, Offset, PcaPoint};
pub use parse::{encode_pairs, parse_pairs, parse_pca_points, parse_samples};
