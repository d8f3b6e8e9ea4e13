use benchplot_rs::models::{Labeled, LabeledSamples, PcaPoint};
use benchplot_rs::viz::{self, Canvas};
use std::fs;
use std::path::{Path, PathBuf};

fn sizes(pairs: &[(&str, f64)]) -> Vec<Labeled> {
    pairs.iter().map(|(n, v)| Labeled::new(*n, *v)).collect()
}

fn rustc_sizes() -> Vec<Labeled> {
    sizes(&[
        ("syn", 2.1),
        ("serde", 1.4),
        ("regex", 3.8),
        ("tokio", 5.2),
        ("clap", 2.9),
        ("hyper", 4.4),
    ])
}

fn gcc_sizes() -> Vec<Labeled> {
    sizes(&[
        ("syn", 1.9),
        ("serde", 1.5),
        ("regex", 3.1),
        ("tokio", 4.8),
        ("clap", 2.6),
        ("hyper", 4.0),
    ])
}

fn changes() -> Vec<Labeled> {
    sizes(&[
        ("Tokio", 3.5),
        ("syn", -1.2),
        ("regex-automata", 0.0),
        ("Clap", -7.25),
    ])
}

fn write_and_check<F: Fn(&Path) -> anyhow::Result<()>>(maker: F, name: &str) {
    let dir = tempfile::tempdir().unwrap();
    let path: PathBuf = dir.path().join(name);
    maker(&path).unwrap();
    let meta = fs::metadata(&path).expect("file created");
    assert!(meta.len() > 0, "{name} has content");
}

#[test]
fn violin_pair_svg_and_png() {
    let canvas = Canvas::from_inches(7.0, 7.0, 72.0);
    for name in ["violin.svg", "violin.png"] {
        write_and_check(
            |p| {
                viz::plot_violin_pair(
                    &rustc_sizes(),
                    &gcc_sizes(),
                    "rustc",
                    "gccrs",
                    &canvas,
                    7.0,
                    p,
                )
            },
            name,
        );
    }
}

#[test]
fn violin_svg_contains_point_labels() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("labels.svg");
    viz::plot_violin_pair(
        &rustc_sizes(),
        &gcc_sizes(),
        "rustc",
        "gccrs",
        &Canvas::from_inches(7.0, 7.0, 72.0),
        7.0,
        &path,
    )
    .unwrap();
    let svg = fs::read_to_string(&path).unwrap();
    for label in ["rustc", "gccrs", "tokio", "serde"] {
        assert!(svg.contains(label), "missing {label}");
    }
}

#[test]
fn box_pair_renders() {
    write_and_check(
        |p| {
            viz::plot_box_pair(
                &rustc_sizes(),
                &gcc_sizes(),
                "rustc",
                "gccrs",
                &Canvas::from_inches(6.4, 4.8, 72.0),
                p,
            )
        },
        "box.svg",
    );
}

#[test]
fn single_point_groups_render() {
    // Degenerate ranges and one-sample densities must not fail.
    let one = sizes(&[("only", 1.0)]);
    write_and_check(
        |p| viz::plot_violin_pair(&one, &one, "a", "b", &Canvas::default(), 7.0, p),
        "single_violin.svg",
    );
    write_and_check(
        |p| viz::plot_box_pair(&one, &one, "a", "b", &Canvas::default(), p),
        "single_box.svg",
    );
}

#[test]
fn change_bars_with_and_without_legend() {
    let canvas = Canvas::from_inches(4.0, 3.0, 100.0);
    write_and_check(
        |p| viz::plot_change_bars(&changes(), &canvas, None, Some("binary size"), p),
        "compare.svg",
    );
    write_and_check(
        |p| {
            viz::plot_change_bars(
                &changes(),
                &canvas,
                Some("Change rate of compile time (%)"),
                None,
                p,
            )
        },
        "change.png",
    );
}

#[test]
fn overlay_adds_categories_for_unmatched_names() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("overlay.svg");
    let marks = sizes(&[("syn", 2.0), ("serde", -4.0)]);
    viz::plot_change_overlay(
        &changes(),
        &marks,
        "binary size",
        "compile time",
        &Canvas::from_inches(4.0, 3.0, 100.0),
        &path,
    )
    .unwrap();
    let svg = fs::read_to_string(&path).unwrap();
    assert!(svg.contains("serde"));
    assert!(svg.contains("compile time"));
}

#[test]
fn change_boxes_render() {
    let groups = vec![
        LabeledSamples {
            name: "syn".into(),
            values: vec![1.0, 2.0, 3.0, 50.0],
        },
        LabeledSamples {
            name: "Clap".into(),
            values: vec![-1.0, -2.0, 0.5],
        },
    ];
    write_and_check(
        |p| viz::plot_change_boxes(&groups, "runtime", &Canvas::from_inches(8.0, 6.0, 72.0), p),
        "change_box.svg",
    );
}

#[test]
fn pca_scatter_renders() {
    let points = vec![
        PcaPoint {
            x: 0.1,
            y: 0.2,
            label: "syn".into(),
        },
        PcaPoint {
            x: -0.4,
            y: 0.9,
            label: "tokio".into(),
        },
        PcaPoint {
            x: 1.3,
            y: -0.5,
            label: "regex".into(),
        },
    ];
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pca.svg");
    viz::plot_pca_scatter(&points, 1, 3, &viz::PCA_CANVAS, &path).unwrap();
    let svg = fs::read_to_string(&path).unwrap();
    assert!(svg.contains("Principal Component 1"));
    assert!(svg.contains("Principal Component 3"));
    assert!(svg.contains("tokio"));
}

#[test]
fn unsupported_extension_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("chart.pdf");
    let err = viz::plot_change_bars(&changes(), &Canvas::default(), None, None, &path)
        .unwrap_err()
        .to_string();
    assert!(err.contains("unsupported image format"), "{err}");
    assert!(!path.exists());
}

#[test]
fn empty_inputs_are_errors() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("empty.svg");
    let canvas = Canvas::default();
    assert!(viz::plot_violin_pair(&[], &gcc_sizes(), "a", "b", &canvas, 7.0, &out).is_err());
    assert!(viz::plot_change_bars(&[], &canvas, None, None, &out).is_err());
    assert!(viz::plot_change_boxes(&[], "m", &canvas, &out).is_err());
    assert!(viz::plot_pca_scatter(&[], 1, 2, &canvas, &out).is_err());
}

#[test]
fn violin_rejects_non_positive_sizes() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("bad.svg");
    let bad = sizes(&[("zero", 0.0), ("one", 1.0)]);
    let err = viz::plot_violin_pair(&bad, &gcc_sizes(), "a", "b", &Canvas::default(), 7.0, &out)
        .unwrap_err();
    assert!(err.to_string().contains("zero"), "{err}");
}

#[test]
fn every_category_gets_a_tick_label() {
    let many: Vec<Labeled> = (0..15)
        .map(|i| Labeled::new(format!("bench{i:02}"), i as f64 - 7.0))
        .collect();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("many.svg");
    viz::plot_change_bars(&many, &Canvas::from_inches(6.0, 4.0, 100.0), None, None, &path).unwrap();
    let svg = fs::read_to_string(&path).unwrap();
    for p in &many {
        assert!(svg.contains(&p.name), "missing tick for {}", p.name);
    }
}

#[test]
fn tiny_scale_keeps_labels_drawable() {
    // Offsets reach billions of points; labels land off canvas instead of failing.
    let a = sizes(&[("a", 1.0), ("b", 2.0), ("c", 3.0)]);
    let b = sizes(&[("a", 1.0), ("b", 2.0)]);
    for name in ["tiny.svg", "tiny.png"] {
        write_and_check(
            |p| viz::plot_violin_pair(&a, &b, "x", "y", &Canvas::new(700, 700), 1e-7, p),
            name,
        );
    }
}

#[test]
fn subnormal_scale_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("sub.svg");
    let err = viz::plot_violin_pair(
        &rustc_sizes(),
        &gcc_sizes(),
        "a",
        "b",
        &Canvas::default(),
        1e-310,
        &out,
    )
    .unwrap_err();
    assert!(err.to_string().contains("scale"), "{err}");
    assert!(!out.exists());
}

#[test]
fn bad_dpi_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("dpi.svg");
    for dpi in [0.0, f64::NAN] {
        let canvas = Canvas::default().with_dpi(dpi);
        let err = viz::plot_change_bars(&changes(), &canvas, None, None, &out).unwrap_err();
        assert!(err.to_string().contains("dpi"), "{err}");
    }
    assert!(!out.exists());
}
