use anyhow::{Context, Result};
use benchplot_rs::viz::{self, Canvas, PCA_CANVAS};
use benchplot_rs::{AnnotateConfig, layout, parse, stats, storage};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "benchplot",
    version,
    about = "Plot compiler benchmark results: binary sizes, change rates, and PCA projections"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Violins of log binary sizes for two toolchains, every benchmark labeled.
    Violin(PairArgs),
    /// Box plots of binary sizes for two toolchains, every benchmark labeled.
    #[command(name = "box")]
    Boxplot(PairArgs),
    /// Binary size change per benchmark as a bar chart.
    Compare(CompareArgs),
    /// Change rate of one metric per benchmark as a bar chart.
    Change(ChangeArgs),
    /// Change rates of two metrics: bars for the first, markers for the second.
    Change2d(Change2dArgs),
    /// Box plot of repeated change-rate samples per benchmark.
    ChangeBox(ChangeArgs),
    /// Labeled scatter plot of two principal components.
    Pca(PcaArgs),
}

/// Output size overrides shared by all subcommands.
#[derive(Args, Debug)]
struct CanvasArgs {
    /// Width of the chart in pixels (default depends on the chart).
    #[arg(long)]
    width: Option<u32>,
    /// Height of the chart in pixels (default depends on the chart).
    #[arg(long)]
    height: Option<u32>,
    /// Resolution used to size fonts and label offsets.
    #[arg(long, default_value_t = viz::types::DEFAULT_DPI, value_parser = parse_dpi)]
    dpi: f64,
}

impl CanvasArgs {
    /// Canvas of the given default size in inches, with pixel overrides applied.
    fn canvas(&self, width_in: f64, height_in: f64) -> Canvas {
        let base = Canvas::from_inches(width_in, height_in, self.dpi);
        self.apply(base)
    }

    fn apply(&self, base: Canvas) -> Canvas {
        Canvas {
            width: self.width.unwrap_or(base.width),
            height: self.height.unwrap_or(base.height),
            dpi: self.dpi,
        }
    }
}

#[derive(Args, Debug)]
struct PairArgs {
    /// First group as `name,size;name,size;...` (sizes in MB).
    data_a: String,
    /// Second group, same encoding.
    data_b: String,
    /// Axis label of the first group.
    label_a: String,
    /// Axis label of the second group.
    label_b: String,
    /// Output image (.svg, .png, .jpg or .bmp).
    out: PathBuf,
    /// Label layout scale; the violin figure is `scale` inches square.
    #[arg(long, default_value_t = viz::types::DEFAULT_FIGURE_INCHES)]
    scale: f64,
    /// Also save the computed label layout (CSV, or JSON by extension).
    #[arg(long)]
    layout: Option<PathBuf>,
    #[command(flatten)]
    canvas: CanvasArgs,
}

#[derive(Args, Debug)]
struct CompareArgs {
    /// Changes as `name,value;...`.
    data: String,
    /// Output image.
    out: PathBuf,
    /// Legend label of the bars.
    #[arg(long, default_value = "binary size")]
    legend: String,
    #[command(flatten)]
    canvas: CanvasArgs,
}

#[derive(Args, Debug)]
struct ChangeArgs {
    /// Change rates as `name,value;...` (`name:v1,v2,...;...` for change-box).
    data: String,
    /// Output image.
    out: PathBuf,
    /// Metric name used in the y axis title.
    metric: String,
    #[command(flatten)]
    canvas: CanvasArgs,
}

#[derive(Args, Debug)]
struct Change2dArgs {
    /// Change rates of the first metric, drawn as bars.
    data_a: String,
    /// Change rates of the second metric, drawn as markers.
    data_b: String,
    metric_a: String,
    metric_b: String,
    /// Output image.
    out: PathBuf,
    #[command(flatten)]
    canvas: CanvasArgs,
}

#[derive(Args, Debug)]
struct PcaArgs {
    /// Points as `x,y,label;...` (a trailing `;` is fine).
    data: String,
    /// Number of the component on the x axis.
    pc_x: u32,
    /// Number of the component on the y axis.
    pc_y: u32,
    /// Output image.
    out: PathBuf,
    #[command(flatten)]
    canvas: CanvasArgs,
}

fn parse_dpi(s: &str) -> Result<f64, String> {
    let dpi: f64 = s.trim().parse().map_err(|e| format!("{e}"))?;
    if dpi.is_finite() && dpi > 0.0 {
        Ok(dpi)
    } else {
        Err(format!("expected a positive number, got {dpi}"))
    }
}

/// Float formatted the way the plotting scripts printed them (`2.0`, not `2`).
fn fmt_float(x: f64) -> String {
    format!("{x:?}")
}

/// Rounded to two decimals, for rankings.
fn fmt_rounded(x: f64) -> String {
    fmt_float((x * 100.0).round() / 100.0)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Violin(args) => cmd_violin(args),
        Command::Boxplot(args) => cmd_box(args),
        Command::Compare(args) => cmd_compare(args),
        Command::Change(args) => cmd_change(args),
        Command::Change2d(args) => cmd_change2d(args),
        Command::ChangeBox(args) => cmd_change_box(args),
        Command::Pca(args) => cmd_pca(args),
    }
}

fn save_pair_layout(
    args: &PairArgs,
    a: &[benchplot_rs::Labeled],
    b: &[benchplot_rs::Labeled],
    scale: f64,
    config: &AnnotateConfig,
) -> Result<()> {
    if let Some(path) = args.layout.as_ref() {
        let layout_a = layout(a, scale, config)?;
        let layout_b = layout(b, scale, config)?;
        storage::save_layout(
            &[
                (args.label_a.as_str(), layout_a.as_slice()),
                (args.label_b.as_str(), layout_b.as_slice()),
            ],
            path,
        )?;
        eprintln!(
            "Saved {} label positions to {}",
            layout_a.len() + layout_b.len(),
            path.display()
        );
    }
    Ok(())
}

fn cmd_violin(args: PairArgs) -> Result<()> {
    let a = parse::parse_pairs(&args.data_a).context("parsing first group")?;
    let b = parse::parse_pairs(&args.data_b).context("parsing second group")?;

    let values = |g: &[benchplot_rs::Labeled]| g.iter().map(|p| p.value).collect::<Vec<_>>();
    let gm_a = stats::geometric_mean(&values(&a))?;
    let gm_b = stats::geometric_mean(&values(&b))?;
    println!("geomean: {} | {}", fmt_float(gm_a), fmt_float(gm_b));

    let canvas = args.canvas.canvas(args.scale, args.scale);
    viz::plot_violin_pair(
        &a,
        &b,
        &args.label_a,
        &args.label_b,
        &canvas,
        args.scale,
        &args.out,
    )?;
    eprintln!("Wrote plot to {}", args.out.display());
    save_pair_layout(&args, &a, &b, args.scale, &AnnotateConfig::violin())
}

fn cmd_box(args: PairArgs) -> Result<()> {
    let a = parse::parse_pairs(&args.data_a).context("parsing first group")?;
    let b = parse::parse_pairs(&args.data_b).context("parsing second group")?;

    let canvas = args.canvas.canvas(6.4, 4.8);
    viz::plot_box_pair(&a, &b, &args.label_a, &args.label_b, &canvas, &args.out)?;
    eprintln!("Wrote plot to {}", args.out.display());
    save_pair_layout(&args, &a, &b, 1.0, &AnnotateConfig::boxplot())
}

fn cmd_compare(args: CompareArgs) -> Result<()> {
    let data = parse::parse_pairs(&args.data)?;
    let canvas = args.canvas.canvas(4.0, 3.0);
    viz::plot_change_bars(&data, &canvas, None, Some(args.legend.as_str()), &args.out)?;
    eprintln!("Wrote plot to {}", args.out.display());

    for (name, value) in stats::rank_by_value(&data) {
        println!("{} : {}", name, fmt_rounded(value));
    }
    Ok(())
}

fn cmd_change(args: ChangeArgs) -> Result<()> {
    let data = parse::parse_pairs(&args.data)?;
    let values: Vec<f64> = data.iter().map(|p| p.value).collect();
    if let Some(mean) = stats::arithmetic_mean(&values) {
        println!("mean: {}", fmt_float(mean));
    }

    let canvas = args.canvas.canvas(4.0, 3.0);
    let y_desc = format!("Change rate of {} (%)", args.metric);
    viz::plot_change_bars(&data, &canvas, Some(y_desc.as_str()), None, &args.out)?;
    eprintln!("Wrote plot to {}", args.out.display());
    Ok(())
}

fn cmd_change2d(args: Change2dArgs) -> Result<()> {
    let a = parse::parse_pairs(&args.data_a).context("parsing first metric")?;
    let b = parse::parse_pairs(&args.data_b).context("parsing second metric")?;

    let canvas = args.canvas.canvas(4.0, 3.0);
    viz::plot_change_overlay(&a, &b, &args.metric_a, &args.metric_b, &canvas, &args.out)?;
    eprintln!("Wrote plot to {}", args.out.display());

    let mean = |g: &[benchplot_rs::Labeled]| {
        stats::arithmetic_mean(&g.iter().map(|p| p.value).collect::<Vec<_>>())
    };
    println!(
        "arithmetic mean: {} | {}",
        mean(&a).map(fmt_float).unwrap_or_else(|| "NA".into()),
        mean(&b).map(fmt_float).unwrap_or_else(|| "NA".into())
    );
    Ok(())
}

fn cmd_change_box(args: ChangeArgs) -> Result<()> {
    let groups = parse::parse_samples(&args.data)?;
    let canvas = args.canvas.canvas(8.0, 6.0);
    viz::plot_change_boxes(&groups, &args.metric, &canvas, &args.out)?;
    eprintln!("Wrote plot to {}", args.out.display());

    let (ranked, overall) = stats::rank_sample_means(&groups);
    for (name, mean) in ranked {
        println!("{} : {}", name, fmt_rounded(mean));
    }
    if let Some(overall) = overall {
        println!("{}", fmt_float(overall));
    }
    Ok(())
}

fn cmd_pca(args: PcaArgs) -> Result<()> {
    let points = parse::parse_pca_points(&args.data)?;
    let canvas = args.canvas.apply(PCA_CANVAS);
    viz::plot_pca_scatter(&points, args.pc_x, args.pc_y, &canvas, &args.out)?;
    eprintln!(
        "Wrote plot of {} points to {}",
        points.len(),
        args.out.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn floats_print_like_python() {
        assert_eq!(fmt_float(2.0), "2.0");
        assert_eq!(fmt_float(1.25), "1.25");
        assert_eq!(fmt_rounded(1.456), "1.46");
        assert_eq!(fmt_rounded(-3.0), "-3.0");
    }

    #[test]
    fn dpi_parser() {
        assert_eq!(parse_dpi("72"), Ok(72.0));
        assert!(parse_dpi("0").is_err());
        assert!(parse_dpi("-5").is_err());
        assert!(parse_dpi("NaN").is_err());
        assert!(parse_dpi("inf").is_err());
        assert!(parse_dpi("high").is_err());
    }

    #[test]
    fn canvas_overrides() {
        let args = CanvasArgs {
            width: Some(320),
            height: None,
            dpi: 50.0,
        };
        let c = args.canvas(4.0, 3.0);
        assert_eq!((c.width, c.height, c.dpi), (320, 150, 50.0));
        let pca = args.apply(PCA_CANVAS);
        assert_eq!((pca.width, pca.height), (320, 400));
    }

    #[test]
    fn cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
