use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "gridgif", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert iteration logs into looping animated GIFs.
    Convert(ConvertArgs),
    /// Parse a log and print its grid count and shapes.
    Inspect(InspectArgs),
}

#[derive(Parser, Debug)]
struct ConvertArgs {
    /// Log files to convert (appended to the config's inputs).
    files: Vec<PathBuf>,

    /// JSON config file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Palette, e.g. `0=yellow,1=#0000ff` or `yellow,blue`.
    #[arg(long)]
    palette: Option<String>,

    /// Frames per second.
    #[arg(long, conflicts_with = "frame_ms")]
    fps: Option<u32>,

    /// Per-frame duration in milliseconds.
    #[arg(long)]
    frame_ms: Option<u32>,

    /// Play once instead of looping forever.
    #[arg(long)]
    no_loop: bool,

    /// Iteration marker prefix (repeatable; replaces the configured set).
    #[arg(long = "marker")]
    markers: Vec<String>,

    /// Pixels per cell side.
    #[arg(long)]
    cell_size: Option<u32>,

    /// Directory for the output GIFs.
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// Convert files concurrently.
    #[arg(long)]
    parallel: bool,

    /// Override rayon worker threads (parallel mode only).
    #[arg(long)]
    threads: Option<usize>,
}

#[derive(Parser, Debug)]
struct InspectArgs {
    /// Log file to parse.
    file: PathBuf,

    /// Iteration marker prefix (repeatable).
    #[arg(long = "marker")]
    markers: Vec<String>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Convert(args) => cmd_convert(args),
        Command::Inspect(args) => cmd_inspect(args),
    }
}

fn build_config(args: ConvertArgs) -> anyhow::Result<gridgif::ConvertConfig> {
    let mut cfg = match &args.config {
        Some(path) => gridgif::ConvertConfig::from_path(path)
            .with_context(|| format!("load config '{}'", path.display()))?,
        None => gridgif::ConvertConfig::default(),
    };

    if let Some(spec) = &args.palette {
        cfg.palette = gridgif::Palette::parse_spec(spec).context("parse --palette")?;
    }
    if let Some(fps) = args.fps {
        cfg.fps = gridgif::Fps::new(fps, 1).context("parse --fps")?;
        cfg.frame_ms = None;
    }
    if let Some(ms) = args.frame_ms {
        cfg.frame_ms = Some(ms);
    }
    if args.no_loop {
        cfg.loop_forever = false;
    }
    if !args.markers.is_empty() {
        cfg.markers = args.markers;
    }
    if let Some(n) = args.cell_size {
        cfg.cell_size = n;
    }
    if let Some(dir) = args.out_dir {
        cfg.out_dir = Some(dir);
    }
    if args.parallel {
        cfg.parallel = true;
    }
    if args.threads.is_some() {
        cfg.threads = args.threads;
    }
    cfg.inputs.extend(args.files);

    if cfg.inputs.is_empty() {
        anyhow::bail!("no input files (pass FILES or set \"inputs\" in --config)");
    }
    Ok(cfg)
}

fn cmd_convert(args: ConvertArgs) -> anyhow::Result<()> {
    let cfg = build_config(args)?;
    let report = gridgif::run_batch(&cfg)?;

    for summary in report.succeeded() {
        eprintln!("wrote {}", summary.output.display());
    }
    for (input, err) in report.failed() {
        eprintln!("failed {}: {err}", input.display());
    }

    let failed = report.failure_count();
    if failed > 0 {
        anyhow::bail!("{failed} of {} files failed", report.outcomes.len());
    }
    Ok(())
}

fn cmd_inspect(args: InspectArgs) -> anyhow::Result<()> {
    let markers = if args.markers.is_empty() {
        gridgif::MarkerSet::default()
    } else {
        gridgif::MarkerSet::new(args.markers)?
    };
    let seq = gridgif::parse_path(&args.file, &markers)
        .with_context(|| format!("parse '{}'", args.file.display()))?;

    println!("{}: {} grids", args.file.display(), seq.len());
    for (i, grid) in seq.iter().enumerate() {
        println!("  grid {i}: {}x{}", grid.rows(), grid.cols());
    }
    Ok(())
}
