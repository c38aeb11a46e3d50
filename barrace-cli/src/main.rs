use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "barrace", version)]
struct Cli {
    /// Log verbosity (-v for debug, -vv for trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build the full frame series as JSON.
    Series(SeriesArgs),
    /// Build the series and emit a single frame as JSON.
    Frame(FrameArgs),
}

#[derive(Parser, Debug)]
struct InputArgs {
    /// Input rows: a JSON array of flat objects.
    #[arg(long)]
    rows: PathBuf,

    /// Race config JSON. Defaults apply to every missing key.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct SeriesArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Output series JSON path.
    #[arg(long)]
    out: PathBuf,

    /// Enable per-entity and per-frame parallelism.
    #[arg(long, default_value_t = false)]
    parallel: bool,

    /// Override rayon worker threads (parallel mode only).
    #[arg(long)]
    threads: Option<usize>,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Frame index (0-based, tail frames included).
    #[arg(long)]
    frame: u64,

    /// Output JSON path. Prints to stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Series(args) => cmd_series(args),
        Command::Frame(args) => cmd_frame(args),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn load(input: &InputArgs) -> anyhow::Result<(Vec<barrace::RawRow>, barrace::RaceConfig)> {
    let rows = barrace::rows_from_path(&input.rows)
        .with_context(|| format!("load rows '{}'", input.rows.display()))?;
    let config = match &input.config {
        Some(path) => barrace::RaceConfig::from_path(path)
            .with_context(|| format!("load config '{}'", path.display()))?,
        None => barrace::RaceConfig::default(),
    };
    Ok((rows, config))
}

fn cmd_series(args: SeriesArgs) -> anyhow::Result<()> {
    let (rows, config) = load(&args.input)?;
    let opts = barrace::PipelineOpts {
        parallel: args.parallel,
        threads: args.threads,
    };
    let series = barrace::build_series_with(&rows, &config.field_accessors(), &config, &opts)?;
    for w in &series.warnings {
        eprintln!("warning: {w}");
    }

    write_json(&args.out, &series)?;
    eprintln!(
        "wrote {} ({} frames, {} tail)",
        args.out.display(),
        series.len(),
        series.tail_frames
    );
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let (rows, config) = load(&args.input)?;
    let series = barrace::build_series(&rows, &config)?;
    let frame = series
        .frame(barrace::FrameIndex(args.frame))
        .with_context(|| {
            format!(
                "frame {} out of range (series has {} frames)",
                args.frame,
                series.len()
            )
        })?;

    match &args.out {
        Some(out) => {
            write_json(out, frame)?;
            eprintln!("wrote {}", out.display());
        }
        None => {
            let json = serde_json::to_string_pretty(frame).context("serialize frame")?;
            println!("{json}");
        }
    }
    Ok(())
}

fn write_json<T: serde::Serialize + ?Sized>(path: &Path, value: &T) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    let f = std::fs::File::create(path)
        .with_context(|| format!("create output '{}'", path.display()))?;
    serde_json::to_writer_pretty(std::io::BufWriter::new(f), value)
        .with_context(|| format!("write json '{}'", path.display()))?;
    Ok(())
}
