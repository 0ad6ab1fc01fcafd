use std::{
    fs::File,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand, ValueEnum};
use reelcraft::{
    AssetLoaderOpts, AssetStore, BatchOpts, Composition, Evaluator, FrameIndex, FrameRange,
    FrameState, VisualContent,
};

#[derive(Parser, Debug)]
#[command(name = "reelcraft", version)]
struct Cli {
    /// Log verbosity on stderr.
    #[arg(long, value_enum, global = true, default_value_t = LogLevel::Warn)]
    log_level: LogLevel,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Evaluate one frame and print its state as JSON.
    Frame(FrameArgs),
    /// Evaluate a frame range and write one JSON state per line.
    Frames(FramesArgs),
    /// Check a timeline descriptor and list its problems.
    Validate(ValidateArgs),
    /// Print per-frame audio gains as JSON lines.
    Audio(AudioArgs),
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for tracing::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => tracing::Level::ERROR,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Trace => tracing::Level::TRACE,
        }
    }
}

#[derive(Args, Debug)]
struct AssetArgs {
    /// Load every referenced asset before evaluating; missing ones render blank.
    #[arg(long)]
    fetch_assets: bool,

    /// Per-asset load deadline in seconds.
    #[arg(long, default_value_t = 10)]
    asset_timeout_secs: u64,

    /// Asset loads in flight at once.
    #[arg(long, default_value_t = 8)]
    asset_concurrency: usize,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Input timeline descriptor JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Global frame index (0-based).
    #[arg(long)]
    frame: u64,

    /// Pretty-print the output.
    #[arg(long)]
    pretty: bool,

    #[command(flatten)]
    assets: AssetArgs,
}

#[derive(Parser, Debug)]
struct FramesArgs {
    /// Input timeline descriptor JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// First frame (inclusive). Defaults to 0.
    #[arg(long)]
    start: Option<u64>,

    /// Last frame (exclusive). Defaults to the composition length.
    #[arg(long)]
    end: Option<u64>,

    /// Evaluate on a rayon thread pool.
    #[arg(long)]
    parallel: bool,

    /// Worker threads when `--parallel` is set.
    #[arg(long)]
    threads: Option<usize>,

    /// Frames per parallel chunk.
    #[arg(long, default_value_t = 64)]
    chunk_size: usize,

    /// Output JSONL path; stdout when absent.
    #[arg(long)]
    out: Option<PathBuf>,

    #[command(flatten)]
    assets: AssetArgs,
}

#[derive(Parser, Debug)]
struct ValidateArgs {
    /// Input timeline descriptor JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

#[derive(Parser, Debug)]
struct AudioArgs {
    /// Input timeline descriptor JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Sample every N frames.
    #[arg(long, default_value_t = 30)]
    step: u64,

    #[command(flatten)]
    assets: AssetArgs,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(tracing::Level::from(cli.log_level))
        .init();

    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Frames(args) => cmd_frames(args),
        Command::Validate(args) => cmd_validate(args),
        Command::Audio(args) => cmd_audio(args),
    }
}

fn read_comp(path: &Path) -> anyhow::Result<Composition> {
    Composition::from_path(path).with_context(|| "load timeline descriptor")
}

/// Loads every asset, or only those of the scene covering `frame` when given.
fn prepare_assets(
    comp: &Composition,
    in_path: &Path,
    args: &AssetArgs,
    frame: Option<FrameIndex>,
) -> anyhow::Result<Option<AssetStore>> {
    if !args.fetch_assets {
        return Ok(None);
    }
    let root = in_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let opts = AssetLoaderOpts {
        root: root.to_path_buf(),
        timeout: Duration::from_secs(args.asset_timeout_secs.max(1)),
        max_concurrency: args.asset_concurrency.max(1),
        ..AssetLoaderOpts::default()
    };

    let rt = tokio::runtime::Runtime::new().context("create async runtime")?;
    let store = match frame {
        Some(frame) => rt.block_on(AssetStore::prepare_frame(comp, frame, &opts))?,
        None => rt.block_on(AssetStore::prepare(comp, &opts))?,
    };
    if store.missing_count() > 0 {
        eprintln!(
            "{} of {} assets missing; they will render blank or silent",
            store.missing_count(),
            store.len()
        );
    }
    Ok(Some(store))
}

fn eval(comp: &Composition, frame: FrameIndex, assets: Option<&AssetStore>) -> FrameState {
    match assets {
        Some(store) => Evaluator::eval_frame_with_assets(comp, frame, store),
        None => Evaluator::eval_frame(comp, frame),
    }
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let comp = read_comp(&args.in_path)?;
    let frame = FrameIndex(args.frame);
    let assets = prepare_assets(&comp, &args.in_path, &args.assets, Some(frame))?;
    let state = eval(&comp, frame, assets.as_ref());

    let json = if args.pretty {
        serde_json::to_string_pretty(&state)
    } else {
        serde_json::to_string(&state)
    }
    .context("serialize frame state")?;
    println!("{json}");
    Ok(())
}

fn cmd_frames(args: FramesArgs) -> anyhow::Result<()> {
    let comp = read_comp(&args.in_path)?;
    let assets = prepare_assets(&comp, &args.in_path, &args.assets, None)?;
    let range = FrameRange::new(
        FrameIndex(args.start.unwrap_or(0)),
        FrameIndex(args.end.unwrap_or(comp.duration_frames)),
    )?;
    let opts = BatchOpts {
        parallel: args.parallel,
        threads: args.threads,
        chunk_size: args.chunk_size,
    };
    let states = reelcraft::eval_frames(&comp, range, &opts, assets.as_ref())?;

    let mut out: Box<dyn Write> = match &args.out {
        Some(path) => {
            if let Some(parent) = path.parent()
                && !parent.as_os_str().is_empty()
            {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("create output dir '{}'", parent.display()))?;
            }
            let f = File::create(path)
                .with_context(|| format!("create output '{}'", path.display()))?;
            Box::new(BufWriter::new(f))
        }
        None => Box::new(BufWriter::new(std::io::stdout().lock())),
    };
    for state in &states {
        serde_json::to_writer(&mut out, state).context("serialize frame state")?;
        writeln!(out).context("write frame state")?;
    }
    out.flush().context("flush output")?;

    if let Some(path) = &args.out {
        eprintln!("wrote {} frames to {}", states.len(), path.display());
    }
    Ok(())
}

fn cmd_validate(args: ValidateArgs) -> anyhow::Result<()> {
    let comp = read_comp(&args.in_path)?;

    for scene in &comp.scenes {
        if let VisualContent::Diagram { diagram } = &scene.visual
            && let Some((kind, message)) = diagram.problem()
        {
            eprintln!("warning: scene '{}': {kind:?}: {message}", scene.id);
        }
    }

    let issues = comp.issues();
    if !issues.is_empty() {
        for issue in &issues {
            eprintln!("error: {issue}");
        }
        anyhow::bail!("{} problem(s) in '{}'", issues.len(), args.in_path.display());
    }

    println!(
        "ok: {} scenes, {} frames at {} fps, {} assets",
        comp.scenes.len(),
        comp.duration_frames,
        comp.fps.as_f64(),
        comp.asset_refs().len()
    );
    Ok(())
}

fn cmd_audio(args: AudioArgs) -> anyhow::Result<()> {
    let comp = read_comp(&args.in_path)?;
    let assets = prepare_assets(&comp, &args.in_path, &args.assets, None)?;
    let step = args.step.max(1) as usize;

    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    for f in (0..=comp.duration_frames).step_by(step) {
        let state = eval(&comp, FrameIndex(f), assets.as_ref());
        let line = serde_json::json!({ "frame": f, "tracks": state.audio.tracks });
        writeln!(out, "{line}").context("write audio line")?;
    }
    out.flush().context("flush output")?;
    Ok(())
}
