use crate::{
    config::{Config, OutputFormat},
    estimate::estimate,
    job::{RemainderPolicy, SamplingJob},
    prompt,
    report::RunReport,
    sampler::{run_sampling, ConsoleProgress, Progress, SeedScheme, SilentProgress},
    util::ensure_dir,
};
use anyhow::{anyhow, Context, Result};
use clap::Parser;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

const DEFAULT_CONFIG: &str = "mc-pi.toml";
const DEFAULT_LOG_FILE: &str = "mc-pi.log";

#[derive(Parser, Debug)]
#[command(name = "mc-pi")]
#[command(about = "Estimate pi by Monte Carlo sampling across a fixed number of threads")]
pub struct Args {
    /// Total number of samples. Prompted for when omitted.
    #[arg(requires = "threads")]
    pub samples: Option<u64>,

    /// Number of worker threads.
    pub threads: Option<usize>,

    /// Path to config TOML. If omitted, uses ./mc-pi.toml if present.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Override log level (trace/debug/info/warn/error).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Root seed for the per-worker generators.
    #[arg(long)]
    pub seed: Option<u64>,

    #[arg(long, value_enum)]
    pub remainder: Option<RemainderPolicy>,

    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Skip the "press Enter" confirmation.
    #[arg(long, short = 'y')]
    pub yes: bool,

    /// Do not print the introduction.
    #[arg(long)]
    pub no_intro: bool,
}

pub fn dispatch(args: Args) -> Result<()> {
    let cfg = match resolve_config_path(args.config.as_deref()) {
        Some(path) => Config::load(&path)?,
        None => Config::default(),
    };
    let _guard = init_logging(&args, &cfg)?;

    if cfg.debug.dump_effective_config {
        info!("effective config:\n{}", cfg.to_toml());
    }

    run(&args, &cfg)
}

fn resolve_config_path(user: Option<&Path>) -> Option<PathBuf> {
    if let Some(p) = user {
        return Some(p.to_path_buf());
    }
    let default = PathBuf::from(DEFAULT_CONFIG);
    default.exists().then_some(default)
}

fn init_logging(args: &Args, cfg: &Config) -> Result<Option<WorkerGuard>> {
    let level = args
        .log_level
        .as_deref()
        .unwrap_or(cfg.logging.level.as_str());

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let stderr_layer = if cfg.logging.json {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(io::stderr)
            .with_target(true)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_writer(io::stderr)
            .with_target(true)
            .boxed()
    };

    let (file_layer, guard) = if let Some(path) = resolve_log_path(cfg) {
        let parent = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        ensure_dir(parent)?;
        let file = std::fs::File::create(&path)
            .with_context(|| format!("create log file: {}", path.display()))?;
        let (non_blocking, guard) = tracing_appender::non_blocking(file);
        let layer = tracing_subscriber::fmt::layer()
            .with_writer(non_blocking)
            .with_ansi(false)
            .with_target(true)
            .boxed();
        (Some(layer), Some(guard))
    } else {
        (None, None)
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| anyhow!("failed to init logging: {e}"))?;

    Ok(guard)
}

fn resolve_log_path(cfg: &Config) -> Option<PathBuf> {
    if !cfg.logging.write_to_file {
        return None;
    }
    if cfg.logging.file_path.is_empty() {
        Some(PathBuf::from(DEFAULT_LOG_FILE))
    } else {
        Some(PathBuf::from(&cfg.logging.file_path))
    }
}

fn run(args: &Args, cfg: &Config) -> Result<()> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let stdout = io::stdout();

    let from_command_line = args.samples.zip(args.threads);
    let format = args.format.unwrap_or(cfg.output.format);

    let mut console = format.console_stream().writer();

    if cfg.intro.show && !args.no_intro {
        let confirm = cfg.intro.confirm && !args.yes && from_command_line.is_none();
        prompt::introduce(&mut input, &mut console, confirm)?;
    }

    // Timing covers input acquisition through the end of the parallel phase.
    let started = Instant::now();

    let (samples, threads) = prompt::acquire_job_input(
        &mut input,
        &mut console,
        from_command_line,
        cfg.input.max_attempts,
    )?;
    console.flush()?;

    let progress: &dyn Progress = match format {
        OutputFormat::Text => &ConsoleProgress,
        OutputFormat::Json => &SilentProgress,
    };

    let remainder = args.remainder.unwrap_or(cfg.sampling.remainder);
    let job = SamplingJob::new(samples, threads)?.with_remainder(remainder);

    let seeds = args
        .seed
        .or(cfg.sampling.seed)
        .map(SeedScheme::fixed)
        .unwrap_or_else(SeedScheme::from_clock);

    info!(
        samples,
        threads,
        remainder = ?remainder,
        root_seed = seeds.root(),
        "sampling job accepted"
    );

    let agg = run_sampling(&job, seeds, progress)?;
    let elapsed = started.elapsed().as_secs_f64();

    debug!(?agg, elapsed, "sampling finished");

    let reference_pi = cfg.output.reference_pi;
    let est = estimate(&agg, reference_pi)?;
    let report = RunReport::new(&job, &agg, est, reference_pi, seeds.root(), elapsed);

    let rendered = match format {
        OutputFormat::Text => report.to_text(cfg.output.precision),
        OutputFormat::Json => report.to_json()? + "\n",
    };

    let mut out = stdout.lock();
    write!(out, "{rendered}")?;
    out.flush()?;

    Ok(())
}
