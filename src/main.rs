//! cursor-replay - Remote Cursor Trace Replay
//!
//! Renders a recorded sample trace through a smoothing strategy and prints
//! one JSON frame per line.

use std::io::Write;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use remote_cursor::config::Config;
use remote_cursor::cursor::StrategyKind;
use remote_cursor::replay;

/// Command-line arguments for cursor-replay
#[derive(Parser, Debug)]
#[command(name = "cursor-replay")]
#[command(version, about = "Replay a remote cursor trace through a smoothing strategy", long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, env = "CURSOR_CONFIG", default_value = "cursor.toml")]
    config: String,

    /// Trace file (JSON lines, one sample per line)
    #[arg(short, long)]
    trace: String,

    /// Smoothing strategy (predictive|lightweight)
    #[arg(short, long, env = "CURSOR_STRATEGY")]
    strategy: Option<StrategyKind>,

    /// Render rate in frames per second
    #[arg(long)]
    fps: Option<u32>,

    /// Keep rendering this long after the last sample (ms)
    #[arg(long)]
    tail_ms: Option<i64>,

    /// Verbose logging (can be specified multiple times)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Log format (json|pretty|compact)
    #[arg(long, default_value = "compact")]
    log_format: String,

    /// Write logs to file (in addition to stderr)
    #[arg(long)]
    log_file: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let loaded = Config::load(&args.config);
    let configured_level = loaded
        .as_ref()
        .map(|c| c.logging.level.clone())
        .unwrap_or_else(|_| "info".to_string());

    init_logging(&args, &configured_level)?;

    info!(
        "cursor-replay v{} ({} {}, commit {})",
        env!("CARGO_PKG_VERSION"),
        env!("BUILD_DATE"),
        env!("BUILD_TIME"),
        env!("GIT_HASH")
    );

    let config = loaded.or_else(|e| {
        warn!("Failed to load config: {:#}, using defaults", e);
        Config::default_config()
    })?;

    // Override config with CLI args
    let config = config.with_overrides(args.strategy, args.fps, args.tail_ms);
    config.validate()?;
    debug!("Config: {:?}", config);

    let samples = replay::load_trace(&args.trace)
        .with_context(|| format!("Failed to load trace: {}", args.trace))?;
    if samples.is_empty() {
        warn!("Trace {} contains no samples", args.trace);
    }

    let mut strategy = config.strategy.build(&config);
    info!(
        "Replaying {} samples with {} at {} fps",
        samples.len(),
        config.strategy,
        config.replay.fps
    );

    let frames = replay::replay(
        strategy.as_mut(),
        &samples,
        config.replay.fps,
        config.replay.tail_ms,
    );

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for frame in &frames {
        serde_json::to_writer(&mut out, frame)?;
        writeln!(out)?;
    }
    out.flush()?;

    info!("Rendered {} frames", frames.len());
    Ok(())
}

fn init_logging(args: &Args, configured_level: &str) -> Result<()> {
    use std::fs::File;

    let log_level = match args.verbose {
        0 => configured_level,
        1 => "debug",
        _ => "trace",
    };

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new(format!(
            "remote_cursor={level},cursor_replay={level},warn",
            level = log_level
        ))
    });

    // Frames go to stdout, so logs stay on stderr
    if let Some(log_file_path) = &args.log_file {
        let file = File::create(log_file_path)
            .with_context(|| format!("Failed to create log file: {}", log_file_path))?;

        match args.log_format.as_str() {
            "json" => {
                tracing_subscriber::registry()
                    .with(env_filter)
                    .with(
                        tracing_subscriber::fmt::layer()
                            .json()
                            .with_writer(std::io::stderr),
                    )
                    .with(
                        tracing_subscriber::fmt::layer()
                            .json()
                            .with_writer(file)
                            .with_ansi(false),
                    )
                    .init();
            }
            "pretty" => {
                tracing_subscriber::registry()
                    .with(env_filter)
                    .with(
                        tracing_subscriber::fmt::layer()
                            .pretty()
                            .with_writer(std::io::stderr),
                    )
                    .with(
                        tracing_subscriber::fmt::layer()
                            .with_writer(file)
                            .with_ansi(false),
                    )
                    .init();
            }
            _ => {
                tracing_subscriber::registry()
                    .with(env_filter)
                    .with(
                        tracing_subscriber::fmt::layer()
                            .compact()
                            .with_writer(std::io::stderr),
                    )
                    .with(
                        tracing_subscriber::fmt::layer()
                            .compact()
                            .with_writer(file)
                            .with_ansi(false),
                    )
                    .init();
            }
        }
        info!("Logging to file: {}", log_file_path);
    } else {
        match args.log_format.as_str() {
            "json" => {
                tracing_subscriber::registry()
                    .with(env_filter)
                    .with(
                        tracing_subscriber::fmt::layer()
                            .json()
                            .with_writer(std::io::stderr),
                    )
                    .init();
            }
            "pretty" => {
                tracing_subscriber::registry()
                    .with(env_filter)
                    .with(
                        tracing_subscriber::fmt::layer()
                            .pretty()
                            .with_writer(std::io::stderr),
                    )
                    .init();
            }
            _ => {
                tracing_subscriber::registry()
                    .with(env_filter)
                    .with(
                        tracing_subscriber::fmt::layer()
                            .compact()
                            .with_writer(std::io::stderr),
                    )
                    .init();
            }
        }
    }

    Ok(())
}
