//! glidescroll - middle-button drag-to-scroll daemon
//!
//! Entry point for the daemon binary.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use glidescroll::config::{Config, PresetStore};
use glidescroll::engine::ScrollEngine;
use glidescroll::input::{ButtonListener, DevicePoller, InertPointer, PointerQuery};
use glidescroll::sink::{ChannelFeedback, LogSink, PortalScrollSink, ScrollSink};

/// Command-line arguments for glidescroll
#[derive(Parser, Debug)]
#[command(name = "glidescroll")]
#[command(version, about = "Middle-button drag-to-scroll daemon", long_about = None)]
pub struct Args {
    /// Configuration file path
    #[arg(short, long, env = "GLIDESCROLL_CONFIG")]
    pub config: Option<PathBuf>,

    /// Start with a named preset (updates the last-used pointer)
    #[arg(short, long)]
    pub preset: Option<String>,

    /// Log scroll events instead of injecting them
    #[arg(long)]
    pub dry_run: bool,

    /// Verbose logging (can be specified multiple times)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Log format (json|pretty|compact)
    #[arg(long, default_value = "pretty")]
    pub log_format: String,

    /// Write logs to file (in addition to stdout)
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(&args)?;

    info!("glidescroll v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Built: {} ({}), profile: {}",
        env!("BUILD_DATE"),
        env!("GIT_HASH"),
        if cfg!(debug_assertions) { "debug" } else { "release" }
    );

    // Load configuration
    let config_path = args.config.clone().unwrap_or_else(Config::default_path);
    let config = if config_path.exists() {
        Config::load(&config_path)?
    } else {
        debug!("No config file at {}, using defaults", config_path.display());
        Config::default()
    };

    // Presets: an explicit --preset wins, otherwise the last-used preset
    // from a previous run, otherwise the config file's tuning block.
    let mut store = PresetStore::load(PresetStore::default_path());
    let config = if let Some(name) = &args.preset {
        let tuning = store
            .select(name)
            .with_context(|| format!("preset '{}' not found in {}", name, store.path().display()))?;
        if let Err(e) = store.save() {
            warn!("Failed to persist preset selection: {}", e);
        }
        info!("Using preset '{}'", name);
        config.with_tuning(tuning)
    } else if store.path().exists() {
        info!("Restoring preset '{}'", store.last_used_name());
        config.with_tuning(store.last_used())
    } else {
        config
    };
    config.validate()?;
    debug!("Config: {:?}", config);

    // Scroll emission sink
    let scroll: Arc<dyn ScrollSink> = if args.dry_run {
        info!("Dry run: scroll events will be logged, not injected");
        Arc::new(LogSink)
    } else {
        match PortalScrollSink::connect().await {
            Ok(sink) => Arc::new(sink),
            Err(e) => {
                warn!("Portal unavailable ({}), falling back to dry run", e);
                Arc::new(LogSink)
            }
        }
    };

    // Feedback subscription. No overlay UI ships with the daemon; the
    // subscriber here surfaces gesture activity in the logs and is the
    // attachment point for one.
    let (feedback, mut feedback_rx) = ChannelFeedback::channel();
    tokio::spawn(async move {
        while let Some(event) = feedback_rx.recv().await {
            debug!(?event, "overlay feedback");
        }
    });

    // Global button listener. Setup failure (no display, missing
    // permission) is reported once and the daemon runs inert.
    let (event_tx, event_rx) = mpsc::unbounded_channel();
    let pointer: Box<dyn PointerQuery> = match DevicePoller::default().listen(event_tx) {
        Ok(query) => Box::new(query),
        Err(e) => {
            warn!("Input listener unavailable, running inert: {}", e);
            Box::new(InertPointer)
        }
    };

    let engine = ScrollEngine::new(
        config.tuning.into_handle(),
        config.calibration,
        config.polling,
        pointer,
        scroll,
        feedback,
        event_rx,
    );

    info!("Engine running; press the middle mouse button to scroll");
    engine.run().await;

    Ok(())
}

fn init_logging(args: &Args) -> Result<()> {
    use std::fs::File;

    let log_level = match args.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| {
            tracing_subscriber::EnvFilter::new(format!(
                "glidescroll={level},ashpd=info,warn",
                level = log_level
            ))
        });

    let registry = tracing_subscriber::registry().with(env_filter);

    let log_file = match &args.log_file {
        Some(path) => Some(
            File::create(path)
                .with_context(|| format!("Failed to create log file {}", path.display()))?,
        ),
        None => None,
    };

    // The file layer is built per format arm: a fmt layer is typed by the
    // subscriber it sits on, so one layer cannot be shared across the
    // three differently-shaped stacks.
    match args.log_format.as_str() {
        "json" => registry
            .with(tracing_subscriber::fmt::layer().json())
            .with(log_file.map(|f| {
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(f)
                    .with_ansi(false)
            }))
            .init(),
        "compact" => registry
            .with(tracing_subscriber::fmt::layer().compact())
            .with(log_file.map(|f| {
                tracing_subscriber::fmt::layer()
                    .compact()
                    .with_writer(f)
                    .with_ansi(false)
            }))
            .init(),
        _ => registry
            .with(tracing_subscriber::fmt::layer().pretty())
            .with(log_file.map(|f| {
                tracing_subscriber::fmt::layer()
                    .with_writer(f)
                    .with_ansi(false)
            }))
            .init(),
    }

    Ok(())
}
