use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tokio_util::sync::CancellationToken;

use actiontail_logs::{
    DEFAULT_POLL_INTERVAL, Dispatcher, EventFormatter, LogTailer, Lookups, find_newest_file,
};

mod config;

use config::{Config, DEFAULT_CONFIG_FILE};

/// actiontail - A live feed of Action Logger game events
#[derive(Parser, Debug)]
#[command(name = "actiontail")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Config file (defaults to ./config.toml when present)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Action Logger directory, overrides `action_logger_log_dir`
    #[arg(long, value_name = "DIR")]
    log_dir: Option<PathBuf>,

    /// Directory holding the gameval lookup tables, overrides `gameval_data_dir`
    #[arg(long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Tail this file instead of the newest one in the log directory
    #[arg(long, value_name = "PATH")]
    file: Option<PathBuf>,

    /// Milliseconds to wait before re-reading when no complete line is available
    #[arg(long, value_name = "MS")]
    poll_interval_ms: Option<u64>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = Args::parse();

    // Diagnostics go to stderr, stdout carries the feed
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    match run_app(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run_app(args: Args) -> Result<()> {
    let config = match &args.config {
        Some(path) => Config::load(path, true)?,
        None => Config::load(&PathBuf::from(DEFAULT_CONFIG_FILE), false)?,
    };

    // Select the file once; a newer session started later isn't picked up
    let log_file = match args.file {
        Some(file) => file,
        None => {
            let log_dir = args.log_dir.unwrap_or_else(|| config.log_dir());
            find_newest_file(&log_dir)?
        }
    };
    println!("Reading from {}", log_file.display());

    let filter = config.event_filter();
    for note in filter.describe() {
        println!(" + {note}");
    }

    let data_dir = args
        .data_dir
        .unwrap_or_else(|| config.gameval_data_dir.clone());
    let lookups = Lookups::load(&data_dir)?;

    let poll_interval = args
        .poll_interval_ms
        .map(Duration::from_millis)
        .unwrap_or(DEFAULT_POLL_INTERVAL);

    let cancel = CancellationToken::new();
    let tailer = LogTailer::open(&log_file, cancel.clone())
        .await?
        .with_poll_interval(poll_interval);

    let shutdown = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::debug!("interrupt received, stopping");
            shutdown.cancel();
        }
    });

    let mut dispatcher = Dispatcher::new(filter, EventFormatter::new(lookups), io::stdout());
    let rendered = dispatcher
        .run(tailer)
        .await
        .with_context(|| format!("Stopped tailing {}", log_file.display()))?;

    tracing::debug!(rendered, "tail finished");
    Ok(())
}
