use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod api;
mod cli;
mod config;
mod shell;

use cli::Commands;
use config::Config;

#[derive(Parser)]
#[command(name = "lucidia")]
#[command(about = "Memory notes on disk: fingerprint audit, search, and restatement detection")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path (default: lucidia.toml if present)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Memory directory (overrides [memory].dir)
    #[arg(short, long, global = true)]
    memory_dir: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let mut config = Config::load(cli.config.as_deref()).with_context(|| "Failed to load config")?;
    if let Some(dir) = cli.memory_dir {
        config.memory.dir = dir;
    }

    config
        .expand_paths()
        .with_context(|| "Failed to expand paths in config")?;

    // Initialize logging
    let level = if cli.verbose {
        "debug"
    } else {
        config.logging.level.as_str()
    };
    init_logging(level)?;

    // Validate configuration
    config
        .validate()
        .with_context(|| "Configuration validation failed")?;

    cli::handle_command(cli.command, &config).await
}

pub(crate) async fn wait_for_shutdown() {
    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = terminate => {
            tracing::info!("Received SIGTERM");
        },
        _ = signal::ctrl_c() => {
            tracing::info!("Received Ctrl+C");
        }
    }
}

fn init_logging(level: &str) -> Result<()> {
    let filter = match level.to_lowercase().as_str() {
        "error" => tracing::Level::ERROR,
        "warn" => tracing::Level::WARN,
        "info" => tracing::Level::INFO,
        "debug" => tracing::Level::DEBUG,
        "trace" => tracing::Level::TRACE,
        _ => tracing::Level::INFO,
    };

    // Logs go to stderr so `--json` output on stdout stays parseable.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter.to_string())),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .try_init()
        .context("Failed to initialize logging")?;

    Ok(())
}
