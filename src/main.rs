//! Items API server.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request
//!     ──────────────▶ process_time ─▶ cors ─▶ request id ─▶ trace ─▶ timeout
//!                                                                      │
//!                                                                      ▼
//!                      background_tasks ◀─ handler ◀─ extractors ◀─ router
//!                             │               │
//!                             ▼               ▼
//!                      spawned tasks     ItemStore (via Scoped<StoreSession>)
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use items_api::config::{load_config, validate_config, AppConfig, ConfigError};
use items_api::lifecycle::Shutdown;
use items_api::observability::{logging, metrics};
use items_api::HttpServer;

#[derive(Parser)]
#[command(name = "items-api")]
#[command(about = "Items API server", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override `listener.bind_address`.
    #[arg(short, long)]
    bind: Option<String>,

    /// Emit logs as JSON lines.
    #[arg(long)]
    json_logs: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => AppConfig::default(),
    };
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
    }
    if cli.json_logs {
        config.observability.json_logs = true;
    }
    validate_config(&config).map_err(ConfigError::Validation)?;

    logging::init(&config.observability);

    tracing::info!(
        title = %config.app.title,
        version = %config.app.version,
        bind_address = %config.listener.bind_address,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        if let Ok(addr) = config.observability.metrics_address.parse() {
            metrics::init_metrics(addr);
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config);
    shutdown.trigger_on_signal();

    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
