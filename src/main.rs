//! statboard server
//!
//! Run with: cargo run --bin statboard -- [--config path]
//!
//! # Configuration
//!
//! See `statboard-cli init-config` for the file format. Environment
//! variables:
//! - `STATBOARD_HOST` / `STATBOARD_PORT`: Bind address (default: 0.0.0.0:8050)
//! - `STATBOARD_FLIGHTS_SOURCE`: Airline CSV path or URL
//! - `STATBOARD_AUTOS_SOURCE`: Automobile sales CSV path or URL
//! - `STATBOARD_LOG_LEVEL` / `STATBOARD_LOG_FORMAT`: Logging
//! - `RUST_LOG`: Full filter override

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;

use statboard::api::{serve, ApiConfig, AppState};
use statboard::bootstrap;
use statboard::config::Config;

#[derive(Parser)]
#[command(name = "statboard")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Serve the statboard dashboards over HTTP and WebSocket")]
struct Args {
    /// Config file (default: search standard locations)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = Config::resolve(args.config.as_deref())?;
    statboard::telemetry::init_tracing(&config.logging)?;
    config.log_origin();

    tracing::info!("Starting statboard v{}", env!("CARGO_PKG_VERSION"));

    // Every dataset must load before the listener binds
    let (registry, datasets) = bootstrap::build_registry(&config.datasets)
        .await
        .context("Failed to load datasets")?;

    for info in &datasets {
        tracing::info!(source = %info.source, rows = info.rows, columns = info.columns.len(), "Dataset ready");
    }
    tracing::info!(dashboards = ?registry.ids(), "Dashboards registered");

    let api_config = ApiConfig::from(config.server.clone());
    let state = AppState::new(registry, datasets, api_config.clone());

    serve(state, &api_config).await?;

    tracing::info!("statboard stopped");
    Ok(())
}
