//! Hostwatch Server - HTTP endpoints for host telemetry and process liveness.
//!
//! This binary serves the hostwatch-core readers over HTTP: disk, CPU, memory
//! and uptime metrics, plus a check reporting whether named processes run.

mod handlers;
mod server;

use anyhow::Result;
use clap::Parser;
use hostwatch_core::config::{AppConfig, MetricsConfig, ServerConfig};
use hostwatch_core::{LivenessMatcher, SysinfoProvider};
use server::AppState;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, Level};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser, Debug)]
#[command(name = "hostwatch-server")]
#[command(about = "HTTP server for host telemetry and process liveness checks")]
struct Args {
    /// Port to listen on (0 = auto-assign)
    #[arg(short, long, default_value_t = ServerConfig::DEFAULT_PORT)]
    port: u16,

    /// Host to bind to
    #[arg(long, default_value = ServerConfig::DEFAULT_HOST)]
    host: String,

    /// Path whose filesystem is reported by /disk
    #[arg(long, default_value = MetricsConfig::DEFAULT_DISK_PATH)]
    disk_path: PathBuf,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    json_logs: bool,
}

fn init_logging(args: &Args) {
    let level = if args.debug { Level::DEBUG } else { Level::INFO };
    // RUST_LOG takes precedence over --debug
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_str().to_lowercase()));

    let builder = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false);

    if args.json_logs {
        builder.json().init();
    } else {
        builder.compact().init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args);

    info!("Starting {}", AppConfig::APP_NAME);
    info!("Disk metrics path: {}", args.disk_path.display());

    // One provider serves both the metrics readers and the process table
    let provider = Arc::new(SysinfoProvider::new(&args.disk_path));
    let state = AppState::new(LivenessMatcher::new(provider.clone()), provider);

    let addr = server::start_server(state, &args.host, args.port).await?;

    // Announce the bound address (intentional stdout for supervisors and tests)
    println!("{}{}", ServerConfig::LISTEN_ADDR_PREFIX, addr);

    info!("Hostwatch server running on {}", addr);

    // Wait for shutdown signal
    tokio::signal::ctrl_c().await?;
    info!("Shutdown signal received, exiting");

    Ok(())
}
