//! HTTP server implementation using Axum.

use crate::handlers::{
    handle_cpu, handle_disk, handle_liveness, handle_memory, handle_system, handle_uptime,
};
use axum::{routing::get, Router};
use hostwatch_core::{LivenessMatcher, SystemSnapshotProvider};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info};

/// Application state shared across handlers.
pub struct AppState {
    /// Liveness checks against the process table
    pub matcher: LivenessMatcher,
    /// Disk, CPU, memory and uptime readers
    pub metrics: Arc<dyn SystemSnapshotProvider>,
}

impl AppState {
    pub fn new(matcher: LivenessMatcher, metrics: Arc<dyn SystemSnapshotProvider>) -> Self {
        Self { matcher, metrics }
    }
}

/// Build the router with all endpoints.
pub fn build_router(state: Arc<AppState>) -> Router {
    // Read-only endpoints, open to any origin
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handle_liveness))
        .route("/disk", get(handle_disk))
        .route("/cpu", get(handle_cpu))
        .route("/memory", get(handle_memory))
        .route("/uptime", get(handle_uptime))
        .route("/system", get(handle_system))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Start the HTTP server.
///
/// Returns the actual address the server is bound to (useful when port=0).
pub async fn start_server(state: AppState, host: &str, port: u16) -> anyhow::Result<SocketAddr> {
    let app = build_router(Arc::new(state));

    // Parse the address
    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;

    // Bind to the address
    let listener = tokio::net::TcpListener::bind(addr).await?;
    let actual_addr = listener.local_addr()?;

    info!("Server listening on {}", actual_addr);

    // Spawn the server in the background
    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            error!("Server error: {}", e);
        }
    });

    Ok(actual_addr)
}
