//! HTTP request handlers, split by domain.

mod liveness;
mod metrics;

pub use liveness::handle_liveness;
pub use metrics::{handle_cpu, handle_disk, handle_memory, handle_system, handle_uptime};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use hostwatch_core::HostwatchError;
use serde_json::json;
use tracing::{error, warn};

// ============================================================================
// Error responses
// ============================================================================

/// Error returned by handlers, rendered as `{"detail": "..."}`.
#[derive(Debug)]
pub struct ApiError(pub HostwatchError);

impl From<HostwatchError> for ApiError {
    fn from(err: HostwatchError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.http_status())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if status.is_server_error() {
            error!("Request failed: {}", self.0);
        } else {
            warn!("Request rejected: {}", self.0);
        }

        (status, Json(json!({ "detail": self.0.to_string() }))).into_response()
    }
}

// ============================================================================
// Shared helper functions
// ============================================================================

/// Run a blocking OS query off the async runtime.
pub(crate) async fn run_blocking<T, F>(f: F) -> Result<T, ApiError>
where
    F: FnOnce() -> hostwatch_core::Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| HostwatchError::Other(format!("Blocking task failed: {}", e)))?
        .map_err(ApiError::from)
}
