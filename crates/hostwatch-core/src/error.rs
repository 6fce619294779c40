//! Error types for Hostwatch.
//!
//! Per-process failures during a scan are not errors at this level; they are
//! classified as [`EntryError`](crate::process::EntryError) and skipped. Only
//! failures that abort a whole request end up here.

use thiserror::Error;

/// Main error type for the Hostwatch library.
#[derive(Debug, Error)]
pub enum HostwatchError {
    /// The OS process table cannot be enumerated at all.
    #[error("Process table unavailable: {message}")]
    ProcessTableUnavailable { message: String },

    /// A resource counter could not be read.
    #[error("Failed to read {metric} metrics: {message}")]
    Metrics { metric: String, message: String },

    /// Caller-supplied input was rejected before reaching the core.
    #[error("Validation error for {field}: {message}")]
    Validation { field: String, message: String },

    #[error("IO error: {message}")]
    Io {
        message: String,
        #[source]
        source: Option<std::io::Error>,
    },

    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: Option<serde_json::Error>,
    },

    #[error("{0}")]
    Other(String),
}

/// Result type alias for Hostwatch operations.
pub type Result<T> = std::result::Result<T, HostwatchError>;

impl From<std::io::Error> for HostwatchError {
    fn from(err: std::io::Error) -> Self {
        HostwatchError::Io {
            message: err.to_string(),
            source: Some(err),
        }
    }
}

impl From<serde_json::Error> for HostwatchError {
    fn from(err: serde_json::Error) -> Self {
        HostwatchError::Json {
            message: err.to_string(),
            source: Some(err),
        }
    }
}

impl HostwatchError {
    /// Create a metrics error for the named counter group.
    pub fn metrics(metric: impl Into<String>, message: impl Into<String>) -> Self {
        HostwatchError::Metrics {
            metric: metric.into(),
            message: message.into(),
        }
    }

    /// Map to an HTTP status code.
    ///
    /// - 422: caller input rejected at the boundary
    /// - 503: the process table cannot be read
    /// - 500: everything else
    pub fn http_status(&self) -> u16 {
        match self {
            HostwatchError::Validation { .. } => 422,
            HostwatchError::ProcessTableUnavailable { .. } => 503,
            _ => 500,
        }
    }
}
