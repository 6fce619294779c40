//! Centralized configuration for Hostwatch.
//!
//! Compile-time defaults for the HTTP boundary, the liveness check and the
//! metrics readers. Runtime overrides come from the server's CLI.

use std::time::Duration;

/// Application-level configuration.
pub struct AppConfig;

impl AppConfig {
    pub const APP_NAME: &'static str = "Hostwatch";
}

/// HTTP server defaults.
pub struct ServerConfig;

impl ServerConfig {
    pub const DEFAULT_HOST: &'static str = "127.0.0.1";
    pub const DEFAULT_PORT: u16 = 8000;
    /// Line printed on stdout once the listener is bound.
    pub const LISTEN_ADDR_PREFIX: &'static str = "LISTEN_ADDR=";
}

/// Process liveness check limits.
pub struct LivenessConfig;

impl LivenessConfig {
    /// Name of the repeated query parameter carrying the terms.
    pub const QUERY_PARAM: &'static str = "q";
    /// Maximum number of terms accepted in one request.
    pub const MAX_QUERY_TERMS: usize = 20;
}

/// Metrics reader defaults.
pub struct MetricsConfig;

impl MetricsConfig {
    /// Path whose filesystem is reported by the disk reader.
    pub const DEFAULT_DISK_PATH: &'static str = "/";
    pub const BYTES_PER_GB: f64 = 1024.0 * 1024.0 * 1024.0;
    /// Time-of-day format used for the readable uptime.
    pub const UPTIME_FORMAT: &'static str = "%H:%M:%S";
    /// Minimum spacing between CPU samples for a meaningful percentage.
    pub const CPU_SAMPLE_INTERVAL: Duration = sysinfo::MINIMUM_CPU_UPDATE_INTERVAL;
}
