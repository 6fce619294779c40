//! Response types for the metrics endpoints.
//!
//! Field names are part of the wire format.

use serde::{Deserialize, Serialize};

/// Filesystem usage for the monitored path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiskUsage {
    pub total: u64,
    pub used: u64,
    pub free: u64,
    pub percent: f32,
}

/// CPU utilisation since the previous sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CpuUsage {
    /// Aggregate usage across all cores.
    pub cpu: f32,
    /// Usage per logical core.
    pub cores: Vec<f32>,
    /// Number of logical cores.
    pub total: usize,
}

/// Physical memory usage, in bytes unless noted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryUsage {
    pub total: u64,
    pub available: u64,
    pub percent: f32,
    pub used: u64,
    pub free: u64,
    pub used_gb: f64,
    pub free_gb: f64,
}

/// Time since boot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Uptime {
    /// Seconds since boot.
    pub uptime: f64,
    /// `HH:MM:SS` of the elapsed time, wrapping every 24 hours.
    pub uptime_readable: String,
}

/// Every metric in one response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemReport {
    pub disk: DiskUsage,
    pub cpu: CpuUsage,
    pub memory: MemoryUsage,
    pub uptime: Uptime,
}
