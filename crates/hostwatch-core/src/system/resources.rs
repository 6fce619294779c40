//! Host resource readers backed by `sysinfo`.
//!
//! Provides:
//! - Disk usage of the filesystem holding a configured path
//! - Aggregate and per-core CPU usage
//! - Physical memory usage
//! - Uptime since boot

use super::SystemSnapshotProvider;
use crate::config::MetricsConfig;
use crate::error::{HostwatchError, Result};
use crate::models::{CpuUsage, DiskUsage, MemoryUsage, Uptime};
use crate::process::{ProcessScan, ProcessTable, SysinfoProcessTable};
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};
use std::time::Instant;
use sysinfo::{Disks, System};
use tracing::debug;

/// CPU sampling state; usage is the delta between two refreshes.
struct CpuSampler {
    system: System,
    last_sample: Instant,
}

/// Snapshot provider reading live OS counters.
pub struct SysinfoProvider {
    /// Path whose filesystem is reported by [`SystemSnapshotProvider::disk_usage`].
    disk_path: PathBuf,
    cpu: Mutex<CpuSampler>,
    processes: SysinfoProcessTable,
}

impl SysinfoProvider {
    /// Create a provider reporting the disk that holds `disk_path`.
    pub fn new(disk_path: impl AsRef<Path>) -> Self {
        let mut system = System::new();
        system.refresh_cpu_all();

        Self {
            disk_path: disk_path.as_ref().to_path_buf(),
            cpu: Mutex::new(CpuSampler {
                system,
                last_sample: Instant::now(),
            }),
            processes: SysinfoProcessTable::new(),
        }
    }

    pub fn disk_path(&self) -> &Path {
        &self.disk_path
    }
}

impl Default for SysinfoProvider {
    fn default() -> Self {
        Self::new(MetricsConfig::DEFAULT_DISK_PATH)
    }
}

impl SystemSnapshotProvider for SysinfoProvider {
    fn disk_usage(&self) -> Result<DiskUsage> {
        let disks = Disks::new_with_refreshed_list();

        // The most specific mount point containing the path wins
        let disk = disks
            .list()
            .iter()
            .filter(|disk| self.disk_path.starts_with(disk.mount_point()))
            .max_by_key(|disk| disk.mount_point().components().count())
            .ok_or_else(|| {
                HostwatchError::metrics(
                    "disk",
                    format!("no mounted disk contains {}", self.disk_path.display()),
                )
            })?;

        debug!(
            "Disk usage for {} from mount point {}",
            self.disk_path.display(),
            disk.mount_point().display()
        );

        Ok(disk_usage_from(disk.total_space(), disk.available_space()))
    }

    fn cpu_usage(&self) -> Result<CpuUsage> {
        let mut sampler = self.cpu.lock().unwrap_or_else(PoisonError::into_inner);

        let elapsed = sampler.last_sample.elapsed();
        if elapsed < MetricsConfig::CPU_SAMPLE_INTERVAL {
            std::thread::sleep(MetricsConfig::CPU_SAMPLE_INTERVAL - elapsed);
        }
        sampler.system.refresh_cpu_all();
        sampler.last_sample = Instant::now();

        let cores: Vec<f32> = sampler
            .system
            .cpus()
            .iter()
            .map(|cpu| round1(cpu.cpu_usage()))
            .collect();

        Ok(CpuUsage {
            cpu: round1(sampler.system.global_cpu_usage()),
            total: cores.len(),
            cores,
        })
    }

    fn memory_usage(&self) -> Result<MemoryUsage> {
        let mut system = System::new();
        system.refresh_memory();

        let total = system.total_memory();
        if total == 0 {
            return Err(HostwatchError::metrics("memory", "total memory reported as 0"));
        }

        Ok(memory_usage_from(
            total,
            system.available_memory(),
            system.used_memory(),
            system.free_memory(),
        ))
    }

    fn uptime(&self) -> Result<Uptime> {
        let boot_time = System::boot_time();
        if boot_time == 0 {
            return Err(HostwatchError::metrics("uptime", "boot time unavailable"));
        }

        let now = Utc::now().timestamp_millis() as f64 / 1000.0;
        uptime_from_seconds(now - boot_time as f64)
    }
}

impl ProcessTable for SysinfoProvider {
    fn scan(&self) -> Result<ProcessScan> {
        self.processes.scan()
    }
}

fn round1(value: f32) -> f32 {
    (value * 10.0).round() / 10.0
}

fn percent_of(part: u64, total: u64) -> f32 {
    if total == 0 {
        0.0
    } else {
        round1((part as f64 / total as f64 * 100.0) as f32)
    }
}

/// Build disk usage from total and available bytes.
pub(crate) fn disk_usage_from(total: u64, free: u64) -> DiskUsage {
    let used = total.saturating_sub(free);
    DiskUsage {
        total,
        used,
        free,
        percent: percent_of(used, total),
    }
}

/// Build memory usage from raw counters.
pub(crate) fn memory_usage_from(total: u64, available: u64, used: u64, free: u64) -> MemoryUsage {
    MemoryUsage {
        total,
        available,
        percent: percent_of(total.saturating_sub(available), total),
        used,
        free,
        used_gb: used as f64 / MetricsConfig::BYTES_PER_GB,
        free_gb: free as f64 / MetricsConfig::BYTES_PER_GB,
    }
}

/// Build uptime from elapsed seconds.
pub(crate) fn uptime_from_seconds(seconds: f64) -> Result<Uptime> {
    let seconds = seconds.max(0.0);
    let readable = DateTime::<Utc>::from_timestamp(seconds as i64, 0)
        .ok_or_else(|| HostwatchError::metrics("uptime", format!("invalid uptime {seconds}")))?
        .format(MetricsConfig::UPTIME_FORMAT)
        .to_string();

    Ok(Uptime {
        uptime: seconds,
        uptime_readable: readable,
    })
}
