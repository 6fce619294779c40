//! Fixed snapshot provider.

use super::resources::{disk_usage_from, memory_usage_from, uptime_from_seconds};
use super::SystemSnapshotProvider;
use crate::error::Result;
use crate::models::{CpuUsage, DiskUsage, MemoryUsage, Uptime};

/// Provider that returns the same snapshot on every read.
#[derive(Debug, Clone)]
pub struct FixedSnapshotProvider {
    pub disk: DiskUsage,
    pub cpu: CpuUsage,
    pub memory: MemoryUsage,
    /// Seconds since boot.
    pub uptime_seconds: f64,
}

impl Default for FixedSnapshotProvider {
    /// A 4-core host with 100 GB of disk and 16 GB of RAM, up for one hour.
    fn default() -> Self {
        let gb = 1024 * 1024 * 1024;
        Self {
            disk: disk_usage_from(100 * gb, 60 * gb),
            cpu: CpuUsage {
                cpu: 25.0,
                cores: vec![10.0, 20.0, 30.0, 40.0],
                total: 4,
            },
            memory: memory_usage_from(16 * gb, 12 * gb, 4 * gb, 8 * gb),
            uptime_seconds: 3600.0,
        }
    }
}

impl SystemSnapshotProvider for FixedSnapshotProvider {
    fn disk_usage(&self) -> Result<DiskUsage> {
        Ok(self.disk.clone())
    }

    fn cpu_usage(&self) -> Result<CpuUsage> {
        Ok(self.cpu.clone())
    }

    fn memory_usage(&self) -> Result<MemoryUsage> {
        Ok(self.memory.clone())
    }

    fn uptime(&self) -> Result<Uptime> {
        uptime_from_seconds(self.uptime_seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_combines_readers() {
        let provider = FixedSnapshotProvider::default();
        let report = provider.report().unwrap();

        assert_eq!(report.disk.percent, 40.0);
        assert_eq!(report.cpu.total, 4);
        assert_eq!(report.memory.percent, 25.0);
        assert_eq!(report.uptime.uptime_readable, "01:00:00");
    }
}
