//! System metrics module.
//!
//! Host telemetry is read through the [`SystemSnapshotProvider`] capability so
//! that callers can swap the live OS for a fixed snapshot:
//! - Disk usage of the monitored filesystem
//! - CPU usage, aggregate and per core
//! - Memory usage
//! - Uptime
//!
//! # Example
//!
//! ```rust,no_run
//! use hostwatch_core::system::{SysinfoProvider, SystemSnapshotProvider};
//!
//! fn main() -> hostwatch_core::Result<()> {
//!     let provider = SysinfoProvider::new("/");
//!
//!     let disk = provider.disk_usage()?;
//!     println!("Free space: {} GB", disk.free / 1_073_741_824);
//!
//!     let uptime = provider.uptime()?;
//!     println!("Up for {}", uptime.uptime_readable);
//!
//!     Ok(())
//! }
//! ```

mod fixed;
mod resources;

pub use fixed::FixedSnapshotProvider;
pub use resources::SysinfoProvider;

use crate::error::Result;
use crate::models::{CpuUsage, DiskUsage, MemoryUsage, SystemReport, Uptime};

/// Source of host resource counters.
pub trait SystemSnapshotProvider: Send + Sync {
    fn disk_usage(&self) -> Result<DiskUsage>;

    fn cpu_usage(&self) -> Result<CpuUsage>;

    fn memory_usage(&self) -> Result<MemoryUsage>;

    fn uptime(&self) -> Result<Uptime>;

    /// All metrics at once. Fails if any single reader fails.
    fn report(&self) -> Result<SystemReport> {
        Ok(SystemReport {
            disk: self.disk_usage()?,
            cpu: self.cpu_usage()?,
            memory: self.memory_usage()?,
            uptime: self.uptime()?,
        })
    }
}
