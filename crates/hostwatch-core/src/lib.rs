//! Hostwatch Core - Headless library for host telemetry and process liveness.
//!
//! This crate reads host resource counters (disk, CPU, memory, uptime) and
//! answers whether named processes are running. It can be used
//! programmatically without any HTTP layer.
//!
//! # Example
//!
//! ```rust,no_run
//! use hostwatch_core::{LivenessMatcher, SysinfoProvider, SystemSnapshotProvider};
//! use std::sync::Arc;
//!
//! fn main() -> hostwatch_core::Result<()> {
//!     let provider = Arc::new(SysinfoProvider::new("/"));
//!     let matcher = LivenessMatcher::new(provider.clone());
//!
//!     let report = provider.report()?;
//!     println!("CPU: {}%", report.cpu.cpu);
//!
//!     let verdicts = matcher.check(&["sshd"])?;
//!     println!("{}", serde_json::to_string(&verdicts)?);
//!
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod models;
pub mod process;
pub mod system;

// Re-export commonly used types
pub use error::{HostwatchError, Result};
pub use models::{CpuUsage, DiskUsage, MemoryUsage, SystemReport, Uptime};
pub use process::{
    LivenessMatcher, ProcessDescriptor, ProcessTable, StaticProcessTable, SysinfoProcessTable,
    TermVerdict, Verdict,
};
pub use system::{FixedSnapshotProvider, SysinfoProvider, SystemSnapshotProvider};
