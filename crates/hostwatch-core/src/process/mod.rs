//! Process liveness module.
//!
//! Answers whether named processes are currently running.
//!
//! # Scan Strategy
//!
//! 1. **Scan** - one pass over the OS process table per check; unreadable
//!    entries are skipped, an unreadable table fails the check
//! 2. **Match** - each term is compared, case-insensitively, as a substring of
//!    every process name until the first hit
//!
//! # Example
//!
//! ```rust,no_run
//! use hostwatch_core::process::{LivenessMatcher, SysinfoProcessTable};
//! use std::sync::Arc;
//!
//! fn main() -> hostwatch_core::Result<()> {
//!     let matcher = LivenessMatcher::new(Arc::new(SysinfoProcessTable::new()));
//!
//!     for result in matcher.check(&["sshd", "postgres"])? {
//!         println!("{}: {}", result.term, result.verdict.as_str());
//!     }
//!
//!     Ok(())
//! }
//! ```

mod liveness;
mod scanner;

pub use liveness::{matches, LivenessMatcher, TermVerdict, Verdict};
pub use scanner::{
    EntryError, ProcessDescriptor, ProcessHandle, ProcessScan, ProcessTable, ScanEntry,
    StaticProcessTable, SysinfoProcessTable,
};
