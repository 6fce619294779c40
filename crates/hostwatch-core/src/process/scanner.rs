//! Process table scanning.
//!
//! A scan is a best-effort view of the OS process table. Entries that cannot
//! be resolved (the process exited, access was denied, it is a zombie) are
//! classified per entry and skipped; only a table that cannot be enumerated at
//! all fails the scan.

use crate::error::{HostwatchError, Result};
use std::ffi::{OsStr, OsString};
use std::fmt;
use std::path::Path;
use sysinfo::{ProcessRefreshKind, ProcessStatus, ProcessesToUpdate, System, UpdateKind};
use thiserror::Error;
use tracing::{debug, trace};

/// Opaque identifier of a process, valid only for the scan that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProcessHandle(u32);

impl ProcessHandle {
    pub fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    pub fn as_raw(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for ProcessHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Read-only view of one process at scan time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessDescriptor {
    /// Process name as reported by the OS.
    pub name: String,
    /// Opaque handle, not retained past the scan.
    pub handle: ProcessHandle,
}

impl ProcessDescriptor {
    pub fn new(name: impl Into<String>, handle: ProcessHandle) -> Self {
        Self {
            name: name.into(),
            handle,
        }
    }
}

/// Why a single entry of the process table could not be resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EntryError {
    #[error("process {0} exited during the scan")]
    Vanished(ProcessHandle),

    #[error("access to process {0} was denied")]
    AccessDenied(ProcessHandle),

    #[error("process {0} is a zombie")]
    Zombie(ProcessHandle),
}

/// One raw entry of a scan: a resolved descriptor or an entry-scoped failure.
pub type ScanEntry = std::result::Result<ProcessDescriptor, EntryError>;

/// A single pass over the process table.
///
/// The pass is materialized when the table is refreshed; entries are then
/// classified one at a time as they are pulled. Yields every resolvable
/// descriptor once. Failed entries are skipped and counted. Not restartable:
/// call [`ProcessTable::scan`] again for a new pass.
pub struct ProcessScan {
    entries: Box<dyn Iterator<Item = ScanEntry> + Send>,
    skipped: usize,
}

impl ProcessScan {
    pub fn new<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = ScanEntry>,
        I::IntoIter: Send + 'static,
    {
        Self {
            entries: Box::new(entries.into_iter()),
            skipped: 0,
        }
    }

    /// Number of entries skipped so far.
    pub fn skipped(&self) -> usize {
        self.skipped
    }
}

impl Iterator for ProcessScan {
    type Item = ProcessDescriptor;

    fn next(&mut self) -> Option<Self::Item> {
        for entry in self.entries.by_ref() {
            match entry {
                Ok(descriptor) => return Some(descriptor),
                Err(err) => {
                    self.skipped += 1;
                    trace!("Skipping process table entry: {}", err);
                }
            }
        }
        None
    }
}

impl fmt::Debug for ProcessScan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProcessScan")
            .field("skipped", &self.skipped)
            .finish_non_exhaustive()
    }
}

/// Source of process table scans.
pub trait ProcessTable: Send + Sync {
    /// Start a fresh pass over the process table.
    ///
    /// Fails only when the table cannot be enumerated at all.
    fn scan(&self) -> Result<ProcessScan>;
}

/// Process table backed by the live OS through `sysinfo`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SysinfoProcessTable;

impl SysinfoProcessTable {
    pub fn new() -> Self {
        Self
    }
}

impl ProcessTable for SysinfoProcessTable {
    fn scan(&self) -> Result<ProcessScan> {
        if !sysinfo::IS_SUPPORTED_SYSTEM {
            return Err(HostwatchError::ProcessTableUnavailable {
                message: format!(
                    "process enumeration is not supported on {}",
                    std::env::consts::OS
                ),
            });
        }

        let mut system = System::new();
        system.refresh_processes_specifics(
            ProcessesToUpdate::All,
            true,
            ProcessRefreshKind::new().with_cmd(UpdateKind::OnlyIfNotSet),
        );

        // Threads are listed alongside processes on Linux
        let raw: Vec<(u32, String, ProcessStatus)> = system
            .processes()
            .iter()
            .filter(|(_, process)| process.thread_kind().is_none())
            .map(|(pid, process)| {
                (
                    pid.as_u32(),
                    full_name(process.name(), process.cmd().first()),
                    process.status(),
                )
            })
            .collect();

        debug!("Process table scan: {} entries", raw.len());

        Ok(ProcessScan::new(
            raw.into_iter()
                .map(|(pid, name, status)| classify_entry(pid, name, status)),
        ))
    }
}

/// Longest name the kernel keeps for a process (`TASK_COMM_LEN - 1`).
const COMM_MAX_LEN: usize = 15;

/// Recover the full executable name when the kernel truncated it.
///
/// A name at the length limit is replaced by the basename of the first
/// command-line argument when that basename extends it.
fn full_name(name: &OsStr, argv0: Option<&OsString>) -> String {
    let name = name.to_string_lossy().into_owned();
    if name.len() != COMM_MAX_LEN {
        return name;
    }
    argv0
        .and_then(|arg| Path::new(arg).file_name())
        .map(|base| base.to_string_lossy().into_owned())
        .filter(|base| base.starts_with(&name))
        .unwrap_or(name)
}

/// Turn raw process data into a descriptor or an entry-scoped failure.
///
/// The OS reports an empty name when it could not be read.
fn classify_entry(pid: u32, name: String, status: ProcessStatus) -> ScanEntry {
    let handle = ProcessHandle::from_raw(pid);
    if !name.is_empty() {
        return Ok(ProcessDescriptor::new(name, handle));
    }
    match status {
        ProcessStatus::Zombie => Err(EntryError::Zombie(handle)),
        ProcessStatus::Dead => Err(EntryError::Vanished(handle)),
        _ => Err(EntryError::AccessDenied(handle)),
    }
}

/// In-memory process table.
///
/// Replays a fixed list of entries on every scan, or fails every scan when
/// built with [`StaticProcessTable::unavailable`]. Used to substitute the OS
/// in tests and embedders.
#[derive(Debug, Clone, Default)]
pub struct StaticProcessTable {
    entries: Vec<ScanEntry>,
    unavailable: Option<String>,
}

impl StaticProcessTable {
    /// Table whose entries all resolve, with handles assigned in order.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let entries = names
            .into_iter()
            .enumerate()
            .map(|(i, name)| Ok(ProcessDescriptor::new(name, ProcessHandle::from_raw(i as u32 + 1))))
            .collect();
        Self {
            entries,
            unavailable: None,
        }
    }

    /// Table made of explicit entries, including failures.
    pub fn from_entries(entries: Vec<ScanEntry>) -> Self {
        Self {
            entries,
            unavailable: None,
        }
    }

    /// Table whose scans always fail as a whole.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self {
            entries: Vec::new(),
            unavailable: Some(message.into()),
        }
    }
}

impl ProcessTable for StaticProcessTable {
    fn scan(&self) -> Result<ProcessScan> {
        if let Some(message) = &self.unavailable {
            return Err(HostwatchError::ProcessTableUnavailable {
                message: message.clone(),
            });
        }
        Ok(ProcessScan::new(self.entries.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn handle(raw: u32) -> ProcessHandle {
        ProcessHandle::from_raw(raw)
    }

    #[test]
    fn test_scan_skips_failed_entries() {
        let table = StaticProcessTable::from_entries(vec![
            Err(EntryError::Vanished(handle(1))),
            Ok(ProcessDescriptor::new("nginx", handle(2))),
            Err(EntryError::AccessDenied(handle(3))),
            Err(EntryError::Zombie(handle(4))),
            Ok(ProcessDescriptor::new("postgres", handle(5))),
        ]);

        let mut scan = table.scan().unwrap();
        let names: Vec<String> = scan.by_ref().map(|d| d.name).collect();

        assert_eq!(names, vec!["nginx", "postgres"]);
        assert_eq!(scan.skipped(), 3);
    }

    #[test]
    fn test_scan_is_not_restartable() {
        let table = StaticProcessTable::from_names(["init"]);
        let mut scan = table.scan().unwrap();
        assert!(scan.next().is_some());
        assert!(scan.next().is_none());
        assert!(scan.next().is_none());

        // A new pass sees the table again
        assert_eq!(table.scan().unwrap().count(), 1);
    }

    #[test]
    fn test_unavailable_table_fails_whole_scan() {
        let table = StaticProcessTable::unavailable("permission denied");
        let err = table.scan().unwrap_err();
        assert!(matches!(err, HostwatchError::ProcessTableUnavailable { .. }));
    }

    #[test]
    fn test_classify_entry() {
        assert_eq!(
            classify_entry(7, "sshd".into(), ProcessStatus::Sleep),
            Ok(ProcessDescriptor::new("sshd", handle(7)))
        );
        assert_eq!(
            classify_entry(8, String::new(), ProcessStatus::Zombie),
            Err(EntryError::Zombie(handle(8)))
        );
        assert_eq!(
            classify_entry(9, String::new(), ProcessStatus::Dead),
            Err(EntryError::Vanished(handle(9)))
        );
        assert_eq!(
            classify_entry(10, String::new(), ProcessStatus::Run),
            Err(EntryError::AccessDenied(handle(10)))
        );
    }

    #[test]
    fn test_sysinfo_scan_sees_current_process() {
        if !sysinfo::IS_SUPPORTED_SYSTEM {
            return;
        }
        let own = std::process::id();
        let found = SysinfoProcessTable::new()
            .scan()
            .unwrap()
            .any(|d| d.handle.as_raw() == own);
        assert!(found);
    }

    #[test]
    fn test_full_name_recovers_truncated_comm() {
        let argv0 = OsString::from("/opt/bin/averyverylongprocname_tailxyz");
        assert_eq!(
            full_name(OsStr::new("averyverylongpr"), Some(&argv0)),
            "averyverylongprocname_tailxyz"
        );

        // Shorter names are already complete
        let argv0 = OsString::from("/usr/sbin/sshd");
        assert_eq!(full_name(OsStr::new("sshd"), Some(&argv0)), "sshd");

        // A rewritten argv0 that does not extend the name is ignored
        let argv0 = OsString::from("sshd: /usr/sbin/sshd -D");
        assert_eq!(
            full_name(OsStr::new("kworker/u16:3-ev"), Some(&argv0)),
            "kworker/u16:3-ev"
        );
        assert_eq!(full_name(OsStr::new("averyverylongpr"), None), "averyverylongpr");
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_sysinfo_scan_skips_threads() {
        use crate::process::LivenessMatcher;
        use std::sync::{mpsc, Arc};

        let thread_name = "hwthreadonly";
        let (release, wait) = mpsc::channel::<()>();
        let worker = std::thread::Builder::new()
            .name(thread_name.to_string())
            .spawn(move || {
                let _ = wait.recv();
            })
            .unwrap();

        let names: Vec<String> = SysinfoProcessTable::new()
            .scan()
            .unwrap()
            .map(|d| d.name)
            .collect();
        let results = LivenessMatcher::new(Arc::new(SysinfoProcessTable::new()))
            .check(&[thread_name])
            .unwrap();

        release.send(()).unwrap();
        worker.join().unwrap();

        assert!(!names.iter().any(|n| n == thread_name));
        assert_eq!(results[0].verdict, crate::process::Verdict::Failed);
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_sysinfo_scan_reports_long_names_in_full() {
        use crate::process::LivenessMatcher;
        use std::sync::Arc;

        let Some(sleep) = ["/bin/sleep", "/usr/bin/sleep"]
            .into_iter()
            .map(Path::new)
            .find(|p| p.exists())
        else {
            return;
        };

        let temp_dir = tempfile::TempDir::new().unwrap();
        let long_exe = temp_dir.path().join("averyverylongprocname_tailxyz");
        std::fs::copy(&sleep, &long_exe).unwrap();
        let mut child = std::process::Command::new(&long_exe).arg("30").spawn().unwrap();

        let results = LivenessMatcher::new(Arc::new(SysinfoProcessTable::new()))
            .check(&["tailxyz", "AVERYVERYLONGPROCNAME"])
            .unwrap();

        let _ = child.kill();
        let _ = child.wait();

        assert_eq!(results[0].verdict, crate::process::Verdict::Running);
        assert_eq!(results[1].verdict, crate::process::Verdict::Running);
    }
}
