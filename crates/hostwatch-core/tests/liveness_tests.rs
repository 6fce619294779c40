//! Integration tests for the hostwatch-core public interface.
//!
//! These tests drive the liveness matcher and metrics providers through the
//! re-exported API only.

use hostwatch_core::process::{EntryError, ProcessHandle};
use hostwatch_core::{
    HostwatchError, LivenessMatcher, ProcessDescriptor, StaticProcessTable, SysinfoProvider,
    SystemSnapshotProvider, Verdict,
};
use std::sync::Arc;

/// Table with a mix of readable and unreadable entries.
fn mixed_table() -> StaticProcessTable {
    let h = ProcessHandle::from_raw;
    StaticProcessTable::from_entries(vec![
        Ok(ProcessDescriptor::new("systemd", h(1))),
        Err(EntryError::AccessDenied(h(2))),
        Ok(ProcessDescriptor::new("sshd: /usr/sbin/sshd -D", h(3))),
        Err(EntryError::Vanished(h(4))),
        Ok(ProcessDescriptor::new("Chrome Helper", h(5))),
        Err(EntryError::Zombie(h(6))),
    ])
}

#[test]
fn test_check_against_mixed_table() {
    let matcher = LivenessMatcher::new(Arc::new(mixed_table()));
    let terms = ["sshd", "chrome", "CHROME", "ChRoMe", "rom", "nginx", ""];

    let results = matcher.check(&terms).unwrap();

    assert_eq!(results.len(), terms.len());
    for (result, term) in results.iter().zip(terms) {
        assert_eq!(result.term, term);
    }
    let verdicts: Vec<Verdict> = results.iter().map(|r| r.verdict).collect();
    assert_eq!(
        verdicts,
        vec![
            Verdict::Running,
            Verdict::Running,
            Verdict::Running,
            Verdict::Running,
            Verdict::Running,
            Verdict::Failed,
            Verdict::Running,
        ]
    );
}

#[test]
fn test_table_of_only_failures_behaves_as_empty() {
    let h = ProcessHandle::from_raw;
    let table = StaticProcessTable::from_entries(vec![
        Err(EntryError::AccessDenied(h(1))),
        Err(EntryError::Zombie(h(2))),
    ]);
    let matcher = LivenessMatcher::new(Arc::new(table));

    let results = matcher.check(&["", "init"]).unwrap();
    assert_eq!(results[0].verdict, Verdict::Failed);
    assert_eq!(results[1].verdict, Verdict::Failed);
}

#[test]
fn test_unavailable_table_fails_check() {
    let matcher = LivenessMatcher::new(Arc::new(StaticProcessTable::unavailable("no /proc")));
    let result = matcher.check(&["sshd"]);
    assert!(matches!(
        result,
        Err(HostwatchError::ProcessTableUnavailable { .. })
    ));
}

#[test]
fn test_live_provider_finds_current_process() {
    let provider = Arc::new(SysinfoProvider::default());
    let matcher = LivenessMatcher::new(provider);

    let own_name = std::env::current_exe()
        .ok()
        .and_then(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
        .unwrap_or_default();
    // Kernels may truncate process names, so match on a short prefix
    let prefix: String = own_name.chars().take(8).collect();
    let missing = uuid::Uuid::new_v4().to_string();

    let results = matcher.check(&[prefix.as_str(), missing.as_str()]).unwrap();
    assert_eq!(results[0].verdict, Verdict::Running);
    assert_eq!(results[1].verdict, Verdict::Failed);
}

#[test]
fn test_live_provider_report() {
    let provider = SysinfoProvider::default();
    let memory = provider.memory_usage().unwrap();
    assert!(memory.total > 0);
    assert!(memory.percent >= 0.0 && memory.percent <= 100.0);

    let uptime = provider.uptime().unwrap();
    assert!(uptime.uptime > 0.0);
}
