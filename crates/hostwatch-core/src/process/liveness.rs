//! Process liveness checks.
//!
//! Answers, for an ordered list of terms, whether each term is a
//! case-insensitive substring of at least one live process name.

use super::scanner::ProcessTable;
use crate::error::Result;
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::sync::Arc;
use tracing::debug;

/// Outcome for one query term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Running,
    Failed,
}

impl Verdict {
    pub fn is_running(&self) -> bool {
        matches!(self, Verdict::Running)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Running => "running",
            Verdict::Failed => "failed",
        }
    }
}

/// A query term paired with its verdict.
///
/// Serializes as a single-key object: `{"<term>": "running"}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermVerdict {
    /// The term exactly as the caller supplied it.
    pub term: String,
    pub verdict: Verdict,
}

impl Serialize for TermVerdict {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.term, &self.verdict)?;
        map.end()
    }
}

/// Returns true if `term` is a case-insensitive substring of `name`.
///
/// An empty term matches every name.
pub fn matches(term: &str, name: &str) -> bool {
    matches_lowered(&term.to_lowercase(), &name.to_lowercase())
}

/// Matching rule on already-lowercased inputs.
fn matches_lowered(needle: &str, name: &str) -> bool {
    name.contains(needle)
}

/// Checks query terms against the process table.
#[derive(Clone)]
pub struct LivenessMatcher {
    table: Arc<dyn ProcessTable>,
}

impl LivenessMatcher {
    pub fn new(table: Arc<dyn ProcessTable>) -> Self {
        Self { table }
    }

    /// Produce one verdict per term, in input order.
    ///
    /// Each call takes one fresh scan and shares it across all of its terms.
    /// A scan that fails as a whole is returned as the error of the call.
    pub fn check<S: AsRef<str>>(&self, terms: &[S]) -> Result<Vec<TermVerdict>> {
        if terms.is_empty() {
            return Ok(Vec::new());
        }

        let mut scan = self.table.scan()?;
        let names: Vec<String> = scan.by_ref().map(|d| d.name.to_lowercase()).collect();
        debug!(
            "Liveness check: {} terms against {} processes ({} entries skipped)",
            terms.len(),
            names.len(),
            scan.skipped()
        );

        let verdicts = terms
            .iter()
            .map(|term| {
                let term = term.as_ref();
                let needle = term.to_lowercase();
                let verdict = if names.iter().any(|name| matches_lowered(&needle, name)) {
                    Verdict::Running
                } else {
                    Verdict::Failed
                };
                TermVerdict {
                    term: term.to_string(),
                    verdict,
                }
            })
            .collect();

        Ok(verdicts)
    }
}
