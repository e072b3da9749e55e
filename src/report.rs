//! Validation report aggregation.
//!
//! Folds probe outcomes into three disjoint buckets: valid, broken, and
//! skipped. Buckets are ordered sets, so report output is deterministic
//! regardless of the order outcomes arrived in.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::probe::{OutcomeKind, ProbeOutcome};

/// The result of checking a batch of links.
///
/// Every deduplicated input URL lands in exactly one bucket:
/// - `valid`: the server answered with a non-error status
/// - `broken`: an error status, a transport failure, or an open circuit
/// - `skipped`: matched the skip list and was never probed
///
/// Broken entries carry the status code when one was obtained, in the form
/// `https://example.com/page (status: 404)`. Failures without a response
/// (timeouts, connect errors, circuit rejections) record the bare URL.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    /// Links that answered with a non-error status
    pub valid: BTreeSet<String>,
    /// Links that are broken, annotated with the status code when known
    pub broken: BTreeSet<String>,
    /// Links that matched the skip list
    pub skipped: BTreeSet<String>,
}

/// Bucket counts for a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReportSummary {
    /// Number of valid links
    pub valid: usize,
    /// Number of broken links
    pub broken: usize,
    /// Number of skipped links
    pub skipped: usize,
    /// Total number of deduplicated links checked
    pub total: usize,
}

impl ValidationReport {
    /// Creates an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a report from a collection of outcomes.
    pub fn from_outcomes(outcomes: impl IntoIterator<Item = ProbeOutcome>) -> Self {
        let mut report = Self::new();
        for outcome in outcomes {
            report.record(outcome);
        }
        report
    }

    /// Records one outcome into its bucket.
    pub fn record(&mut self, outcome: ProbeOutcome) {
        match outcome.kind {
            OutcomeKind::Valid => {
                self.valid.insert(outcome.url);
            }
            OutcomeKind::Skipped => {
                self.skipped.insert(outcome.url);
            }
            OutcomeKind::CircuitOpen | OutcomeKind::TransportError | OutcomeKind::ProtocolError => {
                self.broken.insert(broken_entry(&outcome));
            }
        }
    }

    /// Total number of links across all buckets.
    pub fn total(&self) -> usize {
        self.valid.len() + self.broken.len() + self.skipped.len()
    }

    /// Bucket counts for this report.
    pub fn summary(&self) -> ReportSummary {
        ReportSummary {
            valid: self.valid.len(),
            broken: self.broken.len(),
            skipped: self.skipped.len(),
            total: self.total(),
        }
    }

    /// Renders the report as a JSON value.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "valid": &self.valid,
            "broken": &self.broken,
            "skipped": &self.skipped,
            "summary": self.summary(),
        })
    }
}

/// Formats a broken link entry, attaching the status code when one is known.
fn broken_entry(outcome: &ProbeOutcome) -> String {
    match outcome.status_code {
        Some(status) => format!("{} (status: {})", outcome.url, status),
        None => outcome.url.clone(),
    }
}
