//! URL probing: outcome types, shared context, and the probe itself.
//!
//! This module provides:
//! - `ProbeOutcome` / `OutcomeKind`: what happened to each URL
//! - `ProbeContext`: shared resources for a run
//! - `probe_url` / `probe_url_blocking`: the probe in async and blocking form

mod client;
mod context;
mod outcome;

// Re-export public API
pub use client::{probe_url, probe_url_blocking};
pub use context::ProbeContext;
pub use outcome::{OutcomeKind, ProbeOutcome};
