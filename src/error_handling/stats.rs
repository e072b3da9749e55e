//! Run statistics.
//!
//! Counters for everything a run reports at the end: errors by category,
//! warnings about dropped input, and notable non-error events.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::atomic::{AtomicUsize, Ordering};

use strum::IntoEnumIterator;

use super::types::{ErrorType, InfoType, WarningType};

/// Thread-safe counters for one checking run.
///
/// Every enum variant gets its own atomic counter at construction, so
/// incrementing never allocates and lookups never miss. Share across tasks
/// with `Arc`. Increments use relaxed ordering since the totals are only
/// read once the run settles.
pub struct ProcessingStats {
    errors: HashMap<ErrorType, AtomicUsize>,
    warnings: HashMap<WarningType, AtomicUsize>,
    info: HashMap<InfoType, AtomicUsize>,
}

fn seeded<K: IntoEnumIterator + Eq + Hash>() -> HashMap<K, AtomicUsize> {
    K::iter().map(|k| (k, AtomicUsize::new(0))).collect()
}

fn bump<K: Eq + Hash>(map: &HashMap<K, AtomicUsize>, key: K) {
    // Seeded with every variant, so the lookup cannot miss
    if let Some(counter) = map.get(&key) {
        counter.fetch_add(1, Ordering::Relaxed);
    }
}

fn read<K: Eq + Hash>(map: &HashMap<K, AtomicUsize>, key: K) -> usize {
    map.get(&key).map_or(0, |c| c.load(Ordering::SeqCst))
}

impl ProcessingStats {
    /// Creates a tracker with all counters at zero.
    pub fn new() -> Self {
        ProcessingStats {
            errors: seeded(),
            warnings: seeded(),
            info: seeded(),
        }
    }

    /// Counts one error occurrence.
    pub fn increment_error(&self, error: ErrorType) {
        bump(&self.errors, error);
    }

    /// Counts one warning occurrence.
    pub fn increment_warning(&self, warning: WarningType) {
        bump(&self.warnings, warning);
    }

    /// Counts one informational event.
    pub fn increment_info(&self, info: InfoType) {
        bump(&self.info, info);
    }

    /// Returns the count for an error category.
    pub fn get_error_count(&self, error: ErrorType) -> usize {
        read(&self.errors, error)
    }

    /// Returns the count for a warning category.
    pub fn get_warning_count(&self, warning: WarningType) -> usize {
        read(&self.warnings, warning)
    }

    /// Returns the count for an info category.
    pub fn get_info_count(&self, info: InfoType) -> usize {
        read(&self.info, info)
    }

    /// Total errors across all categories.
    pub fn total_errors(&self) -> usize {
        ErrorType::iter().map(|e| self.get_error_count(e)).sum()
    }

    /// Total warnings across all categories.
    pub fn total_warnings(&self) -> usize {
        WarningType::iter().map(|w| self.get_warning_count(w)).sum()
    }

    /// Total info events across all categories.
    pub fn total_info(&self) -> usize {
        InfoType::iter().map(|i| self.get_info_count(i)).sum()
    }
}

impl Default for ProcessingStats {
    fn default() -> Self {
        Self::new()
    }
}
