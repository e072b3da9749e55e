//! Circuit breaker for link probes.
//!
//! Prevents resource exhaustion when the network fails repeatedly.
//! After N consecutive transport failures, the circuit opens and remaining
//! probes are rejected without being attempted.

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Arc;

/// Circuit breaker state for link probes.
///
/// Tracks consecutive transport failures and opens the circuit after a
/// threshold. Once open, the circuit stays open for the remainder of the
/// run: a systemic outage (DNS down, no network) is not expected to heal
/// mid-batch, and probes rejected by the open circuit are reported rather
/// than silently retried.
///
/// Successful responses reset the consecutive failure count but never
/// close an already-open circuit.
///
/// Clones share the same underlying counters.
#[derive(Clone)]
pub struct CircuitBreaker {
    /// Number of consecutive failures before opening circuit
    failure_threshold: u32,
    /// Current consecutive failure count
    failure_count: Arc<AtomicU32>,
    /// Whether the circuit is currently open
    is_open: Arc<AtomicBool>,
}

impl CircuitBreaker {
    /// Creates a new circuit breaker with the default failure threshold.
    pub fn new() -> Self {
        Self::with_threshold(crate::config::DEFAULT_FAILURE_THRESHOLD)
    }

    /// Creates a new circuit breaker with a custom threshold.
    ///
    /// # Arguments
    ///
    /// * `failure_threshold` - Number of consecutive transport failures before
    ///   opening the circuit
    pub fn with_threshold(failure_threshold: u32) -> Self {
        CircuitBreaker {
            failure_threshold,
            failure_count: Arc::new(AtomicU32::new(0)),
            is_open: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Records a probe that got an HTTP response.
    ///
    /// Resets the consecutive failure count. Does not close the circuit if
    /// it is already open.
    pub fn record_success(&self) {
        self.failure_count.store(0, Ordering::SeqCst);
    }

    /// Records a probe that failed at the transport level.
    ///
    /// Increments the failure count and opens the circuit if the threshold
    /// is reached.
    pub fn record_failure(&self) {
        let count = self.failure_count.fetch_add(1, Ordering::SeqCst) + 1;

        if count >= self.failure_threshold && !self.is_open.load(Ordering::SeqCst) {
            self.is_open.store(true, Ordering::SeqCst);
            log::error!(
                "Circuit breaker: circuit opened after {} consecutive transport failures, \
                 remaining probes will be rejected",
                count
            );
        }
    }

    /// Checks if the circuit is open (probes should be rejected).
    pub fn is_circuit_open(&self) -> bool {
        self.is_open.load(Ordering::SeqCst)
    }

    /// Gets the current failure count (for monitoring).
    #[allow(dead_code)] // Reserved for future monitoring/metrics
    pub fn failure_count(&self) -> u32 {
        self.failure_count.load(Ordering::SeqCst)
    }
}

impl Default for CircuitBreaker {
    fn default() -> Self {
        Self::new()
    }
}
