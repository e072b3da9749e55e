//! Shared context for probe operations.
//!
//! This module defines the `ProbeContext` struct that groups all shared
//! resources needed for probing URLs, reducing function argument counts
//! and improving maintainability.

use std::sync::atomic::AtomicUsize;
use std::sync::Arc;

use crate::circuit_breaker::CircuitBreaker;
use crate::config::Config;
use crate::error_handling::{InitializationError, ProcessingStats};
use crate::skip_list::SkipList;

/// Context containing all shared resources needed for probing URLs.
///
/// One context is built per run and shared across all probes via `Arc`.
/// The circuit breaker and statistics inside it are therefore scoped to
/// the run that owns the context.
pub struct ProbeContext {
    /// Async HTTP client for making requests (with redirects enabled)
    pub client: reqwest::Client,
    /// URLs matching these patterns are reported as skipped, never probed
    pub skip_list: SkipList,
    /// Circuit breaker shared by every probe in this run
    pub breaker: CircuitBreaker,
    /// Error statistics tracker
    pub stats: Arc<ProcessingStats>,
    /// Per-request timeout in seconds (used when building blocking clients)
    pub timeout_seconds: u64,
    /// HTTP User-Agent header value (used when building blocking clients)
    pub user_agent: String,
    /// Number of URLs fully handled so far (for progress reporting)
    pub completed: AtomicUsize,
}

impl ProbeContext {
    /// Creates a new `ProbeContext` with the given resources.
    pub fn new(
        client: reqwest::Client,
        skip_list: SkipList,
        breaker: CircuitBreaker,
        stats: Arc<ProcessingStats>,
        timeout_seconds: u64,
        user_agent: String,
    ) -> Self {
        Self {
            client,
            skip_list,
            breaker,
            stats,
            timeout_seconds,
            user_agent,
            completed: AtomicUsize::new(0),
        }
    }

    /// Builds a context from a run configuration.
    ///
    /// Initializes the HTTP client and fresh per-run state (circuit breaker,
    /// statistics, progress counter).
    pub async fn from_config(config: &Config) -> Result<Self, InitializationError> {
        let client = crate::initialization::init_client(config).await?;
        Ok(Self::new(
            client,
            SkipList::new(config.skip_domains.clone()),
            CircuitBreaker::with_threshold(config.failure_threshold),
            Arc::new(ProcessingStats::new()),
            config.timeout_seconds,
            config.user_agent.clone(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::Ordering;

    #[tokio::test]
    async fn test_from_config_builds_fresh_state() {
        let config = Config::default();
        let context = ProbeContext::from_config(&config)
            .await
            .expect("context should build from the default config");

        assert!(!context.breaker.is_circuit_open());
        assert_eq!(context.completed.load(Ordering::SeqCst), 0);
        assert_eq!(context.stats.total_errors(), 0);
        assert!(context.skip_list.should_skip("http://localhost:8080/"));
        assert_eq!(context.timeout_seconds, config.timeout_seconds);
    }
}
