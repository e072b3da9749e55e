//! Configuration constants.
//!
//! This module defines all configuration constants used throughout the application,
//! including timeouts, retry parameters, and default limits.

// Defaults for CLI flags and `Config`
/// Maximum concurrent probes (semaphore permits or pool threads)
pub const DEFAULT_MAX_CONCURRENCY: usize = 10;
/// Per-request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
/// Consecutive transport failures before the circuit breaker opens
pub const DEFAULT_FAILURE_THRESHOLD: u32 = 5;
/// URL substrings that are never probed.
///
/// Loopback host literals: checking links against the machine running the
/// checker produces meaningless results, so these are excluded by default.
pub const DEFAULT_SKIP_DOMAINS: [&str; 3] = ["localhost", "127.0.0.1", "0.0.0.0"];

/// Default User-Agent string for probe requests.
///
/// Users can override this via the `--user-agent` CLI flag.
pub const DEFAULT_USER_AGENT: &str = concat!("link_status/", env!("CARGO_PKG_VERSION"));

// Network operation timeouts
/// TCP connection timeout in seconds
pub const TCP_CONNECT_TIMEOUT_SECS: u64 = 5;

// Redirect handling
/// Maximum number of redirect hops to follow
/// Prevents infinite redirect loops and excessive request chains
pub const MAX_REDIRECT_HOPS: usize = 10;

// Retry strategy
/// Base delay in milliseconds for the exponential backoff schedule
pub const RETRY_INITIAL_DELAY_MS: u64 = 250;
/// Multiplier applied to every delay in the backoff schedule
pub const RETRY_FACTOR: u64 = 2;
/// Maximum delay between retries in seconds
pub const RETRY_MAX_DELAY_SECS: u64 = 4;
/// Maximum number of retries after the initial attempt
/// Set to 2 = initial attempt + 2 retries (total 3 attempts)
pub const RETRY_MAX_ATTEMPTS: usize = 2;
/// HTTP status codes that are retried with backoff before the final
/// response is classified. Everything else settles on the first response.
pub const RETRIABLE_STATUS_CODES: [u16; 5] = [429, 500, 502, 503, 504];

// HTTP status codes (for clarity and consistency)
/// 405 Method Not Allowed, the trigger for the HEAD to GET fallback
pub const HTTP_STATUS_METHOD_NOT_ALLOWED: u16 = 405;

// Reporting and logging
/// Progress logging interval in seconds
pub const PROGRESS_INTERVAL_SECS: u64 = 10;
/// Maximum error message length in characters
/// Prevents unbounded transport error text from bloating outcomes and logs
pub const MAX_ERROR_MESSAGE_LENGTH: usize = 2000;
