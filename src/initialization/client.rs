//! HTTP client initialization.
//!
//! This module provides functions to initialize the HTTP clients used for
//! probing, in both async and blocking form.

use std::time::Duration;

use reqwest::ClientBuilder;

use crate::config::{Config, MAX_REDIRECT_HOPS, TCP_CONNECT_TIMEOUT_SECS};
use crate::error_handling::InitializationError;

/// Initializes the async HTTP client.
///
/// Creates a `reqwest::Client` configured with:
/// - User-Agent header from the configuration
/// - Request timeout from the configuration
/// - Separate TCP connect timeout so dead hosts fail fast
/// - Redirect following enabled (up to `MAX_REDIRECT_HOPS` hops)
/// - Rustls TLS backend (no native TLS)
///
/// # Arguments
///
/// * `config` - Run configuration containing user-agent and timeout settings
///
/// # Returns
///
/// A configured HTTP client ready for making requests. `reqwest::Client`
/// is internally reference-counted, so clones share the connection pool.
///
/// # Errors
///
/// Returns `InitializationError::HttpClientError` if client creation fails.
pub async fn init_client(config: &Config) -> Result<reqwest::Client, InitializationError> {
    let client = ClientBuilder::new()
        .timeout(Duration::from_secs(config.timeout_seconds))
        .connect_timeout(Duration::from_secs(TCP_CONNECT_TIMEOUT_SECS))
        .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECT_HOPS))
        .user_agent(config.user_agent.clone())
        .build()?;
    Ok(client)
}

/// Builds a blocking HTTP client with the same settings as [`init_client`].
///
/// Blocking clients spin up their own internal runtime, so this must be
/// called from a plain thread, never from inside the async runtime. The
/// worker pool builds one on its blocking task and clones it per worker.
///
/// # Arguments
///
/// * `timeout_seconds` - Per-request timeout in seconds
/// * `user_agent` - HTTP User-Agent header value
///
/// # Errors
///
/// Returns `InitializationError::HttpClientError` if client creation fails.
pub fn build_blocking_client(
    timeout_seconds: u64,
    user_agent: &str,
) -> Result<reqwest::blocking::Client, InitializationError> {
    let client = reqwest::blocking::ClientBuilder::new()
        .timeout(Duration::from_secs(timeout_seconds))
        .connect_timeout(Duration::from_secs(TCP_CONNECT_TIMEOUT_SECS))
        .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECT_HOPS))
        .user_agent(user_agent.to_string())
        .build()?;
    Ok(client)
}
