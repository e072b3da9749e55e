//! Link probing.
//!
//! This module implements the probe itself: a HEAD request with GET fallback
//! for servers that reject HEAD, retries with exponential backoff for
//! transient failures, and classification of the result into a
//! `ProbeOutcome`.

use std::sync::atomic::Ordering;
use std::time::{Duration, Instant};

use log::{debug, warn};
use reqwest::{Method, StatusCode};

use crate::config::{HTTP_STATUS_METHOD_NOT_ALLOWED, MAX_ERROR_MESSAGE_LENGTH};
use crate::error_handling::{
    categorize_reqwest_error, categorize_status_error, get_retry_strategy, is_retriable_status,
    is_retriable_transport_error, ErrorType, InfoType, ProcessingStats,
};
use crate::probe::context::ProbeContext;
use crate::probe::outcome::ProbeOutcome;

/// Probes a single URL and returns its outcome.
///
/// The probe sends a HEAD request first. Servers that reject HEAD with
/// 405 Method Not Allowed are probed again with GET, and the GET response
/// replaces the HEAD response entirely. Per-URL trouble (bad status,
/// timeout, open circuit) never escapes as an error: the outcome records
/// what happened.
pub async fn probe_url(url: &str, ctx: &ProbeContext) -> ProbeOutcome {
    let outcome = probe_url_inner(url, ctx).await;
    ctx.completed.fetch_add(1, Ordering::SeqCst);
    outcome
}

/// Blocking twin of [`probe_url`] for worker threads.
///
/// Takes the blocking client explicitly because blocking clients must be
/// built outside the async runtime; the context only carries the async one.
pub fn probe_url_blocking(
    url: &str,
    client: &reqwest::blocking::Client,
    ctx: &ProbeContext,
) -> ProbeOutcome {
    let outcome = probe_url_blocking_inner(url, client, ctx);
    ctx.completed.fetch_add(1, Ordering::SeqCst);
    outcome
}

async fn probe_url_inner(url: &str, ctx: &ProbeContext) -> ProbeOutcome {
    let started = Instant::now();

    if ctx.skip_list.should_skip(url) {
        ctx.stats.increment_info(InfoType::SkippedByPolicy);
        debug!("Skipping {} (matches skip list)", url);
        return ProbeOutcome::skipped(url.to_string(), started);
    }

    if ctx.breaker.is_circuit_open() {
        ctx.stats.increment_error(ErrorType::CircuitOpenRejection);
        debug!("Circuit breaker open, rejecting probe of {}", url);
        return ProbeOutcome::circuit_open(url.to_string(), started);
    }

    let mut result = send_with_retry(
        &ctx.client,
        Method::HEAD,
        url,
        get_retry_strategy(),
        &ctx.stats,
    )
    .await;

    if let Ok(status) = &result {
        if status.as_u16() == HTTP_STATUS_METHOD_NOT_ALLOWED {
            ctx.stats.increment_info(InfoType::HeadFallbackToGet);
            debug!("HEAD not allowed for {}, falling back to GET", url);
            result = send_with_retry(
                &ctx.client,
                Method::GET,
                url,
                get_retry_strategy(),
                &ctx.stats,
            )
            .await;
        }
    }

    classify(url, result, ctx, started)
}

fn probe_url_blocking_inner(
    url: &str,
    client: &reqwest::blocking::Client,
    ctx: &ProbeContext,
) -> ProbeOutcome {
    let started = Instant::now();

    if ctx.skip_list.should_skip(url) {
        ctx.stats.increment_info(InfoType::SkippedByPolicy);
        debug!("Skipping {} (matches skip list)", url);
        return ProbeOutcome::skipped(url.to_string(), started);
    }

    if ctx.breaker.is_circuit_open() {
        ctx.stats.increment_error(ErrorType::CircuitOpenRejection);
        debug!("Circuit breaker open, rejecting probe of {}", url);
        return ProbeOutcome::circuit_open(url.to_string(), started);
    }

    let mut result = send_with_retry_blocking(client, Method::HEAD, url, get_retry_strategy(), ctx);

    if let Ok(status) = &result {
        if status.as_u16() == HTTP_STATUS_METHOD_NOT_ALLOWED {
            ctx.stats.increment_info(InfoType::HeadFallbackToGet);
            debug!("HEAD not allowed for {}, falling back to GET", url);
            result = send_with_retry_blocking(client, Method::GET, url, get_retry_strategy(), ctx);
        }
    }

    classify(url, result, ctx, started)
}

/// Turns the final request result into an outcome and updates the circuit
/// breaker and statistics.
///
/// Any HTTP response counts as a circuit breaker success, including error
/// statuses: the network path works, the server just disliked the request.
/// Only transport failures feed the breaker.
fn classify(
    url: &str,
    result: Result<StatusCode, reqwest::Error>,
    ctx: &ProbeContext,
    started: Instant,
) -> ProbeOutcome {
    match result {
        Ok(status) => {
            ctx.breaker.record_success();
            debug!("{} answered {}", url, status);
            if status.as_u16() >= 400 {
                ctx.stats.increment_error(categorize_status_error(status));
                ProbeOutcome::protocol_error(url.to_string(), status.as_u16(), started)
            } else {
                ProbeOutcome::valid(url.to_string(), status.as_u16(), started)
            }
        }
        Err(error) => {
            ctx.breaker.record_failure();
            ctx.stats.increment_error(categorize_reqwest_error(&error));
            warn!("Transport error probing {}: {}", url, error);
            ProbeOutcome::transport_error(
                url.to_string(),
                truncate_error_message(error.to_string()),
                started,
            )
        }
    }
}

/// Sends one request, retrying on transient failures.
///
/// The `delays` iterator yields the sleep before each retry; when it runs
/// out, the last result stands. A retriable status that survives every
/// retry is still returned as a response so it can be classified normally,
/// which is why this drives the backoff iterator by hand instead of using
/// `tokio_retry::Retry`.
async fn send_with_retry(
    client: &reqwest::Client,
    method: Method,
    url: &str,
    delays: impl Iterator<Item = Duration>,
    stats: &ProcessingStats,
) -> Result<StatusCode, reqwest::Error> {
    let mut delays = delays;
    loop {
        match client.request(method.clone(), url).send().await {
            Ok(response) => {
                let status = response.status();
                if is_retriable_status(status) {
                    if let Some(delay) = delays.next() {
                        stats.increment_info(InfoType::RetryAttempted);
                        debug!(
                            "{} {} answered {}, retrying in {:?}",
                            method, url, status, delay
                        );
                        tokio::time::sleep(delay).await;
                        continue;
                    }
                }
                return Ok(status);
            }
            Err(error) => {
                if is_retriable_transport_error(&error) {
                    if let Some(delay) = delays.next() {
                        stats.increment_info(InfoType::RetryAttempted);
                        debug!(
                            "{} {} failed ({}), retrying in {:?}",
                            method, url, error, delay
                        );
                        tokio::time::sleep(delay).await;
                        continue;
                    }
                }
                return Err(error);
            }
        }
    }
}

/// Blocking twin of [`send_with_retry`] for worker threads.
fn send_with_retry_blocking(
    client: &reqwest::blocking::Client,
    method: Method,
    url: &str,
    delays: impl Iterator<Item = Duration>,
    ctx: &ProbeContext,
) -> Result<StatusCode, reqwest::Error> {
    let mut delays = delays;
    loop {
        match client.request(method.clone(), url).send() {
            Ok(response) => {
                let status = response.status();
                if is_retriable_status(status) {
                    if let Some(delay) = delays.next() {
                        ctx.stats.increment_info(InfoType::RetryAttempted);
                        debug!(
                            "{} {} answered {}, retrying in {:?}",
                            method, url, status, delay
                        );
                        std::thread::sleep(delay);
                        continue;
                    }
                }
                return Ok(status);
            }
            Err(error) => {
                if is_retriable_transport_error(&error) {
                    if let Some(delay) = delays.next() {
                        ctx.stats.increment_info(InfoType::RetryAttempted);
                        debug!(
                            "{} {} failed ({}), retrying in {:?}",
                            method, url, error, delay
                        );
                        std::thread::sleep(delay);
                        continue;
                    }
                }
                return Err(error);
            }
        }
    }
}

/// Truncates overly long error messages so one pathological error cannot
/// bloat the report.
fn truncate_error_message(mut message: String) -> String {
    if message.len() > MAX_ERROR_MESSAGE_LENGTH {
        let mut end = MAX_ERROR_MESSAGE_LENGTH;
        while !message.is_char_boundary(end) {
            end -= 1;
        }
        message.truncate(end);
        message.push_str("...");
    }
    message
}
