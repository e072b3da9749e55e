//! Error categorization and retry strategy.
//!
//! This module provides functions to categorize probe failures and configure
//! retry strategies.

use std::time::Duration;

use reqwest::StatusCode;
use tokio_retry::strategy::ExponentialBackoff;

use super::types::ErrorType;

/// Creates an exponential backoff retry strategy.
///
/// Returns a retry strategy configured with:
/// - Initial delay: `RETRY_INITIAL_DELAY_MS` milliseconds
/// - Backoff factor: `RETRY_FACTOR` (doubles delay each retry)
/// - Maximum delay: `RETRY_MAX_DELAY_SECS` seconds
/// - Maximum attempts: `RETRY_MAX_ATTEMPTS` (prevents infinite retries)
///
/// # Returns
///
/// A retry strategy iterator yielding the delay to sleep before each retry.
/// The iterator is limited to `RETRY_MAX_ATTEMPTS` retries so a stubbornly
/// failing URL cannot hold a worker forever.
pub fn get_retry_strategy() -> impl Iterator<Item = Duration> {
    ExponentialBackoff::from_millis(crate::config::RETRY_INITIAL_DELAY_MS)
        .factor(crate::config::RETRY_FACTOR) // Double the delay with each retry
        .max_delay(Duration::from_secs(crate::config::RETRY_MAX_DELAY_SECS)) // Maximum delay
        .take(crate::config::RETRY_MAX_ATTEMPTS) // Limit total retries
}

/// Returns true when the status code is worth retrying.
///
/// Covers rate limiting (429) and the transient server errors (500, 502,
/// 503, 504). All other statuses are treated as definitive answers.
pub fn is_retriable_status(status: StatusCode) -> bool {
    crate::config::RETRIABLE_STATUS_CODES.contains(&status.as_u16())
}

/// Returns true when a transport error is worth retrying.
///
/// Timeouts, connection failures, and mid-request errors are often
/// transient. Builder errors mean the request itself is malformed and
/// retrying cannot help.
pub fn is_retriable_transport_error(error: &reqwest::Error) -> bool {
    if error.is_builder() {
        return false;
    }
    error.is_timeout() || error.is_connect() || error.is_request()
}

/// Categorizes a `reqwest::Error` into an `ErrorType`.
///
/// # Arguments
///
/// * `error` - The `reqwest::Error` to categorize
///
/// # Returns
///
/// The appropriate `ErrorType` for the error.
pub fn categorize_reqwest_error(error: &reqwest::Error) -> ErrorType {
    // Check HTTP status codes first
    if let Some(status) = error.status() {
        return categorize_status_error(status);
    }

    // Check reqwest error types
    if error.is_builder() {
        ErrorType::TransportBuilder
    } else if error.is_redirect() {
        ErrorType::TransportRedirect
    } else if error.is_timeout() {
        ErrorType::TransportTimeout
    } else if error.is_connect() {
        ErrorType::TransportConnect
    } else if error.is_request() {
        ErrorType::TransportRequest
    } else {
        ErrorType::TransportOther
    }
}

/// Categorizes an HTTP error status (4xx/5xx) into an `ErrorType`.
///
/// # Arguments
///
/// * `status` - The HTTP status code of the response
///
/// # Returns
///
/// The appropriate `ErrorType` for the status.
pub fn categorize_status_error(status: StatusCode) -> ErrorType {
    match status.as_u16() {
        // Client errors (4xx)
        400 => ErrorType::HttpBadRequest,
        401 => ErrorType::HttpUnauthorized,
        403 => ErrorType::HttpForbidden,
        404 => ErrorType::HttpNotFound,
        429 => ErrorType::HttpTooManyRequests,
        // Server errors (5xx)
        500 => ErrorType::HttpInternalServerError,
        502 => ErrorType::HttpBadGateway,
        503 => ErrorType::HttpServiceUnavailable,
        504 => ErrorType::HttpGatewayTimeout,
        // Other client errors (4xx) - use generic bucket
        _ if status.is_client_error() => ErrorType::HttpOtherClientError,
        // Everything else (5xx and non-standard codes) - use generic bucket
        _ => ErrorType::HttpOtherServerError,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_get_retry_strategy_initial_delay() {
        let strategy = get_retry_strategy();
        let first_delay = strategy.take(1).next().unwrap();

        // First delay should be at least RETRY_INITIAL_DELAY_MS
        // (ExponentialBackoff may have a minimum delay)
        let expected_ms = crate::config::RETRY_INITIAL_DELAY_MS as u128;
        let actual_ms = first_delay.as_millis();
        assert!(
            actual_ms >= expected_ms,
            "Expected delay >= {}ms, got {}ms",
            expected_ms,
            actual_ms
        );
    }

    #[test]
    fn test_get_retry_strategy_exponential_backoff() {
        let strategy = get_retry_strategy();
        let delays: Vec<Duration> = strategy.take(5).collect();

        // Verify delays increase (exponential backoff or capped at max)
        for i in 1..delays.len() {
            let prev = delays[i - 1].as_millis();
            let curr = delays[i].as_millis();
            // Delay should increase (or stay at max)
            assert!(curr >= prev, "Delay should increase: {} >= {}", curr, prev);

            // If not at max, should be approximately double
            let max_delay_ms = (crate::config::RETRY_MAX_DELAY_SECS * 1000) as u128;
            if curr < max_delay_ms {
                let ratio = curr as f64 / prev as f64;
                // Allow wide tolerance - ExponentialBackoff behavior can vary
                assert!(
                    (1.0..=3.0).contains(&ratio),
                    "Backoff factor should be reasonable: {} / {} = {}",
                    curr,
                    prev,
                    ratio
                );
            }
        }
    }

    #[test]
    fn test_get_retry_strategy_max_delay() {
        let strategy = get_retry_strategy();
        let max_delay_ms = crate::config::RETRY_MAX_DELAY_SECS * 1000;

        // All delays should be <= max_delay
        for delay in strategy {
            assert!(
                delay.as_millis() <= max_delay_ms as u128,
                "Delay {}ms exceeds max {}ms",
                delay.as_millis(),
                max_delay_ms
            );
        }
    }

    #[test]
    fn test_get_retry_strategy_max_attempts() {
        let strategy = get_retry_strategy();
        let count = strategy.count();

        // Should be limited to RETRY_MAX_ATTEMPTS
        assert_eq!(count, crate::config::RETRY_MAX_ATTEMPTS);
    }

    #[test]
    fn test_is_retriable_status() {
        assert!(is_retriable_status(StatusCode::TOO_MANY_REQUESTS));
        assert!(is_retriable_status(StatusCode::INTERNAL_SERVER_ERROR));
        assert!(is_retriable_status(StatusCode::BAD_GATEWAY));
        assert!(is_retriable_status(StatusCode::SERVICE_UNAVAILABLE));
        assert!(is_retriable_status(StatusCode::GATEWAY_TIMEOUT));

        assert!(!is_retriable_status(StatusCode::OK));
        assert!(!is_retriable_status(StatusCode::NOT_FOUND));
        assert!(!is_retriable_status(StatusCode::FORBIDDEN));
        assert!(!is_retriable_status(StatusCode::NOT_IMPLEMENTED)); // 501 is not transient
    }

    #[test]
    fn test_categorize_status_error_specific_codes() {
        assert_eq!(
            categorize_status_error(StatusCode::BAD_REQUEST),
            ErrorType::HttpBadRequest
        );
        assert_eq!(
            categorize_status_error(StatusCode::UNAUTHORIZED),
            ErrorType::HttpUnauthorized
        );
        assert_eq!(
            categorize_status_error(StatusCode::FORBIDDEN),
            ErrorType::HttpForbidden
        );
        assert_eq!(
            categorize_status_error(StatusCode::NOT_FOUND),
            ErrorType::HttpNotFound
        );
        assert_eq!(
            categorize_status_error(StatusCode::TOO_MANY_REQUESTS),
            ErrorType::HttpTooManyRequests
        );
        assert_eq!(
            categorize_status_error(StatusCode::INTERNAL_SERVER_ERROR),
            ErrorType::HttpInternalServerError
        );
        assert_eq!(
            categorize_status_error(StatusCode::BAD_GATEWAY),
            ErrorType::HttpBadGateway
        );
        assert_eq!(
            categorize_status_error(StatusCode::SERVICE_UNAVAILABLE),
            ErrorType::HttpServiceUnavailable
        );
        assert_eq!(
            categorize_status_error(StatusCode::GATEWAY_TIMEOUT),
            ErrorType::HttpGatewayTimeout
        );
    }

    #[test]
    fn test_categorize_status_error_generic_buckets() {
        // Uncommon client errors fall into the generic 4xx bucket
        assert_eq!(
            categorize_status_error(StatusCode::GONE),
            ErrorType::HttpOtherClientError
        );
        assert_eq!(
            categorize_status_error(StatusCode::NOT_ACCEPTABLE),
            ErrorType::HttpOtherClientError
        );
        // Uncommon server errors fall into the generic 5xx bucket
        assert_eq!(
            categorize_status_error(StatusCode::NOT_IMPLEMENTED),
            ErrorType::HttpOtherServerError
        );
        assert_eq!(
            categorize_status_error(StatusCode::HTTP_VERSION_NOT_SUPPORTED),
            ErrorType::HttpOtherServerError
        );
    }

    // Note: Testing categorize_reqwest_error and is_retriable_transport_error
    // with actual reqwest::Error instances requires real HTTP failures. Those
    // paths are exercised by the integration tests in tests/integration_test.rs.
}
