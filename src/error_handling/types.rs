//! Error type definitions.
//!
//! This module defines all error, warning, and info types used throughout the application.

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),
}

/// Types of errors that can occur while probing a link.
///
/// This enum categorizes actual error conditions - responses or transport
/// failures that mark a link as broken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum ErrorType {
    // Specific HTTP status code errors (common ones for better debugging)
    HttpBadRequest,          // 400 Bad Request
    HttpUnauthorized,        // 401 Unauthorized
    HttpForbidden,           // 403 Forbidden - often bot detection
    HttpNotFound,            // 404 Not Found
    HttpTooManyRequests,     // 429 Too Many Requests
    HttpInternalServerError, // 500 Internal Server Error
    HttpBadGateway,          // 502 Bad Gateway
    HttpServiceUnavailable,  // 503 Service Unavailable
    HttpGatewayTimeout,      // 504 Gateway Timeout
    // Note: Less common status codes (406, 521, etc.) fall into the buckets below
    HttpOtherClientError, // Any other 4xx
    HttpOtherServerError, // Any other 5xx
    // Transport errors (no HTTP response was obtained)
    TransportTimeout,
    TransportConnect,
    TransportBuilder,
    TransportRequest,
    TransportRedirect,
    TransportOther,
    // Probes rejected without being attempted
    CircuitOpenRejection,
}

/// Types of warnings that can occur while gathering or checking links.
///
/// Warnings indicate dropped or unusable input that doesn't abort the run
/// but is worth tracking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum WarningType {
    InvalidUrlSkipped,      // Input line could not be parsed as a URL
    DocReadFailed,          // A markdown file could not be read
    UnresolvedRelativeLink, // Relative link with no base URL to join against
}

/// Types of informational metrics that can occur while checking links.
///
/// Info metrics track useful data points that aren't errors or warnings,
/// such as skips, fallbacks, or retries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum InfoType {
    SkippedByPolicy,  // URL matched the skip list and was never probed
    HeadFallbackToGet, // Server rejected HEAD with 405, retried as GET
    RetryAttempted,   // A probe attempt was retried after a retriable failure
}

impl std::fmt::Display for ErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ErrorType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorType::HttpBadRequest => "Bad Request (400)",
            ErrorType::HttpUnauthorized => "Unauthorized (401)",
            ErrorType::HttpForbidden => "Forbidden (403)",
            ErrorType::HttpNotFound => "Not Found (404)",
            ErrorType::HttpTooManyRequests => "Too Many Requests (429)",
            ErrorType::HttpInternalServerError => "Internal Server Error (500)",
            ErrorType::HttpBadGateway => "Bad Gateway (502)",
            ErrorType::HttpServiceUnavailable => "Service Unavailable (503)",
            ErrorType::HttpGatewayTimeout => "Gateway Timeout (504)",
            ErrorType::HttpOtherClientError => "Other client error (4xx)",
            ErrorType::HttpOtherServerError => "Other server error (5xx)",
            ErrorType::TransportTimeout => "Request timeout",
            ErrorType::TransportConnect => "Connection error",
            ErrorType::TransportBuilder => "Request builder error",
            ErrorType::TransportRequest => "Request error",
            ErrorType::TransportRedirect => "Redirect error",
            ErrorType::TransportOther => "Other transport error",
            ErrorType::CircuitOpenRejection => "Rejected by open circuit breaker",
        }
    }
}

impl WarningType {
    /// Returns a human-readable string representation of the warning type.
    pub fn as_str(&self) -> &'static str {
        match self {
            WarningType::InvalidUrlSkipped => "Invalid URL skipped",
            WarningType::DocReadFailed => "Document read failed",
            WarningType::UnresolvedRelativeLink => "Unresolved relative link",
        }
    }
}

impl InfoType {
    /// Returns a human-readable string representation of the info type.
    pub fn as_str(&self) -> &'static str {
        match self {
            InfoType::SkippedByPolicy => "Skipped by policy",
            InfoType::HeadFallbackToGet => "HEAD fallback to GET",
            InfoType::RetryAttempted => "Retry attempted",
        }
    }
}
