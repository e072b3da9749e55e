//! Probe outcome types.
//!
//! Every URL handed to the checker produces exactly one `ProbeOutcome`.
//! Per-URL trouble (bad status, timeout, open circuit) is data in the
//! outcome, never an error bubbled out of the probe.

use std::time::Instant;

/// Message recorded on outcomes rejected by an open circuit breaker.
pub const CIRCUIT_OPEN_MESSAGE: &str = "circuit breaker open";

/// What happened when a URL was probed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutcomeKind {
    /// The server answered with a non-error status (< 400)
    Valid,
    /// The URL matched the skip list and was never probed
    Skipped,
    /// The probe was rejected because the circuit breaker was open
    CircuitOpen,
    /// No HTTP response was obtained (timeout, connect failure, etc.)
    TransportError,
    /// The server answered with an error status (>= 400)
    ProtocolError,
}

impl OutcomeKind {
    /// Returns a human-readable string representation of the outcome kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            OutcomeKind::Valid => "valid",
            OutcomeKind::Skipped => "skipped",
            OutcomeKind::CircuitOpen => "circuit open",
            OutcomeKind::TransportError => "transport error",
            OutcomeKind::ProtocolError => "protocol error",
        }
    }

    /// Returns true when this outcome marks the link as broken.
    pub fn is_broken(&self) -> bool {
        matches!(
            self,
            OutcomeKind::CircuitOpen | OutcomeKind::TransportError | OutcomeKind::ProtocolError
        )
    }
}

impl std::fmt::Display for OutcomeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The result of probing one URL.
#[derive(Debug, Clone)]
pub struct ProbeOutcome {
    /// The URL exactly as it was handed to the probe
    pub url: String,
    /// What happened
    pub kind: OutcomeKind,
    /// Final HTTP status, when a response was obtained
    pub status_code: Option<u16>,
    /// Error detail, when the probe failed without a response
    pub error: Option<String>,
    /// Seconds spent on this URL, including retries
    pub response_time: f64,
}

impl ProbeOutcome {
    /// A probe that got a non-error response.
    pub fn valid(url: String, status_code: u16, started: Instant) -> Self {
        ProbeOutcome {
            url,
            kind: OutcomeKind::Valid,
            status_code: Some(status_code),
            error: None,
            response_time: started.elapsed().as_secs_f64(),
        }
    }

    /// A URL that matched the skip list.
    pub fn skipped(url: String, started: Instant) -> Self {
        ProbeOutcome {
            url,
            kind: OutcomeKind::Skipped,
            status_code: None,
            error: None,
            response_time: started.elapsed().as_secs_f64(),
        }
    }

    /// A probe rejected by the open circuit breaker.
    pub fn circuit_open(url: String, started: Instant) -> Self {
        ProbeOutcome {
            url,
            kind: OutcomeKind::CircuitOpen,
            status_code: None,
            error: Some(CIRCUIT_OPEN_MESSAGE.to_string()),
            response_time: started.elapsed().as_secs_f64(),
        }
    }

    /// A probe that failed without obtaining a response.
    pub fn transport_error(url: String, error: String, started: Instant) -> Self {
        ProbeOutcome {
            url,
            kind: OutcomeKind::TransportError,
            status_code: None,
            error: Some(error),
            response_time: started.elapsed().as_secs_f64(),
        }
    }

    /// A probe that got an error response (status >= 400).
    pub fn protocol_error(url: String, status_code: u16, started: Instant) -> Self {
        ProbeOutcome {
            url,
            kind: OutcomeKind::ProtocolError,
            status_code: Some(status_code),
            error: None,
            response_time: started.elapsed().as_secs_f64(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_outcome() {
        let outcome = ProbeOutcome::valid("https://example.com".to_string(), 200, Instant::now());
        assert_eq!(outcome.kind, OutcomeKind::Valid);
        assert_eq!(outcome.status_code, Some(200));
        assert!(outcome.error.is_none());
        assert!(!outcome.kind.is_broken());
    }

    #[test]
    fn test_skipped_outcome() {
        let outcome = ProbeOutcome::skipped("http://localhost/".to_string(), Instant::now());
        assert_eq!(outcome.kind, OutcomeKind::Skipped);
        assert!(outcome.status_code.is_none());
        assert!(outcome.error.is_none());
        assert!(!outcome.kind.is_broken());
    }

    #[test]
    fn test_circuit_open_outcome() {
        let outcome = ProbeOutcome::circuit_open("https://example.com".to_string(), Instant::now());
        assert_eq!(outcome.kind, OutcomeKind::CircuitOpen);
        assert_eq!(outcome.error.as_deref(), Some(CIRCUIT_OPEN_MESSAGE));
        assert!(outcome.kind.is_broken());
    }

    #[test]
    fn test_transport_error_outcome() {
        let outcome = ProbeOutcome::transport_error(
            "https://example.com".to_string(),
            "connection refused".to_string(),
            Instant::now(),
        );
        assert_eq!(outcome.kind, OutcomeKind::TransportError);
        assert!(outcome.status_code.is_none());
        assert_eq!(outcome.error.as_deref(), Some("connection refused"));
        assert!(outcome.kind.is_broken());
    }

    #[test]
    fn test_protocol_error_outcome() {
        let outcome =
            ProbeOutcome::protocol_error("https://example.com".to_string(), 404, Instant::now());
        assert_eq!(outcome.kind, OutcomeKind::ProtocolError);
        assert_eq!(outcome.status_code, Some(404));
        assert!(outcome.error.is_none());
        assert!(outcome.kind.is_broken());
    }

    #[test]
    fn test_outcome_kind_display() {
        assert_eq!(OutcomeKind::Valid.to_string(), "valid");
        assert_eq!(OutcomeKind::CircuitOpen.to_string(), "circuit open");
        assert_eq!(OutcomeKind::TransportError.to_string(), "transport error");
    }
}
