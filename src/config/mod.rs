//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (timeouts, limits, etc.)
//! - Configuration types for programmatic and CLI use

mod constants;
mod types;

// Re-export all constants
pub use constants::*;
pub use types::{Config, ExecutionStrategy, LogFormat, LogLevel, UrlInput};
