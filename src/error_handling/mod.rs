//! Error handling and processing statistics.
//!
//! This module provides:
//! - Error type definitions and categorization
//! - Processing statistics tracking (errors, warnings, info metrics)
//! - Retry strategy configuration
//!
//! Error types are categorized into:
//! - **Errors**: Failures that mark a link as broken
//! - **Warnings**: Dropped or unusable input that doesn't abort the run
//! - **Info**: Informational metrics (skips, fallbacks, retries)

mod categorization;
mod stats;
mod types;

// Re-export public API
pub use categorization::{
    categorize_reqwest_error, categorize_status_error, get_retry_strategy, is_retriable_status,
    is_retriable_transport_error,
};
pub use stats::ProcessingStats;
pub use types::{ErrorType, InfoType, InitializationError, WarningType};
