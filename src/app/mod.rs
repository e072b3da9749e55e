//! Main application modules.
//!
//! This module provides utilities for URL validation, progress logging, and
//! statistics printing used by the run orchestration and the CLI.

pub mod logging;
pub mod statistics;
pub mod url;

// Re-export public API
pub use logging::log_progress;
pub use statistics::{print_error_statistics, print_run_summary};
pub use url::validate_and_normalize_url;
