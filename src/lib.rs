//! link_status library: concurrent link validation
//!
//! This library checks batches of URLs for liveness and reports each one as
//! valid, broken, or skipped. Probes send a HEAD request first and fall back
//! to GET when a server rejects HEAD, transient failures are retried with
//! exponential backoff, and a shared circuit breaker stops hammering the
//! network once consecutive transport failures pile up.
//!
//! # Example
//!
//! ```no_run
//! use link_status::{check_urls, Config};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::default();
//! let report = check_urls(
//!     vec![
//!         "https://example.com/".to_string(),
//!         "https://example.com/missing".to_string(),
//!     ],
//!     &config,
//! )
//! .await?;
//!
//! println!(
//!     "{} valid, {} broken, {} skipped",
//!     report.valid.len(),
//!     report.broken.len(),
//!     report.skipped.len()
//! );
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your
//! application or ensure you're calling library functions within an async
//! context.

#![warn(missing_docs)]

mod app;
mod circuit_breaker;
pub mod config;
mod error_handling;
pub mod initialization;
mod probe;
mod report;
mod scheduler;
mod skip_list;
mod source;

// Re-export public API
pub use circuit_breaker::CircuitBreaker;
pub use config::{Config, ExecutionStrategy, LogFormat, LogLevel, UrlInput};
pub use error_handling::{ErrorType, InfoType, InitializationError, ProcessingStats, WarningType};
pub use probe::{probe_url, OutcomeKind, ProbeContext, ProbeOutcome};
pub use report::{ReportSummary, ValidationReport};
pub use run::{check_urls, run_check, RunReport};
pub use scheduler::{build_scheduler, ProbeScheduler};
pub use skip_list::SkipList;

// Internal run module (contains the main orchestration logic)
mod run {
    use std::collections::HashSet;
    use std::sync::Arc;
    use std::time::{Duration, Instant};

    use anyhow::{Context, Result};
    use log::info;

    use crate::app::{
        log_progress, print_error_statistics, print_run_summary, validate_and_normalize_url,
    };
    use crate::config::{Config, UrlInput, PROGRESS_INTERVAL_SECS};
    use crate::error_handling::WarningType;
    use crate::probe::ProbeContext;
    use crate::report::ValidationReport;
    use crate::scheduler::build_scheduler;
    use crate::source::{collect_doc_links, read_url_file};

    /// Results of a completed link validation run.
    #[derive(Debug, Clone)]
    pub struct RunReport {
        /// Per-URL validation buckets
        pub report: ValidationReport,
        /// Number of distinct links checked (after deduplication)
        pub total_links: usize,
        /// Elapsed time in seconds
        pub elapsed_seconds: f64,
    }

    /// Checks a batch of URLs and returns the validation report.
    ///
    /// Duplicate URLs are checked once. Every input URL lands in exactly one
    /// of the report's buckets, so the bucket sizes always sum to the number
    /// of distinct inputs.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized or the
    /// probe infrastructure fails. Per-URL trouble (timeouts, error statuses,
    /// open circuit) is reported in the `broken` bucket, never as an error.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use link_status::{check_urls, Config};
    ///
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let report =
    ///     check_urls(vec!["https://example.com/".to_string()], &Config::default()).await?;
    /// assert_eq!(report.total(), 1);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn check_urls(urls: Vec<String>, config: &Config) -> Result<ValidationReport> {
        let ctx = Arc::new(
            ProbeContext::from_config(config)
                .await
                .context("Failed to initialize probe context")?,
        );
        let unique = dedupe_urls(urls);
        let scheduler = build_scheduler(config.strategy, config.max_concurrency);
        let outcomes = scheduler.dispatch(unique, ctx).await?;
        Ok(ValidationReport::from_outcomes(outcomes))
    }

    /// Runs a link check with the provided configuration.
    ///
    /// This is the main entry point for the CLI. It gathers URLs from the
    /// configured input source, checks them concurrently, logs progress and
    /// statistics along the way, and returns a `RunReport` with the results.
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// - The input file cannot be opened or the docs root is not a directory
    /// - The HTTP client cannot be initialized
    ///
    /// # Example
    ///
    /// ```no_run
    /// use link_status::{run_check, Config, UrlInput};
    /// use std::path::PathBuf;
    ///
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let config = Config {
    ///     input: UrlInput::File(PathBuf::from("urls.txt")),
    ///     ..Default::default()
    /// };
    /// let run = run_check(&config).await?;
    /// println!("Checked {} links in {:.1}s", run.total_links, run.elapsed_seconds);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn run_check(config: &Config) -> Result<RunReport> {
        let start_time = Instant::now();

        let ctx = Arc::new(
            ProbeContext::from_config(config)
                .await
                .context("Failed to initialize probe context")?,
        );

        let raw_urls = gather_urls(config, &ctx).await?;
        let unique = dedupe_urls(raw_urls);
        let total_links = unique.len();

        let scheduler = build_scheduler(config.strategy, config.max_concurrency);
        info!(
            "Checking {} link{} with the {} strategy (concurrency {})",
            total_links,
            if total_links == 1 { "" } else { "s" },
            scheduler.name(),
            config.max_concurrency
        );

        // Periodic progress logging while probes run
        let progress_ctx = Arc::clone(&ctx);
        let progress = tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(PROGRESS_INTERVAL_SECS));
            // the first tick completes immediately
            interval.tick().await;
            loop {
                interval.tick().await;
                log_progress(start_time, &progress_ctx.completed, total_links);
            }
        });

        let dispatched = scheduler.dispatch(unique, Arc::clone(&ctx)).await;
        progress.abort();
        let outcomes = dispatched?;

        let report = ValidationReport::from_outcomes(outcomes);
        let elapsed_seconds = start_time.elapsed().as_secs_f64();

        log_progress(start_time, &ctx.completed, total_links);
        print_error_statistics(&ctx.stats);
        print_run_summary(&report.summary(), elapsed_seconds);

        Ok(RunReport {
            report,
            total_links,
            elapsed_seconds,
        })
    }

    /// Collects raw URLs from the configured input source.
    async fn gather_urls(config: &Config, ctx: &Arc<ProbeContext>) -> Result<Vec<String>> {
        match &config.input {
            UrlInput::List(urls) => Ok(urls.clone()),
            UrlInput::File(path) => {
                let lines = read_url_file(path).await?;
                let mut urls = Vec::with_capacity(lines.len());
                for line in lines {
                    let Some(url) = validate_and_normalize_url(&line) else {
                        ctx.stats.increment_warning(WarningType::InvalidUrlSkipped);
                        continue;
                    };
                    urls.push(url);
                }
                Ok(urls)
            }
            UrlInput::DocsTree { root, base_url } => {
                info!("Discovering links under {}", root.display());
                let root = root.clone();
                let base_url = base_url.clone();
                let walk_ctx = Arc::clone(ctx);
                // Walking the tree and reading files is blocking work
                tokio::task::spawn_blocking(move || {
                    collect_doc_links(&root, base_url.as_deref(), &walk_ctx.stats)
                })
                .await
                .context("Link discovery task failed")?
            }
        }
    }

    /// Removes duplicate URLs, keeping first-seen order.
    fn dedupe_urls(urls: Vec<String>) -> Vec<String> {
        let mut seen = HashSet::new();
        urls.into_iter()
            .filter(|url| seen.insert(url.clone()))
            .collect()
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_dedupe_urls_keeps_first_seen_order() {
            let urls = vec![
                "https://b.example.com/".to_string(),
                "https://a.example.com/".to_string(),
                "https://b.example.com/".to_string(),
            ];
            let unique = dedupe_urls(urls);
            assert_eq!(
                unique,
                vec!["https://b.example.com/", "https://a.example.com/"]
            );
        }

        #[test]
        fn test_dedupe_urls_empty() {
            assert!(dedupe_urls(Vec::new()).is_empty());
        }
    }
}
