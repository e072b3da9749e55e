//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `link_status` library that handles:
//! - Command-line argument parsing
//! - Logger initialization
//! - User-facing output formatting
//!
//! All core functionality is implemented in the library crate.

use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::{Args, Parser};

use link_status::config::{
    DEFAULT_FAILURE_THRESHOLD, DEFAULT_MAX_CONCURRENCY, DEFAULT_SKIP_DOMAINS,
    DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT,
};
use link_status::initialization::init_logger_with;
use link_status::{run_check, Config, ExecutionStrategy, LogFormat, LogLevel, UrlInput};

#[derive(Debug, Parser)]
#[command(
    name = "link_status",
    version,
    about = "Checks links for liveness and reports each as valid, broken, or skipped"
)]
enum Cli {
    /// Check URLs listed in a file, one per line (use - for stdin)
    Check(CheckCommand),
    /// Discover links in a markdown documentation tree and check them
    Docs(DocsCommand),
}

#[derive(Debug, Args)]
struct CheckCommand {
    /// File with one URL per line, or - for stdin
    file: PathBuf,

    #[command(flatten)]
    common: CommonArgs,
}

#[derive(Debug, Args)]
struct DocsCommand {
    /// Root directory of the documentation tree
    root: PathBuf,

    /// Base URL used to resolve relative links
    #[arg(long)]
    base_url: Option<String>,

    #[command(flatten)]
    common: CommonArgs,
}

/// Flags shared by every subcommand.
#[derive(Debug, Args)]
struct CommonArgs {
    /// Maximum number of links probed concurrently
    #[arg(long, default_value_t = DEFAULT_MAX_CONCURRENCY)]
    max_concurrency: usize,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout_seconds: u64,

    /// Execution strategy for dispatching probes
    #[arg(long, value_enum, default_value = "async")]
    strategy: ExecutionStrategy,

    /// Skip URLs containing this pattern (repeatable; replaces the default
    /// local-address patterns when given)
    #[arg(long = "skip-domain", value_name = "PATTERN")]
    skip_domains: Vec<String>,

    /// Consecutive transport failures before the circuit breaker opens
    #[arg(long, default_value_t = DEFAULT_FAILURE_THRESHOLD)]
    failure_threshold: u32,

    /// HTTP User-Agent header value
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    user_agent: String,

    /// Log level
    #[arg(long, value_enum, default_value = "info")]
    log_level: LogLevel,

    /// Log format
    #[arg(long, value_enum, default_value = "plain")]
    log_format: LogFormat,

    /// Write the full report as JSON to this file (stdout when no path given)
    #[arg(long, value_name = "FILE", num_args = 0..=1, default_missing_value = "-")]
    json: Option<PathBuf>,

    /// Exit with status 1 if any link is broken
    #[arg(long)]
    fail_on_broken: bool,
}

impl Cli {
    fn into_parts(self) -> (Config, Option<PathBuf>, bool) {
        match self {
            Cli::Check(cmd) => {
                let input = UrlInput::File(cmd.file);
                cmd.common.into_parts(input)
            }
            Cli::Docs(cmd) => {
                let input = UrlInput::DocsTree {
                    root: cmd.root,
                    base_url: cmd.base_url,
                };
                cmd.common.into_parts(input)
            }
        }
    }
}

impl CommonArgs {
    fn into_parts(self, input: UrlInput) -> (Config, Option<PathBuf>, bool) {
        let json = self.json;
        let fail_on_broken = self.fail_on_broken;
        let skip_domains = if self.skip_domains.is_empty() {
            DEFAULT_SKIP_DOMAINS.iter().map(|s| s.to_string()).collect()
        } else {
            self.skip_domains
        };
        let config = Config {
            input,
            log_level: self.log_level,
            log_format: self.log_format,
            max_concurrency: self.max_concurrency,
            timeout_seconds: self.timeout_seconds,
            user_agent: self.user_agent,
            strategy: self.strategy,
            skip_domains,
            failure_threshold: self.failure_threshold,
        };
        (config, json, fail_on_broken)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let (config, json_output, fail_on_broken) = cli.into_parts();

    // Initialize logger based on config
    let log_level = config.log_level.clone();
    let log_format = config.log_format.clone();
    init_logger_with(log_level.into(), log_format).context("Failed to initialize logger")?;

    match run_check(&config).await {
        Ok(run) => {
            let summary = run.report.summary();

            // Print user-friendly summary
            println!(
                "✅ Checked {} link{} ({} valid, {} broken, {} skipped) in {:.1}s",
                run.total_links,
                if run.total_links == 1 { "" } else { "s" },
                summary.valid,
                summary.broken,
                summary.skipped,
                run.elapsed_seconds
            );

            if let Some(path) = json_output {
                let payload = serde_json::to_string_pretty(&run.report.to_json())
                    .context("Failed to serialize report")?;
                if path.as_os_str() == "-" {
                    println!("{payload}");
                } else {
                    std::fs::write(&path, payload).with_context(|| {
                        format!("Failed to write report to {}", path.display())
                    })?;
                    println!("Report written to {}", path.display());
                }
            }

            if fail_on_broken && summary.broken > 0 {
                process::exit(1);
            }
            Ok(())
        }
        Err(e) => {
            eprintln!("link_status error: {:#}", e);
            process::exit(1);
        }
    }
}
