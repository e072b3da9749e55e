//! Configuration types.
//!
//! This module defines the enums and structs used for command-line argument
//! parsing and for configuring a check run programmatically.

use std::path::PathBuf;

use clap::ValueEnum;

use crate::config::constants::{
    DEFAULT_FAILURE_THRESHOLD, DEFAULT_MAX_CONCURRENCY, DEFAULT_SKIP_DOMAINS, DEFAULT_TIMEOUT_SECS,
    DEFAULT_USER_AGENT,
};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// Controls how log messages are formatted:
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// How probe tasks are executed.
///
/// The strategy is chosen explicitly by configuration. Both strategies honor
/// the same concurrency bound and produce the same report on the same input;
/// they differ only in how the work is carried.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ExecutionStrategy {
    /// Cooperative async tasks on the shared runtime, bounded by a semaphore
    Async,
    /// A pool of OS worker threads driving blocking requests in parallel
    WorkerPool,
}

impl ExecutionStrategy {
    /// Returns the strategy name as used on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            ExecutionStrategy::Async => "async",
            ExecutionStrategy::WorkerPool => "worker-pool",
        }
    }
}

/// Where the URLs to check come from.
#[derive(Clone, Debug)]
pub enum UrlInput {
    /// A file with one URL per line; `-` reads from stdin.
    ///
    /// Blank lines and lines starting with `#` are ignored. Entries are
    /// normalized (scheme defaulting) and invalid entries are dropped with
    /// a warning.
    File(PathBuf),
    /// A markdown documentation tree to discover links in.
    DocsTree {
        /// Root directory of the tree, walked recursively for `*.md` files
        root: PathBuf,
        /// Base URL that relative link targets are joined against; relative
        /// targets are dropped with a warning when absent
        base_url: Option<String>,
    },
    /// An explicit list of URLs, probed exactly as given.
    List(Vec<String>),
}

/// Library configuration (no CLI dependencies).
///
/// This is the core configuration struct used by the library. It can be
/// constructed programmatically without any CLI dependencies.
///
/// # Examples
///
/// ```no_run
/// use link_status::{Config, ExecutionStrategy, UrlInput};
///
/// let config = Config {
///     input: UrlInput::List(vec!["https://example.com".into()]),
///     max_concurrency: 20,
///     strategy: ExecutionStrategy::WorkerPool,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Source of the URLs to check
    pub input: UrlInput,

    /// Log level
    pub log_level: LogLevel,

    /// Log format
    pub log_format: LogFormat,

    /// Maximum concurrent probes
    pub max_concurrency: usize,

    /// Per-request timeout in seconds
    pub timeout_seconds: u64,

    /// HTTP User-Agent header value
    pub user_agent: String,

    /// Execution strategy for probe dispatch
    pub strategy: ExecutionStrategy,

    /// URL substrings that are never probed
    pub skip_domains: Vec<String>,

    /// Consecutive transport failures before the circuit breaker opens
    pub failure_threshold: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input: UrlInput::File(PathBuf::from("urls.txt")),
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            strategy: ExecutionStrategy::Async,
            skip_domains: DEFAULT_SKIP_DOMAINS.iter().map(|s| s.to_string()).collect(),
            failure_threshold: DEFAULT_FAILURE_THRESHOLD,
        }
    }
}
