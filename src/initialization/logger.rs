//! Logger initialization.
//!
//! Sets up `env_logger` with either a colored human format or a JSON line
//! format. `RUST_LOG` still works for per-module filtering; the level passed
//! in wins for this crate's own modules.

use std::io::Write;

use colored::Colorize;
use log::LevelFilter;
use serde_json::json;

use crate::config::LogFormat;
use crate::error_handling::InitializationError;

/// Initializes the logger with the given level and output format.
///
/// Noisy HTTP dependencies are clamped to warnings so probe traffic does not
/// drown the run log. Uses `try_init` so repeated calls (tests, or a host
/// application with its own logger) fail softly instead of panicking.
///
/// # Errors
///
/// Returns `InitializationError::LoggerError` if a global logger is already
/// installed.
pub fn init_logger_with(level: LevelFilter, format: LogFormat) -> Result<(), InitializationError> {
    colored::control::set_override(true);

    let mut builder = env_logger::Builder::from_default_env();
    builder.filter_level(level);
    builder.filter_module("reqwest", LevelFilter::Warn);
    builder.filter_module("hyper", LevelFilter::Warn);
    builder.filter_module("link_status", level);

    match format {
        LogFormat::Json => builder.format(json_format),
        LogFormat::Plain => builder.format(plain_format),
    };

    builder.try_init().map_err(InitializationError::from)?;
    Ok(())
}

fn json_format(buf: &mut env_logger::fmt::Formatter, record: &log::Record) -> std::io::Result<()> {
    let line = json!({
        "ts": chrono::Utc::now().timestamp_millis(),
        "level": record.level().to_string(),
        "target": record.target(),
        "msg": record.args().to_string(),
    });
    writeln!(buf, "{}", line)
}

fn plain_format(buf: &mut env_logger::fmt::Formatter, record: &log::Record) -> std::io::Result<()> {
    let level = record.level();
    let (emoji, colored_level) = match level {
        log::Level::Error => ("❌", level.to_string().red()),
        log::Level::Warn => ("⚠️", level.to_string().yellow()),
        log::Level::Info => ("✔️", level.to_string().green()),
        log::Level::Debug => ("🔍", level.to_string().blue()),
        log::Level::Trace => ("🔬", level.to_string().purple()),
    };
    writeln!(
        buf,
        "{} {} [{}] {}",
        emoji,
        record.target().cyan(),
        colored_level,
        record.args()
    )
}
