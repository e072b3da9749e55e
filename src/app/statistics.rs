//! Statistics printing.

use log::info;
use strum::IntoEnumIterator;

use crate::error_handling::{ErrorType, InfoType, ProcessingStats, WarningType};
use crate::report::ReportSummary;

/// Prints a simple one-line summary of the run.
///
/// This provides immediate feedback to the user in a concise format.
/// Works with both plain and JSON log formats (log::info! handles formatting).
pub fn print_run_summary(summary: &ReportSummary, elapsed_seconds: f64) {
    info!(
        "✅ Checked {} link{} ({} valid, {} broken, {} skipped) in {:.1}s",
        summary.total,
        if summary.total == 1 { "" } else { "s" },
        summary.valid,
        summary.broken,
        summary.skipped,
        elapsed_seconds
    );
}

/// Prints error, warning, and info statistics to the log.
///
/// Sections with a zero total are left out entirely, as are zero rows
/// within a section.
pub fn print_error_statistics(error_stats: &ProcessingStats) {
    print_section(
        "Error Counts",
        error_stats.total_errors(),
        ErrorType::iter().map(|t| (t.as_str(), error_stats.get_error_count(t))),
    );
    print_section(
        "Warning Counts",
        error_stats.total_warnings(),
        WarningType::iter().map(|t| (t.as_str(), error_stats.get_warning_count(t))),
    );
    print_section(
        "Info Counts",
        error_stats.total_info(),
        InfoType::iter().map(|t| (t.as_str(), error_stats.get_info_count(t))),
    );
}

fn print_section(
    label: &str,
    total: usize,
    rows: impl Iterator<Item = (&'static str, usize)>,
) {
    if total == 0 {
        return;
    }
    info!("{} ({} total):", label, total);
    for (name, count) in rows.filter(|(_, count)| *count > 0) {
        info!("   {}: {}", name, count);
    }
}
