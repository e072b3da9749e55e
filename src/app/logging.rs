//! Progress logging utilities.

use log::info;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Logs progress information about link probing.
///
/// # Arguments
///
/// * `start_time` - The start time of the run
/// * `completed` - Atomic counter of completed probes
/// * `total` - Total number of links in the run
pub fn log_progress(start_time: std::time::Instant, completed: &AtomicUsize, total: usize) {
    let elapsed = start_time.elapsed();
    let done = completed.load(Ordering::SeqCst);
    let elapsed_secs = elapsed.as_secs_f64();
    let rate = if elapsed_secs > 0.0 {
        done as f64 / elapsed_secs
    } else {
        0.0
    };
    info!(
        "Probed {}/{} links in {:.2} seconds (~{:.2} links/sec)",
        done, total, elapsed_secs, rate
    );
}
