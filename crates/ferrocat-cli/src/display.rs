//! Diagnostic output for the ferrocat CLI
//!
//! Everything here goes to standard error; standard output carries data only.

use console::style;
use ferrocat_io::RunSummary;
use std::fmt::Display;
use std::time::Duration;
use tracing::info;

/// Program name used as the prefix of every diagnostic
pub const PROGRAM: &str = "ferrocat";

/// One-line usage string
pub const USAGE: &str = "usage: ferrocat [-u] [file ...]";

/// Print the usage line
pub fn display_usage() {
    eprintln!("{}", USAGE);
}

/// Print a diagnostic as `ferrocat: <message>`
pub fn display_diagnostic<M: Display>(message: M) {
    eprintln!("{}: {}", style(PROGRAM).for_stderr().bold(), message);
}

/// Log the run totals at info level
pub fn log_summary(summary: &RunSummary, elapsed: Duration) {
    let stats = &summary.stats;
    info!(
        "{} sources copied, {} failed, {} in {} ({} reads, {} writes, {} short)",
        stats.sources_copied,
        summary.failures,
        format_bytes(stats.bytes_written),
        format_duration(elapsed),
        stats.read_calls,
        stats.write_calls,
        stats.short_writes
    );
}

/// Format bytes in human-readable format
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
    let mut size = bytes as f64;
    let mut unit_index = 0;

    while size >= 1024.0 && unit_index < UNITS.len() - 1 {
        size /= 1024.0;
        unit_index += 1;
    }

    format!("{:.2} {}", size, UNITS[unit_index])
}

/// Format duration in human-readable format
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    if secs < 60 {
        format!("{:.2}s", duration.as_secs_f64())
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60)
    }
}
