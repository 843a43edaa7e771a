//! Per-session report records.

pub mod repository;

pub use repository::ReportRepository;

use chrono::{DateTime, Local};

/// Timestamp layout used in report header lines.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// Opening line written when a session starts.
pub fn start_line(at: &DateTime<Local>) -> String {
    format!("Starting Journaling Session at: {}\n", at.format(TIMESTAMP_FORMAT))
}

/// Closing line appended when a session ends.
pub fn end_line(at: &DateTime<Local>) -> String {
    format!("Ending Journaling Session at: {}\n", at.format(TIMESTAMP_FORMAT))
}
