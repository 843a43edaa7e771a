//! Report repository trait.

use crate::error::Result;
use async_trait::async_trait;

/// Storage for per-session report records and standalone diff digests.
///
/// A report is plain text that only ever grows while its session is open:
/// a header and introduction at start, a closing line and conclusion at end.
#[async_trait]
pub trait ReportRepository: Send + Sync {
    /// Creates the report for `session` containing only `header`,
    /// replacing any leftover file with the same number.
    async fn create(&self, session: u32, header: &str) -> Result<()>;

    /// Appends text to an existing report.
    ///
    /// Fails with `MissingReport` if the report does not exist.
    async fn append(&self, session: u32, text: &str) -> Result<()>;

    /// Reads the full report text.
    ///
    /// Fails with `MissingReport` if the report does not exist.
    async fn read(&self, session: u32) -> Result<String>;

    /// Checks whether the report for `session` exists.
    async fn exists(&self, session: u32) -> Result<bool>;

    /// Human-readable location of a session's report, for messages.
    fn location(&self, session: u32) -> String;

    /// Writes a standalone diff digest and returns where it went.
    async fn write_digest(&self, stamp: &str, text: &str) -> Result<String>;
}
