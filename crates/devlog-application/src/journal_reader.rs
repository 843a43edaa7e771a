//! Generator-free view of the journal.
//!
//! Answers "where are we" and "would start/end be accepted" from the ledger
//! and the report records alone, so callers can refuse a wrong-phase command
//! before any credential or network access.

use devlog_core::error::{DevlogError, Result};
use devlog_core::ledger::{LedgerState, SessionLedger, Transition};
use devlog_core::report::ReportRepository;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JournalStatus {
    pub state: LedgerState,
    /// Whether the report of `state.last_session` is on disk.
    pub report_exists: bool,
}

#[derive(Clone)]
pub struct JournalReader {
    ledger: SessionLedger,
    reports: Arc<dyn ReportRepository>,
}

impl JournalReader {
    pub fn new(ledger: SessionLedger, reports: Arc<dyn ReportRepository>) -> Self {
        Self { ledger, reports }
    }

    pub async fn status(&self) -> Result<JournalStatus> {
        let state = self.ledger.current().await?;
        let report_exists = self.reports.exists(state.last_session).await?;
        Ok(JournalStatus {
            state,
            report_exists,
        })
    }

    /// Checks that a session may be opened now and returns its number.
    ///
    /// Fails with `Protocol` while a session is open and with
    /// `MissingReport` if the previous report is gone. The first session may
    /// start without a previous report.
    pub async fn check_start(&self) -> Result<u32> {
        let next = self.ledger.current().await?.apply(Transition::Begin)?;
        let previous = next.last_session - 1;
        if previous > 0 && !self.reports.exists(previous).await? {
            return Err(DevlogError::missing_report(
                previous,
                self.reports.location(previous),
            ));
        }
        Ok(next.last_session)
    }

    /// Checks that the open session may be closed now and returns its number.
    pub async fn check_end(&self) -> Result<u32> {
        let closed = self.ledger.current().await?.apply(Transition::End)?;
        let session = closed.last_session;
        if !self.reports.exists(session).await? {
            return Err(DevlogError::missing_report(
                session,
                self.reports.location(session),
            ));
        }
        Ok(session)
    }
}
