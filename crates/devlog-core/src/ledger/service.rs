//! Session ledger service.

use super::model::{LedgerState, Transition};
use super::repository::LedgerRepository;
use crate::error::{DevlogError, Result};
use crate::report::{self, ReportRepository};
use chrono::{DateTime, Local};
use std::sync::Arc;
use tracing::info;

/// Gates session start/end so they strictly alternate, and keeps each
/// session's report record in step with the ledger.
///
/// Only the most recent ledger entry decides what is legal, so every
/// operation costs one state load regardless of how long the history is.
#[derive(Clone)]
pub struct SessionLedger {
    ledger: Arc<dyn LedgerRepository>,
    reports: Arc<dyn ReportRepository>,
}

impl SessionLedger {
    pub fn new(ledger: Arc<dyn LedgerRepository>, reports: Arc<dyn ReportRepository>) -> Self {
        Self { ledger, reports }
    }

    /// Current ledger state.
    pub async fn current(&self) -> Result<LedgerState> {
        self.ledger.load().await
    }

    /// Opens the next session and creates its report.
    ///
    /// # Returns
    ///
    /// - `Ok(n)`: the newly opened session number (`last ended + 1`)
    /// - `Err(Protocol)`: a session is already open; nothing was written
    /// - `Err(CorruptLedger)`: the ledger's last line is unreadable
    pub async fn begin_session(&self, at: DateTime<Local>) -> Result<u32> {
        let state = self.ledger.apply(Transition::Begin).await?;
        let session = state.last_session;
        info!(session, "Session opened in ledger");

        self.reports
            .create(session, &report::start_line(&at))
            .await?;
        info!(session, location = %self.reports.location(session), "Report created");

        Ok(session)
    }

    /// Closes the open session and stamps its report.
    ///
    /// The report is checked before the ledger is touched, so a missing
    /// report leaves the session open.
    ///
    /// # Returns
    ///
    /// - `Ok(n)`: the session number that was closed
    /// - `Err(Protocol)`: no session is open; nothing was written
    /// - `Err(MissingReport)`: the open session has no report file
    pub async fn end_session(&self, at: DateTime<Local>) -> Result<u32> {
        let state = self.ledger.load().await?;
        state.apply(Transition::End)?;

        let session = state.last_session;
        if !self.reports.exists(session).await? {
            return Err(DevlogError::missing_report(
                session,
                self.reports.location(session),
            ));
        }

        let closed = self.ledger.apply(Transition::End).await?;
        info!(session = closed.last_session, "Session closed in ledger");

        self.reports
            .append(closed.last_session, &report::end_line(&at))
            .await?;

        Ok(closed.last_session)
    }
}
