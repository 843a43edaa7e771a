//! Journal use case.
//!
//! Opens and closes journaling sessions: the ledger transition, the report
//! header line and the generated introduction or conclusion.

use crate::journal_reader::{JournalReader, JournalStatus};
use crate::prompts::PromptRenderer;
use chrono::{DateTime, Local};
use devlog_core::error::Result;
use devlog_core::generator::TextGenerator;
use devlog_core::ledger::SessionLedger;
use devlog_core::report::ReportRepository;
use std::sync::Arc;
use tracing::{debug, info};

/// Result of a successful `start`.
#[derive(Debug, Clone)]
pub struct StartedSession {
    pub session: u32,
    pub started_at: DateTime<Local>,
    pub introduction: String,
}

/// Result of a successful `end`.
#[derive(Debug, Clone)]
pub struct EndedSession {
    pub session: u32,
    pub ended_at: DateTime<Local>,
    pub conclusion: String,
}

/// Use case driving the start/end journaling workflow.
///
/// # Consistency
///
/// The ledger is the source of truth and is written first. If the generator
/// fails afterwards, the ledger keeps its new phase and the report keeps its
/// header line without the generated text; the error is returned as is.
pub struct JournalUseCase {
    ledger: SessionLedger,
    reader: JournalReader,
    reports: Arc<dyn ReportRepository>,
    generator: Arc<dyn TextGenerator>,
    prompts: PromptRenderer,
}

impl JournalUseCase {
    pub fn new(
        ledger: SessionLedger,
        reports: Arc<dyn ReportRepository>,
        generator: Arc<dyn TextGenerator>,
        prompts: PromptRenderer,
    ) -> Self {
        Self {
            reader: JournalReader::new(ledger.clone(), reports.clone()),
            ledger,
            reports,
            generator,
            prompts,
        }
    }

    /// Opens the next session and writes its introduction.
    ///
    /// Fails with `Protocol` if a session is already open and with
    /// `MissingReport` if the previous session's report is gone; in both
    /// cases nothing is written.
    pub async fn start(&self, commit_message: &str) -> Result<StartedSession> {
        let next = self.reader.check_start().await?;
        let previous_report = self.previous_report(next).await?;

        let started_at = Local::now();
        let session = self.ledger.begin_session(started_at).await?;

        let prompt = self.prompts.introduction(&previous_report, commit_message)?;
        debug!(session, prompt_chars = prompt.len(), "Requesting introduction");
        let introduction = self.generator.generate(&prompt).await?;

        self.reports
            .append(session, &newline_terminated(&introduction))
            .await?;
        info!(session, "Introduction written");

        Ok(StartedSession {
            session,
            started_at,
            introduction,
        })
    }

    /// Closes the open session and writes its conclusion.
    pub async fn end(&self, commit_message: &str) -> Result<EndedSession> {
        let ended_at = Local::now();
        let session = self.ledger.end_session(ended_at).await?;

        let current_report = self.reports.read(session).await?;
        let prompt = self.prompts.conclusion(&current_report, commit_message)?;
        debug!(session, prompt_chars = prompt.len(), "Requesting conclusion");
        let conclusion = self.generator.generate(&prompt).await?;

        self.reports
            .append(session, &newline_terminated(&conclusion))
            .await?;
        info!(session, "Conclusion written");

        Ok(EndedSession {
            session,
            ended_at,
            conclusion,
        })
    }

    pub async fn status(&self) -> Result<JournalStatus> {
        self.reader.status().await
    }

    pub fn reader(&self) -> &JournalReader {
        &self.reader
    }

    /// The report preceding session `next`. The first session may start
    /// without one.
    async fn previous_report(&self, next: u32) -> Result<String> {
        let previous = next - 1;
        if previous == 0 && !self.reports.exists(previous).await? {
            return Ok(String::new());
        }
        self.reports.read(previous).await
    }
}

fn newline_terminated(text: &str) -> String {
    if text.ends_with('\n') {
        text.to_string()
    } else {
        format!("{text}\n")
    }
}
