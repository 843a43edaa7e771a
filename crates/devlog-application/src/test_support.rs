//! In-memory doubles shared by the use case tests.

use async_trait::async_trait;
use devlog_core::error::{DevlogError, Result};
use devlog_core::generator::TextGenerator;
use devlog_core::ledger::{LedgerRepository, LedgerState, Transition};
use devlog_core::report::ReportRepository;
use std::collections::HashMap;
use std::sync::Mutex;

pub struct MemoryLedger {
    state: Mutex<LedgerState>,
}

impl MemoryLedger {
    pub fn new(state: LedgerState) -> Self {
        Self {
            state: Mutex::new(state),
        }
    }

    pub fn state(&self) -> LedgerState {
        *self.state.lock().unwrap()
    }
}

#[async_trait]
impl LedgerRepository for MemoryLedger {
    async fn load(&self) -> Result<LedgerState> {
        Ok(self.state())
    }

    async fn apply(&self, transition: Transition) -> Result<LedgerState> {
        let mut state = self.state.lock().unwrap();
        *state = state.apply(transition)?;
        Ok(*state)
    }
}

#[derive(Default)]
pub struct MemoryReports {
    reports: Mutex<HashMap<u32, String>>,
    digests: Mutex<Vec<(String, String)>>,
}

impl MemoryReports {
    pub fn with_report(self, session: u32, text: &str) -> Self {
        self.reports.lock().unwrap().insert(session, text.to_string());
        self
    }

    pub fn get(&self, session: u32) -> Option<String> {
        self.reports.lock().unwrap().get(&session).cloned()
    }

    pub fn digests(&self) -> Vec<(String, String)> {
        self.digests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ReportRepository for MemoryReports {
    async fn create(&self, session: u32, header: &str) -> Result<()> {
        self.reports
            .lock()
            .unwrap()
            .insert(session, header.to_string());
        Ok(())
    }

    async fn append(&self, session: u32, text: &str) -> Result<()> {
        match self.reports.lock().unwrap().get_mut(&session) {
            Some(report) => {
                report.push_str(text);
                Ok(())
            }
            None => Err(DevlogError::missing_report(session, self.location(session))),
        }
    }

    async fn read(&self, session: u32) -> Result<String> {
        self.get(session)
            .ok_or_else(|| DevlogError::missing_report(session, self.location(session)))
    }

    async fn exists(&self, session: u32) -> Result<bool> {
        Ok(self.reports.lock().unwrap().contains_key(&session))
    }

    fn location(&self, session: u32) -> String {
        format!("memory://report_{session}")
    }

    async fn write_digest(&self, stamp: &str, text: &str) -> Result<String> {
        self.digests
            .lock()
            .unwrap()
            .push((stamp.to_string(), text.to_string()));
        Ok(format!("memory://digest_{stamp}"))
    }
}

/// Answers with queued outcomes and records every prompt it saw.
#[derive(Default)]
pub struct ScriptedGenerator {
    outcomes: Mutex<Vec<Result<String>>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedGenerator {
    pub fn answering(answers: &[&str]) -> Self {
        Self::with_outcomes(answers.iter().map(|a| Ok(a.to_string())).collect())
    }

    pub fn with_outcomes(mut outcomes: Vec<Result<String>>) -> Self {
        outcomes.reverse();
        Self {
            outcomes: Mutex::new(outcomes),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn generate(&self, prompt: &str) -> Result<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.outcomes
            .lock()
            .unwrap()
            .pop()
            .unwrap_or_else(|| Err(DevlogError::collaborator("no scripted answer left")))
    }
}
