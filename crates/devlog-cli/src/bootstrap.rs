//! Wires configuration, repositories and the generator into use cases.

use anyhow::{Context, Result};
use devlog_application::{DiffDigestUseCase, JournalReader, JournalUseCase, PromptRenderer};
use devlog_core::config::RootConfig;
use devlog_core::generator::TextGenerator;
use devlog_core::ledger::SessionLedger;
use devlog_core::secret::SecretService;
use devlog_infrastructure::{
    ConfigService, DevlogPaths, FileReportRepository, SecretServiceImpl, TextLedgerRepository,
};
use devlog_interaction::{GeminiApiAgent, RetryingGenerator};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

pub fn config_path(root: &Path, config: Option<&Path>) -> PathBuf {
    config
        .map(Path::to_path_buf)
        .unwrap_or_else(|| DevlogPaths::config_file_in(root))
}

pub struct App {
    pub config: RootConfig,
    pub paths: DevlogPaths,
    ledger: Arc<TextLedgerRepository>,
    reports: Arc<FileReportRepository>,
}

impl App {
    pub fn load(root: &Path, config: Option<&Path>) -> Result<Self> {
        let service = ConfigService::new(config_path(root, config));
        let config = service
            .load()
            .with_context(|| format!("Failed to load {}", service.path().display()))?;

        let paths = DevlogPaths::new(root, &config);
        debug!(ledger = %paths.ledger_file().display(), reports = %paths.reports_dir().display(), "Resolved paths");

        Ok(Self {
            ledger: Arc::new(TextLedgerRepository::new(
                paths.ledger_file(),
                paths.ledger_lock_file(),
            )),
            reports: Arc::new(FileReportRepository::new(paths.clone())),
            config,
            paths,
        })
    }

    /// Resolves the API key and builds the retrying Gemini generator.
    pub async fn generator(&self) -> Result<Arc<dyn TextGenerator>> {
        let credential = SecretServiceImpl::from_environment(&self.paths)
            .load_credential()
            .await
            .context("Cannot call the text generator without an API key")?;
        debug!(source = %credential.source, "Resolved API credential");

        let settings = &self.config.generator;
        let agent = GeminiApiAgent::from_config(&credential, settings);
        Ok(Arc::new(RetryingGenerator::new(
            agent,
            settings.retry.clone(),
            settings.timeout(),
        )))
    }

    fn session_ledger(&self) -> SessionLedger {
        SessionLedger::new(self.ledger.clone(), self.reports.clone())
    }

    /// Ledger and report queries; needs no credential.
    pub fn reader(&self) -> JournalReader {
        JournalReader::new(self.session_ledger(), self.reports.clone())
    }

    pub fn journal(&self, generator: Arc<dyn TextGenerator>) -> Result<JournalUseCase> {
        Ok(JournalUseCase::new(
            self.session_ledger(),
            self.reports.clone(),
            generator,
            PromptRenderer::new()?,
        ))
    }

    pub fn diff_digest(&self, generator: Arc<dyn TextGenerator>) -> Result<DiffDigestUseCase> {
        Ok(DiffDigestUseCase::new(
            self.paths.root(),
            self.reports.clone(),
            generator,
            PromptRenderer::new()?,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_config_path_override() {
        let root = Path::new("/project");
        assert_eq!(config_path(root, None), PathBuf::from("/project/devlog.toml"));
        assert_eq!(
            config_path(root, Some(Path::new("/etc/devlog.toml"))),
            PathBuf::from("/etc/devlog.toml")
        );
    }

    #[test]
    fn test_load_applies_configured_paths() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join("devlog.toml"),
            "[journal]\nledger_file = \"journal/ledger\"\nreports_dir = \"journal\"\n",
        )
        .unwrap();

        let app = App::load(temp_dir.path(), None).unwrap();
        assert_eq!(app.paths.ledger_file(), temp_dir.path().join("journal/ledger"));
        assert_eq!(app.paths.report_file(2), temp_dir.path().join("journal/report_2.txt"));
    }

    #[test]
    fn test_load_rejects_malformed_config() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("devlog.toml"), "[journal\n").unwrap();

        let err = App::load(temp_dir.path(), None).err().unwrap();
        assert!(format!("{err:#}").contains("devlog.toml"));
    }
}
