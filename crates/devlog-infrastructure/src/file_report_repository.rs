//! File-system implementation of ReportRepository.

use crate::paths::DevlogPaths;
use devlog_core::error::{DevlogError, Result};
use devlog_core::report::ReportRepository;
use std::path::{Path, PathBuf};
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;
use tracing::debug;

/// Reports stored as `report_<n>.txt` files in the reports directory.
#[derive(Debug, Clone)]
pub struct FileReportRepository {
    paths: DevlogPaths,
}

impl FileReportRepository {
    pub fn new(paths: DevlogPaths) -> Self {
        Self { paths }
    }

    async fn ensure_dir(&self) -> Result<()> {
        fs::create_dir_all(self.paths.reports_dir()).await?;
        Ok(())
    }

    fn missing(&self, session: u32) -> DevlogError {
        DevlogError::missing_report(session, self.location(session))
    }

    async fn file_exists(path: &Path) -> Result<bool> {
        Ok(fs::try_exists(path).await?)
    }

    fn report_path(&self, session: u32) -> PathBuf {
        self.paths.report_file(session)
    }
}

#[async_trait::async_trait]
impl ReportRepository for FileReportRepository {
    async fn create(&self, session: u32, header: &str) -> Result<()> {
        self.ensure_dir().await?;
        let path = self.report_path(session);
        fs::write(&path, header).await?;
        debug!(session, path = %path.display(), "Report written");
        Ok(())
    }

    async fn append(&self, session: u32, text: &str) -> Result<()> {
        let path = self.report_path(session);
        if !Self::file_exists(&path).await? {
            return Err(self.missing(session));
        }

        let mut file = OpenOptions::new().append(true).open(&path).await?;
        file.write_all(text.as_bytes()).await?;
        file.flush().await?;
        debug!(session, bytes = text.len(), "Report appended");
        Ok(())
    }

    async fn read(&self, session: u32) -> Result<String> {
        match fs::read_to_string(self.report_path(session)).await {
            Ok(text) => Ok(text),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(self.missing(session)),
            Err(e) => Err(e.into()),
        }
    }

    async fn exists(&self, session: u32) -> Result<bool> {
        Self::file_exists(&self.report_path(session)).await
    }

    fn location(&self, session: u32) -> String {
        self.report_path(session).display().to_string()
    }

    async fn write_digest(&self, stamp: &str, text: &str) -> Result<String> {
        self.ensure_dir().await?;
        let path = self.paths.digest_file(stamp);
        fs::write(&path, text).await?;
        Ok(path.display().to_string())
    }
}
