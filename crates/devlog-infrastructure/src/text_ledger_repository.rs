//! Text-file implementation of LedgerRepository.
//!
//! The ledger is a plain text file, one session per line:
//!
//! ```text
//! 1 end
//! 2 end
//! 3
//! ```
//!
//! Beginning a session appends a new line with the next number; ending it
//! appends ` end` to that same line. Trailing blank lines are dropped before
//! an ` end`; nothing else is ever rewritten.

use crate::storage::FileLock;
use devlog_core::error::{DevlogError, Result};
use devlog_core::ledger::{END_MARKER, LedgerRepository, LedgerState, Transition};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Ledger stored as an append-only text file.
#[derive(Debug, Clone)]
pub struct TextLedgerRepository {
    path: PathBuf,
    lock_path: PathBuf,
}

impl TextLedgerRepository {
    pub fn new(path: impl Into<PathBuf>, lock_path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock_path: lock_path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_text(path: &Path) -> Result<String> {
        match fs::read_to_string(path) {
            Ok(text) => Ok(text),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(String::new()),
            Err(e) => Err(e.into()),
        }
    }

    /// Text to append for a validated transition, given the current contents.
    fn suffix_for(current: &str, transition: Transition, next: &LedgerState) -> String {
        match transition {
            Transition::Begin => {
                let needs_newline = !current.is_empty() && !current.ends_with('\n');
                format!("{}{}", if needs_newline { "\n" } else { "" }, next.last_session)
            }
            Transition::End => format!(" {END_MARKER}"),
        }
    }

    fn apply_blocking(path: &Path, lock_path: &Path, transition: Transition) -> Result<LedgerState> {
        let _lock = FileLock::acquire(lock_path)?;

        let current = Self::read_text(path)?;
        let next = LedgerState::from_ledger_text(&current)?.apply(transition)?;

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        if transition == Transition::End && current.ends_with(char::is_whitespace) {
            // Trailing newlines would separate the marker from its entry.
            let trimmed_len = current.trim_end().len();
            let file = OpenOptions::new().write(true).open(path)?;
            file.set_len(trimmed_len as u64)?;
        }

        let suffix = Self::suffix_for(&current, transition, &next);
        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        file.write_all(suffix.as_bytes())?;
        file.sync_all()?;

        debug!(path = %path.display(), entry = %suffix.trim(), "Ledger appended");
        Ok(next)
    }
}

#[async_trait::async_trait]
impl LedgerRepository for TextLedgerRepository {
    async fn load(&self) -> Result<LedgerState> {
        let text = tokio::fs::read_to_string(&self.path).await;
        match text {
            Ok(text) => LedgerState::from_ledger_text(&text),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(LedgerState::initial()),
            Err(e) => Err(e.into()),
        }
    }

    async fn apply(&self, transition: Transition) -> Result<LedgerState> {
        let path = self.path.clone();
        let lock_path = self.lock_path.clone();
        tokio::task::spawn_blocking(move || Self::apply_blocking(&path, &lock_path, transition))
            .await
            .map_err(|e| DevlogError::internal(format!("Failed to join ledger task: {}", e)))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn repo(temp_dir: &TempDir) -> TextLedgerRepository {
        let path = temp_dir.path().join("reports").join("session_number");
        TextLedgerRepository::new(path.clone(), path.with_extension("lock"))
    }

    #[tokio::test]
    async fn test_missing_file_is_initial_state() {
        let temp_dir = TempDir::new().unwrap();
        let state = repo(&temp_dir).load().await.unwrap();
        assert_eq!(state, LedgerState::initial());
    }

    #[tokio::test]
    async fn test_two_sessions_produce_expected_text() {
        let temp_dir = TempDir::new().unwrap();
        let repo = repo(&temp_dir);

        repo.apply(Transition::Begin).await.unwrap();
        repo.apply(Transition::End).await.unwrap();
        repo.apply(Transition::Begin).await.unwrap();
        repo.apply(Transition::End).await.unwrap();

        let text = fs::read_to_string(repo.path()).unwrap();
        assert_eq!(text, "1 end\n2 end");
    }

    #[tokio::test]
    async fn test_rejected_transition_leaves_file_untouched() {
        let temp_dir = TempDir::new().unwrap();
        let repo = repo(&temp_dir);
        fs::create_dir_all(repo.path().parent().unwrap()).unwrap();
        fs::write(repo.path(), "1 end\n2 end\n3 end").unwrap();

        let err = repo.apply(Transition::End).await.unwrap_err();
        assert!(err.is_protocol());
        assert_eq!(fs::read_to_string(repo.path()).unwrap(), "1 end\n2 end\n3 end");

        let state = repo.apply(Transition::Begin).await.unwrap();
        assert_eq!(state.last_session, 4);
        assert_eq!(fs::read_to_string(repo.path()).unwrap(), "1 end\n2 end\n3 end\n4");
    }

    #[tokio::test]
    async fn test_end_marks_line_even_with_trailing_newline() {
        let temp_dir = TempDir::new().unwrap();
        let repo = repo(&temp_dir);
        fs::create_dir_all(repo.path().parent().unwrap()).unwrap();
        fs::write(repo.path(), "0 end\n1 end\n2\n\n").unwrap();

        let state = repo.apply(Transition::End).await.unwrap();
        assert_eq!(state.last_session, 2);
        assert_eq!(fs::read_to_string(repo.path()).unwrap(), "0 end\n1 end\n2 end");
    }

    #[tokio::test]
    async fn test_begin_after_trailing_newline_does_not_add_blank_line() {
        let temp_dir = TempDir::new().unwrap();
        let repo = repo(&temp_dir);
        fs::create_dir_all(repo.path().parent().unwrap()).unwrap();
        fs::write(repo.path(), "0 end\n").unwrap();

        repo.apply(Transition::Begin).await.unwrap();
        assert_eq!(fs::read_to_string(repo.path()).unwrap(), "0 end\n1");
    }

    #[tokio::test]
    async fn test_corrupt_last_line() {
        let temp_dir = TempDir::new().unwrap();
        let repo = repo(&temp_dir);
        fs::create_dir_all(repo.path().parent().unwrap()).unwrap();
        fs::write(repo.path(), "1 end\nsession two").unwrap();

        assert!(repo.load().await.unwrap_err().is_corrupt_ledger());
        assert!(repo.apply(Transition::Begin).await.unwrap_err().is_corrupt_ledger());
    }
}
