//! Unified path management for devlog files.
//!
//! Everything except the user-level secret file lives under the project
//! root the tool is run from. Relative paths in `devlog.toml` are resolved
//! against that root; absolute ones are used as-is.
//!
//! # Directory Structure
//!
//! ```text
//! <project>/
//! ├── devlog.toml              # Optional configuration
//! ├── env_variables            # API key (first line)
//! └── reports/
//!     ├── session_number       # Session ledger
//!     ├── session_number.lock  # Held while the ledger is updated
//!     ├── report_1.txt         # One report per session
//!     └── digest_20250101-120000.txt
//!
//! ~/.config/devlog/
//! └── secret.json              # Fallback credential
//! ```

use devlog_core::config::RootConfig;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "devlog.toml";
pub const USER_SECRET_FILE_NAME: &str = "secret.json";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Home/config directory could not be determined.
    ConfigDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::ConfigDirNotFound => write!(f, "Cannot find user config directory"),
        }
    }
}

impl std::error::Error for PathError {}

/// Resolved locations of every file devlog reads or writes.
#[derive(Debug, Clone)]
pub struct DevlogPaths {
    root: PathBuf,
    ledger_file: PathBuf,
    reports_dir: PathBuf,
    credential_file: PathBuf,
}

impl DevlogPaths {
    pub fn new(root: impl Into<PathBuf>, config: &RootConfig) -> Self {
        let root = root.into();
        Self {
            ledger_file: root.join(&config.journal.ledger_file),
            reports_dir: root.join(&config.journal.reports_dir),
            credential_file: root.join(&config.secret.credential_file),
            root,
        }
    }

    /// Default config file location for a project root.
    pub fn config_file_in(root: &Path) -> PathBuf {
        root.join(CONFIG_FILE_NAME)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn ledger_file(&self) -> &Path {
        &self.ledger_file
    }

    /// Lock file guarding ledger updates.
    pub fn ledger_lock_file(&self) -> PathBuf {
        let mut name = self
            .ledger_file
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "ledger".into());
        name.push(".lock");
        self.ledger_file.with_file_name(name)
    }

    pub fn reports_dir(&self) -> &Path {
        &self.reports_dir
    }

    /// `reports/report_<n>.txt`
    pub fn report_file(&self, session: u32) -> PathBuf {
        self.reports_dir.join(format!("report_{session}.txt"))
    }

    /// `reports/digest_<stamp>.txt`
    pub fn digest_file(&self, stamp: &str) -> PathBuf {
        self.reports_dir.join(format!("digest_{stamp}.txt"))
    }

    pub fn credential_file(&self) -> &Path {
        &self.credential_file
    }

    /// `~/.config/devlog` (platform equivalent).
    pub fn user_config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|dir| dir.join("devlog"))
            .ok_or(PathError::ConfigDirNotFound)
    }

    /// `~/.config/devlog/secret.json`
    pub fn user_secret_file() -> Result<PathBuf, PathError> {
        Ok(Self::user_config_dir()?.join(USER_SECRET_FILE_NAME))
    }
}
