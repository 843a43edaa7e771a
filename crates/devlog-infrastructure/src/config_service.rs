//! Configuration service implementation.
//!
//! Loads the root configuration from `devlog.toml` in the project root.

use crate::storage::AtomicTomlFile;
use devlog_core::config::RootConfig;
use devlog_core::error::{DevlogError, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Configuration service that loads and initializes `devlog.toml`.
pub struct ConfigService {
    file: AtomicTomlFile<RootConfig>,
}

impl ConfigService {
    pub fn new(path: PathBuf) -> Self {
        Self {
            file: AtomicTomlFile::new(path),
        }
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Loads the configuration.
    ///
    /// A missing or blank file yields the defaults; an unparsable one is a
    /// `Config` error naming the file.
    pub fn load(&self) -> Result<RootConfig> {
        match self.file.load() {
            Ok(Some(config)) => {
                debug!(path = %self.path().display(), "Loaded configuration");
                Ok(config)
            }
            Ok(None) => {
                debug!(path = %self.path().display(), "No configuration file, using defaults");
                Ok(RootConfig::default())
            }
            Err(DevlogError::Serialization { message, .. }) => Err(DevlogError::config(format!(
                "{}: {}",
                self.path().display(),
                message
            ))),
            Err(e) => Err(e),
        }
    }

    /// Writes the default configuration if no file exists.
    ///
    /// Returns `true` if a new file was written.
    pub fn init(&self) -> Result<bool> {
        let written = self.file.create_if_missing(&RootConfig::default())?;
        if written {
            info!(path = %self.path().display(), "Wrote default configuration");
        }
        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let service = ConfigService::new(temp_dir.path().join("devlog.toml"));
        assert_eq!(service.load().unwrap(), RootConfig::default());
    }

    #[test]
    fn test_load_custom_values() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("devlog.toml");
        fs::write(
            &path,
            "[generator]\nmodel = \"gemini-2.5-pro\"\n\n[secret]\ncredential_file = \"keys/gemini.json\"\n",
        )
        .unwrap();

        let config = ConfigService::new(path).load().unwrap();
        assert_eq!(config.generator.model, "gemini-2.5-pro");
        assert_eq!(
            config.secret.credential_file,
            PathBuf::from("keys/gemini.json")
        );
    }

    #[test]
    fn test_malformed_file_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("devlog.toml");
        fs::write(&path, "[generator\nmodel = 1").unwrap();

        let err = ConfigService::new(path).load().unwrap_err();
        assert!(matches!(err, DevlogError::Config(ref msg) if msg.contains("devlog.toml")));
    }

    #[test]
    fn test_init_writes_once_and_round_trips() {
        let temp_dir = TempDir::new().unwrap();
        let service = ConfigService::new(temp_dir.path().join("devlog.toml"));

        assert!(service.init().unwrap());
        assert!(!service.init().unwrap());
        assert_eq!(service.load().unwrap(), RootConfig::default());
    }
}
