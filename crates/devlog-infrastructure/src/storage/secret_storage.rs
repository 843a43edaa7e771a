//! Secret file storage.
//!
//! Reads credential files in the two shapes devlog accepts: a JSON document
//! (`{"gemini": {"api_key": "..."}}`) or a plain file whose first line is
//! the key.

use devlog_core::config::SecretConfig;
use std::fs;
use std::path::{Path, PathBuf};

/// Errors that can occur while reading a secret file.
#[derive(Debug)]
pub enum SecretStorageError {
    /// File not found.
    NotFound(PathBuf),
    /// File I/O error.
    IoError(std::io::Error),
    /// JSON parsing error.
    ParseError(serde_json::Error),
}

impl std::fmt::Display for SecretStorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SecretStorageError::NotFound(path) => {
                write!(f, "Secret file not found at: {}", path.display())
            }
            SecretStorageError::IoError(e) => write!(f, "I/O error: {}", e),
            // serde_json errors only carry position info, never the input.
            SecretStorageError::ParseError(e) => write!(f, "JSON parse error: {}", e),
        }
    }
}

impl std::error::Error for SecretStorageError {}

impl From<std::io::Error> for SecretStorageError {
    fn from(e: std::io::Error) -> Self {
        SecretStorageError::IoError(e)
    }
}

impl From<serde_json::Error> for SecretStorageError {
    fn from(e: serde_json::Error) -> Self {
        SecretStorageError::ParseError(e)
    }
}

/// Read-only access to one secret file.
///
/// # Security Note
///
/// Files are read as plaintext. They should be readable by the owner only
/// (e.g. mode 600) and kept out of version control.
pub struct SecretStorage {
    path: PathBuf,
}

impl SecretStorage {
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the file should be parsed as JSON.
    pub fn is_json(&self) -> bool {
        self.path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
    }

    fn read(&self) -> Result<String, SecretStorageError> {
        match fs::read_to_string(&self.path) {
            Ok(content) => Ok(content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(SecretStorageError::NotFound(self.path.clone()))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Loads a JSON secret file.
    pub fn load_json(&self) -> Result<SecretConfig, SecretStorageError> {
        let content = self.read()?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Loads the first line of a plain secret file, whitespace trimmed.
    ///
    /// Returns `Ok(None)` when that line is blank.
    pub fn load_first_line(&self) -> Result<Option<String>, SecretStorageError> {
        let content = self.read()?;
        let key = content.lines().next().unwrap_or("").trim();
        Ok((!key.is_empty()).then(|| key.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_nonexistent_file() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("secret.json");
        let storage = SecretStorage::with_path(file_path.clone());

        match storage.load_json() {
            Err(SecretStorageError::NotFound(path)) => assert_eq!(path, file_path),
            other => panic!("Expected NotFound error, got {other:?}"),
        }
    }

    #[test]
    fn test_load_valid_json() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("secret.json");
        fs::write(
            &file_path,
            r#"{ "gemini": { "api_key": "test-key-123", "model_name": "gemini-pro" } }"#,
        )
        .unwrap();

        let config = SecretStorage::with_path(file_path).load_json().unwrap();
        let gemini = config.gemini.unwrap();
        assert_eq!(gemini.api_key, "test-key-123");
        assert_eq!(gemini.model_name, Some("gemini-pro".to_string()));
    }

    #[test]
    fn test_load_empty_json_config() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("secret.json");
        fs::write(&file_path, "{}").unwrap();

        let config = SecretStorage::with_path(file_path).load_json().unwrap();
        assert!(config.gemini.is_none());
    }

    #[test]
    fn test_load_invalid_json() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("secret.json");
        fs::write(&file_path, "{ invalid json").unwrap();

        let result = SecretStorage::with_path(file_path).load_json();
        assert!(matches!(result, Err(SecretStorageError::ParseError(_))));
    }

    #[test]
    fn test_first_line_is_trimmed() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("env_variables");
        fs::write(&file_path, "  abc123  \r\nsecond line\n").unwrap();

        let storage = SecretStorage::with_path(file_path);
        assert!(!storage.is_json());
        assert_eq!(storage.load_first_line().unwrap(), Some("abc123".to_string()));
    }

    #[test]
    fn test_blank_first_line_is_none() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("env_variables");
        fs::write(&file_path, "\nkey-on-second-line\n").unwrap();

        assert_eq!(
            SecretStorage::with_path(file_path).load_first_line().unwrap(),
            None
        );
    }
}
