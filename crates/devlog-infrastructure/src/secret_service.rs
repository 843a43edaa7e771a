//! Secret service implementation.
//!
//! Resolves the Gemini API key from, in order:
//! 1. the `GEMINI_API_KEY` environment variable,
//! 2. the project credential file (`env_variables` by default),
//! 3. `~/.config/devlog/secret.json`.
//!
//! Every source is trimmed the same way.

use crate::paths::DevlogPaths;
use crate::storage::{SecretStorage, SecretStorageError};
use devlog_core::config::Credential;
use devlog_core::error::{DevlogError, Result};
use devlog_core::secret::SecretService;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub const API_KEY_ENV_VAR: &str = "GEMINI_API_KEY";

/// Service resolving the API credential from the environment and files.
///
/// # Example
///
/// ```ignore
/// use devlog_infrastructure::SecretServiceImpl;
/// use devlog_core::secret::SecretService;
///
/// let service = SecretServiceImpl::from_environment(&paths);
/// let credential = service.load_credential().await?;
/// ```
#[derive(Clone)]
pub struct SecretServiceImpl {
    env_value: Option<String>,
    credential_file: PathBuf,
    user_secret_file: Option<PathBuf>,
}

impl SecretServiceImpl {
    pub fn new(
        env_value: Option<String>,
        credential_file: PathBuf,
        user_secret_file: Option<PathBuf>,
    ) -> Self {
        Self {
            env_value,
            credential_file,
            user_secret_file,
        }
    }

    /// Reads `GEMINI_API_KEY` now and uses the standard file locations.
    pub fn from_environment(paths: &DevlogPaths) -> Self {
        Self::new(
            std::env::var(API_KEY_ENV_VAR).ok(),
            paths.credential_file().to_path_buf(),
            DevlogPaths::user_secret_file().ok(),
        )
    }

    fn from_file(path: &Path) -> Result<Option<Credential>> {
        let storage = SecretStorage::with_path(path.to_path_buf());
        let source = path.display().to_string();

        if storage.is_json() {
            let config = match storage.load_json() {
                Ok(config) => config,
                Err(SecretStorageError::NotFound(_)) => return Ok(None),
                Err(e) => return Err(DevlogError::security(e.to_string())),
            };
            return Ok(config.gemini.and_then(|gemini| {
                let api_key = gemini.api_key.trim().to_string();
                (!api_key.is_empty()).then(|| Credential {
                    api_key,
                    model_override: gemini.model_name,
                    source,
                })
            }));
        }

        match storage.load_first_line() {
            Ok(Some(api_key)) => Ok(Some(Credential {
                api_key,
                model_override: None,
                source,
            })),
            Ok(None) => {
                warn!(path = %source, "Credential file has a blank first line");
                Ok(None)
            }
            Err(SecretStorageError::NotFound(_)) => Ok(None),
            Err(e) => Err(DevlogError::security(e.to_string())),
        }
    }
}

#[async_trait::async_trait]
impl SecretService for SecretServiceImpl {
    async fn load_credential(&self) -> Result<Credential> {
        if let Some(value) = &self.env_value {
            let api_key = value.trim();
            if !api_key.is_empty() {
                debug!(source = API_KEY_ENV_VAR, "Using API key from environment");
                return Ok(Credential {
                    api_key: api_key.to_string(),
                    model_override: None,
                    source: API_KEY_ENV_VAR.to_string(),
                });
            }
        }

        let mut searched = vec![API_KEY_ENV_VAR.to_string()];
        let files = std::iter::once(&self.credential_file).chain(self.user_secret_file.iter());
        for path in files {
            searched.push(path.display().to_string());
            if let Some(credential) = Self::from_file(path)? {
                debug!(source = %credential.source, "Using API key from file");
                return Ok(credential);
            }
        }

        Err(DevlogError::security(format!(
            "No Gemini API key found. Looked in: {}",
            searched.join(", ")
        )))
    }
}
