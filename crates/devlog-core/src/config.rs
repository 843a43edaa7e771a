//! Configuration model (`devlog.toml`) and secret file model.

use crate::generator::RetryPolicy;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Root of `devlog.toml`. Every section and field is optional.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct RootConfig {
    pub journal: JournalConfig,
    pub generator: GeneratorConfig,
    pub secret: SecretFileConfig,
}

/// Where the ledger and reports live, relative to the project root.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct JournalConfig {
    pub ledger_file: PathBuf,
    pub reports_dir: PathBuf,
}

impl Default for JournalConfig {
    fn default() -> Self {
        Self {
            ledger_file: PathBuf::from("reports/session_number"),
            reports_dir: PathBuf::from("reports"),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct GeneratorConfig {
    pub model: String,
    pub base_url: String,
    /// Upper bound for a single request, in seconds.
    pub timeout_secs: u64,
    pub retry: RetryPolicy,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_GEMINI_MODEL.to_string(),
            base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            timeout_secs: 120,
            retry: RetryPolicy::default(),
        }
    }
}

impl GeneratorConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct SecretFileConfig {
    /// Project-local credential file: a plain first-line key, or JSON
    /// shaped like [`SecretConfig`] when the name ends in `.json`.
    pub credential_file: PathBuf,
}

impl Default for SecretFileConfig {
    fn default() -> Self {
        Self {
            credential_file: PathBuf::from("env_variables"),
        }
    }
}

/// Contents of a JSON secret file.
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct SecretConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gemini: Option<GeminiConfig>,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_name: Option<String>,
}

/// A resolved credential plus the model the secret file asked for, if any.
#[derive(Clone)]
pub struct Credential {
    pub api_key: String,
    pub model_override: Option<String>,
    /// Where the key came from, for diagnostics. Never the key itself.
    pub source: String,
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("api_key", &"<redacted>")
            .field("model_override", &self.model_override)
            .field("source", &self.source)
            .finish()
    }
}
