//! Secret management service trait.
//!
//! Defines the interface for resolving the API credential.

use crate::config::Credential;
use crate::error::Result;

/// Service for resolving the text-generation credential.
///
/// # Security Note
///
/// Implementations should ensure that:
/// - Secrets are never logged or exposed in error messages
/// - Surrounding whitespace is stripped from every key source
#[async_trait::async_trait]
pub trait SecretService: Send + Sync {
    /// Resolves the credential.
    ///
    /// # Returns
    ///
    /// - `Ok(Credential)`: A non-empty key was found
    /// - `Err(Security)`: No source produced a key (message lists where it looked)
    async fn load_credential(&self) -> Result<Credential>;
}
