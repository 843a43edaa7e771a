//! Error types for devlog.

use std::time::Duration;
use thiserror::Error;

/// A shared error type for every devlog crate.
///
/// The first four variants are the journaling taxonomy: an operation tried in
/// the wrong phase, an unreadable ledger, a report that should exist but
/// does not, and a failed call to the text-generation service. The rest
/// cover the ambient plumbing (files, config, credentials).
#[derive(Error, Debug, Clone)]
pub enum DevlogError {
    /// Start/end attempted in the wrong phase.
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// The ledger's last line could not be parsed.
    #[error("Corrupt ledger at line {line}: {content:?} ({reason})")]
    CorruptLedger {
        line: usize,
        content: String,
        reason: String,
    },

    /// The report file for a session is absent.
    #[error("Report for session {session} not found at {location}")]
    MissingReport { session: u32, location: String },

    /// The text-generation service rejected or failed the request.
    #[error("Text generation failed: {message}")]
    Collaborator {
        message: String,
        status_code: Option<u16>,
        retryable: bool,
        retry_after: Option<Duration>,
    },

    /// A single text-generation attempt exceeded its time bound.
    #[error("Text generation timed out after {0:?}")]
    Timeout(Duration),

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization { format: String, message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Credential error
    #[error("Security error: {0}")]
    Security(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl DevlogError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a Protocol error
    pub fn protocol(message: impl Into<String>) -> Self {
        Self::Protocol(message.into())
    }

    /// Creates a CorruptLedger error
    pub fn corrupt_ledger(line: usize, content: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::CorruptLedger {
            line,
            content: content.into(),
            reason: reason.into(),
        }
    }

    /// Creates a MissingReport error
    pub fn missing_report(session: u32, location: impl Into<String>) -> Self {
        Self::MissingReport {
            session,
            location: location.into(),
        }
    }

    /// Creates a non-retryable Collaborator error
    pub fn collaborator(message: impl Into<String>) -> Self {
        Self::Collaborator {
            message: message.into(),
            status_code: None,
            retryable: false,
            retry_after: None,
        }
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates a Security error
    pub fn security(message: impl Into<String>) -> Self {
        Self::Security(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is a Protocol error
    pub fn is_protocol(&self) -> bool {
        matches!(self, Self::Protocol(_))
    }

    /// Check if this is a CorruptLedger error
    pub fn is_corrupt_ledger(&self) -> bool {
        matches!(self, Self::CorruptLedger { .. })
    }

    /// Check if this is a MissingReport error
    pub fn is_missing_report(&self) -> bool {
        matches!(self, Self::MissingReport { .. })
    }

    /// Check if this came from the text-generation service (including timeouts)
    pub fn is_collaborator(&self) -> bool {
        matches!(self, Self::Collaborator { .. } | Self::Timeout(_))
    }

    /// Whether another attempt at the same request could succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Collaborator { retryable, .. } => *retryable,
            Self::Timeout(_) => true,
            _ => false,
        }
    }

    /// Server-provided wait hint, if any.
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            Self::Collaborator { retry_after, .. } => *retry_after,
            _ => None,
        }
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for DevlogError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for DevlogError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for DevlogError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for DevlogError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// Conversion from anyhow::Error (for glue code at the edges)
impl From<anyhow::Error> for DevlogError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

/// A type alias for `Result<T, DevlogError>`.
pub type Result<T> = std::result::Result<T, DevlogError>;
