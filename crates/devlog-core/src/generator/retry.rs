//! Retry policy and error classification for text-generation requests.
//!
//! Pure types and functions deciding **whether** and **when** to retry. The
//! retry loop itself lives with the HTTP client.

use crate::error::DevlogError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Classification of a failed request for retry decisions.
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorClass {
    /// Transient error, safe to retry. Optional delay hint from the server.
    Retryable { delay_hint: Option<Duration> },
    /// Rate limited. Retry after the specified duration if available.
    RateLimit { retry_after: Option<Duration> },
    /// Fatal error, do not retry.
    Fatal,
    /// Bad or missing credential. Fix it, don't retry.
    AuthError,
}

impl ErrorClass {
    pub fn is_retryable(&self) -> bool {
        matches!(self, ErrorClass::Retryable { .. } | ErrorClass::RateLimit { .. })
    }

    /// Server-provided delay, whichever variant carries it.
    pub fn hint(&self) -> Option<Duration> {
        match self {
            ErrorClass::Retryable { delay_hint } => *delay_hint,
            ErrorClass::RateLimit { retry_after } => *retry_after,
            _ => None,
        }
    }

    /// Builds the error reported to callers for an HTTP failure.
    pub fn into_error(self, status: u16, message: impl Into<String>) -> DevlogError {
        let message = message.into();
        let message = match self {
            ErrorClass::AuthError => format!("credential rejected ({status}): {message}"),
            _ => format!("HTTP {status}: {message}"),
        };
        DevlogError::Collaborator {
            message,
            status_code: Some(status),
            retryable: self.is_retryable(),
            retry_after: self.hint(),
        }
    }
}

/// Retry policy with exponential backoff and jitter.
///
/// The delay for attempt *n* (0-indexed) is:
///
/// ```text
/// delay = min(base_delay_ms * backoff_factor ^ n, max_delay_ms)
/// ```
///
/// scaled by a deterministic ±25% jitter derived from the attempt number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryPolicy {
    /// Maximum number of retry attempts after the first try.
    pub max_retries: u32,
    /// Base delay for the first retry, in milliseconds.
    pub base_delay_ms: u64,
    /// Maximum delay cap, in milliseconds.
    pub max_delay_ms: u64,
    /// Backoff multiplier applied per attempt.
    pub backoff_factor: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay_ms: 1_000,
            max_delay_ms: 30_000,
            backoff_factor: 2.0,
        }
    }
}

impl RetryPolicy {
    /// A policy that never retries.
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            ..Self::default()
        }
    }

    /// Classify an HTTP status code into an [`ErrorClass`].
    pub fn classify_http_status(status: u16) -> ErrorClass {
        match status {
            401 | 403 => ErrorClass::AuthError,
            429 => ErrorClass::RateLimit { retry_after: None },
            408 | 502 | 503 | 504 => ErrorClass::Retryable { delay_hint: None },
            400 | 404 | 405 | 422 => ErrorClass::Fatal,
            500 => ErrorClass::Retryable {
                delay_hint: Some(Duration::from_secs(2)),
            },
            _ if status >= 500 => ErrorClass::Retryable { delay_hint: None },
            _ => ErrorClass::Fatal,
        }
    }

    /// Classify an HTTP status with an optional `Retry-After` value in seconds.
    pub fn classify_with_retry_after(status: u16, retry_after: Option<Duration>) -> ErrorClass {
        let mut class = Self::classify_http_status(status);
        if let Some(wait) = retry_after {
            match &mut class {
                ErrorClass::RateLimit { retry_after } => *retry_after = Some(wait),
                ErrorClass::Retryable { delay_hint } => *delay_hint = Some(wait),
                _ => {}
            }
        }
        class
    }

    /// Delay before retry `attempt` (0-indexed), or `None` once exhausted.
    pub fn next_delay(&self, attempt: u32) -> Option<Duration> {
        if attempt >= self.max_retries {
            return None;
        }

        let base = self.base_delay_ms as f64;
        let delay = base * self.backoff_factor.powi(attempt as i32);
        let capped = delay.min(self.max_delay_ms as f64);

        // Golden-ratio fractional part spreads attempts over [0.75, 1.25].
        let jitter_factor = 0.75 + 0.5 * ((attempt as f64 * 0.618_033_988) % 1.0);
        let final_ms = (capped * jitter_factor) as u64;

        Some(Duration::from_millis(final_ms.max(1)))
    }
}
