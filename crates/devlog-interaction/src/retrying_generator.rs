//! Timeout-bounded, retrying wrapper around any [`TextGenerator`].

use async_trait::async_trait;
use devlog_core::error::{DevlogError, Result};
use devlog_core::generator::{RetryPolicy, TextGenerator};
use std::time::Duration;
use tracing::{debug, warn};

/// Bounds each attempt with a timeout and retries transient failures.
///
/// On success the inner generator's answer is returned untouched. A
/// non-retryable failure is returned as soon as it happens; a retryable one
/// is retried until the policy runs out, then the last error is returned.
pub struct RetryingGenerator<G> {
    inner: G,
    policy: RetryPolicy,
    timeout: Duration,
}

impl<G: TextGenerator> RetryingGenerator<G> {
    pub fn new(inner: G, policy: RetryPolicy, timeout: Duration) -> Self {
        Self {
            inner,
            policy,
            timeout,
        }
    }

    pub fn inner(&self) -> &G {
        &self.inner
    }

    async fn attempt(&self, prompt: &str) -> Result<String> {
        match tokio::time::timeout(self.timeout, self.inner.generate(prompt)).await {
            Ok(result) => result,
            Err(_) => Err(DevlogError::Timeout(self.timeout)),
        }
    }

    /// Wait before the next try: the policy's backoff, stretched to any
    /// server-provided hint but never past `max_delay_ms`.
    fn delay_for(&self, attempt: u32, err: &DevlogError) -> Option<Duration> {
        let backoff = self.policy.next_delay(attempt)?;
        let cap = Duration::from_millis(self.policy.max_delay_ms).max(backoff);
        Some(match err.retry_after() {
            Some(hint) if hint > backoff => hint.min(cap),
            _ => backoff,
        })
    }
}

#[async_trait]
impl<G: TextGenerator> TextGenerator for RetryingGenerator<G> {
    fn name(&self) -> &str {
        self.inner.name()
    }

    async fn generate(&self, prompt: &str) -> Result<String> {
        let mut attempt = 0;
        loop {
            debug!(generator = self.name(), attempt, "Generation attempt");
            let err = match self.attempt(prompt).await {
                Ok(text) => return Ok(text),
                Err(err) => err,
            };

            if !err.is_retryable() {
                return Err(err);
            }

            let Some(delay) = self.delay_for(attempt, &err) else {
                warn!(generator = self.name(), attempts = attempt + 1, error = %err, "Giving up");
                return Err(err);
            };

            warn!(
                generator = self.name(),
                attempt,
                delay_ms = delay.as_millis() as u64,
                error = %err,
                "Retrying text generation"
            );
            tokio::time::sleep(delay).await;
            attempt += 1;
        }
    }
}
