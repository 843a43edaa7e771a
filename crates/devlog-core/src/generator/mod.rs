//! Text-generation collaborator.

pub mod retry;

pub use retry::{ErrorClass, RetryPolicy};

use crate::error::Result;
use async_trait::async_trait;

/// A request/response text-completion service.
///
/// The journal treats it as an opaque `prompt -> text` function. Failures are
/// reported as `Collaborator` or `Timeout` errors; whether they are worth
/// retrying is carried on the error itself.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Short label for logs, e.g. the model name.
    fn name(&self) -> &str;

    async fn generate(&self, prompt: &str) -> Result<String>;
}
