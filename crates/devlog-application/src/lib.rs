//! Application layer for devlog.
//!
//! Use cases coordinating the session ledger, the report records and the
//! text generator.

pub mod diff_digest_usecase;
pub mod journal_reader;
pub mod journal_usecase;
pub mod prompts;

#[cfg(test)]
pub(crate) mod test_support;

pub use diff_digest_usecase::{DiffDigestUseCase, DigestOutcome};
pub use journal_reader::{JournalReader, JournalStatus};
pub use journal_usecase::{EndedSession, JournalUseCase, StartedSession};
pub use prompts::PromptRenderer;
