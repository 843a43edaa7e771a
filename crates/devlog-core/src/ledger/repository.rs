//! Ledger repository trait.
//!
//! Defines the interface for persisting the session ledger.

use super::model::{LedgerState, Transition};
use crate::error::Result;
use async_trait::async_trait;

/// An abstract store for the session ledger.
///
/// Decouples the start/end guard from the storage format (a text file in
/// production, memory in tests).
///
/// # Implementation Notes
///
/// `apply` must load the current state, validate the transition through
/// [`LedgerState::apply`], and persist the result as one unit, so that a
/// rejected transition leaves the store untouched.
#[async_trait]
pub trait LedgerRepository: Send + Sync {
    /// Loads the current ledger state.
    ///
    /// # Returns
    ///
    /// - `Ok(LedgerState)`: Current state (`LedgerState::initial()` when empty)
    /// - `Err(CorruptLedger)`: The last entry could not be parsed
    async fn load(&self) -> Result<LedgerState>;

    /// Applies a transition and records it.
    ///
    /// # Returns
    ///
    /// - `Ok(LedgerState)`: The state after the transition
    /// - `Err(Protocol)`: The transition is not allowed in the current phase
    async fn apply(&self, transition: Transition) -> Result<LedgerState>;
}
