//! Domain layer for devlog: the session ledger, report records, and the
//! seams to storage and the text-generation service.

pub mod config;
pub mod error;
pub mod generator;
pub mod ledger;
pub mod report;
pub mod secret;

// Re-export common error type
pub use error::{DevlogError, Result};
