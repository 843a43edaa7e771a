//! Session ledger: the start/end guard and its storage seam.

pub mod model;
pub mod repository;
pub mod service;


pub use model::{END_MARKER, LedgerEntry, LedgerState, Phase, Transition};
pub use repository::LedgerRepository;
pub use service::SessionLedger;
