pub mod config_service;
pub mod file_report_repository;
pub mod paths;
pub mod secret_service;
pub mod storage;
pub mod text_ledger_repository;

pub use crate::config_service::ConfigService;
pub use crate::file_report_repository::FileReportRepository;
pub use crate::paths::DevlogPaths;
pub use crate::secret_service::SecretServiceImpl;
pub use crate::text_ledger_repository::TextLedgerRepository;
