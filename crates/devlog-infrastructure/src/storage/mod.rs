//! File storage primitives shared by the repositories and services.

pub mod atomic_toml;
pub mod file_lock;
pub mod secret_storage;

pub use atomic_toml::AtomicTomlFile;
pub use file_lock::FileLock;
pub use secret_storage::{SecretStorage, SecretStorageError};
