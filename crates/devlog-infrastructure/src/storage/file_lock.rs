//! Advisory exclusive file locks.

use devlog_core::error::{DevlogError, Result};
use fs2::FileExt;
use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};

/// An exclusive lock guard, released when dropped.
///
/// The lock file itself is left in place; removing it while another process
/// waits on it would let two holders in at once.
#[derive(Debug)]
pub struct FileLock {
    file: File,
    lock_path: PathBuf,
}

impl FileLock {
    /// Blocks until an exclusive lock on `lock_path` is held.
    pub fn acquire(lock_path: &Path) -> Result<Self> {
        if let Some(parent) = lock_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(lock_path)?;

        file.lock_exclusive().map_err(|e| {
            DevlogError::io(format!(
                "Failed to acquire lock {}: {}",
                lock_path.display(),
                e
            ))
        })?;

        Ok(Self {
            file,
            lock_path: lock_path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.lock_path
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        let _ = FileExt::unlock(&self.file);
    }
}
