//! File-based locking for the working copy.
//!
//! Cross-platform (fs2) advisory lock on `<working>.lock`, held for the whole
//! run: two invocations pointed at the same working path must not copy over
//! each other's database. Lock is released on Drop; the lock file stays on disk
//! (удаление открывает гонку: второй запуск мог уже открыть старый inode).

use anyhow::{Context, Result};
use fs2::FileExt;
use log::debug;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

use crate::consts::LOCK_SUFFIX;
use crate::util::sidecar_path;

pub struct LockGuard {
    file: std::fs::File,
    path: PathBuf,
}

impl LockGuard {
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for LockGuard {
    fn drop(&mut self) {
        // fs2 unlock errors on drop are ignored deliberately.
        let _ = self.file.unlock();
    }
}

pub fn lock_file_path(working: &Path) -> PathBuf {
    sidecar_path(working, LOCK_SUFFIX)
}

fn open_lock_file(working: &Path) -> Result<std::fs::File> {
    let path = lock_file_path(working);
    let f = OpenOptions::new()
        .create(true)
        .read(true)
        .write(true)
        .truncate(false)
        .open(&path)
        .with_context(|| format!("open lock file {}", path.display()))?;
    Ok(f)
}

/// Try to take the exclusive lock. Returns Err if another run holds it.
pub fn try_lock_working(working: &Path) -> Result<LockGuard> {
    let file = open_lock_file(working)?;
    let path = lock_file_path(working);
    file.try_lock_exclusive().with_context(|| {
        format!(
            "working copy {} is in use by another export (lock {})",
            working.display(),
            path.display()
        )
    })?;
    debug!("lock: acquired {}", path.display());
    Ok(LockGuard { file, path })
}
