//! Working copy of the source database.
//!
//! The source file is copied once and never opened by the engine. The copy
//! belongs to a [`WorkingCopy`] guard:
//! - `finish()` удаляет файл и возвращает ошибку удаления;
//! - Drop без finish() удаляет файл best-effort (в том числе при ошибке экспорта);
//! - `keep()` оставляет файл на диске.

use anyhow::{anyhow, Context, Result};
use log::{debug, info, warn};
use std::path::{Path, PathBuf};

use crate::util::remove_file_if_exists;

#[derive(Debug)]
pub struct WorkingCopy {
    path: PathBuf,
    bytes: u64,
    remove_on_drop: bool,
}

impl WorkingCopy {
    /// Copy `source` to `working` and resolve the copy to an absolute path.
    pub fn prepare(source: &Path, working: &Path) -> Result<Self> {
        if !source.is_file() {
            return Err(anyhow!("source database {} not found", source.display()));
        }
        // Копия поверх самого источника уничтожила бы оригинал.
        if let (Ok(a), Ok(b)) = (source.canonicalize(), working.canonicalize()) {
            if a == b {
                return Err(anyhow!(
                    "working path {} is the source file itself",
                    working.display()
                ));
            }
        }

        let bytes = std::fs::copy(source, working).with_context(|| {
            format!("copy {} -> {}", source.display(), working.display())
        })?;
        let path = working
            .canonicalize()
            .with_context(|| format!("resolve {}", working.display()))?;
        info!(
            "snapshot: {} -> {} ({} B)",
            source.display(),
            path.display(),
            bytes
        );

        Ok(Self {
            path,
            bytes,
            remove_on_drop: true,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn bytes(&self) -> u64 {
        self.bytes
    }

    /// Leave the working copy on disk.
    pub fn keep(mut self) -> PathBuf {
        self.remove_on_drop = false;
        info!("snapshot: keeping {}", self.path.display());
        self.path.clone()
    }

    /// Delete the working copy, reporting failures.
    pub fn finish(mut self) -> Result<()> {
        self.remove_on_drop = false;
        remove_file_if_exists(&self.path)?;
        debug!("snapshot: removed {}", self.path.display());
        Ok(())
    }
}

impl Drop for WorkingCopy {
    fn drop(&mut self) {
        if self.remove_on_drop {
            if let Err(e) = remove_file_if_exists(&self.path) {
                warn!("snapshot: cleanup of {} failed: {:#}", self.path.display(), e);
            }
        }
    }
}
