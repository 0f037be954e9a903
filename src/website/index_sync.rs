use super::files::validate_page_component;
use super::splicer::{splice_entry, SpliceError};
use crate::errors::{AppError, AppResult};
use crate::models::IndexSyncOutcome;
use std::fs;
use std::path::{Path, PathBuf};

pub fn backup_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_default();
    path.with_file_name(format!("{name}.backup"))
}

/// Scoped copy of the index file taken before a rewrite. The backup file is
/// removed when the guard drops, on every exit path; `restore` puts the
/// original bytes back first. A backup whose restore failed is left on disk
/// for manual recovery instead of being deleted.
struct IndexBackup {
    original: PathBuf,
    backup: PathBuf,
    keep: bool,
}

impl IndexBackup {
    fn acquire(path: &Path) -> AppResult<Self> {
        let backup = backup_path(path);
        fs::copy(path, &backup)
            .map_err(|error| AppError::Io(format!("backup {}: {}", path.display(), error)))?;
        tracing::debug!(backup = %backup.display(), "created index backup");
        Ok(Self {
            original: path.to_path_buf(),
            backup,
            keep: false,
        })
    }

    fn restore(&mut self) -> AppResult<()> {
        match fs::copy(&self.backup, &self.original) {
            Ok(_) => {
                tracing::info!(path = %self.original.display(), "restored index from backup");
                Ok(())
            }
            Err(error) => {
                self.keep = true;
                Err(AppError::Io(format!(
                    "restore {} from {}: {}",
                    self.original.display(),
                    self.backup.display(),
                    error
                )))
            }
        }
    }
}

impl Drop for IndexBackup {
    fn drop(&mut self) {
        if self.keep {
            tracing::warn!(backup = %self.backup.display(), "leaving index backup in place");
            return;
        }
        if let Err(error) = fs::remove_file(&self.backup) {
            tracing::warn!(backup = %self.backup.display(), error = %error, "failed to remove index backup");
        }
    }
}

/// Owns the write transaction around the index rewrite: backup before the
/// write, structural validation after it, restore on validation failure. The
/// only component here with side effects on the site checkout.
pub struct IndexSync {
    index_path: PathBuf,
}

impl IndexSync {
    pub fn new(index_path: impl Into<PathBuf>) -> Self {
        Self {
            index_path: index_path.into(),
        }
    }

    pub fn index_path(&self) -> &Path {
        &self.index_path
    }

    /// Runs one update transaction. A missing index file is the only error;
    /// every other failure mode comes back as a non-`Updated` outcome with the
    /// document's observable bytes unchanged.
    pub fn update(&self, rendered_entry: &str, date_iso: &str) -> AppResult<IndexSyncOutcome> {
        if !self.index_path.exists() {
            return Err(AppError::NotFound(format!(
                "index file not found: {}",
                self.index_path.display()
            )));
        }

        let mut backup = IndexBackup::acquire(&self.index_path)?;
        let document = fs::read_to_string(&self.index_path)
            .map_err(|error| AppError::Io(format!("{}: {}", self.index_path.display(), error)))?;

        let updated = match splice_entry(&document, rendered_entry, date_iso) {
            Ok(updated) => updated,
            Err(SpliceError::RegionNotFound) => {
                // Nothing was written; the backup guard discards its copy.
                tracing::error!(
                    path = %self.index_path.display(),
                    "entry region not found; index requires a manual edit"
                );
                return Ok(IndexSyncOutcome::region_not_found(format!(
                    "entry region not found in {}",
                    self.index_path.display()
                )));
            }
        };

        if let Err(error) = fs::write(&self.index_path, &updated) {
            backup.restore()?;
            return Err(AppError::Io(format!(
                "write {}: {}",
                self.index_path.display(),
                error
            )));
        }

        if validate_page_component(&self.index_path) {
            tracing::info!(path = %self.index_path.display(), "added index entry");
            Ok(IndexSyncOutcome::updated())
        } else {
            backup.restore()?;
            tracing::error!(
                path = %self.index_path.display(),
                "rewritten index failed validation; backup restored"
            );
            Ok(IndexSyncOutcome::validation_failed(format!(
                "rewritten index failed structural validation: {}",
                self.index_path.display()
            )))
        }
    }
}
