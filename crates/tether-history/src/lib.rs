//! # tether-history
//!
//! Locally persisted history of completed analyses.
//!
//! One JSONL file, loaded at start and appended to on completion. Appends go
//! through `serde_jsonlines::append_json_lines`, which opens the file in
//! append mode per call — concurrent completing sessions interleave whole
//! lines instead of clobbering each other, giving read-merge-write semantics
//! without a lock file. Nothing is ever deleted or rewritten.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde_jsonlines::{append_json_lines, json_lines};
use tether_core::HistoryEntry;
use thiserror::Error;

/// Errors from reading or writing the history file.
#[derive(Debug, Error)]
pub enum HistoryError {
    /// The file could not be read or written.
    #[error("history I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// The local completion log.
#[derive(Debug, Clone)]
pub struct History {
    path: PathBuf,
}

impl History {
    /// Point at a history file. The file (and its parent directory) are
    /// created lazily on first append.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The file this history reads and appends.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read all entries, oldest first. A missing file is an empty history.
    ///
    /// Unparseable lines are skipped with a warning rather than poisoning
    /// the whole log — the history is a display convenience, and dropping a
    /// corrupt line must not hide the valid entries around it.
    ///
    /// # Errors
    ///
    /// Returns [`HistoryError::Io`] if the file exists but cannot be opened.
    pub fn load(&self) -> Result<Vec<HistoryEntry>, HistoryError> {
        let lines = match json_lines::<HistoryEntry, _>(&self.path) {
            Ok(lines) => lines,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(err.into()),
        };

        let mut entries = Vec::new();
        for line in lines {
            match line {
                Ok(entry) => entries.push(entry),
                Err(err) => {
                    tracing::warn!(%err, path = %self.path.display(), "skipping corrupt history line");
                }
            }
        }
        Ok(entries)
    }

    /// Append one completed analysis.
    ///
    /// # Errors
    ///
    /// Returns [`HistoryError::Io`] if the directory cannot be created or the
    /// write fails.
    pub fn append(&self, entry: &HistoryEntry) -> Result<(), HistoryError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        append_json_lines(&self.path, [entry])?;
        Ok(())
    }
}
