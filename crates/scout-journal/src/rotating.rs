//! File-backed journal with size-based rotation.
//!
//! Layout for `network_scanner.log` with two backups:
//! ```text
//! network_scanner.log     <- current, appended to
//! network_scanner.log.1   <- previous
//! network_scanner.log.2   <- oldest kept
//! ```
//!
//! Before a line is written, the journal rotates when the current file is
//! non-empty and the line would bring it to `max_bytes` or beyond. Rotation
//! is disabled when either `max_bytes` or `backup_count` is zero.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use crate::{JournalError, ObservationSink, Result};

/// Default size cap of the current journal file.
pub const DEFAULT_MAX_BYTES: u64 = 1_000_000;

/// Default number of rotated files kept next to the current one.
pub const DEFAULT_BACKUP_COUNT: usize = 2;

struct ActiveFile {
    file: File,
    len: u64,
}

/// Append-only journal file rotated through numbered backups.
pub struct RotatingJournal {
    path: PathBuf,
    max_bytes: u64,
    backup_count: usize,
    active: Mutex<ActiveFile>,
}

impl RotatingJournal {
    /// Open (or create) the journal at `path`, creating parent directories.
    pub fn open(path: impl Into<PathBuf>, max_bytes: u64, backup_count: usize) -> Result<Self> {
        let path = path.into();
        if path.file_name().is_none() {
            return Err(JournalError::InvalidPath(path.display().to_string()));
        }
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let active = open_append(&path)?;

        tracing::debug!(
            path = %path.display(),
            len = active.len,
            max_bytes,
            backup_count,
            "Journal opened"
        );

        Ok(Self {
            path,
            max_bytes,
            backup_count,
            active: Mutex::new(active),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path of the `index`-th backup (`1` is the most recent).
    pub fn backup_path(&self, index: usize) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(format!(".{index}"));
        PathBuf::from(name)
    }

    fn should_rotate(&self, current_len: u64, incoming: u64) -> bool {
        self.max_bytes > 0
            && self.backup_count > 0
            && current_len > 0
            && current_len + incoming >= self.max_bytes
    }

    /// Shift `log.(n-1)` -> `log.n` down to `log` -> `log.1`, dropping the oldest.
    fn rotate(&self) -> Result<()> {
        for index in (1..self.backup_count).rev() {
            let src = self.backup_path(index);
            if src.exists() {
                let dst = self.backup_path(index + 1);
                if dst.exists() {
                    fs::remove_file(&dst)?;
                }
                fs::rename(&src, &dst)?;
            }
        }

        let first = self.backup_path(1);
        if first.exists() {
            fs::remove_file(&first)?;
        }
        fs::rename(&self.path, &first)?;

        tracing::debug!(path = %self.path.display(), "Journal rotated");
        Ok(())
    }
}

impl ObservationSink for RotatingJournal {
    fn append(&self, line: &str) -> Result<()> {
        let mut active = self.active.lock().unwrap_or_else(PoisonError::into_inner);
        let incoming = line.len() as u64 + 1;

        if self.should_rotate(active.len, incoming) {
            active.file.flush()?;
            self.rotate()?;
            *active = open_append(&self.path)?;
        }

        writeln!(active.file, "{line}")?;
        active.file.flush()?;
        active.len += incoming;

        Ok(())
    }
}

fn open_append(path: &Path) -> Result<ActiveFile> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let len = file.metadata()?.len();
    Ok(ActiveFile { file, len })
}
