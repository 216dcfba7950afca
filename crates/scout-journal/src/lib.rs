//! scout-journal: Append-only observation journal.
//!
//! Every beacon the scanner sees becomes one human-readable line. The journal
//! is the only durable output of beacon-scout; files are capped in size and
//! rotated through a bounded set of numbered backups.

pub mod rotating;

pub use rotating::RotatingJournal;

/// Errors that can occur while appending to a journal.
#[derive(Debug, thiserror::Error)]
pub enum JournalError {
    #[error("Journal path has no file name: {0}")]
    InvalidPath(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, JournalError>;

/// Sink for observation lines.
///
/// `append` is synchronous and is expected to be durable once it returns.
pub trait ObservationSink {
    /// Append a single line. The sink adds the line terminator.
    fn append(&self, line: &str) -> Result<()>;
}

impl<T: ObservationSink + ?Sized> ObservationSink for &T {
    fn append(&self, line: &str) -> Result<()> {
        (**self).append(line)
    }
}

impl<T: ObservationSink + ?Sized> ObservationSink for std::sync::Arc<T> {
    fn append(&self, line: &str) -> Result<()> {
        (**self).append(line)
    }
}
