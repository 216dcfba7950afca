//! Error types for the scout-scan crate.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Interface {interface} was busy (or some other scan error occurred): {detail}")]
    InterfaceBusy { interface: String, detail: String },

    #[error("Scan tool not runnable at {path}: {reason}")]
    ToolUnavailable { path: String, reason: String },

    #[error("Failed to parse scan output: {0}")]
    Parse(String),

    #[error("Failed to list interfaces under {path}: {source}")]
    InterfaceList {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Journal error: {0}")]
    Journal(#[from] scout_journal::JournalError),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ScanError {
    /// Whether the scanner should back off and poll again instead of failing.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::InterfaceBusy { .. })
    }
}

pub type Result<T> = std::result::Result<T, ScanError>;
