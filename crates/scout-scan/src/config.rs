//! Configuration for the scout-scan beacon scanner.

use std::time::Duration;

use serde::Deserialize;

use crate::error::{Result, ScanError};

/// Top-level scan configuration.
///
/// Loaded from the `[scan]` section of `scout.toml` or from
/// `SCOUT__SCAN__` environment variables, falling back to defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct ScanConfig {
    /// Path to the iwlist binary (default: "iwlist").
    #[serde(default = "default_iwlist_path")]
    pub iwlist_path: String,

    /// Observation journal file.
    #[serde(default = "default_log_path")]
    pub log_path: String,

    /// Size cap of the current journal file before it rotates.
    #[serde(default = "default_log_max_bytes")]
    pub log_max_bytes: u64,

    /// Rotated journal files kept (`.1` .. `.n`).
    #[serde(default = "default_log_backup_count")]
    pub log_backup_count: usize,

    /// Wait before re-polling a busy interface, in seconds.
    #[serde(default = "default_retry_backoff_secs")]
    pub retry_backoff_secs: u64,

    /// Wait between successful polls, in seconds.
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,

    /// Wait between table redraws, in seconds.
    #[serde(default = "default_render_interval_secs")]
    pub render_interval_secs: u64,

    /// Directory whose entries name the network interfaces.
    #[serde(default = "default_sysfs_net_dir")]
    pub sysfs_net_dir: String,
}

impl ScanConfig {
    pub fn retry_backoff(&self) -> Duration {
        Duration::from_secs(self.retry_backoff_secs)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    pub fn render_interval(&self) -> Duration {
        Duration::from_secs(self.render_interval_secs)
    }

    /// Load from `<file_prefix>.{toml,json,...}` (optional) and the
    /// `SCOUT__` environment. A missing `[scan]` section yields the defaults.
    pub fn load(file_prefix: &str) -> Result<Self> {
        let cfg = config::Config::builder()
            .add_source(config::File::with_name(file_prefix).required(false))
            .add_source(
                config::Environment::with_prefix("SCOUT")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| ScanError::Config(e.to_string()))?;

        match cfg.get::<ScanConfig>("scan") {
            Ok(c) => Ok(c),
            Err(config::ConfigError::NotFound(_)) => Ok(ScanConfig::default()),
            Err(e) => Err(ScanError::Config(e.to_string())),
        }
    }
}

fn default_iwlist_path() -> String {
    "iwlist".to_string()
}

fn default_log_path() -> String {
    "network_scanner.log".to_string()
}

fn default_log_max_bytes() -> u64 {
    scout_journal::rotating::DEFAULT_MAX_BYTES
}

fn default_log_backup_count() -> usize {
    scout_journal::rotating::DEFAULT_BACKUP_COUNT
}

fn default_retry_backoff_secs() -> u64 {
    1
}

fn default_poll_interval_secs() -> u64 {
    5
}

fn default_render_interval_secs() -> u64 {
    10
}

fn default_sysfs_net_dir() -> String {
    "/sys/class/net".to_string()
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            iwlist_path: default_iwlist_path(),
            log_path: default_log_path(),
            log_max_bytes: default_log_max_bytes(),
            log_backup_count: default_log_backup_count(),
            retry_backoff_secs: default_retry_backoff_secs(),
            poll_interval_secs: default_poll_interval_secs(),
            render_interval_secs: default_render_interval_secs(),
            sysfs_net_dir: default_sysfs_net_dir(),
        }
    }
}
