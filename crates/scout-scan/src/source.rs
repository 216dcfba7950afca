//! Beacon sources.
//!
//! `IwlistSource` executes `iwlist <iface> scan` as a child process via
//! `tokio::process::Command` and parses the text report into beacons.

use std::future::Future;

use scout_core::types::Beacon;
use tokio::process::Command;

use crate::error::{Result, ScanError};
use crate::iwlist;

/// Anything that can report the beacons currently visible on an interface.
///
/// Implementations signal a temporarily unavailable interface with
/// [`ScanError::InterfaceBusy`]; every other error is treated as fatal.
pub trait BeaconSource {
    fn scan(&self, interface: &str) -> impl Future<Output = Result<Vec<Beacon>>> + Send;
}

/// Wrapper around the wireless-tools `iwlist` binary.
pub struct IwlistSource {
    iwlist_path: String,
}

impl IwlistSource {
    pub fn new(iwlist_path: &str) -> Self {
        Self {
            iwlist_path: iwlist_path.to_string(),
        }
    }

    /// Verify iwlist is installed and runnable.
    pub async fn verify_installation(&self) -> Result<String> {
        let output = Command::new(&self.iwlist_path)
            .arg("--version")
            .output()
            .await
            .map_err(|e| ScanError::ToolUnavailable {
                path: self.iwlist_path.clone(),
                reason: e.to_string(),
            })?;

        // Older wireless-tools print the banner on stderr.
        let banner = if output.stdout.is_empty() {
            output.stderr
        } else {
            output.stdout
        };
        Ok(String::from_utf8_lossy(&banner).trim().to_string())
    }
}

impl BeaconSource for IwlistSource {
    async fn scan(&self, interface: &str) -> Result<Vec<Beacon>> {
        tracing::debug!(interface = %interface, "Starting iwlist scan");

        let output = Command::new(&self.iwlist_path)
            .arg(interface)
            .arg("scan")
            .output()
            .await
            .map_err(|e| ScanError::ToolUnavailable {
                path: self.iwlist_path.clone(),
                reason: e.to_string(),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(ScanError::InterfaceBusy {
                interface: interface.to_string(),
                detail: if stderr.is_empty() {
                    format!("iwlist exited with {}", output.status)
                } else {
                    stderr
                },
            });
        }

        let report = String::from_utf8(output.stdout)
            .map_err(|e| ScanError::Parse(format!("iwlist output is not UTF-8: {e}")))?;
        let beacons = iwlist::parse_scan_output(&report);

        tracing::debug!(interface = %interface, beacons = beacons.len(), "iwlist scan complete");

        Ok(beacons)
    }
}
