//! Producer loop: poll the beacon source, fold observations into the
//! registry, journal every observation.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use scout_core::types::{Beacon, NetworkRecord, Observation};
use scout_core::NetworkRegistry;
use scout_journal::ObservationSink;
use uuid::Uuid;

use crate::config::ScanConfig;
use crate::error::Result;
use crate::source::BeaconSource;

/// Polls one interface forever, feeding the shared registry and the journal.
pub struct Scanner<S, J> {
    source: S,
    journal: J,
    registry: Arc<NetworkRegistry>,
    interface: String,
    retry_backoff: Duration,
    poll_interval: Duration,
}

impl<S: BeaconSource, J: ObservationSink> Scanner<S, J> {
    pub fn new(
        source: S,
        journal: J,
        registry: Arc<NetworkRegistry>,
        interface: &str,
        config: &ScanConfig,
    ) -> Self {
        Self {
            source,
            journal,
            registry,
            interface: interface.to_string(),
            retry_backoff: config.retry_backoff(),
            poll_interval: config.poll_interval(),
        }
    }

    /// Run poll cycles until a fatal error occurs.
    ///
    /// Busy-interface failures are retried after the backoff and never end the
    /// loop; any other source or journal error is returned.
    pub async fn run(&self) -> Result<()> {
        tracing::info!(interface = %self.interface, "Scanner started");

        loop {
            let scan_id = Uuid::new_v4();
            let beacons = self.poll().await?;
            let recorded = self.record(&beacons, Utc::now())?;

            tracing::info!(
                scan_id = %scan_id,
                interface = %self.interface,
                beacons = recorded,
                networks = self.registry.len(),
                "Poll complete"
            );

            tokio::time::sleep(self.poll_interval).await;
        }
    }

    /// Fetch one beacon set, retrying while the interface is busy.
    pub async fn poll(&self) -> Result<Vec<Beacon>> {
        loop {
            match self.source.scan(&self.interface).await {
                Ok(beacons) => return Ok(beacons),
                Err(e) if e.is_transient() => {
                    // Printed directly so a quiet RUST_LOG cannot hide it.
                    eprintln!("{}", retry_notice(&self.interface));
                    tracing::debug!(interface = %self.interface, error = %e, "Retrying scan");
                    tokio::time::sleep(self.retry_backoff).await;
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Upsert and journal every beacon as seen at `at`. Returns how many were
    /// recorded.
    pub fn record(&self, beacons: &[Beacon], at: DateTime<Utc>) -> Result<usize> {
        for beacon in beacons {
            let key = beacon.network_key();
            let record = NetworkRecord::observed(beacon, at);
            let line = Observation {
                key: &key,
                record: &record,
            }
            .to_string();

            self.registry.upsert(key, record);
            self.journal.append(&line)?;
        }

        Ok(beacons.len())
    }
}

/// Console line shown before each retry of a busy interface.
pub fn retry_notice(interface: &str) -> String {
    format!("Interface {interface} was busy (or some other error occurred). Trying again...")
}
