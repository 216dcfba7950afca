//! Core domain types for beacon observations.
//!
//! A `Beacon` is what a scan source reports for one access point. The scanner
//! folds it into a `NetworkKey` + `NetworkRecord` pair for the registry and an
//! `Observation` line for the journal.

use std::fmt;

use chrono::{DateTime, Utc};

/// Characters of the SSID kept in a `NetworkKey`.
pub const SSID_KEY_CHARS: usize = 15;

/// Characters of the frequency/band indicator kept in a `NetworkKey`.
pub const FREQUENCY_KEY_CHARS: usize = 3;

/// `strftime` layout of every last-seen and journal timestamp (always UTC).
pub const TIMESTAMP_FORMAT: &str = "%d/%m %H:%M:%S";

/// Render an instant as `DD/MM HH:MM:SS` in UTC.
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

// ── Beacon ────────────────────────────────────────────────────────

/// Channel reported by the source. Usually a number, but some drivers report
/// tokens that are passed through as-is.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Channel {
    Number(u32),
    Token(String),
}

impl Channel {
    /// Interpret a raw channel field, keeping anything non-numeric as a token.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        match raw.parse::<u32>() {
            Ok(n) => Self::Number(n),
            Err(_) => Self::Token(raw.to_string()),
        }
    }
}

impl From<u32> for Channel {
    fn from(n: u32) -> Self {
        Self::Number(n)
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Token(t) => f.write_str(t),
        }
    }
}

/// A single access-point advertisement seen during a scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Beacon {
    pub ssid: String,
    /// Frequency or band indicator, e.g. `"2.437 GHz"`.
    pub frequency: String,
    /// Hardware (BSSID) address.
    pub address: String,
    pub channel: Channel,
    /// Signal strength in whatever unit the source reports.
    pub signal: i32,
}

impl Beacon {
    /// The registry key this beacon is filed under.
    pub fn network_key(&self) -> NetworkKey {
        NetworkKey::compose(&self.ssid, &self.frequency)
    }
}

// ── Registry entries ──────────────────────────────────────────────

/// Derived identity of a network, doubling as its display label.
///
/// Built from the first 15 characters of the SSID and the first 3 characters
/// of the frequency: `"<ssid15> (<freq3>)"`. Distinct beacons that share those
/// prefixes collapse into one key.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NetworkKey(String);

impl NetworkKey {
    pub fn compose(ssid: &str, frequency: &str) -> Self {
        let ssid: String = ssid.chars().take(SSID_KEY_CHARS).collect();
        let freq: String = frequency.chars().take(FREQUENCY_KEY_CHARS).collect();
        Self(format!("{ssid} ({freq})"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NetworkKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Latest attributes observed for a network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkRecord {
    pub address: String,
    pub channel: Channel,
    pub signal: i32,
    /// `DD/MM HH:MM:SS`, UTC.
    pub last_seen: String,
}

impl NetworkRecord {
    /// Build the record for a beacon observed at `at`.
    pub fn observed(beacon: &Beacon, at: DateTime<Utc>) -> Self {
        Self {
            address: beacon.address.clone(),
            channel: beacon.channel.clone(),
            signal: beacon.signal,
            last_seen: format_timestamp(at),
        }
    }
}

/// One journal line: `<timestamp> | <address> | <channel> | <signal> | <key>`.
pub struct Observation<'a> {
    pub key: &'a NetworkKey,
    pub record: &'a NetworkRecord,
}

impl fmt::Display for Observation<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} | {} | {} | {} | {}",
            self.record.last_seen,
            self.record.address,
            self.record.channel,
            self.record.signal,
            self.key
        )
    }
}
