//! `iwlist <iface> scan` output parsing.
//!
//! The wireless-tools scan report is a block of indented `key:value` lines per
//! cell:
//!
//! ```text
//! wlan0     Scan completed :
//!           Cell 01 - Address: 00:11:22:33:44:55
//!                     Channel:6
//!                     Frequency:2.437 GHz (Channel 6)
//!                     Quality=70/70  Signal level=-40 dBm
//!                     ESSID:"HomeNet"
//! ```
//!
//! Only the fields a `Beacon` carries are extracted; everything else is
//! ignored.

use scout_core::types::{Beacon, Channel};

/// Channel token used when a cell reports neither a channel nor a
/// frequency with a channel annotation.
pub const UNKNOWN_CHANNEL: &str = "?";

#[derive(Default)]
struct PartialCell {
    address: String,
    ssid: Option<String>,
    frequency: Option<String>,
    channel: Option<Channel>,
    signal: Option<i32>,
}

impl PartialCell {
    fn finish(self) -> Option<Beacon> {
        let Some(signal) = self.signal else {
            tracing::debug!(address = %self.address, "Skipping cell without signal level");
            return None;
        };

        Some(Beacon {
            ssid: self.ssid.unwrap_or_default(),
            frequency: self.frequency.unwrap_or_default(),
            address: self.address,
            channel: self
                .channel
                .unwrap_or_else(|| Channel::Token(UNKNOWN_CHANNEL.to_string())),
            signal,
        })
    }

    fn apply(&mut self, line: &str) {
        if let Some(value) = line.strip_prefix("ESSID:") {
            self.ssid = Some(unquote(value).to_string());
        } else if let Some(value) = line.strip_prefix("Channel:") {
            self.channel = Some(Channel::parse(value));
        } else if let Some(value) = line.strip_prefix("Frequency:") {
            let (frequency, channel) = parse_frequency(value);
            self.frequency = Some(frequency);
            if self.channel.is_none() {
                self.channel = channel;
            }
        } else if let Some(signal) = parse_signal_level(line) {
            self.signal = Some(signal);
        }
    }
}

/// Parse a full scan report into beacons, in report order.
///
/// Cells without a signal level are skipped.
pub fn parse_scan_output(output: &str) -> Vec<Beacon> {
    let mut beacons = Vec::new();
    let mut current: Option<PartialCell> = None;

    for line in output.lines().map(str::trim) {
        if let Some(address) = cell_address(line) {
            if let Some(cell) = current.take().and_then(PartialCell::finish) {
                beacons.push(cell);
            }
            current = Some(PartialCell {
                address: address.to_string(),
                ..Default::default()
            });
        } else if let Some(cell) = current.as_mut() {
            cell.apply(line);
        }
    }

    if let Some(cell) = current.and_then(PartialCell::finish) {
        beacons.push(cell);
    }

    beacons
}

/// `Cell 01 - Address: 00:11:22:33:44:55` -> `00:11:22:33:44:55`.
fn cell_address(line: &str) -> Option<&str> {
    if !line.starts_with("Cell ") {
        return None;
    }
    let (_, address) = line.split_once("Address:")?;
    let address = address.trim();
    (!address.is_empty()).then_some(address)
}

fn unquote(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value)
}

/// `2.437 GHz (Channel 6)` -> (`"2.437 GHz"`, `Some(6)`).
fn parse_frequency(value: &str) -> (String, Option<Channel>) {
    match value.split_once('(') {
        Some((frequency, annotation)) => {
            let channel = annotation
                .trim_end_matches(')')
                .trim()
                .strip_prefix("Channel")
                .map(Channel::parse);
            (frequency.trim().to_string(), channel)
        }
        None => (value.trim().to_string(), None),
    }
}

/// `Quality=70/70  Signal level=-40 dBm` -> `-40`; `Signal level=60/100` -> `60`.
///
/// Stale (cached) readings use `:` instead of `=`.
fn parse_signal_level(line: &str) -> Option<i32> {
    let (_, rest) = line.split_once("Signal level")?;
    let rest = rest.strip_prefix(['=', ':'])?;
    let token = rest.split_whitespace().next()?;
    let value = token.split('/').next()?;
    value.parse().ok()
}
