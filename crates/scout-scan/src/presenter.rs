//! Consumer loop: redraw the registry as a table on a fixed cadence.

use std::sync::Arc;
use std::time::Duration;

use scout_core::types::{NetworkKey, NetworkRecord};
use scout_core::NetworkRegistry;
use tabled::settings::style::HorizontalLine;
use tabled::settings::{Alignment, Style};
use tabled::{Table, Tabled};
use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::config::ScanConfig;
use crate::error::Result;

/// ANSI: erase the screen and home the cursor.
pub const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// Periodically snapshots the registry and writes it out as a table.
pub struct Presenter {
    registry: Arc<NetworkRegistry>,
    render_interval: Duration,
}

impl Presenter {
    pub fn new(registry: Arc<NetworkRegistry>, config: &ScanConfig) -> Self {
        Self {
            registry,
            render_interval: config.render_interval(),
        }
    }

    /// Render the current registry contents.
    pub fn render(&self) -> String {
        render_table(&self.registry.snapshot())
    }

    /// Clear, draw, sleep; forever. Returns only if writing to `out` fails.
    pub async fn run<W: AsyncWrite + Unpin>(&self, mut out: W) -> Result<()> {
        loop {
            let frame = format!("{CLEAR_SCREEN}{}", self.render());
            out.write_all(frame.as_bytes()).await?;
            out.flush().await?;

            tokio::time::sleep(self.render_interval).await;
        }
    }
}

/// One table line; the renames are the column headers.
#[derive(Tabled)]
struct Row {
    #[tabled(rename = "SSID")]
    ssid: String,
    #[tabled(rename = "Address")]
    address: String,
    #[tabled(rename = "Chnl")]
    channel: String,
    #[tabled(rename = "Sig")]
    signal: i32,
    #[tabled(rename = "Last seen")]
    last_seen: String,
}

impl Row {
    fn new((key, record): &(NetworkKey, NetworkRecord)) -> Self {
        Self {
            ssid: key.to_string(),
            address: record.address.clone(),
            channel: record.channel.to_string(),
            signal: record.signal,
            last_seen: record.last_seen.clone(),
        }
    }
}

/// Draw registry rows as a boxed table with centered cells:
///
/// ```text
/// +------------+-------------------+------+-----+----------------+
/// |    SSID    |      Address      | Chnl | Sig |   Last seen    |
/// +------------+-------------------+------+-----+----------------+
/// | Cafe (2.4) | AA:BB:CC:DD:EE:FF |  6   | -50 | 01/05 12:00:30 |
/// +------------+-------------------+------+-----+----------------+
/// ```
pub fn render_table(rows: &[(NetworkKey, NetworkRecord)]) -> String {
    // Rules above and below the header and at the bottom, none between rows.
    let style = Style::ascii()
        .remove_horizontal()
        .horizontals([(1, HorizontalLine::full('-', '+', '+', '+'))]);

    let mut table = Table::new(rows.iter().map(Row::new));
    table.with(style).with(Alignment::center());

    let mut rendered = table.to_string();
    rendered.push('\n');
    rendered
}

#[cfg(test)]
mod tests {
    use super::*;
    use scout_core::types::Channel;

    fn row(ssid: &str, address: &str, channel: Channel, signal: i32) -> (NetworkKey, NetworkRecord) {
        (
            NetworkKey::compose(ssid, "2.4"),
            NetworkRecord {
                address: address.to_string(),
                channel,
                signal,
                last_seen: "01/05 12:00:30".to_string(),
            },
        )
    }

    #[test]
    fn renders_headers_and_rows() {
        let table = render_table(&[row("Cafe", "AA:BB:CC:DD:EE:FF", Channel::Number(6), -50)]);
        let expected = "\
+------------+-------------------+------+-----+----------------+
|    SSID    |      Address      | Chnl | Sig |   Last seen    |
+------------+-------------------+------+-----+----------------+
| Cafe (2.4) | AA:BB:CC:DD:EE:FF |  6   | -50 | 01/05 12:00:30 |
+------------+-------------------+------+-----+----------------+
";
        assert_eq!(table, expected);
    }

    #[test]
    fn empty_registry_renders_headers_only() {
        let table = render_table(&[]);
        let expected = "\
+------+---------+------+-----+-----------+
| SSID | Address | Chnl | Sig | Last seen |
+------+---------+------+-----+-----------+
";
        assert_eq!(table, expected);
    }

    #[test]
    fn rows_follow_snapshot_order() {
        let table = render_table(&[
            row("Alpha", "01", Channel::Number(1), -30),
            row("Bravo", "02", Channel::Token("?".to_string()), -90),
        ]);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 6);
        assert!(lines[3].contains("Alpha (2.4)"));
        assert!(lines[4].contains("Bravo (2.4)"));
        assert!(lines[4].contains(" ? "));
    }

    #[test]
    fn no_rules_between_data_rows() {
        let table = render_table(&[
            row("Alpha", "01", Channel::Number(1), -30),
            row("Bravo", "02", Channel::Number(11), -60),
            row("Charlie", "03", Channel::Number(6), -45),
        ]);
        let rules: Vec<usize> = table
            .lines()
            .enumerate()
            .filter(|(_, l)| l.starts_with('+'))
            .map(|(i, _)| i)
            .collect();
        assert_eq!(rules, vec![0, 2, 6]);
    }

    #[test]
    fn widths_count_characters() {
        let table = render_table(&[row("Čajovna", "01", Channel::Number(1), -30)]);
        let widths: Vec<usize> = table.lines().map(|l| l.chars().count()).collect();
        assert!(widths.windows(2).all(|w| w[0] == w[1]));
    }

    #[tokio::test(start_paused = true)]
    async fn run_redraws_each_interval() {
        let registry = Arc::new(NetworkRegistry::new());
        let presenter = Presenter::new(Arc::clone(&registry), &ScanConfig::default());
        let mut screen: Vec<u8> = Vec::new();

        // Frames at t=0, 10 and 20.
        let _ = tokio::time::timeout(Duration::from_secs(25), presenter.run(&mut screen)).await;

        let screen = String::from_utf8(screen).unwrap();
        assert_eq!(screen.matches(CLEAR_SCREEN).count(), 3);
        assert!(screen.starts_with(CLEAR_SCREEN));
    }
}
