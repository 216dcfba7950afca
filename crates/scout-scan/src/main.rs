//! CLI entry point for the scout-scan beacon scanner.

use clap::{ArgGroup, Parser};
use tracing_subscriber::{fmt, EnvFilter};

use scout_scan::config::ScanConfig;
use scout_scan::driver::{self, Mode};

#[derive(Parser)]
#[command(name = "scout-scan")]
#[command(about = "Scans a network interface for beacon packets (SSID)")]
#[command(group(ArgGroup::new("mode").required(true).args(["interface", "list"])))]
struct Cli {
    /// Network interface to sniff packets from.
    #[arg(short, long)]
    interface: Option<String>,

    /// List the available interfaces.
    #[arg(short, long)]
    list: bool,

    /// Config file prefix (default: scout).
    #[arg(short, long, default_value = "scout")]
    config: String,
}

impl Cli {
    fn mode(&self) -> Mode {
        match &self.interface {
            Some(interface) if !self.list => Mode::Scanning {
                interface: interface.clone(),
            },
            _ => Mode::Listing,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // stdout belongs to the table; diagnostics go to stderr.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

    let cli = Cli::parse();
    let config = ScanConfig::load(&cli.config)?;

    driver::run(cli.mode(), &config).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    #[test]
    fn interface_selects_scanning() {
        let cli = Cli::try_parse_from(["scout-scan", "-i", "wlan0"]).unwrap();
        assert_eq!(
            cli.mode(),
            Mode::Scanning {
                interface: "wlan0".to_string()
            }
        );
    }

    #[test]
    fn list_selects_listing() {
        let cli = Cli::try_parse_from(["scout-scan", "--list"]).unwrap();
        assert_eq!(cli.mode(), Mode::Listing);
    }

    #[test]
    fn mode_is_required() {
        let err = Cli::try_parse_from(["scout-scan"]).err().unwrap();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn modes_are_exclusive() {
        let err = Cli::try_parse_from(["scout-scan", "-i", "wlan0", "-l"]).err().unwrap();
        assert_eq!(err.kind(), ErrorKind::ArgumentConflict);
    }

    #[test]
    fn interface_needs_a_value() {
        assert!(Cli::try_parse_from(["scout-scan", "-i"]).is_err());
    }
}
