//! Process lifecycle: one-shot interface listing or the scan/present pair.
//!
//! In scanning mode the presenter is spawned as a detached tokio task and the
//! scanner runs on the calling task. Nothing ever joins the presenter; when
//! the scanner returns, the caller returns and the runtime drops it.

use std::io::Write;
use std::sync::Arc;

use scout_core::NetworkRegistry;
use scout_journal::{ObservationSink, RotatingJournal};
use tokio::io::AsyncWrite;

use crate::config::ScanConfig;
use crate::error::Result;
use crate::interfaces::{InterfaceLister, SysfsInterfaces};
use crate::presenter::Presenter;
use crate::scanner::Scanner;
use crate::source::{BeaconSource, IwlistSource};

/// What the process was started to do. Chosen once, never changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Print the available interfaces and exit.
    Listing,
    /// Scan `interface` until the process is terminated.
    Scanning { interface: String },
}

/// Run `mode` with the production collaborators.
pub async fn run(mode: Mode, config: &ScanConfig) -> Result<()> {
    match mode {
        Mode::Listing => {
            let lister = SysfsInterfaces::new(&config.sysfs_net_dir);
            run_listing(&lister, &mut std::io::stdout().lock())
        }
        Mode::Scanning { interface } => {
            let source = IwlistSource::new(&config.iwlist_path);
            let version = source.verify_installation().await?;
            tracing::info!(iwlist_version = %version, "iwlist verified");

            let journal = RotatingJournal::open(
                &config.log_path,
                config.log_max_bytes,
                config.log_backup_count,
            )?;
            tracing::info!(path = %journal.path().display(), "Journal ready");

            run_scanning(config, source, journal, &interface, tokio::io::stdout()).await
        }
    }
}

/// Print every interface name on its own line.
pub fn run_listing<L: InterfaceLister, W: Write>(lister: &L, out: &mut W) -> Result<()> {
    for name in lister.list_interfaces()? {
        writeln!(out, "{name}")?;
    }
    out.flush()?;
    Ok(())
}

/// Spawn the presenter onto `display`, then scan on the current task.
///
/// Returns only when the scanner hits a fatal error.
pub async fn run_scanning<S, J, D>(
    config: &ScanConfig,
    source: S,
    journal: J,
    interface: &str,
    display: D,
) -> Result<()>
where
    S: BeaconSource,
    J: ObservationSink,
    D: AsyncWrite + Unpin + Send + 'static,
{
    let registry = Arc::new(NetworkRegistry::new());

    let presenter = Presenter::new(Arc::clone(&registry), config);
    tokio::spawn(async move {
        if let Err(e) = presenter.run(display).await {
            tracing::error!(error = %e, "Presenter stopped");
        }
    });

    let scanner = Scanner::new(source, journal, registry, interface, config);
    scanner.run().await
}
