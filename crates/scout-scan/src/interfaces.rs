//! Network interface enumeration for `--list`.

use std::fs;
use std::path::PathBuf;

use crate::error::{Result, ScanError};

/// Anything that can name the network interfaces present on the host.
pub trait InterfaceLister {
    fn list_interfaces(&self) -> Result<Vec<String>>;
}

/// Lists the kernel's interfaces from sysfs (`/sys/class/net/<name>`).
pub struct SysfsInterfaces {
    dir: PathBuf,
}

impl SysfsInterfaces {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl InterfaceLister for SysfsInterfaces {
    /// Interface names sorted ascending.
    fn list_interfaces(&self) -> Result<Vec<String>> {
        let entries = fs::read_dir(&self.dir).map_err(|source| ScanError::InterfaceList {
            path: self.dir.display().to_string(),
            source,
        })?;

        let mut names: Vec<String> = entries
            .flatten()
            .map(|entry| entry.file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();

        Ok(names)
    }
}
