//! Configuration for elvlink (elvlink.toml).

pub mod store;

pub use store::ConfigStore;

use serde::{Deserialize, Serialize};

use crate::platform::SimulatedHost;

/// Root configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElvlinkConfig {
    /// How to reach a real device
    #[serde(default)]
    pub adb: AdbConfig,

    /// Device used in simulate mode
    #[serde(default)]
    pub simulate: SimulateConfig,
}

/// `adb` invocation settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdbConfig {
    /// adb executable, looked up on PATH when not absolute
    #[serde(default = "default_adb_program")]
    pub program: String,

    /// Device serial passed as `adb -s`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serial: Option<String>,
}

fn default_adb_program() -> String {
    "adb".to_string()
}

impl Default for AdbConfig {
    fn default() -> Self {
        Self {
            program: default_adb_program(),
            serial: None,
        }
    }
}

/// Simulated device contents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulateConfig {
    /// Packages reported as installed
    #[serde(default)]
    pub installed: Vec<String>,

    /// Installed packages that refuse launches
    #[serde(default)]
    pub unresolvable: Vec<String>,
}

impl SimulateConfig {
    /// Build the simulated device described by this section.
    pub fn host(&self) -> SimulatedHost {
        let mut host = SimulatedHost::with_installed(self.installed.iter().cloned());
        for package_id in &self.unresolvable {
            host.mark_unresolvable(package_id.clone());
        }
        host
    }
}

impl ElvlinkConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.adb.program.trim().is_empty() {
            anyhow::bail!("adb.program must not be empty");
        }
        if let Some(ref serial) = self.adb.serial
            && serial.trim().is_empty()
        {
            anyhow::bail!("adb.serial must not be empty when set");
        }
        let simulated = self.simulate.installed.iter().chain(&self.simulate.unresolvable);
        for package_id in simulated {
            if !is_package_id(package_id) {
                anyhow::bail!("Invalid package identifier in [simulate]: '{}'", package_id);
            }
        }
        Ok(())
    }
}

/// Android package names: dot-separated segments of letters, digits and `_`.
fn is_package_id(value: &str) -> bool {
    !value.is_empty()
        && value.split('.').all(|segment| {
            !segment.is_empty()
                && segment
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '_')
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn package_id_shape() {
        assert!(is_package_id("app.eluvio.wallet"));
        assert!(is_package_id("com.amazon.venezia"));
        assert!(!is_package_id("app..wallet"));
        assert!(!is_package_id("app.eluvio.wallet;reboot"));
        assert!(!is_package_id(""));
    }
}
