//! In-memory host used by tests and the CLI's `--simulate` mode.

use std::collections::BTreeSet;
use std::sync::Mutex;

use serde::Serialize;

use crate::error::LaunchError;
use crate::link::{AMAZON_STORE_PACKAGE, PLAY_STORE_PACKAGE, WALLET_PACKAGE, WALLET_SCHEME};

use super::{PackageQuery, UrlLauncher};

/// A launch request received by [`SimulatedHost`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LaunchRecord {
    pub url: String,
    pub package: Option<String>,
}

/// Simulated device with a fixed set of installed packages.
///
/// Every launch request is recorded, including the ones that fail. A launch
/// resolves only to an installed package registered for the URL's scheme.
#[derive(Debug, Default)]
pub struct SimulatedHost {
    installed: BTreeSet<String>,
    unresolvable: BTreeSet<String>,
    launches: Mutex<Vec<LaunchRecord>>,
}

impl SimulatedHost {
    /// Create a device with nothing installed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a device with the given packages installed.
    pub fn with_installed<I, S>(packages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            installed: packages.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn install(&mut self, package_id: impl Into<String>) {
        self.installed.insert(package_id.into());
    }

    /// Keep reporting the package as installed but refuse to launch it.
    ///
    /// Models an app removed between the installed check and the launch.
    pub fn mark_unresolvable(&mut self, package_id: impl Into<String>) {
        self.unresolvable.insert(package_id.into());
    }

    pub fn installed(&self) -> impl Iterator<Item = &str> {
        self.installed.iter().map(String::as_str)
    }

    /// Snapshot of the launch requests received so far.
    pub fn launches(&self) -> Vec<LaunchRecord> {
        self.launches
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn can_handle(&self, package_id: &str, url: &str) -> bool {
        self.installed.contains(package_id)
            && !self.unresolvable.contains(package_id)
            && scheme_handler(url) == Some(package_id)
    }
}

impl PackageQuery for SimulatedHost {
    fn is_app_installed(&self, package_id: &str) -> bool {
        self.installed.contains(package_id)
    }
}

impl UrlLauncher for SimulatedHost {
    fn launch_url(
        &self,
        url: &str,
        restrict_to_package: Option<&str>,
    ) -> Result<(), LaunchError> {
        self.launches
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(LaunchRecord {
                url: url.to_string(),
                package: restrict_to_package.map(str::to_string),
            });

        let resolved = match restrict_to_package {
            Some(package_id) => self.can_handle(package_id, url),
            None => self.installed.iter().any(|p| self.can_handle(p, url)),
        };

        if resolved {
            tracing::debug!(url, ?restrict_to_package, "simulated launch");
            Ok(())
        } else {
            Err(LaunchError::no_handler(url, restrict_to_package))
        }
    }
}

/// Package that registers for the URL's scheme on a stock device.
fn scheme_handler(url: &str) -> Option<&'static str> {
    if url.starts_with(WALLET_SCHEME) {
        Some(WALLET_PACKAGE)
    } else if url.starts_with("market://") {
        Some(PLAY_STORE_PACKAGE)
    } else if url.starts_with("amzn://") {
        Some(AMAZON_STORE_PACKAGE)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unrestricted_launch_needs_a_scheme_handler() {
        let host = SimulatedHost::with_installed([PLAY_STORE_PACKAGE]);

        assert!(host.launch_url("market://details?id=x", None).is_ok());
        assert!(matches!(
            host.launch_url("amzn://apps/android?p=x", None),
            Err(LaunchError::NoHandler { package: None, .. })
        ));
        assert_eq!(host.launches().len(), 2);
    }

    #[test]
    fn restricted_launch_fails_for_unresolvable_package() {
        let mut host = SimulatedHost::with_installed([WALLET_PACKAGE]);
        host.mark_unresolvable(WALLET_PACKAGE);

        assert!(host.is_app_installed(WALLET_PACKAGE));
        let err = host
            .launch_url("elvwallet://items/m/ictr/s", Some(WALLET_PACKAGE))
            .unwrap_err();
        assert!(matches!(err, LaunchError::NoHandler { package: Some(ref p), .. } if p == WALLET_PACKAGE));
    }
}
