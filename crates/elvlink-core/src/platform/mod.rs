//! Host platform capabilities consumed by the dispatcher.
//!
//! The dispatcher never looks anything up globally. A host hands it one
//! implementation of each trait:
//! - [`PackageQuery`] answers whether a package is installed
//! - [`UrlLauncher`] asks the platform to open a URL, optionally pinned to one package
//!
//! Two hosts ship with the crate: [`AdbHost`] drives a real device through
//! `adb`, [`SimulatedHost`] keeps everything in memory.

pub mod adb;
mod simulated;

pub use adb::AdbHost;
pub use simulated::{LaunchRecord, SimulatedHost};

use crate::error::LaunchError;

/// Installed-application query.
pub trait PackageQuery {
    /// Whether an application with this package identifier is installed.
    ///
    /// Implementations fold every query failure into `false`.
    fn is_app_installed(&self, package_id: &str) -> bool;
}

/// "Open this URL" action of the host platform.
pub trait UrlLauncher {
    /// Request the platform to open `url`.
    ///
    /// With `restrict_to_package` set, only that package may handle the URL
    /// and the platform reports an error instead of picking another handler.
    fn launch_url(&self, url: &str, restrict_to_package: Option<&str>)
    -> Result<(), LaunchError>;
}

/// A host providing both capabilities.
pub trait HostPlatform: PackageQuery + UrlLauncher {}

impl<T: PackageQuery + UrlLauncher + ?Sized> HostPlatform for T {}
