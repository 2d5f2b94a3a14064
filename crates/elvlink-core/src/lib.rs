//! Elvlink Core Library
//!
//! Decides how a host application hands control to the Eluvio Media Wallet:
//! open the wallet directly when it is installed, otherwise send the user to
//! an app store listing, forwarding the deeplink as an install referrer where
//! the store supports it.

pub mod config;
pub mod dispatch;
pub mod error;
pub mod link;
pub mod platform;

/// Re-exports of commonly used types
pub mod prelude {
    // Dispatch
    pub use crate::dispatch::{DeeplinkDispatcher, DeeplinkResult, DispatchReport};

    // Errors
    pub use crate::error::LaunchError;

    // Links
    pub use crate::link::{
        AMAZON_STORE_PACKAGE, PLAY_STORE_PACKAGE, WALLET_PACKAGE, WALLET_SCHEME,
        create_sku_deeplink, is_link_supported,
    };

    // Platform
    pub use crate::platform::{
        AdbHost, HostPlatform, LaunchRecord, PackageQuery, SimulatedHost, UrlLauncher,
    };

    // Configuration
    pub use crate::config::{AdbConfig, ConfigStore, ElvlinkConfig, SimulateConfig};
}
