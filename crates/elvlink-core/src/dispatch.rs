//! Deeplink dispatch: launch Media Wallet or fall back to an app store.

use std::fmt;

use serde::Serialize;

use crate::error::LaunchError;
use crate::link::{
    self, AMAZON_STORE_PACKAGE, PLAY_STORE_PACKAGE, WALLET_PACKAGE, append_jwt,
    is_link_supported,
};
use crate::platform::{HostPlatform, PackageQuery, UrlLauncher};

/// Outcome of a dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeeplinkResult {
    /// Media Wallet is installed and the deeplink was opened.
    MediaWalletLaunched,
    /// Media Wallet is not installed, relevant store has been opened.
    StoreLaunched,
    /// Media Wallet is not installed and no known app store was found.
    StoreNotFound,
    /// The given link is not supported, or not an eluvio link.
    UnsupportedLink,
}

impl DeeplinkResult {
    /// Outcome tag, as used in JSON output.
    pub fn as_str(&self) -> &'static str {
        match self {
            DeeplinkResult::MediaWalletLaunched => "MEDIA_WALLET_LAUNCHED",
            DeeplinkResult::StoreLaunched => "STORE_LAUNCHED",
            DeeplinkResult::StoreNotFound => "STORE_NOT_FOUND",
            DeeplinkResult::UnsupportedLink => "UNSUPPORTED_LINK",
        }
    }
}

impl fmt::Display for DeeplinkResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Dispatch outcome together with what was handed to the launcher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DispatchReport {
    pub result: DeeplinkResult,
    /// Target after the token was appended
    pub target: String,
    /// URL passed to the launcher, if a launch happened
    #[serde(skip_serializing_if = "Option::is_none")]
    pub launched_url: Option<String>,
    /// Package the launch was pinned to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub restricted_to: Option<String>,
}

impl DispatchReport {
    fn without_launch(result: DeeplinkResult, target: String) -> Self {
        Self {
            result,
            target,
            launched_url: None,
            restricted_to: None,
        }
    }
}

/// Hands a deeplink to Media Wallet through the host's capabilities.
///
/// Holds nothing but borrowed capabilities. Installed state is queried fresh
/// on every call, so a dispatcher may be shared across threads whenever the
/// capabilities are `Sync`.
#[derive(Clone, Copy)]
pub struct DeeplinkDispatcher<'a> {
    packages: &'a dyn PackageQuery,
    launcher: &'a dyn UrlLauncher,
}

impl fmt::Debug for DeeplinkDispatcher<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeeplinkDispatcher").finish_non_exhaustive()
    }
}

impl<'a> DeeplinkDispatcher<'a> {
    pub fn new(packages: &'a dyn PackageQuery, launcher: &'a dyn UrlLauncher) -> Self {
        Self { packages, launcher }
    }

    /// Dispatcher backed by a single host providing both capabilities.
    pub fn for_host<H: HostPlatform + 'a>(host: &'a H) -> Self {
        Self::new(host, host)
    }

    /// Creates a deep link to a specific SKU in Media Wallet.
    pub fn create_sku_deeplink(&self, marketplace: &str, sku: &str) -> String {
        link::create_sku_deeplink(marketplace, sku)
    }

    /// Launches Media Wallet with the given marketplace and SKU.
    ///
    /// See [`Self::launch_deeplink`] for how the wallet is reached.
    pub fn launch_sku_deeplink(
        &self,
        marketplace: &str,
        sku: &str,
        jwt: Option<&str>,
    ) -> Result<DeeplinkResult, LaunchError> {
        let url = self.create_sku_deeplink(marketplace, sku);
        self.launch_deeplink(&url, jwt)
    }

    /// Opens `url` in Media Wallet when installed. Otherwise opens Google Play
    /// (forwarding the URL as install referrer) or the Amazon Appstore.
    ///
    /// Launch failures are returned as-is; there is no retry without the
    /// package restriction.
    pub fn launch_deeplink(
        &self,
        url: &str,
        jwt: Option<&str>,
    ) -> Result<DeeplinkResult, LaunchError> {
        self.launch_deeplink_with_report(url, jwt)
            .map(|report| report.result)
    }

    /// Same as [`Self::launch_deeplink`], also reporting the launched URL.
    pub fn launch_deeplink_with_report(
        &self,
        url: &str,
        jwt: Option<&str>,
    ) -> Result<DispatchReport, LaunchError> {
        let target = match jwt {
            Some(token) => append_jwt(url, token),
            None => url.to_string(),
        };

        if !is_link_supported(&target) {
            tracing::info!(url = %target, "unsupported link");
            return Ok(DispatchReport::without_launch(
                DeeplinkResult::UnsupportedLink,
                target,
            ));
        }

        if self.packages.is_app_installed(WALLET_PACKAGE) {
            tracing::debug!(package = WALLET_PACKAGE, "wallet installed, launching");
            return self.launch(
                DeeplinkResult::MediaWalletLaunched,
                target.clone(),
                target,
                Some(WALLET_PACKAGE),
            );
        }

        self.launch_store(target)
    }

    fn launch_store(&self, target: String) -> Result<DispatchReport, LaunchError> {
        if self.packages.is_app_installed(PLAY_STORE_PACKAGE) {
            tracing::debug!(package = PLAY_STORE_PACKAGE, "wallet missing, opening store");
            let store_url = link::play_store_url(&target);
            return self.launch(DeeplinkResult::StoreLaunched, target, store_url, None);
        }

        if self.packages.is_app_installed(AMAZON_STORE_PACKAGE) {
            tracing::debug!(package = AMAZON_STORE_PACKAGE, "wallet missing, opening store");
            let store_url = link::amazon_store_url();
            return self.launch(DeeplinkResult::StoreLaunched, target, store_url, None);
        }

        tracing::info!(url = %target, "wallet and known stores missing");
        Ok(DispatchReport::without_launch(
            DeeplinkResult::StoreNotFound,
            target,
        ))
    }

    fn launch(
        &self,
        result: DeeplinkResult,
        target: String,
        launch_url: String,
        restrict_to: Option<&str>,
    ) -> Result<DispatchReport, LaunchError> {
        self.launcher.launch_url(&launch_url, restrict_to)?;
        tracing::info!(%result, url = %launch_url, "launched");
        Ok(DispatchReport {
            result,
            target,
            launched_url: Some(launch_url),
            restricted_to: restrict_to.map(str::to_string),
        })
    }
}
