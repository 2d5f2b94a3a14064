//! Error types for elvlink.
//!
//! Missing apps and foreign links are outcomes, not errors. Only a launch the
//! host platform refuses is reported here.

use thiserror::Error;

/// Failure reported by a [`crate::platform::UrlLauncher`].
#[derive(Debug, Error)]
pub enum LaunchError {
    /// No activity could handle the URL. With a package restriction this is
    /// usually a package that disappeared after the installed check.
    #[error("No handler for {url}{}", in_package(.package))]
    NoHandler {
        url: String,
        package: Option<String>,
    },

    /// The platform refused the launch request.
    #[error("Launch of {url} rejected: {message}")]
    Rejected { url: String, message: String },

    /// The launcher could not reach the platform at all.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl LaunchError {
    pub fn no_handler(url: impl Into<String>, package: Option<&str>) -> Self {
        Self::NoHandler {
            url: url.into(),
            package: package.map(str::to_string),
        }
    }
}

fn in_package(package: &Option<String>) -> String {
    match package {
        Some(p) => format!(" in package {p}"),
        None => String::new(),
    }
}
