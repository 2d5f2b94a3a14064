//! Android device host driven through `adb`.

use std::process::Command;

use crate::config::AdbConfig;
use crate::error::LaunchError;

use super::{PackageQuery, UrlLauncher};

/// Talks to a connected Android device with `adb shell pm` and `adb shell am`.
#[derive(Debug, Clone)]
pub struct AdbHost {
    program: String,
    serial: Option<String>,
}

impl AdbHost {
    /// Create a host using the given `adb` executable.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            serial: None,
        }
    }

    /// Target a specific device (`adb -s <serial>`).
    pub fn with_serial(mut self, serial: impl Into<String>) -> Self {
        self.serial = Some(serial.into());
        self
    }

    pub fn from_config(config: &AdbConfig) -> Self {
        let host = Self::new(config.program.clone());
        match &config.serial {
            Some(serial) => host.with_serial(serial.clone()),
            None => host,
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn serial(&self) -> Option<&str> {
        self.serial.as_deref()
    }

    /// Arguments for `adb [-s serial] shell pm path <package>`.
    pub fn pm_path_args(&self, package_id: &str) -> Vec<String> {
        let mut args = self.device_args();
        args.extend(["shell", "pm", "path"].map(String::from));
        args.push(shell_quote(package_id));
        args
    }

    /// Arguments for a VIEW intent on `url`, optionally pinned to a package.
    ///
    /// `-W` makes `am` wait for the activity so resolution errors are reported.
    pub fn am_start_args(&self, url: &str, restrict_to_package: Option<&str>) -> Vec<String> {
        let mut args = self.device_args();
        args.extend(
            ["shell", "am", "start", "-W", "-a", "android.intent.action.VIEW", "-d"]
                .map(String::from),
        );
        args.push(shell_quote(url));
        if let Some(package_id) = restrict_to_package {
            args.push("-p".to_string());
            args.push(shell_quote(package_id));
        }
        args
    }

    fn device_args(&self) -> Vec<String> {
        match &self.serial {
            Some(serial) => vec!["-s".to_string(), serial.clone()],
            None => Vec::new(),
        }
    }
}

impl Default for AdbHost {
    fn default() -> Self {
        Self::from_config(&AdbConfig::default())
    }
}

impl PackageQuery for AdbHost {
    fn is_app_installed(&self, package_id: &str) -> bool {
        let args = self.pm_path_args(package_id);
        let output = match Command::new(&self.program).args(&args).output() {
            Ok(output) => output,
            Err(err) => {
                tracing::debug!(package_id, error = %err, "failed to run adb, treating as not installed");
                return false;
            }
        };
        if !output.status.success() {
            tracing::debug!(
                package_id,
                stderr = %String::from_utf8_lossy(&output.stderr).trim(),
                "pm path failed, treating as not installed"
            );
            return false;
        }
        is_pm_path_hit(&String::from_utf8_lossy(&output.stdout))
    }
}

impl UrlLauncher for AdbHost {
    fn launch_url(
        &self,
        url: &str,
        restrict_to_package: Option<&str>,
    ) -> Result<(), LaunchError> {
        let args = self.am_start_args(url, restrict_to_package);
        tracing::debug!(program = %self.program, ?args, "launching via adb");
        let output = Command::new(&self.program).args(&args).output()?;
        classify_am_start(
            url,
            restrict_to_package,
            output.status.success(),
            &String::from_utf8_lossy(&output.stdout),
            &String::from_utf8_lossy(&output.stderr),
        )
    }
}

/// `pm path` prints one `package:/data/app/...` line per APK of an installed package.
pub fn is_pm_path_hit(stdout: &str) -> bool {
    stdout.lines().any(|line| line.trim().starts_with("package:"))
}

/// Map `am start` output to a launch result.
///
/// `am` reports resolution failures on stdout and, depending on the Android
/// release, may still exit with status 0.
pub fn classify_am_start(
    url: &str,
    restrict_to_package: Option<&str>,
    success: bool,
    stdout: &str,
    stderr: &str,
) -> Result<(), LaunchError> {
    let combined = format!("{stdout}\n{stderr}");
    if combined.contains("unable to resolve Intent") {
        return Err(LaunchError::no_handler(url, restrict_to_package));
    }

    let error_line = combined
        .lines()
        .map(str::trim)
        .find(|line| line.starts_with("Error:") || line.starts_with("Exception"));

    match (success, error_line) {
        (true, None) => Ok(()),
        (_, Some(line)) => Err(LaunchError::Rejected {
            url: url.to_string(),
            message: line.to_string(),
        }),
        (false, None) => Err(LaunchError::Rejected {
            url: url.to_string(),
            message: match stderr.trim() {
                "" => "adb exited with failure".to_string(),
                trimmed => trimmed.to_string(),
            },
        }),
    }
}

/// Single-quote a value for the device shell that `adb shell` hands the command to.
pub fn shell_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', r"'\''"))
}
