//! Device bridge interface
//!
//! Drives the `adb` executable as a subprocess and parses its line-oriented
//! stdout. Only stdout is consulted: empty or garbled output is treated as
//! "no match", never as an error, because `pm` output varies across Android
//! versions and a disconnected device should not crash the listing.
//!
//! Output parsing lives in free functions so it can be tested without a
//! connected device.

use crate::error::{DroidpinError, Result};
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, warn};

/// A reference to an application package installed on the device
///
/// Created when the package list is parsed, discarded on refresh. The icon
/// path, when set, pointed at an existing file at resolution time; absence
/// means downstream consumers proceed without a custom icon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageRef {
    /// Opaque package identifier (reverse-domain name)
    pub package: String,
    /// Human-readable label, defaults to the identifier
    pub label: String,
    /// Previously generated icon for this package, if any
    pub icon: Option<PathBuf>,
}

impl PackageRef {
    /// Create a reference labeled with its own package id
    pub fn new(package: impl Into<String>) -> Self {
        let package = package.into();
        Self {
            label: package.clone(),
            package,
            icon: None,
        }
    }
}

/// Handle to the adb executable
#[derive(Debug, Clone)]
pub struct AdbBridge {
    adb: PathBuf,
}

impl AdbBridge {
    pub fn new(adb: impl Into<PathBuf>) -> Self {
        Self { adb: adb.into() }
    }

    /// List third-party packages installed on the connected device
    ///
    /// Runs `adb shell pm list packages -f -3` and parses one package per
    /// stdout line. Lines that do not match `package:<path>=<name>` are
    /// ignored, so an empty or garbled listing yields an empty collection.
    /// The result is sorted by display label.
    pub fn list_packages(&self) -> Result<Vec<PackageRef>> {
        let output = self.run(&["shell", "pm", "list", "packages", "-f", "-3"])?;
        let mut packages: Vec<PackageRef> = parse_package_list(&output)
            .into_iter()
            .map(|(_apk_path, package)| PackageRef::new(package))
            .collect();
        packages.sort_by(|a, b| a.label.cmp(&b.label));
        debug!("device reported {} third-party packages", packages.len());
        Ok(packages)
    }

    /// Resolve the on-device APK path of a named package
    pub fn package_path(&self, package: &str) -> Result<String> {
        let output = self.run(&["shell", "pm", "path", package])?;
        parse_package_path(&output)
            .ok_or_else(|| DroidpinError::PackageNotFound(package.to_string()))
    }

    /// Pull a file from the device to local storage
    ///
    /// adb reports some failures only on stderr with a zero-ish exit status,
    /// so the transfer is verified by checking that the local file exists.
    pub fn pull(&self, remote: &str, local: &Path) -> Result<()> {
        let local_str = local.to_string_lossy();
        self.run(&["pull", remote, local_str.as_ref()])?;
        if !local.exists() {
            warn!("adb pull produced no file for {remote}");
            return Err(DroidpinError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("adb pull did not produce {}", local.display()),
            )));
        }
        Ok(())
    }

    /// Run adb with the given arguments and capture stdout
    ///
    /// `Command::output()` reads stdout to EOF before returning, so the
    /// full listing is always seen even when adb is slow to exit.
    fn run(&self, args: &[&str]) -> Result<String> {
        self.ensure_present()?;
        debug!("running {} {}", self.adb.display(), args.join(" "));
        let output = Command::new(&self.adb).args(args).output().map_err(|e| {
            DroidpinError::SubprocessFailure {
                tool: self.adb.to_string_lossy().into_owned(),
                source: e,
            }
        })?;
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    /// Fail early when a configured explicit path does not exist
    ///
    /// Bare program names are left to PATH resolution at spawn time.
    fn ensure_present(&self) -> Result<()> {
        let has_explicit_dir = self.adb.components().count() > 1;
        if has_explicit_dir && !self.adb.exists() {
            return Err(DroidpinError::ToolMissing {
                tool: "adb",
                path: self.adb.clone(),
            });
        }
        Ok(())
    }
}

/// Parse `pm list packages -f` output into `(apk_path, package_name)` pairs
///
/// Each matching line has the shape `package:<apk-path>=<name>`. APK paths
/// may themselves contain `=`, so the split happens at the last one.
pub fn parse_package_list(output: &str) -> Vec<(String, String)> {
    output
        .lines()
        .filter_map(|line| {
            let rest = line.trim().strip_prefix("package:")?;
            let (apk_path, package) = rest.rsplit_once('=')?;
            if apk_path.is_empty() || package.is_empty() {
                return None;
            }
            Some((apk_path.trim().to_string(), package.trim().to_string()))
        })
        .collect()
}

/// Parse `pm path <package>` output into the first reported APK path
pub fn parse_package_path(output: &str) -> Option<String> {
    output
        .lines()
        .find_map(|line| line.trim().strip_prefix("package:"))
        .map(|path| path.trim().to_string())
}
