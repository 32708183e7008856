//! Error types for `droidpin`
//!
//! This module defines all error types used throughout the application.
//! "No suitable icon found" is deliberately not an error: extraction and
//! icon resolution return `Option` so callers can degrade to an icon-less
//! shortcut instead of aborting.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for `droidpin` operations
#[derive(Debug, Error)]
pub enum DroidpinError {
    /// A required external executable is absent
    #[error("{tool} not found at {}", path.display())]
    ToolMissing { tool: &'static str, path: PathBuf },

    /// An external tool could not be started
    #[error("failed to run {tool}: {source}")]
    SubprocessFailure {
        tool: String,
        #[source]
        source: std::io::Error,
    },

    /// `pm path` resolved nothing for the named package
    #[error("package not installed on device: {0}")]
    PackageNotFound(String),

    /// The pulled APK is corrupt or not a valid zip archive
    #[error("cannot read archive {}: {source}", path.display())]
    ArchiveUnreadable {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The source image's header could not be decoded
    #[error("image header error: {0}")]
    Image(#[from] image::ImageError),

    /// Configuration load/save failure
    #[error("configuration error: {0}")]
    Config(String),

    /// Shortcut creation failed
    #[error("shortcut creation failed: {0}")]
    Shortcut(String),

    /// Windows API error
    #[cfg(windows)]
    #[error("Windows API error: {0}")]
    WindowsApi(#[from] windows::core::Error),
}

/// Result type alias for `droidpin` operations
pub type Result<T> = std::result::Result<T, DroidpinError>;

/// Convert an error to a message suitable for end users
///
/// Interactive commands print this instead of the raw error chain. Each
/// message includes a hint for the most common cause.
pub fn user_message(error: &DroidpinError) -> String {
    match error {
        DroidpinError::ToolMissing { tool, path } => {
            format!(
                "{tool} was not found at {}.\n\
                 Install it (or point droidpin at it in the config file) and try again.",
                path.display()
            )
        }
        DroidpinError::SubprocessFailure { tool, source } => {
            format!(
                "Could not start {tool}: {source}\n\
                 Check that it is installed and on your PATH."
            )
        }
        DroidpinError::PackageNotFound(package) => {
            format!(
                "The device did not report an APK path for {package}.\n\
                 Make sure the device is connected and USB debugging is enabled."
            )
        }
        DroidpinError::ArchiveUnreadable { path, .. } => {
            format!(
                "The pulled APK at {} could not be read.\n\
                 The transfer may have been interrupted; try again.",
                path.display()
            )
        }
        DroidpinError::Shortcut(detail) => {
            format!("The shortcut could not be created: {detail}")
        }
        other => other.to_string(),
    }
}
