//! Desktop shortcut creation
//!
//! The core never talks to the platform shell directly; it hands a
//! [`ShortcutRequest`] to a [`ShortcutWriter`]. The Windows implementation
//! drives COM `IShellLinkW`; on other platforms shortcut creation reports
//! an unsupported-platform error while everything else stays testable.

pub mod launcher;

#[cfg(windows)]
mod shell_link;

pub use launcher::ensure_silent_launcher;

use crate::error::Result;
use std::path::PathBuf;

#[cfg(not(windows))]
use crate::error::DroidpinError;

/// Everything needed to materialize one shortcut
#[derive(Debug, Clone)]
pub struct ShortcutRequest {
    /// Where the `.lnk` file is written
    pub link_path: PathBuf,
    /// Executable (or script) the shortcut launches
    pub target: PathBuf,
    /// Argument string passed to the target
    pub arguments: String,
    /// Working directory for the launched process
    pub working_dir: PathBuf,
    /// Icon file referenced as `"<path>,0"`; `None` leaves the shell default
    pub icon: Option<PathBuf>,
}

/// Narrow seam over the platform shell's shortcut facility
pub trait ShortcutWriter {
    fn create(&self, request: &ShortcutRequest) -> Result<()>;
}

/// Shell-link based writer for the current platform
#[derive(Debug, Default)]
pub struct ShellLinkWriter;

#[cfg(windows)]
impl ShortcutWriter for ShellLinkWriter {
    fn create(&self, request: &ShortcutRequest) -> Result<()> {
        shell_link::write_shell_link(request)
    }
}

#[cfg(not(windows))]
impl ShortcutWriter for ShellLinkWriter {
    fn create(&self, _request: &ShortcutRequest) -> Result<()> {
        Err(DroidpinError::Shortcut(
            "desktop shortcuts are only supported on Windows".to_string(),
        ))
    }
}

/// Build the scrcpy argument string that mirrors one app
///
/// The app runs on a fresh virtual display without system decorations so
/// the mirror window shows only the app itself.
pub fn scrcpy_args(package: &str, audio: bool) -> String {
    let mut args = format!(
        "--new-display --no-vd-system-decorations --start-app={package} \
         --window-title=\"{package}\" "
    );
    if audio {
        args.push_str("--audio-source=playback");
    } else {
        args.push_str("--no-audio");
    }
    args
}
