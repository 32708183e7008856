//! `droidpin` - Pin Android apps to the desktop as scrcpy shortcuts
//!
//! Enumerates applications installed on a connected Android device through
//! the `adb` bridge, extracts a launcher icon from the selected app's APK,
//! wraps it into a single-image Windows `.ico` container, and writes a
//! desktop shortcut that launches `scrcpy` for that app.
//!
//! The core flow is linear: `adb` subprocess → APK pull → archive icon
//! extraction → icon packaging → shortcut creation. Each step returns an
//! explicit `Result`; the CLI decides what degrades and what is reported.

// Module declarations
pub mod adb;
pub mod config;
pub mod error;
pub mod icon;
pub mod pipeline;
pub mod shortcut;
pub mod utils;

// Re-export commonly used types
pub use error::{DroidpinError, Result};
