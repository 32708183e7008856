//! Icon extraction and packaging
//!
//! Two leaf components composed linearly: the extractor locates a launcher
//! PNG inside an APK and copies it out; the packager wraps that PNG into a
//! minimal single-image `.ico` container without re-encoding pixel data.

pub mod extractor;
pub mod packager;

pub use extractor::extract_icon;
pub use packager::{IconArtifact, package_ico};
