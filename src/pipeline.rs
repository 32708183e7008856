//! Shortcut pipeline
//!
//! Composes the device bridge, icon extractor, icon packager and shortcut
//! writer into the user-facing operations: list packages, create one
//! shortcut, batch-generate icons. Each operation is a single sequential
//! unit of work; the one physical device behind adb cannot usefully serve
//! concurrent requests, so the batch runs items strictly one at a time.

use crate::adb::{AdbBridge, PackageRef};
use crate::config::AppConfig;
use crate::error::{DroidpinError, Result};
use crate::icon::{extract_icon, package_ico};
use crate::shortcut::{
    ShellLinkWriter, ShortcutRequest, ShortcutWriter, ensure_silent_launcher, scrcpy_args,
};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Outcome counts of a batch icon generation run
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BatchSummary {
    /// Icons newly generated
    pub created: usize,
    /// Packages that already had an icon on disk
    pub skipped: usize,
    /// Packages where pull/extract/convert produced nothing
    pub failed: usize,
}

/// Ties configuration and the device bridge together for one invocation
pub struct Pipeline {
    config: AppConfig,
    adb: AdbBridge,
}

impl Pipeline {
    pub fn new(config: AppConfig) -> Self {
        let adb = AdbBridge::new(&config.tools.adb);
        Self { config, adb }
    }

    /// List device packages, annotated with any icon already on disk
    pub fn list_packages(&self) -> Result<Vec<PackageRef>> {
        let icons_dir = self.config.icons_dir();
        let mut packages = self.adb.list_packages()?;
        for package in &mut packages {
            package.icon = existing_icon(&icons_dir, &package.package);
        }
        Ok(packages)
    }

    /// Locate or produce a raw icon image for a package
    ///
    /// Reuses `<icons>/<pkg>.ico` or `<icons>/<pkg>.png` when present.
    /// Otherwise pulls the APK into a scratch directory, extracts a PNG
    /// and installs it into the icons directory for later reuse. Returns
    /// `Ok(None)` when the APK holds no suitable image.
    pub fn resolve_icon(&self, package: &str) -> Result<Option<PathBuf>> {
        let icons_dir = self.config.icons_dir();
        if let Some(existing) = existing_icon(&icons_dir, package) {
            return Ok(Some(existing));
        }

        let apk_path_on_device = self.adb.package_path(package)?;
        let scratch = tempfile::Builder::new().prefix("droidpin-pull").tempdir()?;
        let local_apk = scratch.path().join(format!("{package}.apk"));
        self.adb.pull(&apk_path_on_device, &local_apk)?;

        let Some(extracted) = extract_icon(&local_apk, scratch.path())? else {
            return Ok(None);
        };

        std::fs::create_dir_all(&icons_dir)?;
        let installed = icons_dir.join(format!("{package}.png"));
        Ok(Some(install_extracted_icon(scratch, extracted, installed)))
    }

    /// Produce the `.ico` for a package, converting a resolved PNG if needed
    ///
    /// Conversion failures degrade to `Ok(None)`: a shortcut without a
    /// custom icon beats no shortcut.
    pub fn ensure_ico(&self, package: &str) -> Result<Option<PathBuf>> {
        let Some(resolved) = self.resolve_icon(package)? else {
            return Ok(None);
        };
        if resolved.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("ico")) {
            return Ok(Some(resolved));
        }

        let ico_path = self.config.icons_dir().join(format!("{package}.ico"));
        match package_ico(&resolved, &ico_path) {
            Ok(()) => Ok(Some(ico_path)),
            Err(e) => {
                warn!("icon conversion failed for {package}: {e}");
                Ok(None)
            }
        }
    }

    /// Create a desktop shortcut that mirrors one app via scrcpy
    ///
    /// Returns the path of the written `.lnk`. An absent icon is reported
    /// through logs only; the shortcut is still created.
    pub fn create_shortcut(&self, package: &str, audio: bool) -> Result<PathBuf> {
        let scrcpy = &self.config.tools.scrcpy;
        if scrcpy.components().count() > 1 && !scrcpy.exists() {
            return Err(DroidpinError::ToolMissing {
                tool: "scrcpy",
                path: scrcpy.clone(),
            });
        }

        let icon = match self.ensure_ico(package) {
            Ok(icon) => icon,
            Err(e) => {
                warn!("icon resolution failed for {package}: {e}");
                None
            }
        };
        if icon.is_none() {
            info!("no icon for {package}; creating shortcut without one");
        }

        let resources_dir = self.config.resources_dir();
        let launcher = ensure_silent_launcher(&resources_dir)?;
        let working_dir = scrcpy
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty())
            .map_or(resources_dir, Path::to_path_buf);

        let desktop = dirs::desktop_dir().ok_or_else(|| {
            DroidpinError::Shortcut("no desktop directory on this system".to_string())
        })?;
        let request = ShortcutRequest {
            link_path: desktop.join(format!("{package}.lnk")),
            target: launcher,
            arguments: scrcpy_args(package, audio),
            working_dir,
            icon,
        };
        ShellLinkWriter.create(&request)?;

        info!("shortcut created at {}", request.link_path.display());
        Ok(request.link_path)
    }

    /// Generate icons for every given package, strictly sequentially
    ///
    /// Per-item failures are counted and skipped; the batch never aborts.
    /// `progress` is invoked before each item so the caller can render a
    /// progress bar.
    pub fn generate_all_icons(
        &self,
        packages: &[PackageRef],
        mut progress: impl FnMut(&PackageRef),
    ) -> BatchSummary {
        let icons_dir = self.config.icons_dir();
        let mut summary = BatchSummary::default();

        for package in packages {
            progress(package);

            if existing_icon(&icons_dir, &package.package).is_some() {
                summary.skipped += 1;
                continue;
            }

            match self.resolve_icon(&package.package) {
                Ok(Some(png)) => {
                    let ico_path = icons_dir.join(format!("{}.ico", package.package));
                    if let Err(e) = package_ico(&png, &ico_path) {
                        // The PNG is on disk and reusable, so the item
                        // still counts as created.
                        warn!("icon conversion failed for {}: {e}", package.package);
                    }
                    summary.created += 1;
                }
                Ok(None) => {
                    info!("no icon found in APK for {}", package.package);
                    summary.failed += 1;
                }
                Err(e) => {
                    warn!("icon generation failed for {}: {e}", package.package);
                    summary.failed += 1;
                }
            }
        }

        summary
    }
}

/// Move a freshly extracted icon into the icons directory for reuse
///
/// When the copy fails (icons directory not writable), the scratch copy
/// is still usable for the current operation: the scratch directory's
/// cleanup is disarmed so the returned path keeps pointing at an existing
/// file after this call.
fn install_extracted_icon(
    scratch: tempfile::TempDir,
    extracted: PathBuf,
    installed: PathBuf,
) -> PathBuf {
    match std::fs::copy(&extracted, &installed) {
        Ok(_) => installed,
        Err(e) => {
            warn!("could not keep icon for reuse: {e}");
            let _ = scratch.keep();
            extracted
        }
    }
}

/// Look up a previously generated icon for a package
///
/// Prefers the packaged `.ico` over the raw `.png`.
fn existing_icon(icons_dir: &Path, package: &str) -> Option<PathBuf> {
    let ico = icons_dir.join(format!("{package}.ico"));
    if ico.exists() {
        return Some(ico);
    }
    let png = icons_dir.join(format!("{package}.png"));
    png.exists().then_some(png)
}
