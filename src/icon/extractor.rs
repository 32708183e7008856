//! Archive icon extractor
//!
//! Locates a candidate launcher PNG inside an APK (a zip archive) and
//! copies its decompressed bytes verbatim into an output directory.
//!
//! Candidate selection picks the lexicographically greatest entry path.
//! Android resource folders encode density in their names
//! (`drawable-xxhdpi` sorts after `drawable-hdpi`), so descending order
//! biases toward higher-resolution variants. It is a heuristic, not a
//! guarantee of the largest image.

use crate::error::{DroidpinError, Result};
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::debug;
use zip::ZipArchive;

/// Resource roots that may hold launcher artwork
const RESOURCE_ROOTS: [&str; 2] = ["res/drawable", "res/mipmap"];

/// Extract one icon PNG from an APK into `out_dir`
///
/// Returns `Ok(None)` when the archive holds no qualifying entry; that is
/// an expected outcome, not an error. The output file keeps the entry's
/// base filename.
///
/// # Errors
///
/// `ArchiveUnreadable` when the APK cannot be opened or is not a valid
/// zip; `Io` when the output file cannot be created or written.
pub fn extract_icon(apk_path: &Path, out_dir: &Path) -> Result<Option<PathBuf>> {
    let file = File::open(apk_path).map_err(|e| DroidpinError::ArchiveUnreadable {
        path: apk_path.to_path_buf(),
        source: zip::result::ZipError::Io(e),
    })?;
    let mut archive = ZipArchive::new(file).map_err(|e| DroidpinError::ArchiveUnreadable {
        path: apk_path.to_path_buf(),
        source: e,
    })?;

    // Entry paths are unique within an archive, so max() is deterministic.
    let Some(selected) = archive
        .file_names()
        .filter(|name| is_icon_candidate(name))
        .max()
        .map(String::from)
    else {
        debug!("no icon candidates in {}", apk_path.display());
        return Ok(None);
    };

    debug!("selected icon entry {selected}");
    let mut entry =
        archive
            .by_name(&selected)
            .map_err(|e| DroidpinError::ArchiveUnreadable {
                path: apk_path.to_path_buf(),
                source: e,
            })?;

    let file_name = selected.rsplit('/').next().unwrap_or(&selected);
    let out_path = out_dir.join(file_name);
    let mut out = File::create(&out_path)?;
    std::io::copy(&mut entry, &mut out)?;

    Ok(Some(out_path))
}

/// Whether an entry path qualifies as launcher artwork
///
/// Case-insensitive: resource roots and extensions vary in case across
/// build toolchains.
fn is_icon_candidate(entry_name: &str) -> bool {
    let lower = entry_name.to_ascii_lowercase();
    lower.ends_with(".png")
        && RESOURCE_ROOTS
            .iter()
            .any(|root| lower.starts_with(root))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::SimpleFileOptions;

    /// Build a zip file on disk with the given entry names (1-byte bodies)
    fn write_archive(dir: &Path, entries: &[&str]) -> PathBuf {
        write_archive_with_bodies(dir, &entries.iter().map(|e| (*e, &b"x"[..])).collect::<Vec<_>>())
    }

    fn write_archive_with_bodies(dir: &Path, entries: &[(&str, &[u8])]) -> PathBuf {
        let path = dir.join("test.apk");
        let file = File::create(&path).unwrap();
        let mut writer = zip::ZipWriter::new(file);
        for (name, body) in entries {
            writer
                .start_file(*name, SimpleFileOptions::default())
                .unwrap();
            writer.write_all(body).unwrap();
        }
        writer.finish().unwrap();
        path
    }

    #[test]
    fn test_no_qualifying_entries_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let apk = write_archive(
            dir.path(),
            &["classes.dex", "res/raw/data.bin", "assets/icon.png"],
        );
        let result = extract_icon(&apk, dir.path()).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_selects_lexicographically_greatest_entry() {
        let dir = tempfile::tempdir().unwrap();
        let apk = write_archive_with_bodies(
            dir.path(),
            &[
                ("res/drawable-xxhdpi/icon.png", b"drawable bytes"),
                ("res/mipmap-hdpi/ic_launcher.png", b"mipmap bytes"),
                ("res/raw/data.bin", b"not an image"),
            ],
        );
        let out = extract_icon(&apk, dir.path()).unwrap().unwrap();
        assert_eq!(out.file_name().unwrap(), "ic_launcher.png");
        assert_eq!(std::fs::read(&out).unwrap(), b"mipmap bytes");
    }

    #[test]
    fn test_selection_is_deterministic_across_runs() {
        let dir = tempfile::tempdir().unwrap();
        let apk = write_archive(
            dir.path(),
            &[
                "res/mipmap-mdpi/ic_launcher.png",
                "res/mipmap-xxxhdpi/ic_launcher_round.png",
                "res/mipmap-hdpi/ic_launcher.png",
            ],
        );
        let first = extract_icon(&apk, dir.path()).unwrap().unwrap();
        let second = extract_icon(&apk, dir.path()).unwrap().unwrap();
        assert_eq!(first, second);
        assert_eq!(first.file_name().unwrap(), "ic_launcher_round.png");
    }

    #[test]
    fn test_extracted_bytes_are_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let body: Vec<u8> = (0..=255).collect();
        let apk =
            write_archive_with_bodies(dir.path(), &[("res/drawable/icon.png", body.as_slice())]);
        let out = extract_icon(&apk, dir.path()).unwrap().unwrap();
        assert_eq!(std::fs::read(&out).unwrap(), body);
    }

    #[test]
    fn test_case_insensitive_matching() {
        let dir = tempfile::tempdir().unwrap();
        let apk = write_archive(dir.path(), &["res/Mipmap-hdpi/Icon.PNG"]);
        let out = extract_icon(&apk, dir.path()).unwrap();
        assert!(out.is_some());
    }

    #[test]
    fn test_invalid_archive_is_unreadable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.apk");
        std::fs::write(&path, b"this is not a zip").unwrap();
        let result = extract_icon(&path, dir.path());
        assert!(matches!(
            result,
            Err(DroidpinError::ArchiveUnreadable { .. })
        ));
    }

    #[test]
    fn test_missing_archive_is_unreadable() {
        let dir = tempfile::tempdir().unwrap();
        let result = extract_icon(&dir.path().join("absent.apk"), dir.path());
        assert!(matches!(
            result,
            Err(DroidpinError::ArchiveUnreadable { .. })
        ));
    }
}
