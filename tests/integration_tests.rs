//! Integration tests for `droidpin`
//!
//! Exercises the extract-then-package path end to end against real zip
//! archives and real PNG bytes, plus configuration persistence.

use droidpin::config::{AppConfig, ConfigManager, ToolPaths};
use droidpin::icon::packager::ICO_PREFIX_LEN;
use droidpin::icon::{extract_icon, package_ico};
use image::{ImageFormat, RgbaImage};
use std::io::Write;
use std::path::{Path, PathBuf};
use zip::write::SimpleFileOptions;

/// Build an APK-shaped zip archive with the given entries
fn write_apk(dir: &Path, entries: &[(&str, &[u8])]) -> PathBuf {
    let path = dir.join("app.apk");
    let file = std::fs::File::create(&path).unwrap();
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

/// Encode a real PNG and return its bytes
fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let mut cursor = std::io::Cursor::new(Vec::new());
    RgbaImage::new(width, height)
        .write_to(&mut cursor, ImageFormat::Png)
        .unwrap();
    cursor.into_inner()
}

#[test]
fn test_extract_then_package_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let launcher_png = png_bytes(48, 48);
    let apk = write_apk(
        dir.path(),
        &[
            ("classes.dex", b"bytecode".as_slice()),
            ("res/drawable-xxhdpi/icon.png", b"low priority".as_slice()),
            ("res/mipmap-hdpi/ic_launcher.png", launcher_png.as_slice()),
            ("res/raw/data.bin", b"not an image".as_slice()),
        ],
    );

    // Extraction picks the mipmap entry (lexicographically greatest path)
    // and copies it verbatim.
    let extracted = extract_icon(&apk, dir.path()).unwrap().unwrap();
    assert_eq!(extracted.file_name().unwrap(), "ic_launcher.png");
    assert_eq!(std::fs::read(&extracted).unwrap(), launcher_png);

    // Packaging embeds the PNG unmodified behind the 22-byte prefix.
    let ico = dir.path().join("app.ico");
    package_ico(&extracted, &ico).unwrap();
    let contents = std::fs::read(&ico).unwrap();

    assert_eq!(contents.len(), ICO_PREFIX_LEN + launcher_png.len());
    assert_eq!(&contents[0..6], &[0, 0, 1, 0, 1, 0]);
    assert_eq!(contents[6], 48);
    assert_eq!(contents[7], 48);
    assert_eq!(
        &contents[14..18],
        &(launcher_png.len() as u32).to_le_bytes()
    );
    assert_eq!(&contents[18..22], &22u32.to_le_bytes());
    assert_eq!(&contents[22..], launcher_png.as_slice());
}

#[test]
fn test_archive_without_icons_reports_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let apk = write_apk(
        dir.path(),
        &[
            ("classes.dex", b"bytecode".as_slice()),
            ("assets/images/banner.png", b"wrong root".as_slice()),
        ],
    );
    assert!(extract_icon(&apk, dir.path()).unwrap().is_none());
}

#[test]
fn test_boundary_dimension_clamps_in_full_path() {
    let dir = tempfile::tempdir().unwrap();
    let big_png = png_bytes(256, 256);
    let apk = write_apk(
        dir.path(),
        &[("res/mipmap-anydpi/ic_launcher.png", big_png.as_slice())],
    );

    let extracted = extract_icon(&apk, dir.path()).unwrap().unwrap();
    let ico = dir.path().join("app.ico");
    package_ico(&extracted, &ico).unwrap();
    let contents = std::fs::read(&ico).unwrap();

    assert_eq!(contents[6], 0);
    assert_eq!(contents[7], 0);
    assert_eq!(contents.len(), ICO_PREFIX_LEN + big_png.len());
}

#[test]
fn test_repeated_packaging_is_byte_identical() {
    let dir = tempfile::tempdir().unwrap();
    let png_path = dir.path().join("icon.png");
    std::fs::write(&png_path, png_bytes(32, 32)).unwrap();

    let first = dir.path().join("first.ico");
    let second = dir.path().join("second.ico");
    package_ico(&png_path, &first).unwrap();
    package_ico(&png_path, &second).unwrap();

    assert_eq!(
        std::fs::read(&first).unwrap(),
        std::fs::read(&second).unwrap()
    );
}

#[test]
fn test_config_persistence_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");

    let config = AppConfig {
        tools: ToolPaths {
            adb: PathBuf::from("/opt/platform-tools/adb"),
            scrcpy: PathBuf::from("/opt/scrcpy/scrcpy"),
        },
        resources_dir: Some(dir.path().join("resources")),
        ..AppConfig::default()
    };
    ConfigManager::save_to(&config, &path).unwrap();

    let loaded = ConfigManager::load_from(&path);
    assert_eq!(loaded.tools.adb, config.tools.adb);
    assert_eq!(loaded.resources_dir, config.resources_dir);
    assert_eq!(loaded.icons_dir(), dir.path().join("resources").join("icons"));
}
