//! Icon packager
//!
//! Wraps a single image file into a minimal one-image `.ico` container.
//! The source bytes are embedded unmodified (the shell accepts PNG-compressed
//! icon entries); only the declared width and height are decoded from the
//! image's own header.
//!
//! The layout is a binary-compatibility contract with the Windows icon
//! loader: 6-byte ICONDIR, one 16-byte ICONDIRENTRY, then the image bytes
//! at offset 22. Output length is always `22 + source length`.

use crate::error::Result;
use std::io::Write;
use std::path::Path;
use tracing::debug;

/// Size of the ICONDIR header plus one ICONDIRENTRY
pub const ICO_PREFIX_LEN: usize = 6 + 16;

/// A located image file plus its declared pixel dimensions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconArtifact {
    /// Source image path
    pub path: std::path::PathBuf,
    /// Width as read from the image header
    pub width: u32,
    /// Height as read from the image header
    pub height: u32,
}

impl IconArtifact {
    /// Read an image's dimensions from its header without decoding pixels
    pub fn open(path: impl Into<std::path::PathBuf>) -> Result<Self> {
        let path = path.into();
        let (width, height) = image::image_dimensions(&path)?;
        Ok(Self {
            path,
            width,
            height,
        })
    }
}

/// Package a source image into a single-image `.ico` file
///
/// The output is byte-for-byte reproducible for identical input and is
/// written atomically so a half-written icon never becomes visible to the
/// shell.
///
/// # Errors
///
/// `Image` when the source header cannot be decoded, `Io` when the source
/// cannot be read or the output cannot be written.
pub fn package_ico(source: &Path, ico_path: &Path) -> Result<()> {
    let artifact = IconArtifact::open(source)?;
    let image_bytes = std::fs::read(source)?;
    let contents = encode_ico(&artifact, &image_bytes);

    let dir = ico_path.parent().unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(dir)?;
    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(&contents)?;
    tmp.persist(ico_path).map_err(|e| e.error)?;

    debug!(
        "packaged {} ({}x{}, {} bytes) into {}",
        source.display(),
        artifact.width,
        artifact.height,
        image_bytes.len(),
        ico_path.display()
    );
    Ok(())
}

/// Encode the icon container in memory
fn encode_ico(artifact: &IconArtifact, image_bytes: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(ICO_PREFIX_LEN + image_bytes.len());

    // ICONDIR
    out.extend_from_slice(&0u16.to_le_bytes()); // reserved
    out.extend_from_slice(&1u16.to_le_bytes()); // type: icon
    out.extend_from_slice(&1u16.to_le_bytes()); // image count

    // ICONDIRENTRY
    out.push(clamp_dimension(artifact.width));
    out.push(clamp_dimension(artifact.height));
    out.push(0); // color count
    out.push(0); // reserved
    out.extend_from_slice(&0u16.to_le_bytes()); // color planes
    out.extend_from_slice(&32u16.to_le_bytes()); // bits per pixel
    out.extend_from_slice(&(image_bytes.len() as u32).to_le_bytes());
    out.extend_from_slice(&(ICO_PREFIX_LEN as u32).to_le_bytes());

    out.extend_from_slice(image_bytes);
    out
}

/// Clamp a pixel dimension into the directory entry's single-byte field
///
/// The format encodes 256 (and anything larger) as 0.
fn clamp_dimension(dimension: u32) -> u8 {
    if dimension >= 256 {
        0
    } else {
        dimension as u8
    }
}
