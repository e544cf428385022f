//! Container decode/encode and filename format deduction.
//!
//! The transform core never inspects container bytes; everything here goes
//! through the `image` crate. Decoding accepts JPEG or PNG bytes and
//! always yields RGBA8; encoding flattens to RGB for JPEG (the container
//! has no alpha) and keeps RGBA for PNG.

use std::io::Cursor;
use std::path::Path;

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder, ImageReader};

use crate::error::{Error, Result};
use crate::raster::{Raster, CHANNELS};

/// Default JPEG quality when the caller does not specify one.
const DEFAULT_JPEG_QUALITY: u8 = 90;

/// Supported container formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Jpeg,
    Png,
}

impl Format {
    /// Deduce the format from a filename suffix, case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedFormat`] for a missing or unrecognized
    /// extension.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Format> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .ok_or_else(|| Error::UnsupportedFormat(path.display().to_string()))?;
        match ext.as_str() {
            "jpg" | "jpeg" => Ok(Format::Jpeg),
            "png" => Ok(Format::Png),
            other => Err(Error::UnsupportedFormat(format!(".{other}"))),
        }
    }
}

/// Decode JPEG or PNG bytes into a raster.
///
/// # Errors
///
/// Returns [`Error::Decode`] for malformed or truncated bytes.
pub fn decode(bytes: &[u8]) -> Result<Raster> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| Error::Decode(e.to_string()))?;
    let img = reader.decode().map_err(|e| Error::Decode(e.to_string()))?;
    let rgba = img.into_rgba8();
    let (width, height) = rgba.dimensions();
    Raster::from_raw_parts(width, height, rgba.into_raw())
}

/// Encode a raster to container bytes.
///
/// `quality` applies to JPEG only (1-100, default 90); PNG ignores it.
///
/// # Errors
///
/// Returns [`Error::Encode`] if the underlying encoder fails.
pub fn encode(raster: &Raster, format: Format, quality: Option<u8>) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    match format {
        Format::Jpeg => {
            let quality = quality.unwrap_or(DEFAULT_JPEG_QUALITY).clamp(1, 100);
            // JPEG carries no alpha channel; drop it.
            let rgb: Vec<u8> = raster
                .as_bytes()
                .chunks_exact(CHANNELS)
                .flat_map(|px| [px[0], px[1], px[2]])
                .collect();
            JpegEncoder::new_with_quality(Cursor::new(&mut out), quality)
                .write_image(
                    &rgb,
                    raster.width(),
                    raster.height(),
                    ExtendedColorType::Rgb8,
                )
                .map_err(|e| Error::Encode(e.to_string()))?;
        }
        Format::Png => {
            PngEncoder::new(Cursor::new(&mut out))
                .write_image(
                    raster.as_bytes(),
                    raster.width(),
                    raster.height(),
                    ExtendedColorType::Rgba8,
                )
                .map_err(|e| Error::Encode(e.to_string()))?;
        }
    }
    Ok(out)
}

/// Read and decode an image file, deducing the format from its suffix.
///
/// # Errors
///
/// Surfaces I/O errors untouched; decode errors as [`Error::Decode`].
pub fn read_file<P: AsRef<Path>>(path: P) -> Result<Raster> {
    // Validate the extension first so an unsupported path fails with
    // UnsupportedFormat rather than a decode error.
    Format::from_path(&path)?;
    let bytes = std::fs::read(path)?;
    decode(&bytes)
}

/// Encode and write a raster to a file, deducing the format from its
/// suffix.
pub fn write_file<P: AsRef<Path>>(path: P, raster: &Raster, quality: Option<u8>) -> Result<()> {
    let format = Format::from_path(&path)?;
    let bytes = encode(raster, format, quality)?;
    std::fs::write(path, bytes)?;
    Ok(())
}
