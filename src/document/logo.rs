//! Logo staging and decoding.
//!
//! An uploaded logo lives in a temporary file for exactly one render call.
//! `StagedLogo` owns that file, so it is removed when the value drops, on
//! success and error paths alike. Decoded images are flattened onto white
//! and re-encoded as baseline JPEG so the page can embed them with
//! `DCTDecode` regardless of the upload format.

use image::codecs::jpeg::JpegEncoder;
use image::{ImageFormat, RgbImage};
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use thiserror::Error;

const JPEG_QUALITY: u8 = 90;

#[derive(Debug, Error)]
pub enum AssetLoadError {
    #[error("logo upload is empty")]
    Empty,

    #[error("unsupported logo format {0}; expected PNG or JPEG")]
    UnsupportedFormat(String),

    #[error("could not decode logo: {0}")]
    Decode(#[from] image::ImageError),

    #[error("could not stage logo: {0}")]
    Io(#[from] std::io::Error),
}

/// A decoded logo ready for embedding.
#[derive(Debug, Clone)]
pub struct LogoImage {
    pub jpeg: Vec<u8>,
    pub width_px: u32,
    pub height_px: u32,
}

impl LogoImage {
    /// Height that keeps the aspect ratio when drawn `width_mm` wide.
    pub fn height_for_width(&self, width_mm: f32) -> f32 {
        if self.width_px == 0 {
            return 0.0;
        }
        width_mm * self.height_px as f32 / self.width_px as f32
    }
}

/// Uploaded logo bytes persisted to a temporary file.
pub struct StagedLogo {
    file: NamedTempFile,
}

impl StagedLogo {
    pub fn stage(bytes: &[u8]) -> Result<Self, AssetLoadError> {
        if bytes.is_empty() {
            return Err(AssetLoadError::Empty);
        }

        let mut file = tempfile::Builder::new()
            .prefix("ironbid-logo-")
            .tempfile()?;
        file.write_all(bytes)?;
        file.flush()?;

        tracing::debug!(path = %file.path().display(), size = bytes.len(), "Staged logo upload");
        Ok(Self { file })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    pub fn load(&self) -> Result<LogoImage, AssetLoadError> {
        let bytes = std::fs::read(self.path())?;
        decode_logo(&bytes)
    }
}

pub fn decode_logo(bytes: &[u8]) -> Result<LogoImage, AssetLoadError> {
    if bytes.is_empty() {
        return Err(AssetLoadError::Empty);
    }

    let format = image::guess_format(bytes)?;
    if !matches!(format, ImageFormat::Png | ImageFormat::Jpeg) {
        return Err(AssetLoadError::UnsupportedFormat(format!("{format:?}")));
    }

    let rgba = image::load_from_memory_with_format(bytes, format)?.to_rgba8();
    let (width_px, height_px) = rgba.dimensions();

    let mut rgb = RgbImage::new(width_px, height_px);
    for (x, y, pixel) in rgba.enumerate_pixels() {
        let alpha = u16::from(pixel[3]);
        let blend = |c: u8| ((u16::from(c) * alpha + 255 * (255 - alpha)) / 255) as u8;
        rgb.put_pixel(x, y, image::Rgb([blend(pixel[0]), blend(pixel[1]), blend(pixel[2])]));
    }

    let mut jpeg = Vec::new();
    JpegEncoder::new_with_quality(&mut jpeg, JPEG_QUALITY).encode_image(&rgb)?;

    Ok(LogoImage {
        jpeg,
        width_px,
        height_px,
    })
}
