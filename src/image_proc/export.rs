//! Encoding of the edited image.
//!
//! Lossless PNG for saving to disk, lossy JPEG for the base64 payload sent
//! to the editing advice service. Exporting only borrows the image.

use std::ffi::OsString;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use base64::{Engine as _, engine::general_purpose::STANDARD};
use image::ImageFormat;
use image::codecs::jpeg::JpegEncoder;
use thiserror::Error;

use super::ImageBuffer;

/// Quality used for JPEG when the caller does not specify one
pub const DEFAULT_JPEG_QUALITY: u8 = 75;

/// Encode errors
#[derive(Error, Debug)]
pub enum EncodeError {
    #[error("Unsupported export format: {0}")]
    UnsupportedFormat(String),

    #[error("JPEG quality {0} out of range (1-100)")]
    InvalidQuality(u8),

    #[error("Image encode failed: {0}")]
    Image(#[from] image::ImageError),

    #[error("Failed to write export: {0}")]
    Io(#[from] std::io::Error),
}

/// Encoder for one image
#[derive(Debug, Clone, Copy)]
pub struct Exporter<'a> {
    image: &'a ImageBuffer,
    jpeg_quality: u8,
}

impl<'a> Exporter<'a> {
    pub fn new(image: &'a ImageBuffer) -> Self {
        Self {
            image,
            jpeg_quality: DEFAULT_JPEG_QUALITY,
        }
    }

    /// Default quality for lossy formats
    pub fn with_jpeg_quality(mut self, quality: u8) -> Self {
        self.jpeg_quality = quality;
        self
    }

    /// Encode to `format`; `quality` only applies to JPEG
    pub fn to_encoded_bytes(
        &self,
        format: ImageFormat,
        quality: Option<u8>,
    ) -> Result<Vec<u8>, EncodeError> {
        let rgb = self.image.as_rgb();
        let mut buffer = Vec::new();

        match format {
            ImageFormat::Png => {
                rgb.write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png)?;
            }
            ImageFormat::Jpeg => {
                let quality = quality.unwrap_or(self.jpeg_quality);
                if !(1..=100).contains(&quality) {
                    return Err(EncodeError::InvalidQuality(quality));
                }
                let encoder = JpegEncoder::new_with_quality(&mut buffer, quality);
                rgb.write_with_encoder(encoder)?;
            }
            other => {
                return Err(EncodeError::UnsupportedFormat(format!("{:?}", other)));
            }
        }

        tracing::debug!("Encoded {:?}: {} bytes", format, buffer.len());
        Ok(buffer)
    }

    /// Standard base64 of the encoded image
    pub fn to_base64(&self, format: ImageFormat) -> Result<String, EncodeError> {
        Ok(STANDARD.encode(self.to_encoded_bytes(format, None)?))
    }

    /// `data:` URI embedding the encoded image, as sent in advice requests
    pub fn to_data_uri(&self, format: ImageFormat) -> Result<String, EncodeError> {
        let encoded = self.to_base64(format)?;
        Ok(format!("data:{};base64,{}", format.to_mime_type(), encoded))
    }

    /// Save losslessly to `path`
    ///
    /// Writes a temporary file next to the destination and renames it, so
    /// an interrupted save never leaves a truncated image behind.
    pub fn save<P: AsRef<Path>>(&self, path: P, format: ImageFormat) -> Result<(), EncodeError> {
        if format != ImageFormat::Png {
            return Err(EncodeError::UnsupportedFormat(format!(
                "{:?} is not a lossless save format",
                format
            )));
        }

        let path = path.as_ref();
        let bytes = self.to_encoded_bytes(format, None)?;

        let tmp_path = temp_path_for(path);
        std::fs::write(&tmp_path, &bytes)?;

        std::fs::rename(&tmp_path, path).map_err(|e| {
            let _ = std::fs::remove_file(&tmp_path);
            EncodeError::Io(e)
        })?;

        tracing::info!("Saved {} bytes to {}", bytes.len(), path.display());
        Ok(())
    }
}

/// Sibling of `path` with `.tmp` appended to the full file name
fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(OsString::from).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
