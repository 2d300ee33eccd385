//! Image decoding.
//!
//! Turns encoded bytes (JPEG, PNG) into an [`ImageBuffer`] through the
//! `image` codec. Decoding never touches engine state, so a failure here
//! leaves whatever image is currently loaded in place.

use std::io::Cursor;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::ImageBuffer;

/// Decode errors
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("Image decode failed: {0}")]
    Image(#[from] image::ImageError),

    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Image has no pixels ({width}x{height})")]
    Empty { width: u32, height: u32 },

    #[error("Image dimensions {width}x{height} exceed maximum {max_width}x{max_height}")]
    TooLarge {
        width: u32,
        height: u32,
        max_width: u32,
        max_height: u32,
    },
}

/// Decode limits
#[derive(Debug, Clone, Copy)]
pub struct DecodeLimits {
    pub max_width: u32,
    pub max_height: u32,
}

impl Default for DecodeLimits {
    fn default() -> Self {
        Self {
            max_width: 16384,
            max_height: 16384,
        }
    }
}

impl DecodeLimits {
    /// Codec limits enforced by the decoder itself
    fn to_image_limits(self) -> image::Limits {
        let mut limits = image::Limits::default();
        limits.max_image_width = Some(self.max_width);
        limits.max_image_height = Some(self.max_height);
        limits
    }
}

fn guess_format(bytes: &[u8]) -> Result<image::ImageReader<Cursor<&[u8]>>, DecodeError> {
    image::ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::Image(image::ImageError::IoError(e)))
}

/// Decode an in-memory encoded image, guessing the format from its header
///
/// Dimensions are checked against `limits` from the header, before any
/// pixel buffer is allocated.
pub fn decode_bytes(bytes: &[u8], limits: &DecodeLimits) -> Result<ImageBuffer, DecodeError> {
    let (width, height) = guess_format(bytes)?.into_dimensions()?;
    if width > limits.max_width || height > limits.max_height {
        return Err(DecodeError::TooLarge {
            width,
            height,
            max_width: limits.max_width,
            max_height: limits.max_height,
        });
    }

    let mut reader = guess_format(bytes)?;
    reader.limits(limits.to_image_limits());
    let img = reader.decode()?;
    tracing::debug!("Image decoded: {}x{}", img.width(), img.height());

    // Alpha and higher bit depths are flattened to 8-bit RGB
    ImageBuffer::from_rgb(img.into_rgb8())
}

/// Read and decode an image file
pub fn decode_file<P: AsRef<Path>>(
    path: P,
    limits: &DecodeLimits,
) -> Result<ImageBuffer, DecodeError> {
    let path = path.as_ref();
    tracing::info!("Opening image: {}", path.display());

    let bytes = std::fs::read(path).map_err(|source| DecodeError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    decode_bytes(&bytes, limits)
}
