//! Owned pixel storage for a single 8-bit RGB image.
//!
//! Wraps `image::RgbImage` so that the rest of the engine only ever sees
//! non-empty images whose dimensions cannot change after construction.

use image::{Rgb, RgbImage};

use super::decode::DecodeError;
use super::EditError;

/// A fixed-size grid of RGB pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageBuffer {
    pixels: RgbImage,
}

impl ImageBuffer {
    /// Wrap an already decoded RGB image
    ///
    /// Zero-sized images are rejected, since every later stage (aspect ratio,
    /// preview sizing, encoding) needs at least one pixel.
    pub fn from_rgb(pixels: RgbImage) -> Result<Self, DecodeError> {
        let (width, height) = pixels.dimensions();
        if width == 0 || height == 0 {
            return Err(DecodeError::Empty { width, height });
        }
        Ok(Self { pixels })
    }

    /// Wrap an image computed from an existing `ImageBuffer`, which is
    /// already known to be non-empty
    pub(crate) fn derived(pixels: RgbImage) -> Self {
        debug_assert!(pixels.width() > 0 && pixels.height() > 0);
        Self { pixels }
    }

    /// Create an image where every pixel has the same color
    pub fn filled(width: u32, height: u32, color: [u8; 3]) -> Result<Self, DecodeError> {
        Self::from_rgb(RgbImage::from_pixel(width, height, Rgb(color)))
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.pixels.dimensions()
    }

    /// Read one pixel. Panics if `(x, y)` is out of bounds, like `RgbImage`.
    pub fn get_pixel(&self, x: u32, y: u32) -> [u8; 3] {
        self.pixels.get_pixel(x, y).0
    }

    /// Overwrite one pixel. Panics if `(x, y)` is out of bounds.
    pub fn set_pixel(&mut self, x: u32, y: u32, color: [u8; 3]) {
        self.pixels.put_pixel(x, y, Rgb(color));
    }

    /// Copy every pixel of `other` into this buffer without reallocating
    pub fn copy_from(&mut self, other: &ImageBuffer) -> Result<(), EditError> {
        if self.dimensions() != other.dimensions() {
            return Err(EditError::DimensionMismatch {
                expected: self.dimensions(),
                actual: other.dimensions(),
            });
        }
        self.pixels.copy_from_slice(other.pixels.as_raw());
        Ok(())
    }

    /// Borrow the underlying `RgbImage`
    pub fn as_rgb(&self) -> &RgbImage {
        &self.pixels
    }

    /// Interleaved RGB bytes, row-major
    pub fn as_raw(&self) -> &[u8] {
        self.pixels.as_raw()
    }

    pub(crate) fn as_raw_mut(&mut self) -> &mut [u8] {
        &mut self.pixels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_empty_image() {
        let err = ImageBuffer::from_rgb(RgbImage::new(0, 10)).unwrap_err();
        assert!(matches!(err, DecodeError::Empty { width: 0, height: 10 }));
    }

    #[test]
    fn test_get_set_pixel() {
        let mut img = ImageBuffer::filled(3, 2, [1, 2, 3]).unwrap();
        img.set_pixel(2, 1, [200, 100, 50]);
        assert_eq!(img.get_pixel(2, 1), [200, 100, 50]);
        assert_eq!(img.get_pixel(0, 0), [1, 2, 3]);
        assert_eq!(img.dimensions(), (3, 2));
    }

    #[test]
    fn test_copy_from_requires_same_dimensions() {
        let mut dst = ImageBuffer::filled(4, 4, [0, 0, 0]).unwrap();
        let src = ImageBuffer::filled(4, 4, [9, 8, 7]).unwrap();
        dst.copy_from(&src).unwrap();
        assert_eq!(dst, src);

        let wrong = ImageBuffer::filled(2, 4, [9, 8, 7]).unwrap();
        let err = dst.copy_from(&wrong).unwrap_err();
        assert!(matches!(
            err,
            EditError::DimensionMismatch { expected: (4, 4), actual: (2, 4) }
        ));
    }
}
