//! Source image transformations.
//!
//! Produces new source images from the current one: geometric flips and the
//! desaturated copy used in grayscale mode. None of these modify their input.

use image::{DynamicImage, imageops};

use super::ImageBuffer;

/// Mirror axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flip {
    /// Pixel (x, y) comes from (width - 1 - x, y)
    Horizontal,
    /// Pixel (x, y) comes from (x, height - 1 - y)
    Vertical,
}

/// Produce a mirrored copy of `img`
pub fn flip(img: &ImageBuffer, axis: Flip) -> ImageBuffer {
    let flipped = match axis {
        Flip::Horizontal => imageops::flip_horizontal(img.as_rgb()),
        Flip::Vertical => imageops::flip_vertical(img.as_rgb()),
    };
    ImageBuffer::derived(flipped)
}

/// Produce a desaturated copy of `img` with the same dimensions
///
/// Uses the codec's luma conversion (Rec. 709 weights on the stored sRGB
/// values) and expands the result back to three equal channels.
pub fn desaturate(img: &ImageBuffer) -> ImageBuffer {
    let luma = imageops::grayscale(img.as_rgb());
    ImageBuffer::derived(DynamicImage::ImageLuma8(luma).into_rgb8())
}
