//! Transform engine.
//!
//! Recomputes the edited image from a source image and the full parameter
//! vector. Two passes run back to back over the whole buffer:
//!
//! 1. Photometric rescale: `clamp(v * exposure + contrast)` per channel,
//!    read from the source and written to the edited buffer.
//! 2. Channel shift: temperature and tint offsets applied to the pass 1
//!    output in place.
//!
//! Both passes are split across rows with rayon. Pass 2 only starts once the
//! pass 1 parallel iterator has joined, so every pixel it reads is final.

use rayon::prelude::*;

use super::{EditError, EditParameters, ImageBuffer};

/// Run both passes, overwriting every pixel of `edited`
pub fn apply(
    source: &ImageBuffer,
    params: &EditParameters,
    edited: &mut ImageBuffer,
) -> Result<(), EditError> {
    if source.dimensions() != edited.dimensions() {
        return Err(EditError::DimensionMismatch {
            expected: edited.dimensions(),
            actual: source.dimensions(),
        });
    }

    let (width, height) = source.dimensions();
    tracing::debug!(
        "Transform pass {}x{}: exposure={} contrast={} temperature={} tint={} grayscale={}",
        width,
        height,
        params.exposure,
        params.contrast,
        params.temperature,
        params.tint,
        params.grayscale
    );

    let row_len = width as usize * 3;
    rescale(source, params, edited, row_len);
    shift_channels(params, edited, row_len);

    Ok(())
}

/// Build the 8-bit lookup table for the rescale pass.
///
/// The result is clamped before the float-to-int conversion and the
/// conversion truncates toward zero.
pub fn rescale_lut(exposure: f32, contrast: i32) -> [u8; 256] {
    let offset = contrast as f32;
    let mut lut = [0u8; 256];
    for (v, out) in lut.iter_mut().enumerate() {
        *out = (v as f32 * exposure + offset).clamp(0.0, 255.0) as u8;
    }
    lut
}

/// Pass 1: source -> edited through the rescale table
fn rescale(source: &ImageBuffer, params: &EditParameters, edited: &mut ImageBuffer, row_len: usize) {
    let lut = rescale_lut(params.exposure, params.contrast);

    edited
        .as_raw_mut()
        .par_chunks_mut(row_len)
        .zip(source.as_raw().par_chunks(row_len))
        .for_each(|(dst, src)| {
            for (d, s) in dst.iter_mut().zip(src) {
                *d = lut[*s as usize];
            }
        });
}

/// Pass 2: temperature/tint, in place on the pass 1 output
fn shift_channels(params: &EditParameters, edited: &mut ImageBuffer, row_len: usize) {
    let shift = params.channel_shift();
    if shift == [0, 0, 0] {
        return;
    }

    edited
        .as_raw_mut()
        .par_chunks_mut(row_len)
        .for_each(|row| {
            for px in row.chunks_exact_mut(3) {
                for (c, offset) in px.iter_mut().zip(shift) {
                    *c = (*c as i32).saturating_add(offset).clamp(0, 255) as u8;
                }
            }
        });
}
