//! Edit parameters applied to the source image on every pass.

use serde::{Deserialize, Serialize};

/// The full set of edit knobs.
///
/// Values are stored exactly as given; the transform clamps per pixel, so
/// there is no range validation here.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditParameters {
    /// Linear brightness multiplier. `1.0` is neutral.
    pub exposure: f32,
    /// Offset added to every channel after the exposure multiply.
    pub contrast: i32,
    /// Use the desaturated cache as the transform source.
    pub grayscale: bool,
    /// Warm/cool shift: `+` adds red and removes blue.
    pub temperature: i32,
    /// Green/magenta shift: `+` adds green and removes red and blue.
    pub tint: i32,
}

impl Default for EditParameters {
    fn default() -> Self {
        Self {
            exposure: 1.0,
            contrast: 0,
            grayscale: false,
            temperature: 0,
            tint: 0,
        }
    }
}

impl EditParameters {
    /// True when a pass with these parameters reproduces the color source
    pub fn is_identity(&self) -> bool {
        self.exposure == 1.0
            && self.contrast == 0
            && !self.grayscale
            && self.temperature == 0
            && self.tint == 0
    }

    /// Per-channel offsets `[r, g, b]` of the temperature/tint pass
    pub fn channel_shift(&self) -> [i32; 3] {
        [
            self.temperature.saturating_sub(self.tint),
            self.tint,
            self.temperature.saturating_neg().saturating_sub(self.tint),
        ]
    }
}
