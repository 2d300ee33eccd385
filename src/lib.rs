//! Photo editing engine
//!
//! Holds a source image and a small set of edit parameters and recomputes
//! the edited image from them on every change:
//! - Exposure, contrast, temperature and tint per-pixel adjustments
//! - Grayscale mode backed by a lazily built desaturated copy
//! - Horizontal/vertical flips of the source
//! - Aspect-preserving bilinear preview for display
//! - PNG export and base64 JPEG payloads for the editing advice service

pub mod config;
pub mod controls;
pub mod image_proc;

pub use config::Config;
pub use controls::{ControlPanel, Slider, SliderEvent};
pub use image_proc::{
    DecodeError, DisplayRenderer, EditError, EditParameters, Editor, EncodeError, Exporter,
    ImageBuffer, ImageStore,
};
