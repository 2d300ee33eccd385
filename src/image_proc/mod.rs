//! Image editing module.
//!
//! Provides image storage, the edit transform, preview rendering and export.

pub mod buffer;
pub mod decode;
pub mod engine;
pub mod export;
pub mod params;
pub mod render;
pub mod store;
pub mod transform;

pub use buffer::ImageBuffer;
pub use decode::{DecodeError, DecodeLimits};
pub use export::{EncodeError, Exporter};
pub use params::EditParameters;
pub use render::DisplayRenderer;
pub use store::ImageStore;
pub use transform::Flip;

use crate::config::Config;
use crate::controls::{ControlPanel, Slider, SliderEvent};
use image::{ImageFormat, RgbImage};
use std::path::Path;
use thiserror::Error;

/// Image editing errors
#[derive(Error, Debug)]
pub enum EditError {
    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),

    #[error("Encode error: {0}")]
    Encode(#[from] EncodeError),

    #[error("Edited image is {actual:?} but source is {expected:?}")]
    DimensionMismatch {
        expected: (u32, u32),
        actual: (u32, u32),
    },

    #[error("No image loaded")]
    NoImage,
}

/// Editing session: the store plus everything that reacts to it
///
/// Every state change is followed by exactly one preview refresh.
pub struct Editor {
    store: ImageStore,
    renderer: DisplayRenderer,
    controls: ControlPanel,
    limits: DecodeLimits,
    jpeg_quality: u8,
}

impl Editor {
    /// Create an empty editor
    pub fn new(config: &Config) -> Self {
        Self {
            store: ImageStore::new(),
            renderer: DisplayRenderer::new(config.preview_height)
                .with_max_width(config.max_width),
            controls: ControlPanel::new(),
            limits: config.decode_limits(),
            jpeg_quality: config.jpeg_quality,
        }
    }

    pub fn store(&self) -> &ImageStore {
        &self.store
    }

    pub fn controls(&self) -> &ControlPanel {
        &self.controls
    }

    /// Current on-screen preview
    pub fn preview(&self) -> Option<&RgbImage> {
        self.renderer.preview()
    }

    /// Open an image file. A file that fails to decode leaves the session as it was.
    pub fn open<P: AsRef<Path>>(&mut self, path: P) -> Result<(), EditError> {
        self.store.load_file(path, &self.limits)?;
        self.refresh();
        Ok(())
    }

    /// Load encoded image bytes. Bytes that fail to decode leave the session as it was.
    pub fn open_bytes(&mut self, bytes: &[u8]) -> Result<(), EditError> {
        self.store.load_bytes(bytes, &self.limits)?;
        self.refresh();
        Ok(())
    }

    /// Load an already decoded image
    pub fn load(&mut self, image: ImageBuffer) {
        self.store.load(image);
        self.refresh();
    }

    pub fn flip_horizontal(&mut self) -> Result<(), EditError> {
        self.store.flip_horizontal()?;
        self.refresh();
        Ok(())
    }

    pub fn flip_vertical(&mut self) -> Result<(), EditError> {
        self.store.flip_vertical()?;
        self.refresh();
        Ok(())
    }

    pub fn toggle_grayscale(&mut self) -> Result<(), EditError> {
        self.store.toggle_grayscale()?;
        self.refresh();
        Ok(())
    }

    /// Apply a full parameter set in one pass
    pub fn set_params(&mut self, params: EditParameters) -> Result<(), EditError> {
        self.store.set_params(params)?;
        self.refresh();
        Ok(())
    }

    /// Feed a slider event
    ///
    /// Returns `true` when the event settled a value and the image was
    /// recomputed, `false` for intermediate drag values.
    pub fn slider(&mut self, slider: Slider, event: SliderEvent) -> Result<bool, EditError> {
        let Some(commit) = self.controls.handle(slider, event) else {
            return Ok(false);
        };
        commit.apply(&mut self.store)?;
        self.refresh();
        Ok(true)
    }

    /// The display area changed height; re-render the preview to fit
    pub fn resize_viewport(&mut self, height: u32) {
        self.renderer.set_viewport_height(height);
        self.refresh();
    }

    /// Exporter over the edited image
    pub fn exporter(&self) -> Result<Exporter<'_>, EditError> {
        let edited = self.store.edited().ok_or(EditError::NoImage)?;
        Ok(Exporter::new(edited).with_jpeg_quality(self.jpeg_quality))
    }

    /// Save the edited image as PNG
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), EditError> {
        self.exporter()?.save(path, ImageFormat::Png)?;
        Ok(())
    }

    /// JPEG data URI of the edited image for an editing advice request
    pub fn advice_payload(&self) -> Result<String, EditError> {
        Ok(self.exporter()?.to_data_uri(ImageFormat::Jpeg)?)
    }

    fn refresh(&mut self) {
        self.renderer.refresh(&self.store);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn editor_with(color: [u8; 3]) -> Editor {
        let mut editor = Editor::new(&Config::default());
        editor.load(ImageBuffer::filled(20, 10, color).unwrap());
        editor
    }

    #[test]
    fn test_load_renders_preview() {
        let editor = editor_with([1, 2, 3]);
        assert_eq!(editor.preview().unwrap().dimensions(), (1000, 500));
    }

    #[test]
    fn test_drag_then_settle_recomputes_once() {
        let mut editor = editor_with([100, 100, 100]);
        let start = editor.store().revision();

        assert!(!editor.slider(Slider::Temperature, SliderEvent::Drag(3)).unwrap());
        assert!(!editor.slider(Slider::Temperature, SliderEvent::Drag(8)).unwrap());
        assert_eq!(editor.store().revision(), start);

        assert!(editor.slider(Slider::Temperature, SliderEvent::Settle(10)).unwrap());
        assert_eq!(editor.store().revision(), start + 1);
        assert_eq!(
            editor.store().edited().unwrap().get_pixel(0, 0),
            [110, 100, 90]
        );
    }

    #[test]
    fn test_resize_viewport_rerenders() {
        let mut editor = editor_with([1, 2, 3]);
        editor.resize_viewport(40);
        assert_eq!(editor.preview().unwrap().dimensions(), (80, 40));
    }

    #[test]
    fn test_export_needs_image() {
        let editor = Editor::new(&Config::default());
        assert!(matches!(editor.advice_payload(), Err(EditError::NoImage)));
    }

    #[test]
    fn test_bad_bytes_keep_session() {
        let mut editor = editor_with([7, 7, 7]);
        assert!(editor.open_bytes(b"nope").is_err());
        assert_eq!(editor.store().width(), Some(20));
        assert_eq!(editor.preview().unwrap().dimensions(), (1000, 500));
    }
}
