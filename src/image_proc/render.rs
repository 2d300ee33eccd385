//! On-screen preview rendering.
//!
//! Scales the edited image to the height of the viewport, keeping the aspect
//! ratio of the source, with bilinear filtering.

use image::RgbImage;
use image::imageops::{self, FilterType};

use super::ImageStore;

/// Fallback preview height when the viewport reports zero height
pub const DEFAULT_PREVIEW_HEIGHT: u32 = 500;

/// Widest preview rendered unless configured otherwise
pub const DEFAULT_MAX_PREVIEW_WIDTH: u32 = 16384;

/// Builds and holds the current preview of an [`ImageStore`]
#[derive(Debug)]
pub struct DisplayRenderer {
    default_height: u32,
    max_width: u32,
    viewport_height: u32,
    preview: Option<RgbImage>,
}

impl Default for DisplayRenderer {
    fn default() -> Self {
        Self::new(DEFAULT_PREVIEW_HEIGHT)
    }
}

impl DisplayRenderer {
    /// Create a renderer that falls back to `default_height` for empty viewports
    pub fn new(default_height: u32) -> Self {
        Self {
            default_height: default_height.max(1),
            max_width: DEFAULT_MAX_PREVIEW_WIDTH,
            viewport_height: 0,
            preview: None,
        }
    }

    /// Cap the preview width; wider previews are scaled down as a whole
    pub fn with_max_width(mut self, max_width: u32) -> Self {
        self.max_width = max_width.max(1);
        self
    }

    /// Record a new viewport height. Takes effect on the next refresh.
    pub fn set_viewport_height(&mut self, height: u32) {
        self.viewport_height = height;
    }

    pub fn viewport_height(&self) -> u32 {
        self.viewport_height
    }

    /// Preview size for a source of `width` x `height`
    ///
    /// The preview height is the viewport height (or the default), and the
    /// width follows the source aspect ratio, truncated, never below 1.
    /// A width above the maximum is capped and the height shrunk to match.
    pub fn preview_size(&self, width: u32, height: u32) -> (u32, u32) {
        let new_height = if self.viewport_height == 0 {
            self.default_height
        } else {
            self.viewport_height
        };
        let aspect = width as f64 / height as f64;
        let new_width = ((new_height as f64 * aspect) as u32).max(1);

        if new_width > self.max_width {
            let capped_height = ((self.max_width as f64 / aspect) as u32).clamp(1, new_height);
            tracing::debug!(
                "Preview width {} capped to {}, height {} -> {}",
                new_width,
                self.max_width,
                new_height,
                capped_height
            );
            return (self.max_width, capped_height);
        }

        (new_width, new_height)
    }

    /// Re-render the preview from the store's edited image
    ///
    /// Returns `None` (and clears the preview) when nothing is loaded.
    pub fn refresh(&mut self, store: &ImageStore) -> Option<&RgbImage> {
        self.preview = self.render(store);
        self.preview.as_ref()
    }

    /// Render a fresh preview without retaining it
    pub fn render(&self, store: &ImageStore) -> Option<RgbImage> {
        let edited = store.edited()?;
        let (src_width, src_height) = edited.dimensions();
        let (new_width, new_height) = self.preview_size(src_width, src_height);

        tracing::debug!(
            "Preview {}x{} -> {}x{} (viewport height {})",
            src_width,
            src_height,
            new_width,
            new_height,
            self.viewport_height
        );

        Some(imageops::resize(
            edited.as_rgb(),
            new_width,
            new_height,
            FilterType::Triangle,
        ))
    }

    /// The most recently rendered preview
    pub fn preview(&self) -> Option<&RgbImage> {
        self.preview.as_ref()
    }
}
