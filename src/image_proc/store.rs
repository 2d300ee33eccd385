//! Ownership of the source, grayscale cache and edited images.
//!
//! The store is the only holder of writable image buffers. Every mutator
//! leaves the edited image fully recomputed before returning, so callers can
//! never observe a half-applied pass.

use std::path::Path;

use super::decode::{self, DecodeLimits};
use super::engine;
use super::transform::{self, Flip};
use super::{EditError, EditParameters, ImageBuffer};

/// Images that exist once something has been loaded
#[derive(Debug)]
struct Loaded {
    original: ImageBuffer,
    /// Desaturated `original`, built on first use
    grayscale: Option<ImageBuffer>,
    edited: ImageBuffer,
}

/// Image state of one editing session
#[derive(Debug, Default)]
pub struct ImageStore {
    images: Option<Loaded>,
    params: EditParameters,
    /// Count of state transitions (loads and passes), for observers polling for changes
    revision: u64,
}

impl ImageStore {
    /// Create an empty store with default parameters
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the source image
    ///
    /// The edited image becomes a plain copy of the new source and the
    /// grayscale cache is dropped. Parameters are kept; they take effect on
    /// the next parameter change.
    pub fn load(&mut self, image: ImageBuffer) {
        let (width, height) = image.dimensions();
        tracing::info!("Loading {}x{} image", width, height);

        self.images = Some(Loaded {
            edited: image.clone(),
            original: image,
            grayscale: None,
        });
        self.revision += 1;
    }

    /// Decode `bytes` and load the result. On failure the store is unchanged.
    pub fn load_bytes(&mut self, bytes: &[u8], limits: &DecodeLimits) -> Result<(), EditError> {
        let image = decode::decode_bytes(bytes, limits)?;
        self.load(image);
        Ok(())
    }

    /// Decode the file at `path` and load it. On failure the store is unchanged.
    pub fn load_file<P: AsRef<Path>>(
        &mut self,
        path: P,
        limits: &DecodeLimits,
    ) -> Result<(), EditError> {
        let image = decode::decode_file(path, limits)?;
        self.load(image);
        Ok(())
    }

    pub fn is_loaded(&self) -> bool {
        self.images.is_some()
    }

    /// Width of the source image
    pub fn width(&self) -> Option<u32> {
        self.images.as_ref().map(|i| i.original.width())
    }

    /// Height of the source image
    pub fn height(&self) -> Option<u32> {
        self.images.as_ref().map(|i| i.original.height())
    }

    pub fn params(&self) -> &EditParameters {
        &self.params
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn original(&self) -> Option<&ImageBuffer> {
        self.images.as_ref().map(|i| &i.original)
    }

    pub fn edited(&self) -> Option<&ImageBuffer> {
        self.images.as_ref().map(|i| &i.edited)
    }

    pub fn grayscale_cache(&self) -> Option<&ImageBuffer> {
        self.images.as_ref().and_then(|i| i.grayscale.as_ref())
    }

    /// Mirror the source left to right, then re-render
    pub fn flip_horizontal(&mut self) -> Result<(), EditError> {
        self.flip(Flip::Horizontal)
    }

    /// Mirror the source top to bottom, then re-render
    pub fn flip_vertical(&mut self) -> Result<(), EditError> {
        self.flip(Flip::Vertical)
    }

    fn flip(&mut self, axis: Flip) -> Result<(), EditError> {
        let images = self.images.as_mut().ok_or(EditError::NoImage)?;
        tracing::debug!("Flipping source image: {:?}", axis);

        images.original = transform::flip(&images.original, axis);

        // Only refresh a cache that already exists
        if images.grayscale.is_some() {
            images.grayscale = Some(transform::desaturate(&images.original));
        }

        self.run_operations()
    }

    pub fn set_exposure(&mut self, factor: f32) -> Result<(), EditError> {
        self.params.exposure = factor;
        self.run_operations()
    }

    pub fn set_contrast(&mut self, offset: i32) -> Result<(), EditError> {
        self.params.contrast = offset;
        self.run_operations()
    }

    pub fn set_temperature(&mut self, delta: i32) -> Result<(), EditError> {
        self.params.temperature = delta;
        self.run_operations()
    }

    pub fn set_tint(&mut self, delta: i32) -> Result<(), EditError> {
        self.params.tint = delta;
        self.run_operations()
    }

    /// Switch between the color and the grayscale source
    pub fn toggle_grayscale(&mut self) -> Result<(), EditError> {
        self.params.grayscale = !self.params.grayscale;
        self.run_operations()
    }

    /// Replace every parameter at once, with a single pass
    pub fn set_params(&mut self, params: EditParameters) -> Result<(), EditError> {
        self.params = params;
        self.run_operations()
    }

    /// Recompute the edited image from the current source and parameters
    ///
    /// Parameters set before the first load are kept and simply not rendered.
    fn run_operations(&mut self) -> Result<(), EditError> {
        let Some(images) = self.images.as_mut() else {
            tracing::debug!("No image loaded, parameters stored without rendering");
            return Ok(());
        };

        if images.edited.dimensions() != images.original.dimensions() {
            return Err(EditError::DimensionMismatch {
                expected: images.original.dimensions(),
                actual: images.edited.dimensions(),
            });
        }

        let source: &ImageBuffer = if self.params.grayscale {
            images
                .grayscale
                .get_or_insert_with(|| transform::desaturate(&images.original))
        } else {
            &images.original
        };

        engine::apply(source, &self.params, &mut images.edited)?;
        self.revision += 1;
        Ok(())
    }
}
