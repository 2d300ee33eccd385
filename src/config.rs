//! Configuration management for the photo editor.
//!
//! Handles loading, saving, and validating configuration from JSON files.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::image_proc::DecodeLimits;
use crate::image_proc::export::DEFAULT_JPEG_QUALITY;
use crate::image_proc::render::DEFAULT_PREVIEW_HEIGHT;

/// Default configuration file name, looked up in the working directory
pub const DEFAULT_CONFIG_PATH: &str = "photo-edit.json";

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config JSON: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Preview height used when the viewport reports zero height
    #[serde(default = "default_preview_height")]
    pub preview_height: u32,

    /// JPEG quality for the advice payload (1-100)
    #[serde(default = "default_jpeg_quality")]
    pub jpeg_quality: u8,

    /// Largest image width accepted on load
    #[serde(default = "default_max_dimension")]
    pub max_width: u32,

    /// Largest image height accepted on load
    #[serde(default = "default_max_dimension")]
    pub max_height: u32,
}

fn default_preview_height() -> u32 {
    DEFAULT_PREVIEW_HEIGHT
}

fn default_jpeg_quality() -> u8 {
    DEFAULT_JPEG_QUALITY
}

fn default_max_dimension() -> u32 {
    16384
}

impl Default for Config {
    fn default() -> Self {
        Self {
            preview_height: default_preview_height(),
            jpeg_quality: default_jpeg_quality(),
            max_width: default_max_dimension(),
            max_height: default_max_dimension(),
        }
    }
}

impl Config {
    /// Load configuration from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from `path`, or return the defaults if that fails
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        Self::load(path).unwrap_or_else(|e| {
            tracing::warn!("Failed to load config from {}: {}", path.display(), e);
            tracing::info!("Using default configuration");
            Self::default()
        })
    }

    /// Save configuration to a JSON file atomically
    ///
    /// Writes to a temporary file first and renames it over the target, so
    /// the file is either the old or the new version, never a partial one.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let content = serde_json::to_string_pretty(self)?;

        let tmp_path = path.with_extension("json.tmp");
        std::fs::write(&tmp_path, &content)?;

        std::fs::rename(&tmp_path, path).map_err(|e| {
            let _ = std::fs::remove_file(&tmp_path);
            ConfigError::ReadError(e)
        })?;

        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.preview_height == 0 || self.preview_height > 10000 {
            return Err(ConfigError::ValidationError(
                "preview_height must be between 1 and 10000".to_string(),
            ));
        }

        if !(1..=100).contains(&self.jpeg_quality) {
            return Err(ConfigError::ValidationError(
                "jpeg_quality must be between 1 and 100".to_string(),
            ));
        }

        if self.max_width == 0 || self.max_height == 0 {
            return Err(ConfigError::ValidationError(
                "max_width and max_height must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Decode limits derived from this configuration
    pub fn decode_limits(&self) -> DecodeLimits {
        DecodeLimits {
            max_width: self.max_width,
            max_height: self.max_height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        Config::default().validate().unwrap();
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config: Config = serde_json::from_str(r#"{"jpeg_quality": 90}"#).unwrap();
        assert_eq!(config.jpeg_quality, 90);
        assert_eq!(config.preview_height, 500);
        assert_eq!(config.max_width, 16384);
    }

    #[test]
    fn test_validation_rejects_bad_quality() {
        let config = Config {
            jpeg_quality: 0,
            ..Config::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        let config = Config {
            preview_height: 720,
            jpeg_quality: 90,
            ..Config::default()
        };
        config.save(&path).unwrap();
        assert_eq!(Config::load(&path).unwrap(), config);
        assert!(!dir.path().join("config.json.tmp").exists());
    }

    #[test]
    fn test_load_or_default_on_missing_file() {
        let config = Config::load_or_default("/nonexistent/photo-edit.json");
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_rejects_invalid_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"preview_height": 0}"#).unwrap();
        assert!(matches!(
            Config::load(&path),
            Err(ConfigError::ValidationError(_))
        ));
    }
}
