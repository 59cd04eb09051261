//! Registry configuration.
//!
//! Deserialized from whatever the host application stores; every field has
//! a default, so a partial object (or `{}`) is a valid config.

use serde::{Deserialize, Serialize};

use crate::raster::ImageFormat;

/// Settings for a [`Registry`](crate::Registry).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RegistryConfig {
    /// Make each newly imported project the active one.
    pub activate_on_import: bool,
    /// Format used by `export_active` when the caller does not pick one.
    pub export_format: ImageFormat,
    /// Quality (0.0 to 1.0) for lossy exports.
    pub export_quality: f32,
    /// Longest edge of tab-strip thumbnails.
    pub thumbnail_size: u32,
    /// How many action labels the history panel shows.
    pub history_preview_len: usize,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            activate_on_import: true,
            export_format: ImageFormat::Png,
            export_quality: 0.92,
            thumbnail_size: 256,
            history_preview_len: 5,
        }
    }
}

impl RegistryConfig {
    pub fn new() -> Self {
        Self::default()
    }
}
