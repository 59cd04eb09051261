//! WASM-compatible wrapper types for rasters and export artifacts.
//!
//! These types copy data out of the core crate so JavaScript can hold them
//! independently of the workspace that produced them.

use photodesk_core::{ExportArtifact, Raster};
use wasm_bindgen::prelude::*;

/// A decoded RGBA image for JavaScript.
///
/// # Memory Management
///
/// The pixel data is stored in WASM memory. `pixels()` copies it into a
/// JavaScript `Uint8Array`, ready for `new ImageData(...)`.
#[wasm_bindgen]
pub struct JsRaster {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
    format: String,
    byte_size: usize,
}

#[wasm_bindgen]
impl JsRaster {
    /// Get the image width in pixels
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the image height in pixels
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// MIME type of the format this raster is tagged with
    #[wasm_bindgen(getter)]
    pub fn format(&self) -> String {
        self.format.clone()
    }

    /// Size in bytes shown to the user (encoded size where known)
    #[wasm_bindgen(getter)]
    pub fn byte_size(&self) -> usize {
        self.byte_size
    }

    /// Returns RGBA pixel data (4 bytes per pixel, row-major).
    ///
    /// Note: This creates a copy of the pixel data.
    pub fn pixels(&self) -> Vec<u8> {
        self.pixels.clone()
    }

    /// Explicitly free WASM memory.
    ///
    /// This is optional - wasm-bindgen's finalizer will handle cleanup automatically.
    pub fn free(self) {
        // Dropping self releases the memory
    }
}

impl From<&Raster> for JsRaster {
    fn from(raster: &Raster) -> Self {
        Self {
            width: raster.width(),
            height: raster.height(),
            pixels: raster.pixels().to_vec(),
            format: raster.format().mime_type().to_string(),
            byte_size: raster.byte_size(),
        }
    }
}

/// An encoded file ready for download.
#[wasm_bindgen]
pub struct JsArtifact {
    filename: String,
    mime_type: String,
    bytes: Vec<u8>,
}

#[wasm_bindgen]
impl JsArtifact {
    #[wasm_bindgen(getter)]
    pub fn filename(&self) -> String {
        self.filename.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn mime_type(&self) -> String {
        self.mime_type.clone()
    }

    /// Encoded bytes as a `Uint8Array`, e.g. for `new Blob([artifact.bytes()])`.
    pub fn bytes(&self) -> js_sys::Uint8Array {
        js_sys::Uint8Array::from(self.bytes.as_slice())
    }

    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.bytes.len()
    }
}

impl From<ExportArtifact> for JsArtifact {
    fn from(artifact: ExportArtifact) -> Self {
        Self {
            mime_type: artifact.mime_type().to_string(),
            filename: artifact.filename,
            bytes: artifact.bytes,
        }
    }
}

/// Outcome of converting one project in a batch.
#[wasm_bindgen]
pub struct JsConversion {
    project_id: u32,
    artifact: Option<JsArtifact>,
    error: Option<String>,
}

#[wasm_bindgen]
impl JsConversion {
    #[wasm_bindgen(getter)]
    pub fn project_id(&self) -> u32 {
        self.project_id
    }

    #[wasm_bindgen(getter)]
    pub fn ok(&self) -> bool {
        self.error.is_none()
    }

    /// Error message if this project failed.
    #[wasm_bindgen(getter)]
    pub fn error(&self) -> Option<String> {
        self.error.clone()
    }

    /// Take the artifact out of a successful conversion.
    pub fn take_artifact(&mut self) -> Option<JsArtifact> {
        self.artifact.take()
    }
}

impl JsConversion {
    pub(crate) fn new(project_id: u32, result: photodesk_core::EditResult<ExportArtifact>) -> Self {
        match result {
            Ok(artifact) => Self {
                project_id,
                artifact: Some(artifact.into()),
                error: None,
            },
            Err(err) => Self {
                project_id,
                artifact: None,
                error: Some(err.to_string()),
            },
        }
    }
}
