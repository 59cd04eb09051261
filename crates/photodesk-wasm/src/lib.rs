//! Photodesk WASM - WebAssembly bindings for Photodesk
//!
//! This crate exposes the photodesk-core editing workspace to
//! JavaScript/TypeScript applications.
//!
//! # Module Structure
//!
//! - `workspace` - `JsWorkspace`: import, transforms, undo/redo, export, batch convert
//! - `types` - WASM-compatible wrapper types for rasters and export artifacts
//!
//! # Usage
//!
//! ```typescript
//! import init, { JsWorkspace } from '@photodesk/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//!
//! const ws = new JsWorkspace({ exportFormat: 'jpeg' });
//! ws.import_bytes(new Uint8Array(await file.arrayBuffer()), file.name);
//! ws.preset('vintage');
//! const artifact = ws.export();
//! ```

use wasm_bindgen::prelude::*;

mod types;
mod workspace;

// Re-export public types
pub use types::{JsArtifact, JsConversion, JsRaster};
pub use workspace::JsWorkspace;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    web_sys::console::debug_1(&JsValue::from_str(&format!(
        "photodesk-wasm {} ready",
        version()
    )));
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Names of the built-in filter presets, for populating a picker.
#[wasm_bindgen]
pub fn filter_presets() -> Vec<String> {
    photodesk_core::FilterPreset::ALL
        .iter()
        .map(|preset| preset.name().to_string())
        .collect()
}
