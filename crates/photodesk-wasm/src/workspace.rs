//! The editing workspace exposed to JavaScript.
//!
//! `JsWorkspace` owns a [`Registry`] and forwards every UI action to it.
//! Project ids cross the boundary as plain numbers; structured results
//! (metadata, enhancement outcomes) become plain JS objects through
//! `serde-wasm-bindgen`, and errors become `JsValue` strings.
//!
//! # Example
//!
//! ```typescript
//! import init, { JsWorkspace } from '@photodesk/wasm';
//!
//! await init();
//! const ws = new JsWorkspace(undefined);
//! const id = ws.import_bytes(new Uint8Array(await file.arrayBuffer()), file.name);
//! ws.resize(400, 300);
//! ws.rotate(90);
//! ws.undo();
//! const image = ws.current_image();
//! ```

use photodesk_core::advisor::Suggestion;
use photodesk_core::batch::convert_all;
use photodesk_core::filter::{FilterChain, FilterPreset};
use photodesk_core::transform::{pixel_dimension, AspectPreset, Color, CropRect, FlipAxis};
use photodesk_core::{
    EditError, EditResult, ImageFormat, ImportSource, ProjectId, Raster, Registry, RegistryConfig,
    Transform,
};
use wasm_bindgen::prelude::*;

use crate::types::{JsArtifact, JsConversion, JsRaster};

fn js_error(err: impl ToString) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn project_id(id: u32) -> ProjectId {
    ProjectId::from_raw(id as u64)
}

fn js_id(id: ProjectId) -> u32 {
    id.get() as u32
}

fn parse_format(format: &str) -> Result<ImageFormat, JsValue> {
    format.parse::<ImageFormat>().map_err(js_error)
}

/// A set of open images with per-image undo/redo.
#[wasm_bindgen]
pub struct JsWorkspace {
    registry: Registry,
}

#[wasm_bindgen]
impl JsWorkspace {
    /// Create a workspace. `config` may be `undefined` or a partial
    /// `RegistryConfig` object (camelCase keys).
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<JsWorkspace, JsValue> {
        let config = if config.is_undefined() || config.is_null() {
            RegistryConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config).map_err(js_error)?
        };
        Ok(Self::with_config(config))
    }

    // =========================================================================
    // Projects
    // =========================================================================

    /// Import a local file. Returns the new project id.
    pub fn import_bytes(&mut self, bytes: Vec<u8>, name: Option<String>) -> Result<u32, JsValue> {
        let (id, _) = self
            .registry
            .import(ImportSource::Bytes(bytes), name.as_deref())
            .map_err(js_error)?;
        Ok(js_id(id))
    }

    /// Import a payload fetched from `url`.
    pub fn import_fetched(
        &mut self,
        url: String,
        bytes: Vec<u8>,
        content_type: Option<String>,
    ) -> Result<u32, JsValue> {
        let source = ImportSource::Fetched {
            url,
            bytes,
            content_type,
        };
        let (id, _) = self.registry.import(source, None).map_err(js_error)?;
        Ok(js_id(id))
    }

    pub fn remove(&mut self, id: u32) -> Result<(), JsValue> {
        self.registry.remove(project_id(id)).map(drop).map_err(js_error)
    }

    pub fn set_active(&mut self, id: u32) -> Result<(), JsValue> {
        self.registry.set_active(project_id(id)).map_err(js_error)
    }

    #[wasm_bindgen(getter)]
    pub fn active_id(&self) -> Option<u32> {
        self.registry.active_id().map(js_id)
    }

    /// Ids in tab order.
    pub fn project_ids(&self) -> Vec<u32> {
        self.registry.projects().iter().map(|p| js_id(p.id())).collect()
    }

    #[wasm_bindgen(getter)]
    pub fn length(&self) -> usize {
        self.registry.len()
    }

    /// `ImageMetadata` of a project's current version as a plain object.
    pub fn metadata(&self, id: u32) -> Result<JsValue, JsValue> {
        let project = self.registry.get(project_id(id)).map_err(js_error)?;
        serde_wasm_bindgen::to_value(&project.image_metadata()).map_err(js_error)
    }

    pub fn clear(&mut self) {
        self.registry.clear();
    }

    // =========================================================================
    // Transforms on the active project
    // =========================================================================

    /// Apply a `Transform` given as a plain object, e.g.
    /// `{ kind: "rotate", degrees: 90 }`.
    pub fn apply(&mut self, transform: JsValue) -> Result<(), JsValue> {
        let transform: Transform = serde_wasm_bindgen::from_value(transform).map_err(js_error)?;
        self.apply_transform(&transform)
    }

    /// Crop to a pixel rectangle.
    pub fn crop(&mut self, x: i32, y: i32, width: u32, height: u32) -> Result<(), JsValue> {
        self.apply_transform(&Transform::Crop(CropRect::new(
            x as i64, y as i64, width, height,
        )))
    }

    /// Crop with normalized (0.0 to 1.0) coordinates.
    pub fn crop_normalized(
        &mut self,
        left: f64,
        top: f64,
        width: f64,
        height: f64,
    ) -> Result<(), JsValue> {
        let raster = self.active_raster()?;
        let rect =
            CropRect::from_normalized(left, top, width, height, raster.width(), raster.height());
        self.apply_transform(&Transform::Crop(rect))
    }

    /// Resize to exact dimensions. Values come straight from form inputs, so
    /// they are validated as positive integers.
    pub fn resize(&mut self, width: f64, height: f64) -> Result<(), JsValue> {
        let width = pixel_dimension(width).map_err(js_error)?;
        let height = pixel_dimension(height).map_err(js_error)?;
        self.apply_transform(&Transform::Resize { width, height })
    }

    /// Resize to `width` with the height taken from an aspect preset
    /// (`square`, `standard`, `widescreen`, `portrait`, `story`).
    pub fn resize_preset(&mut self, preset: JsValue, width: f64) -> Result<(), JsValue> {
        let preset: AspectPreset = serde_wasm_bindgen::from_value(preset).map_err(js_error)?;
        let width = pixel_dimension(width).map_err(js_error)?;
        self.apply_transform(&Transform::Resize {
            width,
            height: preset.height_for(width),
        })
    }

    /// Rotate by `degrees`, positive = clockwise.
    pub fn rotate(&mut self, degrees: f64) -> Result<(), JsValue> {
        self.apply_transform(&Transform::Rotate { degrees })
    }

    pub fn flip(&mut self, horizontal: bool) -> Result<(), JsValue> {
        let axis = if horizontal {
            FlipAxis::Horizontal
        } else {
            FlipAxis::Vertical
        };
        self.apply_transform(&Transform::Flip { axis })
    }

    /// Apply a CSS-style filter expression such as `"sepia(50%) contrast(110%)"`.
    pub fn filter(&mut self, expression: &str, format: Option<String>) -> Result<(), JsValue> {
        let chain: FilterChain = expression.parse().map_err(js_error)?;
        let format = format.as_deref().map(parse_format).transpose()?;
        self.apply_transform(&Transform::Filter { chain, format })
    }

    /// Apply a named filter preset (`vintage`, `noir`, ...).
    pub fn preset(&mut self, name: &str) -> Result<(), JsValue> {
        let preset: FilterPreset = name.parse().map_err(js_error)?;
        self.apply_transform(&Transform::Preset { preset })
    }

    pub fn grayscale(&mut self) -> Result<(), JsValue> {
        self.apply_transform(&Transform::Grayscale)
    }

    /// Re-encode at `quality` (0.0 to 1.0) as `format` (MIME type or extension).
    pub fn compress(&mut self, quality: f32, format: &str) -> Result<(), JsValue> {
        let format = parse_format(format)?;
        self.apply_transform(&Transform::Compress { quality, format })
    }

    /// Draw a border; `color` is a hex string like `#ffffff`.
    pub fn border(&mut self, color: &str, thickness_percent: f64) -> Result<(), JsValue> {
        let color: Color = color.parse().map_err(js_error)?;
        self.apply_transform(&Transform::Border {
            color,
            thickness_percent,
        })
    }

    pub fn pixelate(&mut self, scale: f64) -> Result<(), JsValue> {
        self.apply_transform(&Transform::Pixelate { scale })
    }

    /// Enhance using the advisor's JSON reply. Pass `undefined` when the
    /// request failed; the fixed fallback adjustment is applied instead.
    ///
    /// Returns `{ source, adjustments, review }`.
    pub fn enhance(&mut self, reply: Option<String>) -> Result<JsValue, JsValue> {
        let outcome = self.enhance_with_reply(reply).map_err(js_error)?;
        serde_wasm_bindgen::to_value(&outcome).map_err(js_error)
    }

    // =========================================================================
    // History
    // =========================================================================

    pub fn undo(&mut self) -> Result<(), JsValue> {
        self.registry.undo_active().map(drop).map_err(js_error)
    }

    pub fn redo(&mut self) -> Result<(), JsValue> {
        self.registry.redo_active().map(drop).map_err(js_error)
    }

    pub fn can_undo(&self) -> bool {
        self.registry
            .active()
            .is_some_and(|p| p.history().can_undo())
    }

    pub fn can_redo(&self) -> bool {
        self.registry
            .active()
            .is_some_and(|p| p.history().can_redo())
    }

    /// The most recent action labels of the active project, oldest first.
    pub fn history_labels(&self) -> Vec<String> {
        self.registry
            .active_id()
            .and_then(|id| self.registry.recent_actions(id).ok())
            .unwrap_or_default()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    // =========================================================================
    // Output
    // =========================================================================

    /// The active project's current raster.
    pub fn current_image(&self) -> Result<JsRaster, JsValue> {
        self.active_raster().map(JsRaster::from)
    }

    /// Tab-strip preview of a project.
    pub fn thumbnail(&self, id: u32) -> Result<JsRaster, JsValue> {
        let thumb = self.registry.thumbnail(project_id(id)).map_err(js_error)?;
        Ok(JsRaster::from(&thumb))
    }

    /// Export the active project. Omitted arguments use the configured defaults.
    pub fn export(
        &self,
        format: Option<String>,
        quality: Option<f32>,
    ) -> Result<JsArtifact, JsValue> {
        let format = format.as_deref().map(parse_format).transpose()?;
        self.registry
            .export_active(format, quality)
            .map(JsArtifact::from)
            .map_err(js_error)
    }

    /// Re-encode every project. Failed projects are reported, not thrown.
    pub fn convert_all(&self, format: &str, quality: f32) -> Result<Vec<JsConversion>, JsValue> {
        let format = parse_format(format)?;
        Ok(convert_all(&self.registry, format, quality)
            .into_iter()
            .map(|outcome| JsConversion::new(js_id(outcome.project), outcome.result))
            .collect())
    }
}

impl JsWorkspace {
    pub(crate) fn with_config(config: RegistryConfig) -> Self {
        Self {
            registry: Registry::with_config(config),
        }
    }

    fn apply_transform(&mut self, transform: &Transform) -> Result<(), JsValue> {
        self.registry
            .apply_transform(transform)
            .map(drop)
            .map_err(js_error)
    }

    fn active_raster(&self) -> Result<&Raster, JsValue> {
        self.registry
            .active()
            .map(|p| p.current_raster().as_ref())
            .ok_or_else(|| js_error(EditError::NoActiveProject))
    }

    fn enhance_with_reply(
        &mut self,
        reply: Option<String>,
    ) -> EditResult<photodesk_core::EnhanceOutcome> {
        let advisor = move |_: &Raster, _: ImageFormat| -> EditResult<Suggestion> {
            match &reply {
                Some(json) => Suggestion::from_json(json),
                None => Err(EditError::advisor_unavailable("no reply from advisor")),
            }
        };
        self.registry.enhance_active(&advisor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use photodesk_core::encode::encode_raster;
    use photodesk_core::EnhanceSource;

    fn png(width: u32, height: u32) -> Vec<u8> {
        let raster = Raster::filled(width, height, [120, 60, 200, 255]).unwrap();
        encode_raster(&raster, ImageFormat::Png, 1.0).unwrap()
    }

    fn workspace_with_image(width: u32, height: u32) -> (JsWorkspace, u32) {
        let mut ws = JsWorkspace::with_config(RegistryConfig::default());
        let id = ws
            .import_bytes(png(width, height), Some("pic.png".to_string()))
            .unwrap();
        (ws, id)
    }

    #[test]
    fn test_import_and_edit() {
        let (mut ws, id) = workspace_with_image(800, 600);
        assert_eq!(ws.active_id(), Some(id));
        assert_eq!(ws.length(), 1);

        ws.resize(400.0, 300.0).unwrap();
        ws.rotate(90.0).unwrap();
        let image = ws.current_image().unwrap();
        assert_eq!((image.width(), image.height()), (300, 400));

        ws.undo().unwrap();
        assert!(ws.can_redo());
        let image = ws.current_image().unwrap();
        assert_eq!((image.width(), image.height()), (400, 300));

        ws.grayscale().unwrap();
        assert!(!ws.can_redo());
        assert_eq!(
            ws.history_labels(),
            ["Original", "Resize 400×300", "Grayscale"]
        );
    }

    #[test]
    fn test_all_transforms() {
        let (mut ws, _) = workspace_with_image(40, 30);
        ws.crop(5, 5, 20, 10).unwrap();
        ws.crop_normalized(0.0, 0.0, 0.5, 1.0).unwrap();
        ws.flip(true).unwrap();
        ws.filter("sepia(50%) hue-rotate(30deg)", None).unwrap();
        ws.preset("vintage").unwrap();
        ws.compress(0.7, "image/jpeg").unwrap();
        ws.border("#fff", 10.0).unwrap();
        ws.pixelate(0.5).unwrap();

        let image = ws.current_image().unwrap();
        assert_eq!((image.width(), image.height()), (10, 10));
        assert_eq!(image.format(), "image/jpeg");
        assert_eq!(ws.history_labels().len(), 5);
        assert!(ws.can_undo());
    }

    #[test]
    fn test_export_and_convert() {
        let (mut ws, first) = workspace_with_image(16, 16);
        let second = ws
            .import_bytes(png(8, 8), Some("other.png".to_string()))
            .unwrap();

        ws.set_active(first).unwrap();
        let artifact = ws.export(Some("jpg".to_string()), Some(0.9)).unwrap();
        assert_eq!(artifact.filename(), "edited_pic.jpg");
        assert_eq!(artifact.mime_type(), "image/jpeg");

        let conversions = ws.convert_all("webp", 1.0).unwrap();
        assert_eq!(conversions.len(), 2);
        assert_eq!(conversions[1].project_id(), second);
        assert!(conversions.iter().all(JsConversion::ok));
    }

    #[test]
    fn test_thumbnail_and_remove() {
        let (mut ws, id) = workspace_with_image(512, 256);
        let thumb = ws.thumbnail(id).unwrap();
        assert_eq!((thumb.width(), thumb.height()), (256, 128));

        ws.remove(id).unwrap();
        assert_eq!(ws.active_id(), None);
        assert!(ws.project_ids().is_empty());
        assert!(ws.history_labels().is_empty());
    }

    #[test]
    fn test_enhance_fallback() {
        let (mut ws, _) = workspace_with_image(8, 8);
        let outcome = ws.enhance_with_reply(None).unwrap();
        assert_eq!(outcome.source, EnhanceSource::Fallback);
        assert_eq!(ws.history_labels().last().map(String::as_str), Some("Auto Enhance"));

        let reply = r#"{"aestheticReview":"Good","adjustments":{"brightness":100,"contrast":120,"saturation":100}}"#;
        let outcome = ws.enhance_with_reply(Some(reply.to_string())).unwrap();
        assert_eq!(outcome.source, EnhanceSource::Advisor);
    }
}
