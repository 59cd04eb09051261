//! Serializable description of a single edit.
//!
//! The UI sends edits as [`Transform`] values (usually JSON); the registry
//! applies them to the active project and records [`Transform::label`] in
//! the history.

use serde::{Deserialize, Serialize};

use super::{
    apply_border, apply_compress, apply_crop, apply_flip, apply_pixelate, apply_resize,
    apply_rotation, Color, CropRect, FlipAxis,
};
use crate::error::EditResult;
use crate::filter::{apply_filter, apply_grayscale, FilterChain, FilterPreset};
use crate::raster::{ImageFormat, Raster};

/// One transform and its parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Transform {
    Crop(CropRect),
    Resize {
        width: u32,
        height: u32,
    },
    /// Degrees, positive = clockwise.
    Rotate {
        degrees: f64,
    },
    Flip {
        axis: FlipAxis,
    },
    /// Custom filter chain, optionally re-tagged with an output format.
    Filter {
        chain: FilterChain,
        #[serde(default)]
        format: Option<ImageFormat>,
    },
    Preset {
        preset: FilterPreset,
    },
    Grayscale,
    Compress {
        quality: f32,
        format: ImageFormat,
    },
    Border {
        color: Color,
        thickness_percent: f64,
    },
    Pixelate {
        scale: f64,
    },
}

impl Transform {
    /// Run the transform on `raster`.
    pub fn apply(&self, raster: &Raster) -> EditResult<Raster> {
        match self {
            Transform::Crop(rect) => Ok(apply_crop(raster, *rect)),
            Transform::Resize { width, height } => apply_resize(raster, *width, *height),
            Transform::Rotate { degrees } => apply_rotation(raster, *degrees),
            Transform::Flip { axis } => apply_flip(raster, *axis),
            Transform::Filter { chain, format } => apply_filter(raster, chain, *format),
            Transform::Preset { preset } => apply_filter(raster, &preset.chain(), None),
            Transform::Grayscale => apply_grayscale(raster),
            Transform::Compress { quality, format } => apply_compress(raster, *quality, *format),
            Transform::Border {
                color,
                thickness_percent,
            } => apply_border(raster, *color, *thickness_percent),
            Transform::Pixelate { scale } => apply_pixelate(raster, *scale),
        }
    }

    /// Action label shown in the history panel for an edit of `source`.
    ///
    /// Crops report the size actually kept after clamping to `source`.
    pub fn label(&self, source: &Raster) -> String {
        match self {
            Transform::Crop(rect) => {
                let (_, _, width, height) = rect.clamp_to(source.width(), source.height());
                format!("Crop {width}×{height}")
            }
            Transform::Resize { width, height } => format!("Resize {width}×{height}"),
            Transform::Rotate { degrees } => format!("Rotate {degrees}°"),
            Transform::Flip { axis } => match axis {
                FlipAxis::Horizontal => "Flip Horizontal".to_string(),
                FlipAxis::Vertical => "Flip Vertical".to_string(),
            },
            Transform::Filter { chain, .. } => format!("Filter: {chain}"),
            Transform::Preset { preset } => format!("Filter: {}", preset.name()),
            Transform::Grayscale => "Grayscale".to_string(),
            Transform::Compress { quality, format } if format.is_lossy() => {
                format!("Compress {} {}%", format.name(), (quality * 100.0).round())
            }
            Transform::Compress { format, .. } => format!("Compress {}", format.name()),
            Transform::Border {
                thickness_percent, ..
            } => format!("Border {thickness_percent}%"),
            Transform::Pixelate { scale } => format!("Pixelate {}%", (scale * 100.0).round()),
        }
    }
}
