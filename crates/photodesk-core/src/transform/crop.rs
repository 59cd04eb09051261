//! Rectangular cropping in pixel coordinates.
//!
//! The requested rectangle `[x, x + width) × [y, y + height)` is intersected
//! with the source bounds. Parts outside the image are dropped silently
//! rather than reported as errors, and the result is never smaller than 1x1.
//!
//! # Example
//!
//! ```ignore
//! // Crop the center 50% of a 100x100 image
//! let cropped = apply_crop(&raster, CropRect::new(25, 25, 50, 50));
//! ```

use serde::{Deserialize, Serialize};

use crate::raster::Raster;

/// Crop rectangle in source pixel coordinates.
///
/// The origin may be negative; only the overlap with the image is kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CropRect {
    pub x: i64,
    pub y: i64,
    pub width: u32,
    pub height: u32,
}

impl CropRect {
    pub fn new(x: i64, y: i64, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Convert normalized coordinates (0.0 to 1.0, relative to the image
    /// dimensions) into a pixel rectangle.
    ///
    /// Values outside the unit range are clamped.
    pub fn from_normalized(
        left: f64,
        top: f64,
        width: f64,
        height: f64,
        image_width: u32,
        image_height: u32,
    ) -> Self {
        let src_w = image_width as f64;
        let src_h = image_height as f64;
        let clamp = |v: f64| if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) };

        Self {
            x: (clamp(left) * src_w).round() as i64,
            y: (clamp(top) * src_h).round() as i64,
            width: (clamp(width) * src_w).round() as u32,
            height: (clamp(height) * src_h).round() as u32,
        }
    }

    /// Intersect with a `width × height` image.
    ///
    /// Returns `(left, top, out_width, out_height)`, at least 1x1.
    pub fn clamp_to(&self, width: u32, height: u32) -> (u32, u32, u32, u32) {
        let (w, h) = (width as i64, height as i64);

        let left = self.x.clamp(0, w - 1);
        let top = self.y.clamp(0, h - 1);
        let right = self.x.saturating_add(self.width as i64).clamp(left + 1, w);
        let bottom = self.y.saturating_add(self.height as i64).clamp(top + 1, h);

        (
            left as u32,
            top as u32,
            (right - left) as u32,
            (bottom - top) as u32,
        )
    }
}

/// Crop a raster to `rect`.
///
/// The output keeps the source format tag.
///
/// # Behavior
///
/// - Parts of the rectangle beyond the image bounds are clamped away
/// - Minimum output dimension is 1x1 pixels
/// - A rectangle covering the whole image returns a pixel-identical copy
pub fn apply_crop(raster: &Raster, rect: CropRect) -> Raster {
    let (left, top, out_width, out_height) = rect.clamp_to(raster.width(), raster.height());

    // Fast path: full crop returns a clone
    if left == 0 && top == 0 && out_width == raster.width() && out_height == raster.height() {
        return raster.clone();
    }

    let width = raster.width() as usize;
    let row_bytes = out_width as usize * 4;
    let mut output = Vec::with_capacity(row_bytes * out_height as usize);

    // Copy pixel data row by row
    for y in top..top + out_height {
        let start = (y as usize * width + left as usize) * 4;
        output.extend_from_slice(&raster.pixels()[start..start + row_bytes]);
    }

    Raster::from_pixels(out_width, out_height, output, raster.format())
}


// ============================================================================
// Property-Based Tests
// ============================================================================
