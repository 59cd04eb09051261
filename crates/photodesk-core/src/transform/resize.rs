//! Resizing to explicit dimensions, aspect presets and thumbnails.
//!
//! [`apply_resize`] never preserves aspect ratio on its own; callers do the
//! ratio math first, e.g. with [`AspectPreset::height_for`].

use image::imageops::{self, FilterType};
use serde::{Deserialize, Serialize};

use crate::error::{EditError, EditResult};
use crate::raster::{check_pixel_budget, Raster};

/// Validate a dimension coming from an untyped caller (UI input, JSON).
///
/// Accepts only finite, positive whole numbers that fit in `u32`.
pub fn pixel_dimension(value: f64) -> EditResult<u32> {
    if !value.is_finite() || value.fract() != 0.0 || value <= 0.0 || value > u32::MAX as f64 {
        return Err(EditError::invalid_parameter(format!(
            "dimension must be a positive integer, got {value}"
        )));
    }
    Ok(value as u32)
}

/// Resize a raster to exactly `width × height` with Lanczos3 resampling.
///
/// # Errors
///
/// Returns `InvalidParameter` if either dimension is zero or the target
/// exceeds [`MAX_PIXELS`](crate::raster::MAX_PIXELS).
pub fn apply_resize(raster: &Raster, width: u32, height: u32) -> EditResult<Raster> {
    if width == 0 || height == 0 {
        return Err(EditError::invalid_parameter(format!(
            "resize target must be positive, got {width}x{height}"
        )));
    }
    check_pixel_budget(width, height)?;

    // Fast path: if dimensions match, just clone
    if raster.dimensions() == (width, height) {
        return Ok(raster.clone());
    }

    resample(raster, width, height, FilterType::Lanczos3)
}

fn resample(
    raster: &Raster,
    width: u32,
    height: u32,
    filter: FilterType,
) -> EditResult<Raster> {
    let view = raster.as_rgba_image()?;
    let resized = imageops::resize(&view, width, height, filter);
    Ok(Raster::from_rgba_image(resized, raster.format()))
}

/// Generate a preview that fits within `size × size`, preserving aspect
/// ratio. Images already smaller than `size` are returned unchanged.
pub fn generate_thumbnail(raster: &Raster, size: u32) -> EditResult<Raster> {
    if size == 0 {
        return Err(EditError::invalid_parameter("thumbnail size must be positive"));
    }

    let (src_width, src_height) = raster.dimensions();
    if src_width <= size && src_height <= size {
        return Ok(raster.clone());
    }

    let (new_width, new_height) = calculate_fit_dimensions(src_width, src_height, size);
    // Bilinear is a good balance of speed and quality for previews
    resample(raster, new_width, new_height, FilterType::Triangle)
}

/// Calculate dimensions to fit within max_edge while preserving aspect ratio.
fn calculate_fit_dimensions(width: u32, height: u32, max_edge: u32) -> (u32, u32) {
    let ratio = width as f64 / height as f64;

    if width >= height {
        let new_height = (max_edge as f64 / ratio).round() as u32;
        (max_edge, new_height.max(1))
    } else {
        let new_width = (max_edge as f64 * ratio).round() as u32;
        (new_width.max(1), max_edge)
    }
}

/// Fixed aspect ratios offered as resize presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AspectPreset {
    /// 1:1
    Square,
    /// 4:3
    Standard,
    /// 16:9
    Widescreen,
    /// 4:5
    Portrait,
    /// 9:16
    Story,
}

impl AspectPreset {
    /// `(width, height)` ratio terms.
    pub fn ratio(self) -> (u32, u32) {
        match self {
            AspectPreset::Square => (1, 1),
            AspectPreset::Standard => (4, 3),
            AspectPreset::Widescreen => (16, 9),
            AspectPreset::Portrait => (4, 5),
            AspectPreset::Story => (9, 16),
        }
    }

    /// Height matching `width` under this ratio (rounded, at least 1).
    pub fn height_for(self, width: u32) -> u32 {
        let (rw, rh) = self.ratio();
        ((width as f64 * rh as f64 / rw as f64).round() as u32).max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::ImageFormat;

    fn create_test_image(width: u32, height: u32) -> Raster {
        // Create a simple gradient image for testing
        let mut pixels = Vec::with_capacity((width * height * 4) as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.push(((x * 255) / width.max(1)) as u8);
                pixels.push(((y * 255) / height.max(1)) as u8);
                pixels.push(128);
                pixels.push(255);
            }
        }
        Raster::new(width, height, pixels, ImageFormat::Jpeg).unwrap()
    }

    #[test]
    fn test_resize_basic() {
        let img = create_test_image(100, 50);
        let resized = apply_resize(&img, 50, 25).unwrap();

        assert_eq!(resized.dimensions(), (50, 25));
        assert_eq!(resized.pixels().len(), 50 * 25 * 4);
        assert_eq!(resized.format(), ImageFormat::Jpeg);
    }

    #[test]
    fn test_resize_does_not_preserve_aspect() {
        let img = create_test_image(100, 50);
        let resized = apply_resize(&img, 30, 90).unwrap();
        assert_eq!(resized.dimensions(), (30, 90));
    }

    #[test]
    fn test_resize_same_dimensions() {
        let img = create_test_image(100, 50);
        let resized = apply_resize(&img, 100, 50).unwrap();
        assert_eq!(resized, img);
    }

    #[test]
    fn test_resize_zero_dimensions_error() {
        let img = create_test_image(100, 50);

        assert!(matches!(apply_resize(&img, 0, 50), Err(EditError::InvalidParameter(_))));
        assert!(matches!(apply_resize(&img, 50, 0), Err(EditError::InvalidParameter(_))));
    }

    #[test]
    fn test_resize_over_pixel_budget_error() {
        let img = create_test_image(4, 4);

        let result = apply_resize(&img, u32::MAX, u32::MAX);
        assert!(matches!(result, Err(EditError::InvalidParameter(_))));

        let width = pixel_dimension(4294967295.0).unwrap();
        assert!(apply_resize(&img, width, 2).is_err());
    }

    #[test]
    fn test_pixel_dimension_validation() {
        assert_eq!(pixel_dimension(400.0).unwrap(), 400);
        assert!(pixel_dimension(0.0).is_err());
        assert!(pixel_dimension(-5.0).is_err());
        assert!(pixel_dimension(10.5).is_err());
        assert!(pixel_dimension(f64::NAN).is_err());
        assert!(pixel_dimension(f64::INFINITY).is_err());
    }

    #[test]
    fn test_thumbnail_landscape() {
        let img = create_test_image(600, 400);
        let thumb = generate_thumbnail(&img, 256).unwrap();

        assert_eq!(thumb.dimensions(), (256, 171)); // 400 * (256/600) ≈ 171
    }

    #[test]
    fn test_thumbnail_portrait() {
        let img = create_test_image(400, 600);
        let thumb = generate_thumbnail(&img, 256).unwrap();

        assert_eq!(thumb.dimensions(), (171, 256));
    }

    #[test]
    fn test_thumbnail_small_image_not_upscaled() {
        let img = create_test_image(100, 50);
        let thumb = generate_thumbnail(&img, 256).unwrap();

        assert_eq!(thumb.dimensions(), (100, 50));
    }

    #[test]
    fn test_thumbnail_zero_size_error() {
        let img = create_test_image(10, 10);
        assert!(generate_thumbnail(&img, 0).is_err());
    }

    #[test]
    fn test_aspect_presets() {
        assert_eq!(AspectPreset::Square.height_for(500), 500);
        assert_eq!(AspectPreset::Standard.height_for(800), 600);
        assert_eq!(AspectPreset::Widescreen.height_for(1920), 1080);
        assert_eq!(AspectPreset::Portrait.height_for(1080), 1350);
        assert_eq!(AspectPreset::Story.height_for(1080), 1920);
        assert_eq!(AspectPreset::Widescreen.height_for(1), 1);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: Resize output is exactly the requested size.
        #[test]
        fn prop_resize_exact_dimensions(
            (src_w, src_h) in (1u32..=40, 1u32..=40),
            (dst_w, dst_h) in (1u32..=60, 1u32..=60),
        ) {
            let img = Raster::filled(src_w, src_h, [40, 80, 120, 255]).unwrap();
            let result = apply_resize(&img, dst_w, dst_h).unwrap();
            prop_assert_eq!(result.dimensions(), (dst_w, dst_h));
        }

        /// Property: Resizing is deterministic.
        #[test]
        fn prop_resize_is_deterministic(
            (src_w, src_h) in (1u32..=30, 1u32..=30),
            (dst_w, dst_h) in (1u32..=30, 1u32..=30),
        ) {
            let img = Raster::filled(src_w, src_h, [1, 100, 200, 255]).unwrap();
            prop_assert_eq!(
                apply_resize(&img, dst_w, dst_h).unwrap(),
                apply_resize(&img, dst_w, dst_h).unwrap()
            );
        }
    }
}
