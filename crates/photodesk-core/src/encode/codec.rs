//! Raster encoding for re-encode transforms and export.
//!
//! PNG and WebP are written losslessly and ignore the quality setting; JPEG
//! maps the normalized quality (0.0 to 1.0) onto the encoder's 1-100 scale.

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::codecs::webp::WebPEncoder;
use image::{ExtendedColorType, ImageEncoder};
use thiserror::Error;

use crate::raster::{ImageFormat, Raster, CHANNELS};

/// Errors that can occur while encoding a raster.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// No encoder for this format is compiled into the runtime.
    #[error("No encoder available for {0}")]
    UnsupportedFormat(ImageFormat),

    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 4), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// The underlying encoder failed.
    #[error("Encoding failed: {0}")]
    EncodingFailed(String),
}

/// Map a normalized quality to the JPEG encoder scale.
///
/// Out-of-range values are clamped; NaN maps to the lowest quality.
pub fn jpeg_quality(quality: f32) -> u8 {
    if quality.is_nan() {
        return 1;
    }
    (quality.clamp(0.0, 1.0) * 100.0).round().clamp(1.0, 100.0) as u8
}

/// Encode a raster into `format`.
///
/// # Arguments
///
/// * `raster` - Source raster (RGBA)
/// * `format` - Target encoding
/// * `quality` - Normalized quality (0.0 to 1.0); ignored by lossless formats
///
/// # Errors
///
/// Returns `EncodeError::UnsupportedFormat` for formats without an encoder,
/// or `EncodeError::EncodingFailed` if the encoder rejects the data.
pub fn encode_raster(
    raster: &Raster,
    format: ImageFormat,
    quality: f32,
) -> Result<Vec<u8>, EncodeError> {
    encode_rgba(raster.pixels(), raster.width(), raster.height(), format, quality)
}

/// Encode raw RGBA pixel data into `format`.
pub fn encode_rgba(
    pixels: &[u8],
    width: u32,
    height: u32,
    format: ImageFormat,
    quality: f32,
) -> Result<Vec<u8>, EncodeError> {
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }

    let expected_len = (width as usize) * (height as usize) * CHANNELS;
    if pixels.len() != expected_len {
        return Err(EncodeError::InvalidPixelData {
            expected: expected_len,
            actual: pixels.len(),
        });
    }

    let mut buffer = Cursor::new(Vec::new());

    match format {
        ImageFormat::Png => PngEncoder::new(&mut buffer)
            .write_image(pixels, width, height, ExtendedColorType::Rgba8)
            .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?,
        ImageFormat::Jpeg => {
            // JPEG has no alpha channel; drop it like a canvas export does
            let rgb: Vec<u8> = pixels
                .chunks_exact(CHANNELS)
                .flat_map(|px| [px[0], px[1], px[2]])
                .collect();
            JpegEncoder::new_with_quality(&mut buffer, jpeg_quality(quality))
                .write_image(&rgb, width, height, ExtendedColorType::Rgb8)
                .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?
        }
        ImageFormat::WebP => WebPEncoder::new_lossless(&mut buffer)
            .write_image(pixels, width, height, ExtendedColorType::Rgba8)
            .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?,
        ImageFormat::Avif => return Err(EncodeError::UnsupportedFormat(format)),
    }

    Ok(buffer.into_inner())
}


// ============================================================================
// Property-Based Tests
// ============================================================================
