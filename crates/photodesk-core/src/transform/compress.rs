//! Re-encode a raster so lossy artifacts become part of the image.

use crate::decode::decode_image_no_orientation;
use crate::encode::encode_raster;
use crate::error::{EditError, EditResult};
use crate::raster::{ImageFormat, Raster};

/// Check a normalized quality value.
pub fn validate_quality(quality: f32) -> EditResult<f32> {
    if !(0.0..=1.0).contains(&quality) {
        return Err(EditError::invalid_parameter(format!(
            "quality must be between 0 and 1, got {quality}"
        )));
    }
    Ok(quality)
}

/// Encode `raster` as `format` at `quality`, then decode the result.
///
/// The returned raster carries the decoded pixels, `format`, and the encoded
/// length as its `byte_size`. Lossless formats ignore `quality`, but it is
/// still validated.
///
/// # Errors
///
/// - `InvalidParameter` if `quality` is outside `[0, 1]` or NaN
/// - `EncodeFailure` if `format` has no encoder in this runtime
pub fn apply_compress(raster: &Raster, quality: f32, format: ImageFormat) -> EditResult<Raster> {
    let quality = validate_quality(quality)?;
    let encoded = encode_raster(raster, format, quality)?;
    let decoded = decode_image_no_orientation(&encoded)?;

    Ok(decoded.with_format(format).with_byte_size(encoded.len()))
}
