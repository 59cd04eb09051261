//! Mosaic effect: nearest-neighbour downsample, then upsample back.

use crate::error::{EditError, EditResult};
use crate::raster::{Raster, CHANNELS};

/// Size of the intermediate image for a given scale (each side at least 1).
pub fn pixelated_size(width: u32, height: u32, scale: f64) -> (u32, u32) {
    let w = ((width as f64 * scale).floor() as u32).max(1);
    let h = ((height as f64 * scale).floor() as u32).max(1);
    (w, h)
}

/// Pixelate a raster. `scale` must be in `(0, 1]`; smaller means blockier.
///
/// The output has the source dimensions and format.
pub fn apply_pixelate(raster: &Raster, scale: f64) -> EditResult<Raster> {
    if !(scale > 0.0 && scale <= 1.0) {
        return Err(EditError::invalid_parameter(format!(
            "pixelate scale must be in (0, 1], got {scale}"
        )));
    }

    let (width, height) = raster.dimensions();
    let (small_w, small_h) = pixelated_size(width, height, scale);
    if (small_w, small_h) == (width, height) {
        return Ok(raster.clone());
    }

    let small = sample_nearest(raster.pixels(), width, height, small_w, small_h);
    let pixels = sample_nearest(&small, small_w, small_h, width, height);
    Ok(Raster::from_pixels(width, height, pixels, raster.format()))
}

/// Nearest-neighbour resample: destination pixel `(x, y)` takes source pixel
/// `(x * src_w / dst_w, y * src_h / dst_h)`.
fn sample_nearest(src: &[u8], src_w: u32, src_h: u32, dst_w: u32, dst_h: u32) -> Vec<u8> {
    let mut output = Vec::with_capacity(dst_w as usize * dst_h as usize * CHANNELS);
    for y in 0..dst_h as u64 {
        let sy = (y * src_h as u64 / dst_h as u64) as usize;
        for x in 0..dst_w as u64 {
            let sx = (x * src_w as u64 / dst_w as u64) as usize;
            let idx = (sy * src_w as usize + sx) * CHANNELS;
            output.extend_from_slice(&src[idx..idx + CHANNELS]);
        }
    }
    output
}
