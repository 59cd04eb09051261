//! Image rotation about the centre with canvas expansion.
//!
//! Multiples of 90° are exact pixel permutations. Any other angle uses
//! inverse mapping: for each pixel in the output image we calculate which
//! source position lands there and sample it bilinearly. Output pixels that
//! map outside the source stay transparent.
//!
//! Angles are in degrees, positive = clockwise (y axis points down). For a
//! clockwise rotation by θ the inverse transform is:
//! ```text
//! src_x =  (dst_x - cx) * cos(θ) + (dst_y - cy) * sin(θ) + src_cx
//! src_y = -(dst_x - cx) * sin(θ) + (dst_y - cy) * cos(θ) + src_cy
//! ```

use image::imageops;

use crate::error::{EditError, EditResult};
use crate::raster::{check_pixel_budget, Raster, CHANNELS};

/// Angles closer than this to a multiple of 90° take the exact path.
const RIGHT_ANGLE_EPSILON: f64 = 0.001;

/// Compute the dimensions of the bounding box for a rotated image.
///
/// `width' = w·|cos θ| + h·|sin θ|`, `height' = w·|sin θ| + h·|cos θ|`,
/// rounded, at least 1x1.
///
/// # Example
///
/// ```
/// use photodesk_core::transform::compute_rotated_bounds;
///
/// // 90-degree rotation swaps dimensions
/// assert_eq!(compute_rotated_bounds(100, 50, 90.0), (50, 100));
///
/// // No rotation preserves dimensions
/// assert_eq!(compute_rotated_bounds(100, 50, 0.0), (100, 50));
/// ```
pub fn compute_rotated_bounds(width: u32, height: u32, angle_degrees: f64) -> (u32, u32) {
    match right_angle_turns(angle_degrees) {
        Some(0) | Some(2) => return (width, height),
        Some(_) => return (height, width),
        None => {}
    }

    let angle_rad = angle_degrees.to_radians();
    let cos = angle_rad.cos().abs();
    let sin = angle_rad.sin().abs();

    let w = width as f64;
    let h = height as f64;

    let new_w = (w * cos + h * sin).round() as u32;
    let new_h = (w * sin + h * cos).round() as u32;

    (new_w.max(1), new_h.max(1))
}

/// Number of clockwise quarter turns if `angle_degrees` is a multiple of 90°.
fn right_angle_turns(angle_degrees: f64) -> Option<u8> {
    let normalized = angle_degrees.rem_euclid(360.0);
    let turns = (normalized / 90.0).round();
    if (normalized - turns * 90.0).abs() < RIGHT_ANGLE_EPSILON {
        Some((turns as u8) % 4)
    } else {
        None
    }
}

/// Rotate a raster clockwise by `angle_degrees` around its centre.
///
/// The output canvas is expanded to the bounding box of the rotated image
/// (no clipping); uncovered areas are transparent. The output keeps the
/// source format tag.
///
/// # Errors
///
/// Returns `InvalidParameter` for a non-finite angle, or when the rotated
/// canvas would exceed [`MAX_PIXELS`](crate::raster::MAX_PIXELS).
pub fn apply_rotation(raster: &Raster, angle_degrees: f64) -> EditResult<Raster> {
    if !angle_degrees.is_finite() {
        return Err(EditError::invalid_parameter(format!(
            "rotation angle must be finite, got {angle_degrees}"
        )));
    }

    if let Some(turns) = right_angle_turns(angle_degrees) {
        let view = raster.as_rgba_image()?;
        let rotated = match turns {
            0 => return Ok(raster.clone()),
            1 => imageops::rotate90(&view),
            2 => imageops::rotate180(&view),
            _ => imageops::rotate270(&view),
        };
        return Ok(Raster::from_rgba_image(rotated, raster.format()));
    }

    let (dst_w, dst_h) = compute_rotated_bounds(raster.width(), raster.height(), angle_degrees);
    check_pixel_budget(dst_w, dst_h)?;

    Ok(rotate_arbitrary(raster, angle_degrees, dst_w, dst_h))
}

fn rotate_arbitrary(raster: &Raster, angle_degrees: f64, dst_w: u32, dst_h: u32) -> Raster {
    let (src_w, src_h) = (raster.width() as f64, raster.height() as f64);

    let angle_rad = angle_degrees.to_radians();
    let (sin, cos) = angle_rad.sin_cos();

    // Center of source and destination images
    let src_cx = src_w / 2.0;
    let src_cy = src_h / 2.0;
    let dst_cx = dst_w as f64 / 2.0;
    let dst_cy = dst_h as f64 / 2.0;

    let mut output = vec![0u8; dst_w as usize * dst_h as usize * CHANNELS];

    for dst_y in 0..dst_h {
        for dst_x in 0..dst_w {
            // Work on pixel centres
            let dx = dst_x as f64 + 0.5 - dst_cx;
            let dy = dst_y as f64 + 0.5 - dst_cy;

            let src_x = dx * cos + dy * sin + src_cx - 0.5;
            let src_y = -dx * sin + dy * cos + src_cy - 0.5;

            let dst_idx = (dst_y as usize * dst_w as usize + dst_x as usize) * CHANNELS;
            let pixel = sample_bilinear(raster, src_x, src_y);
            output[dst_idx..dst_idx + CHANNELS].copy_from_slice(&pixel);
        }
    }

    Raster::from_pixels(dst_w, dst_h, output, raster.format())
}

/// Fetch a pixel with premultiplied colour; outside the image is transparent.
#[inline]
fn premultiplied(raster: &Raster, px: i64, py: i64) -> [f64; 4] {
    if px < 0 || py < 0 || px >= raster.width() as i64 || py >= raster.height() as i64 {
        return [0.0; 4];
    }
    let [r, g, b, a] = raster.pixel(px as u32, py as u32);
    let alpha = a as f64 / 255.0;
    [r as f64 * alpha, g as f64 * alpha, b as f64 * alpha, a as f64]
}

/// Sample a pixel using bilinear interpolation over the 4 nearest pixels.
///
/// Colour is interpolated premultiplied so transparent neighbours don't
/// darken edges.
fn sample_bilinear(raster: &Raster, x: f64, y: f64) -> [u8; 4] {
    let x0 = x.floor() as i64;
    let y0 = y.floor() as i64;

    // Entirely outside, including the half-pixel fringe
    if x0 < -1 || y0 < -1 || x0 >= raster.width() as i64 || y0 >= raster.height() as i64 {
        return [0; 4];
    }

    // Fractional distances
    let fx = x - x0 as f64;
    let fy = y - y0 as f64;

    let p00 = premultiplied(raster, x0, y0);
    let p10 = premultiplied(raster, x0 + 1, y0);
    let p01 = premultiplied(raster, x0, y0 + 1);
    let p11 = premultiplied(raster, x0 + 1, y0 + 1);

    let mut acc = [0.0f64; 4];
    for i in 0..4 {
        acc[i] = p00[i] * (1.0 - fx) * (1.0 - fy)
            + p10[i] * fx * (1.0 - fy)
            + p01[i] * (1.0 - fx) * fy
            + p11[i] * fx * fy;
    }

    let alpha = acc[3];
    if alpha <= f64::EPSILON {
        return [0; 4];
    }
    let unpremultiply = 255.0 / alpha;
    [
        (acc[0] * unpremultiply).clamp(0.0, 255.0).round() as u8,
        (acc[1] * unpremultiply).clamp(0.0, 255.0).round() as u8,
        (acc[2] * unpremultiply).clamp(0.0, 255.0).round() as u8,
        alpha.clamp(0.0, 255.0).round() as u8,
    ]
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: Output dimensions match the computed bounding box.
        #[test]
        fn prop_output_matches_bounds(
            (width, height) in (1u32..=40, 1u32..=40),
            angle in -360.0f64..360.0,
        ) {
            let img = Raster::filled(width, height, [1, 2, 3, 255]).unwrap();
            let result = apply_rotation(&img, angle).unwrap();
            prop_assert_eq!(
                result.dimensions(),
                compute_rotated_bounds(width, height, angle)
            );
        }

        /// Property: Quarter turns swap dimensions exactly.
        #[test]
        fn prop_quarter_turn_swaps_dimensions(
            (width, height) in (1u32..=40, 1u32..=40),
            k in -3i32..=3,
        ) {
            let img = Raster::filled(width, height, [9, 9, 9, 255]).unwrap();
            let angle = 90.0 * (2 * k + 1) as f64;
            let result = apply_rotation(&img, angle).unwrap();
            prop_assert_eq!(result.dimensions(), (height, width));
        }

        /// Property: Rotation is deterministic.
        #[test]
        fn prop_rotation_is_deterministic(
            (width, height) in (1u32..=30, 1u32..=30),
            angle in -180.0f64..180.0,
        ) {
            let img = Raster::filled(width, height, [50, 60, 70, 255]).unwrap();
            prop_assert_eq!(apply_rotation(&img, angle).unwrap(), apply_rotation(&img, angle).unwrap());
        }
    }
}
