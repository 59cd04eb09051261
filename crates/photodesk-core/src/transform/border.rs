//! Solid border stroked along the image edge.
//!
//! The stroke is centred on the boundary, so only half of the nominal
//! thickness lands inside the canvas.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{EditError, EditResult};
use crate::raster::{Raster, CHANNELS};

/// Straight-alpha RGBA colour, written as `#rgb`, `#rrggbb` or `#rrggbbaa`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Composite this colour over `dst` (source-over, straight alpha).
    fn blend_over(self, dst: &mut [u8]) {
        if self.a == 255 {
            dst.copy_from_slice(&[self.r, self.g, self.b, 255]);
            return;
        }

        let sa = self.a as f32 / 255.0;
        let da = dst[3] as f32 / 255.0;
        let out_a = sa + da * (1.0 - sa);
        if out_a <= 0.0 {
            dst.copy_from_slice(&[0, 0, 0, 0]);
            return;
        }

        for (channel, src) in dst.iter_mut().take(3).zip([self.r, self.g, self.b]) {
            let value = (src as f32 * sa + *channel as f32 * da * (1.0 - sa)) / out_a;
            *channel = value.round().clamp(0.0, 255.0) as u8;
        }
        dst[3] = (out_a * 255.0).round() as u8;
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)?;
        if self.a != 255 {
            write!(f, "{:02x}", self.a)?;
        }
        Ok(())
    }
}

impl FromStr for Color {
    type Err = EditError;

    fn from_str(value: &str) -> EditResult<Self> {
        let invalid = || EditError::invalid_parameter(format!("invalid colour: {value:?}"));

        let hex = value.trim().strip_prefix('#').ok_or_else(invalid)?;
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        let digits: Vec<u8> = hex
            .chars()
            .filter_map(|c| c.to_digit(16))
            .map(|d| d as u8)
            .collect();

        match digits.as_slice() {
            &[r, g, b] => Ok(Color::rgb(r * 17, g * 17, b * 17)),
            &[r1, r0, g1, g0, b1, b0] => Ok(Color::rgb(r1 * 16 + r0, g1 * 16 + g0, b1 * 16 + b0)),
            &[r1, r0, g1, g0, b1, b0, a1, a0] => Ok(Color::rgba(
                r1 * 16 + r0,
                g1 * 16 + g0,
                b1 * 16 + b0,
                a1 * 16 + a0,
            )),
            _ => Err(invalid()),
        }
    }
}

impl TryFrom<String> for Color {
    type Error = EditError;

    fn try_from(value: String) -> EditResult<Self> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

/// Pixels drawn inside the image for a border of `thickness_percent`.
///
/// Nominal thickness is `min(width, height) * pct / 100`; half of it is inside.
pub fn border_inset(width: u32, height: u32, thickness_percent: f64) -> u32 {
    let thickness = width.min(height) as f64 * thickness_percent / 100.0;
    (thickness / 2.0).round() as u32
}

/// Draw a border of `color` around `raster`.
///
/// Dimensions and format are unchanged.
///
/// # Errors
///
/// Returns `InvalidParameter` for negative or non-finite thickness.
pub fn apply_border(raster: &Raster, color: Color, thickness_percent: f64) -> EditResult<Raster> {
    if !thickness_percent.is_finite() || thickness_percent < 0.0 {
        return Err(EditError::invalid_parameter(format!(
            "border thickness must be a non-negative percentage, got {thickness_percent}"
        )));
    }

    let (width, height) = raster.dimensions();
    let inset = border_inset(width, height, thickness_percent);
    if inset == 0 {
        return Ok(raster.clone());
    }

    let mut pixels = raster.pixels().to_vec();
    for (i, px) in pixels.chunks_exact_mut(CHANNELS).enumerate() {
        let x = (i % width as usize) as u32;
        let y = (i / width as usize) as u32;
        let on_stroke = x < inset
            || y < inset
            || x >= width.saturating_sub(inset)
            || y >= height.saturating_sub(inset);
        if on_stroke {
            color.blend_over(px);
        }
    }

    Ok(Raster::from_pixels(width, height, pixels, raster.format()))
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: The same input, colour and thickness always produce the same raster.
        #[test]
        fn prop_border_is_deterministic(
            (w, h) in (1u32..=40, 1u32..=40),
            (r, g, b, a) in (any::<u8>(), any::<u8>(), any::<u8>(), any::<u8>()),
            thickness in 0.0f64..=100.0,
        ) {
            let img = Raster::filled(w, h, [40, 90, 160, 200]).unwrap();
            let color = Color::rgba(r, g, b, a);
            prop_assert_eq!(
                apply_border(&img, color, thickness).unwrap(),
                apply_border(&img, color, thickness).unwrap()
            );
        }
    }
}
