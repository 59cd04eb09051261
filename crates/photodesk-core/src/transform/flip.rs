//! Mirror an image along one axis.

use image::imageops;
use serde::{Deserialize, Serialize};

use crate::error::EditResult;
use crate::raster::Raster;

/// Axis to mirror across.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlipAxis {
    /// Mirror left to right.
    Horizontal,
    /// Mirror top to bottom.
    Vertical,
}

/// Flip a raster. Dimensions and format are unchanged.
pub fn apply_flip(raster: &Raster, axis: FlipAxis) -> EditResult<Raster> {
    let view = raster.as_rgba_image()?;
    let flipped = match axis {
        FlipAxis::Horizontal => imageops::flip_horizontal(&view),
        FlipAxis::Vertical => imageops::flip_vertical(&view),
    };
    Ok(Raster::from_rgba_image(flipped, raster.format()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::ImageFormat;

    /// 2x2 image: red, green / blue, white
    fn quad() -> Raster {
        let pixels = vec![
            255, 0, 0, 255, 0, 255, 0, 255, //
            0, 0, 255, 255, 255, 255, 255, 255,
        ];
        Raster::new(2, 2, pixels, ImageFormat::Png).unwrap()
    }

    #[test]
    fn test_flip_horizontal() {
        let result = apply_flip(&quad(), FlipAxis::Horizontal).unwrap();
        assert_eq!(result.dimensions(), (2, 2));
        assert_eq!(result.pixel(0, 0), [0, 255, 0, 255]);
        assert_eq!(result.pixel(1, 0), [255, 0, 0, 255]);
    }

    #[test]
    fn test_flip_vertical() {
        let result = apply_flip(&quad(), FlipAxis::Vertical).unwrap();
        assert_eq!(result.pixel(0, 0), [0, 0, 255, 255]);
        assert_eq!(result.pixel(0, 1), [255, 0, 0, 255]);
    }

    #[test]
    fn test_flip_twice_is_identity() {
        let img = quad();
        for axis in [FlipAxis::Horizontal, FlipAxis::Vertical] {
            let twice = apply_flip(&apply_flip(&img, axis).unwrap(), axis).unwrap();
            assert_eq!(twice, img);
        }
    }
}
