//! The transform library: pure `(raster, params) -> raster` operations.
//!
//! Every function here takes a source [`Raster`](crate::Raster) by reference
//! and returns a new one; nothing in this module knows about projects or
//! history. Tone operations (filters, grayscale) live in [`crate::filter`].
//!
//! # Coordinate System
//!
//! - Rotation angles are in degrees, positive = clockwise
//! - Crop coordinates are pixels; see [`CropRect::from_normalized`] for 0.0 to 1.0 input
//! - Origin is top-left corner

mod border;
mod compress;
mod crop;
mod descriptor;
mod flip;
mod pixelate;
mod resize;
mod rotation;

pub use border::{apply_border, border_inset, Color};
pub use compress::{apply_compress, validate_quality};
pub use crop::{apply_crop, CropRect};
pub use descriptor::Transform;
pub use flip::{apply_flip, FlipAxis};
pub use pixelate::{apply_pixelate, pixelated_size};
pub use resize::{apply_resize, generate_thumbnail, pixel_dimension, AspectPreset};
pub use rotation::{apply_rotation, compute_rotated_bounds};
