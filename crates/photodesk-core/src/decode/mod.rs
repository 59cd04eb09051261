//! Image decoding for the import boundary.
//!
//! This module provides functionality for:
//! - Sniffing the format of an incoming payload and rejecting non-images
//! - Decoding PNG, JPEG and WebP payloads into RGBA rasters
//! - Applying EXIF orientation so imported photos display upright
//!
//! # Examples
//!
//! ```ignore
//! use photodesk_core::decode::decode_image;
//!
//! let bytes = std::fs::read("photo.jpg").unwrap();
//! let raster = decode_image(&bytes).unwrap();
//! println!("Decoded {}x{} image", raster.width(), raster.height());
//! ```

mod reader;
mod types;

pub use reader::{decode_image, decode_image_no_orientation, sniff_format};
pub use types::{DecodeError, ImageMetadata, Orientation};
