//! Image encoding for re-encode transforms and export.
//!
//! This module provides functionality for:
//! - Encoding rasters to PNG, JPEG (configurable quality) and lossless WebP
//! - Reporting formats this runtime cannot encode
//!
//! # Examples
//!
//! ```ignore
//! use photodesk_core::encode::encode_raster;
//! use photodesk_core::{ImageFormat, Raster};
//!
//! let raster = Raster::filled(100, 100, [128, 128, 128, 255]).unwrap();
//! let jpeg_bytes = encode_raster(&raster, ImageFormat::Jpeg, 0.9).unwrap();
//! println!("Encoded {} bytes", jpeg_bytes.len());
//! ```

mod codec;

pub use codec::{encode_raster, encode_rgba, jpeg_quality, EncodeError};
