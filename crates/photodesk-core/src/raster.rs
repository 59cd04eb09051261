//! Decoded raster buffers and the image formats they are tagged with.
//!
//! A [`Raster`] is the unit every transform consumes and produces. It is
//! immutable once built; versions and export snapshots share it through
//! `Arc<Raster>`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::decode::DecodeError;
use crate::error::EditError;

/// Number of bytes per pixel (RGBA8).
pub const CHANNELS: usize = 4;

/// Largest pixel count a transform may produce (256 megapixels, 1 GiB of RGBA).
pub const MAX_PIXELS: u64 = 1 << 28;

/// Reject output dimensions whose pixel count exceeds [`MAX_PIXELS`].
pub fn check_pixel_budget(width: u32, height: u32) -> Result<(), EditError> {
    match (width as u64).checked_mul(height as u64) {
        Some(pixels) if pixels <= MAX_PIXELS => Ok(()),
        _ => Err(EditError::InvalidParameter(format!(
            "{width}x{height} exceeds the {MAX_PIXELS} pixel limit"
        ))),
    }
}

/// Encoding a raster is tagged with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    /// Lossless, the default output of pixel transforms.
    #[default]
    Png,
    Jpeg,
    /// Lossless WebP (the only WebP encoder available to this runtime).
    WebP,
    /// Recognised on import, but this runtime has no AVIF encoder.
    Avif,
}

impl ImageFormat {
    /// MIME type, e.g. `image/png`.
    pub fn mime_type(self) -> &'static str {
        match self {
            ImageFormat::Png => "image/png",
            ImageFormat::Jpeg => "image/jpeg",
            ImageFormat::WebP => "image/webp",
            ImageFormat::Avif => "image/avif",
        }
    }

    /// Short display name, e.g. `JPEG`.
    pub fn name(self) -> &'static str {
        match self {
            ImageFormat::Png => "PNG",
            ImageFormat::Jpeg => "JPEG",
            ImageFormat::WebP => "WebP",
            ImageFormat::Avif => "AVIF",
        }
    }

    /// File extensions associated with this format, primary first.
    pub fn extensions(self) -> &'static [&'static str] {
        match self {
            ImageFormat::Png => &["png"],
            ImageFormat::Jpeg => &["jpg", "jpeg"],
            ImageFormat::WebP => &["webp"],
            ImageFormat::Avif => &["avif"],
        }
    }

    /// Extension used for exported file names.
    pub fn extension(self) -> &'static str {
        self.extensions()[0]
    }

    /// Whether the encoder for this format honours a quality setting.
    pub fn is_lossy(self) -> bool {
        matches!(self, ImageFormat::Jpeg | ImageFormat::Avif)
    }

    /// Look up a format by file extension (case-insensitive, no leading dot).
    pub fn from_extension(ext: &str) -> Option<Self> {
        let ext = ext.to_ascii_lowercase();
        [
            ImageFormat::Png,
            ImageFormat::Jpeg,
            ImageFormat::WebP,
            ImageFormat::Avif,
        ]
        .into_iter()
        .find(|format| format.extensions().contains(&ext.as_str()))
    }

    pub(crate) fn from_image_format(format: image::ImageFormat) -> Option<Self> {
        match format {
            image::ImageFormat::Png => Some(ImageFormat::Png),
            image::ImageFormat::Jpeg => Some(ImageFormat::Jpeg),
            image::ImageFormat::WebP => Some(ImageFormat::WebP),
            image::ImageFormat::Avif => Some(ImageFormat::Avif),
            _ => None,
        }
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mime_type())
    }
}

impl FromStr for ImageFormat {
    type Err = EditError;

    /// Accepts a MIME type (`image/jpeg`) or a bare extension (`jpg`).
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let lower = value.trim().to_ascii_lowercase();
        let ext = lower.strip_prefix("image/").unwrap_or(&lower);
        ImageFormat::from_extension(ext).ok_or_else(|| {
            EditError::InvalidParameter(format!("unsupported image format: {value}"))
        })
    }
}

/// A decoded RGBA image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    width: u32,
    height: u32,
    /// RGBA pixel data in row-major order (4 bytes per pixel).
    pixels: Vec<u8>,
    format: ImageFormat,
    /// Size of the asset this raster stands for: the encoded payload for
    /// imported and re-encoded rasters, the pixel buffer otherwise.
    byte_size: usize,
}

impl Raster {
    /// Build a raster from RGBA pixel data.
    ///
    /// Returns `InvalidParameter` if either dimension is zero or the buffer
    /// length is not `width * height * 4`.
    pub fn new(
        width: u32,
        height: u32,
        pixels: Vec<u8>,
        format: ImageFormat,
    ) -> Result<Self, EditError> {
        if width == 0 || height == 0 {
            return Err(EditError::InvalidParameter(format!(
                "raster dimensions must be non-zero, got {width}x{height}"
            )));
        }
        let expected = width as usize * height as usize * CHANNELS;
        if pixels.len() != expected {
            return Err(EditError::InvalidParameter(format!(
                "pixel buffer holds {} bytes, expected {expected}",
                pixels.len()
            )));
        }
        let byte_size = pixels.len();
        Ok(Self {
            width,
            height,
            pixels,
            format,
            byte_size,
        })
    }

    /// Build a raster of one solid colour.
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Result<Self, EditError> {
        let count = width as usize * height as usize;
        let pixels = rgba.iter().copied().cycle().take(count * CHANNELS).collect();
        Self::new(width, height, pixels, ImageFormat::Png)
    }

    /// Internal constructor for buffers whose length is known to match.
    pub(crate) fn from_pixels(width: u32, height: u32, pixels: Vec<u8>, format: ImageFormat) -> Self {
        debug_assert_eq!(
            pixels.len(),
            width as usize * height as usize * CHANNELS,
            "Pixel buffer size mismatch"
        );
        let byte_size = pixels.len();
        Self {
            width,
            height,
            pixels,
            format,
            byte_size,
        }
    }

    pub(crate) fn from_rgba_image(img: image::RgbaImage, format: ImageFormat) -> Self {
        let (width, height) = img.dimensions();
        let pixels = img.into_raw();
        let byte_size = pixels.len();
        Self {
            width,
            height,
            pixels,
            format,
            byte_size,
        }
    }

    /// Borrow the pixels as an `image` crate buffer without copying.
    pub(crate) fn as_rgba_image(
        &self,
    ) -> Result<image::ImageBuffer<image::Rgba<u8>, &[u8]>, EditError> {
        image::ImageBuffer::from_raw(self.width, self.height, self.pixels.as_slice()).ok_or_else(
            || {
                DecodeError::CorruptedFile("pixel buffer does not match dimensions".to_string())
                    .into()
            },
        )
    }

    pub(crate) fn with_byte_size(mut self, byte_size: usize) -> Self {
        self.byte_size = byte_size;
        self
    }

    pub(crate) fn with_format(mut self, format: ImageFormat) -> Self {
        self.format = format;
        self
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn format(&self) -> ImageFormat {
        self.format
    }

    pub fn byte_size(&self) -> usize {
        self.byte_size
    }

    /// RGBA value at `(x, y)`. Panics if out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let idx = (y as usize * self.width as usize + x as usize) * CHANNELS;
        [
            self.pixels[idx],
            self.pixels[idx + 1],
            self.pixels[idx + 2],
            self.pixels[idx + 3],
        ]
    }
}
