//! Image decoding with format sniffing and EXIF orientation handling.

use std::io::Cursor;

use exif::{In, Reader, Tag};
use image::{DynamicImage, ImageReader};

use super::{DecodeError, Orientation};
use crate::raster::{ImageFormat, Raster};

/// Detect the encoding of an image payload from its magic bytes.
///
/// # Errors
///
/// Returns `DecodeError::NotAnImage` for empty or unrecognised payloads, and
/// `DecodeError::UnsupportedFormat` for images this runtime cannot decode.
pub fn sniff_format(bytes: &[u8]) -> Result<ImageFormat, DecodeError> {
    if bytes.is_empty() {
        return Err(DecodeError::NotAnImage);
    }

    let detected = image::guess_format(bytes).map_err(|_| DecodeError::NotAnImage)?;
    match ImageFormat::from_image_format(detected) {
        Some(ImageFormat::Avif) | None => {
            Err(DecodeError::UnsupportedFormat(format!("{detected:?}")))
        }
        Some(format) => Ok(format),
    }
}

/// Decode an image payload into an RGBA raster, applying EXIF orientation.
///
/// The returned raster is tagged with the detected format and its
/// `byte_size` is the payload length.
///
/// # Errors
///
/// Returns `DecodeError::NotAnImage` if the bytes are not an image.
/// Returns `DecodeError::CorruptedFile` if the image is corrupted.
pub fn decode_image(bytes: &[u8]) -> Result<Raster, DecodeError> {
    let format = sniff_format(bytes)?;

    // Extract EXIF orientation before decoding
    let orientation = extract_orientation(bytes);
    let img = decode_dynamic(bytes, format)?;
    let oriented_img = apply_orientation(img, orientation);

    Ok(Raster::from_rgba_image(oriented_img.into_rgba8(), format).with_byte_size(bytes.len()))
}

/// Decode an image payload without applying EXIF orientation.
pub fn decode_image_no_orientation(bytes: &[u8]) -> Result<Raster, DecodeError> {
    let format = sniff_format(bytes)?;
    let img = decode_dynamic(bytes, format)?;
    Ok(Raster::from_rgba_image(img.into_rgba8(), format).with_byte_size(bytes.len()))
}

fn decode_dynamic(bytes: &[u8], format: ImageFormat) -> Result<DynamicImage, DecodeError> {
    let image_format = match format {
        ImageFormat::Png => image::ImageFormat::Png,
        ImageFormat::Jpeg => image::ImageFormat::Jpeg,
        ImageFormat::WebP => image::ImageFormat::WebP,
        ImageFormat::Avif => return Err(DecodeError::UnsupportedFormat(format.to_string())),
    };

    let mut reader = ImageReader::new(Cursor::new(bytes));
    reader.set_format(image_format);
    reader
        .decode()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))
}

/// Extract EXIF orientation from image bytes.
///
/// Returns `Orientation::Normal` if no EXIF data is found or orientation
/// cannot be determined.
fn extract_orientation(bytes: &[u8]) -> Orientation {
    let exif_reader = Reader::new();
    let mut cursor = Cursor::new(bytes);

    match exif_reader.read_from_container(&mut cursor) {
        Ok(exif) => exif
            .get_field(Tag::Orientation, In::PRIMARY)
            .and_then(|field| field.value.get_uint(0))
            .map(Orientation::from)
            .unwrap_or_default(),
        Err(_) => Orientation::Normal,
    }
}

/// Apply EXIF orientation transformation to an image.
fn apply_orientation(img: DynamicImage, orientation: Orientation) -> DynamicImage {
    match orientation {
        Orientation::Normal => img,
        Orientation::FlipHorizontal => img.fliph(),
        Orientation::Rotate180 => img.rotate180(),
        Orientation::FlipVertical => img.flipv(),
        Orientation::Transpose => img.rotate90().fliph(),
        Orientation::Rotate90CW => img.rotate90(),
        Orientation::Transverse => img.rotate270().fliph(),
        Orientation::Rotate270CW => img.rotate270(),
    }
}
