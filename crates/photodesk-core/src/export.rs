//! Export artifacts: encoded bytes plus a download file name.

use std::path::Path;

use serde::Serialize;

use crate::encode::encode_raster;
use crate::error::EditResult;
use crate::raster::{ImageFormat, Raster};
use crate::transform::validate_quality;

/// File-name prefix for single-image exports.
pub const EDITED_PREFIX: &str = "edited";
/// File-name prefix for batch conversions.
pub const CONVERTED_PREFIX: &str = "converted";

/// An encoded image ready to hand to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportArtifact {
    pub filename: String,
    pub format: ImageFormat,
    #[serde(skip)]
    pub bytes: Vec<u8>,
}

impl ExportArtifact {
    pub fn mime_type(&self) -> &'static str {
        self.format.mime_type()
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// `<prefix>_<basename>.<ext>`, where `basename` is `original_name`
/// without directories or its last extension.
pub fn export_filename(prefix: &str, original_name: &str, format: ImageFormat) -> String {
    let stem = Path::new(original_name)
        .file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .unwrap_or("image");
    format!("{prefix}_{stem}.{}", format.extension())
}

/// Encode `raster` into an artifact named after `original_name`.
pub fn encode_artifact(
    raster: &Raster,
    original_name: &str,
    prefix: &str,
    format: ImageFormat,
    quality: f32,
) -> EditResult<ExportArtifact> {
    let quality = validate_quality(quality)?;
    let bytes = encode_raster(raster, format, quality)?;
    Ok(ExportArtifact {
        filename: export_filename(prefix, original_name, format),
        format,
        bytes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::sniff_format;
    use crate::error::EditError;

    #[test]
    fn test_export_filename() {
        assert_eq!(
            export_filename(EDITED_PREFIX, "beach.jpeg", ImageFormat::Png),
            "edited_beach.png"
        );
        assert_eq!(
            export_filename(CONVERTED_PREFIX, "a.b.png", ImageFormat::Jpeg),
            "converted_a.b.jpg"
        );
        assert_eq!(
            export_filename(EDITED_PREFIX, "photos/cat", ImageFormat::WebP),
            "edited_cat.webp"
        );
        assert_eq!(
            export_filename(EDITED_PREFIX, "", ImageFormat::Png),
            "edited_image.png"
        );
    }

    #[test]
    fn test_encode_artifact() {
        let raster = Raster::filled(6, 4, [10, 20, 30, 255]).unwrap();
        let artifact =
            encode_artifact(&raster, "sky.png", EDITED_PREFIX, ImageFormat::Jpeg, 0.8).unwrap();

        assert_eq!(artifact.filename, "edited_sky.jpg");
        assert_eq!(artifact.mime_type(), "image/jpeg");
        assert!(!artifact.is_empty());
        assert_eq!(sniff_format(&artifact.bytes).unwrap(), ImageFormat::Jpeg);
    }

    #[test]
    fn test_encode_artifact_errors() {
        let raster = Raster::filled(2, 2, [0, 0, 0, 255]).unwrap();
        assert!(matches!(
            encode_artifact(&raster, "x.png", EDITED_PREFIX, ImageFormat::Avif, 0.5),
            Err(EditError::EncodeFailure(_))
        ));
        assert!(matches!(
            encode_artifact(&raster, "x.png", EDITED_PREFIX, ImageFormat::Png, 2.0),
            Err(EditError::InvalidParameter(_))
        ));
    }
}
