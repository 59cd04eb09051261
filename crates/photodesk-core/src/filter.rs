//! Filter/grade chains.
//!
//! A [`FilterChain`] is an ordered list of tone operations written in the
//! CSS filter notation the editor UI already speaks:
//!
//! ```text
//! sepia(50%) saturate(140%) contrast(110%)
//! ```
//!
//! Operations are applied left to right on every pixel; each operation's
//! output is clamped to the displayable range before the next one runs.
//! Alpha is never touched.
//!
//! ## Operations
//! - `brightness(a)`: multiply every channel by `a`
//! - `contrast(a)`: scale each channel away from mid-gray by `a`
//! - `saturate(a)`: luminance-preserving saturation matrix
//! - `grayscale(a)`, `sepia(a)`, `invert(a)`: blend toward the effect by `a` (0 to 1)
//! - `hue-rotate(θ)`: rotate hue by θ degrees

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{EditError, EditResult};
use crate::raster::{ImageFormat, Raster, CHANNELS};

/// ITU-R BT.709 luminance coefficients.
const LUMINANCE_R: f32 = 0.2126;
const LUMINANCE_G: f32 = 0.7152;
const LUMINANCE_B: f32 = 0.0722;

/// A single tone operation.
///
/// Amounts are multipliers (`1.0` = 100%) except `HueRotate`, which is in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", content = "amount", rename_all = "kebab-case")]
pub enum FilterOp {
    Brightness(f32),
    Contrast(f32),
    Saturate(f32),
    Grayscale(f32),
    Sepia(f32),
    Invert(f32),
    HueRotate(f32),
}

impl FilterOp {
    fn name(&self) -> &'static str {
        match self {
            FilterOp::Brightness(_) => "brightness",
            FilterOp::Contrast(_) => "contrast",
            FilterOp::Saturate(_) => "saturate",
            FilterOp::Grayscale(_) => "grayscale",
            FilterOp::Sepia(_) => "sepia",
            FilterOp::Invert(_) => "invert",
            FilterOp::HueRotate(_) => "hue-rotate",
        }
    }

    /// Check the amount lies in the operation's domain.
    fn validate(&self) -> EditResult<()> {
        let amount = match *self {
            FilterOp::Brightness(a)
            | FilterOp::Contrast(a)
            | FilterOp::Saturate(a)
            | FilterOp::Grayscale(a)
            | FilterOp::Sepia(a)
            | FilterOp::Invert(a) => a,
            FilterOp::HueRotate(deg) => {
                if !deg.is_finite() {
                    return Err(EditError::invalid_parameter(format!(
                        "hue-rotate angle must be finite, got {deg}"
                    )));
                }
                return Ok(());
            }
        };
        if !amount.is_finite() || amount < 0.0 {
            return Err(EditError::invalid_parameter(format!(
                "{} amount must be a non-negative number, got {amount}",
                self.name()
            )));
        }
        Ok(())
    }

    fn is_identity(&self) -> bool {
        match *self {
            FilterOp::Brightness(a) | FilterOp::Contrast(a) | FilterOp::Saturate(a) => a == 1.0,
            FilterOp::Grayscale(a) | FilterOp::Sepia(a) | FilterOp::Invert(a) => a == 0.0,
            FilterOp::HueRotate(deg) => deg % 360.0 == 0.0,
        }
    }

    /// Lower the operation to a per-pixel step.
    fn compile(&self) -> Step {
        match *self {
            FilterOp::Brightness(a) => Step::Linear { slope: a, offset: 0.0 },
            FilterOp::Contrast(a) => Step::Linear {
                slope: a,
                offset: 0.5 - 0.5 * a,
            },
            FilterOp::Invert(a) => {
                let a = a.min(1.0);
                Step::Linear {
                    slope: 1.0 - 2.0 * a,
                    offset: a,
                }
            }
            FilterOp::Saturate(s) => Step::Matrix(saturate_matrix(s)),
            FilterOp::Grayscale(a) => Step::Matrix(grayscale_matrix(1.0 - a.min(1.0))),
            FilterOp::Sepia(a) => Step::Matrix(sepia_matrix(1.0 - a.min(1.0))),
            FilterOp::HueRotate(deg) => Step::Matrix(hue_rotate_matrix(deg)),
        }
    }
}

impl fmt::Display for FilterOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            FilterOp::HueRotate(deg) => write!(f, "hue-rotate({deg}deg)"),
            FilterOp::Brightness(a)
            | FilterOp::Contrast(a)
            | FilterOp::Saturate(a)
            | FilterOp::Grayscale(a)
            | FilterOp::Sepia(a)
            | FilterOp::Invert(a) => write!(f, "{}({}%)", self.name(), (a * 100.0).round()),
        }
    }
}

/// Per-pixel form of a [`FilterOp`].
#[derive(Debug, Clone, Copy)]
enum Step {
    /// `c' = c * slope + offset` on each channel independently.
    Linear { slope: f32, offset: f32 },
    /// Row-major 3x3 colour matrix.
    Matrix([f32; 9]),
}

impl Step {
    #[inline]
    fn apply(&self, r: f32, g: f32, b: f32) -> (f32, f32, f32) {
        let (r, g, b) = match *self {
            Step::Linear { slope, offset } => {
                (r * slope + offset, g * slope + offset, b * slope + offset)
            }
            Step::Matrix(m) => (
                m[0] * r + m[1] * g + m[2] * b,
                m[3] * r + m[4] * g + m[5] * b,
                m[6] * r + m[7] * g + m[8] * b,
            ),
        };
        (r.clamp(0.0, 1.0), g.clamp(0.0, 1.0), b.clamp(0.0, 1.0))
    }
}

fn saturate_matrix(s: f32) -> [f32; 9] {
    [
        0.213 + 0.787 * s,
        0.715 - 0.715 * s,
        0.072 - 0.072 * s,
        0.213 - 0.213 * s,
        0.715 + 0.285 * s,
        0.072 - 0.072 * s,
        0.213 - 0.213 * s,
        0.715 - 0.715 * s,
        0.072 + 0.928 * s,
    ]
}

/// `g` is the remaining colour fraction (1 = untouched, 0 = fully gray).
fn grayscale_matrix(g: f32) -> [f32; 9] {
    [
        LUMINANCE_R + (1.0 - LUMINANCE_R) * g,
        LUMINANCE_G - LUMINANCE_G * g,
        LUMINANCE_B - LUMINANCE_B * g,
        LUMINANCE_R - LUMINANCE_R * g,
        LUMINANCE_G + (1.0 - LUMINANCE_G) * g,
        LUMINANCE_B - LUMINANCE_B * g,
        LUMINANCE_R - LUMINANCE_R * g,
        LUMINANCE_G - LUMINANCE_G * g,
        LUMINANCE_B + (1.0 - LUMINANCE_B) * g,
    ]
}

fn sepia_matrix(g: f32) -> [f32; 9] {
    [
        0.393 + 0.607 * g,
        0.769 - 0.769 * g,
        0.189 - 0.189 * g,
        0.349 - 0.349 * g,
        0.686 + 0.314 * g,
        0.168 - 0.168 * g,
        0.272 - 0.272 * g,
        0.534 - 0.534 * g,
        0.131 + 0.869 * g,
    ]
}

fn hue_rotate_matrix(degrees: f32) -> [f32; 9] {
    let (sin, cos) = degrees.to_radians().sin_cos();
    [
        0.213 + cos * 0.787 - sin * 0.213,
        0.715 - cos * 0.715 - sin * 0.715,
        0.072 - cos * 0.072 + sin * 0.928,
        0.213 - cos * 0.213 + sin * 0.143,
        0.715 + cos * 0.285 + sin * 0.140,
        0.072 - cos * 0.072 - sin * 0.283,
        0.213 - cos * 0.213 - sin * 0.787,
        0.715 - cos * 0.715 + sin * 0.715,
        0.072 + cos * 0.928 + sin * 0.072,
    ]
}

/// An ordered, composable list of tone operations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterChain {
    ops: Vec<FilterOp>,
}

impl FilterChain {
    pub fn new(ops: Vec<FilterOp>) -> Self {
        Self { ops }
    }

    /// The fixed achromatic chain used by the grayscale transform.
    pub fn grayscale() -> Self {
        Self::new(vec![FilterOp::Grayscale(1.0)])
    }

    /// Brightness, contrast and saturation given as percentages (100 = unchanged).
    pub fn from_percentages(brightness: f32, contrast: f32, saturation: f32) -> Self {
        Self::new(vec![
            FilterOp::Brightness(brightness / 100.0),
            FilterOp::Contrast(contrast / 100.0),
            FilterOp::Saturate(saturation / 100.0),
        ])
    }

    /// Look up a named preset (case-insensitive).
    pub fn preset(name: &str) -> EditResult<Self> {
        FilterPreset::from_str(name).map(FilterPreset::chain)
    }

    pub fn ops(&self) -> &[FilterOp] {
        &self.ops
    }

    pub fn is_identity(&self) -> bool {
        self.ops.iter().all(FilterOp::is_identity)
    }

    pub fn validate(&self) -> EditResult<()> {
        self.ops.iter().try_for_each(FilterOp::validate)
    }
}

impl fmt::Display for FilterChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.ops.is_empty() {
            return f.write_str("none");
        }
        for (i, op) in self.ops.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{op}")?;
        }
        Ok(())
    }
}

impl FromStr for FilterChain {
    type Err = EditError;

    /// Parse a CSS-style filter expression such as `sepia(50%) contrast(1.1)`.
    ///
    /// `none` and the empty string parse to the identity chain.
    fn from_str(expression: &str) -> EditResult<Self> {
        let expression = expression.trim();
        if expression.is_empty() || expression.eq_ignore_ascii_case("none") {
            return Ok(Self::default());
        }

        let mut ops = Vec::new();
        let mut rest = expression;
        while !rest.is_empty() {
            let open = rest.find('(').ok_or_else(|| {
                EditError::invalid_parameter(format!("expected '(' in filter term: {rest}"))
            })?;
            let close = rest.find(')').ok_or_else(|| {
                EditError::invalid_parameter(format!("unterminated filter term: {rest}"))
            })?;
            if close < open {
                return Err(EditError::invalid_parameter(format!(
                    "malformed filter term: {rest}"
                )));
            }

            let name = rest[..open].trim().to_ascii_lowercase();
            let arg = rest[open + 1..close].trim();
            let op = match name.as_str() {
                "brightness" => FilterOp::Brightness(parse_amount(arg)?),
                "contrast" => FilterOp::Contrast(parse_amount(arg)?),
                "saturate" => FilterOp::Saturate(parse_amount(arg)?),
                "grayscale" => FilterOp::Grayscale(parse_amount(arg)?),
                "sepia" => FilterOp::Sepia(parse_amount(arg)?),
                "invert" => FilterOp::Invert(parse_amount(arg)?),
                "hue-rotate" => FilterOp::HueRotate(parse_angle(arg)?),
                other => {
                    return Err(EditError::invalid_parameter(format!(
                        "unknown filter operation: {other}"
                    )))
                }
            };
            op.validate()?;
            ops.push(op);
            rest = rest[close + 1..].trim_start();
        }

        Ok(Self { ops })
    }
}

/// `110%` -> 1.1, `1.1` -> 1.1
fn parse_amount(arg: &str) -> EditResult<f32> {
    let parsed = match arg.strip_suffix('%') {
        Some(pct) => pct.trim().parse::<f32>().map(|v| v / 100.0),
        None => arg.parse::<f32>(),
    };
    parsed.map_err(|_| EditError::invalid_parameter(format!("invalid filter amount: {arg:?}")))
}

/// `30deg`, `0.5turn`, `1rad` or a bare number of degrees.
fn parse_angle(arg: &str) -> EditResult<f32> {
    let (number, scale) = if let Some(v) = arg.strip_suffix("deg") {
        (v, 1.0)
    } else if let Some(v) = arg.strip_suffix("turn") {
        (v, 360.0)
    } else if let Some(v) = arg.strip_suffix("rad") {
        (v, 180.0 / std::f32::consts::PI)
    } else {
        (arg, 1.0)
    };
    number
        .trim()
        .parse::<f32>()
        .map(|v| v * scale)
        .map_err(|_| EditError::invalid_parameter(format!("invalid angle: {arg:?}")))
}

/// Named filter chains offered by the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterPreset {
    Vintage,
    Noir,
    Warm,
    Cool,
    Vivid,
    Faded,
}

impl FilterPreset {
    pub const ALL: [FilterPreset; 6] = [
        FilterPreset::Vintage,
        FilterPreset::Noir,
        FilterPreset::Warm,
        FilterPreset::Cool,
        FilterPreset::Vivid,
        FilterPreset::Faded,
    ];

    pub fn name(self) -> &'static str {
        match self {
            FilterPreset::Vintage => "vintage",
            FilterPreset::Noir => "noir",
            FilterPreset::Warm => "warm",
            FilterPreset::Cool => "cool",
            FilterPreset::Vivid => "vivid",
            FilterPreset::Faded => "faded",
        }
    }

    pub fn chain(self) -> FilterChain {
        use FilterOp::{Brightness, Contrast, Grayscale, HueRotate, Saturate, Sepia};
        let ops = match self {
            FilterPreset::Vintage => vec![Sepia(0.5), Saturate(1.4), Contrast(1.1)],
            FilterPreset::Noir => vec![Grayscale(1.0), Contrast(1.3)],
            FilterPreset::Warm => vec![Sepia(0.3), Saturate(1.3)],
            FilterPreset::Cool => vec![HueRotate(200.0), Saturate(1.1)],
            FilterPreset::Vivid => vec![Saturate(1.6), Contrast(1.15)],
            FilterPreset::Faded => vec![Brightness(1.1), Contrast(0.8), Saturate(0.7)],
        };
        FilterChain::new(ops)
    }
}

impl FromStr for FilterPreset {
    type Err = EditError;

    fn from_str(name: &str) -> EditResult<Self> {
        let name = name.trim();
        FilterPreset::ALL
            .into_iter()
            .find(|preset| preset.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| EditError::invalid_parameter(format!("unknown filter preset: {name}")))
    }
}

/// Apply a filter chain to RGBA pixel data in place.
///
/// # Example
/// ```
/// use photodesk_core::filter::{apply_chain_in_place, FilterChain};
///
/// let mut pixels = vec![128, 128, 128, 255]; // Single gray pixel
/// let chain: FilterChain = "brightness(200%)".parse().unwrap();
///
/// apply_chain_in_place(&mut pixels, &chain);
/// // Pixel is now brighter (clamped at 255)
/// ```
pub fn apply_chain_in_place(pixels: &mut [u8], chain: &FilterChain) {
    // Early exit if nothing would change
    if chain.is_identity() {
        return;
    }

    let steps: Vec<Step> = chain
        .ops
        .iter()
        .filter(|op| !op.is_identity())
        .map(FilterOp::compile)
        .collect();

    for chunk in pixels.chunks_exact_mut(CHANNELS) {
        let mut r = chunk[0] as f32 / 255.0;
        let mut g = chunk[1] as f32 / 255.0;
        let mut b = chunk[2] as f32 / 255.0;

        for step in &steps {
            (r, g, b) = step.apply(r, g, b);
        }

        chunk[0] = (r * 255.0).round() as u8;
        chunk[1] = (g * 255.0).round() as u8;
        chunk[2] = (b * 255.0).round() as u8;
    }
}

/// Filter/grade transform: apply `chain` to a copy of `raster`.
///
/// Output dimensions equal the input; the output is tagged with `output`,
/// or PNG (lossless) when `None`.
pub fn apply_filter(
    raster: &Raster,
    chain: &FilterChain,
    output: Option<ImageFormat>,
) -> EditResult<Raster> {
    chain.validate()?;

    let mut pixels = raster.pixels().to_vec();
    apply_chain_in_place(&mut pixels, chain);

    Raster::new(
        raster.width(),
        raster.height(),
        pixels,
        output.unwrap_or(ImageFormat::Png),
    )
}

/// Grayscale transform.
pub fn apply_grayscale(raster: &Raster) -> EditResult<Raster> {
    apply_filter(raster, &FilterChain::grayscale(), None)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Helper to create an opaque RGBA pixel
    fn pixel(r: u8, g: u8, b: u8) -> Vec<u8> {
        vec![r, g, b, 255]
    }

    /// Helper to apply a chain expression and return the resulting pixel
    fn apply(pixels: &[u8], expression: &str) -> Vec<u8> {
        let chain: FilterChain = expression.parse().unwrap();
        let mut result = pixels.to_vec();
        apply_chain_in_place(&mut result, &chain);
        result
    }

    // ===== Parsing =====

    #[test]
    fn test_parse_chain() {
        let chain: FilterChain = "sepia(50%) saturate(1.4) hue-rotate(90deg)".parse().unwrap();
        assert_eq!(
            chain.ops(),
            &[
                FilterOp::Sepia(0.5),
                FilterOp::Saturate(1.4),
                FilterOp::HueRotate(90.0)
            ]
        );
    }

    #[test]
    fn test_parse_none_is_identity() {
        let chain: FilterChain = "none".parse().unwrap();
        assert!(chain.ops().is_empty());
        assert!(chain.is_identity());
    }

    #[test]
    fn test_parse_rejects_unknown_op() {
        let err = "blur(4px)".parse::<FilterChain>().unwrap_err();
        assert!(matches!(err, EditError::InvalidParameter(_)));
    }

    #[test]
    fn test_parse_rejects_bad_amount() {
        assert!("brightness(lots)".parse::<FilterChain>().is_err());
        assert!("brightness(-10%)".parse::<FilterChain>().is_err());
        assert!("contrast(110%".parse::<FilterChain>().is_err());
    }

    #[test]
    fn test_parse_angles() {
        let chain: FilterChain = "hue-rotate(0.5turn)".parse().unwrap();
        assert_eq!(chain.ops(), &[FilterOp::HueRotate(180.0)]);
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        let chain = FilterPreset::Vintage.chain();
        assert_eq!(chain.to_string(), "sepia(50%) saturate(140%) contrast(110%)");
        assert_eq!(chain.to_string().parse::<FilterChain>().unwrap(), chain);
    }

    // ===== Identity =====

    #[test]
    fn test_identity_chain() {
        let pixels = pixel(128, 64, 192);
        assert_eq!(apply(&pixels, "brightness(100%) contrast(100%)"), pixels);
        assert_eq!(apply(&pixels, "saturate(1)"), pixels);
    }

    // ===== Individual operations =====

    #[test]
    fn test_brightness() {
        assert_eq!(apply(&pixel(64, 64, 64), "brightness(200%)"), pixel(128, 128, 128));
        assert_eq!(apply(&pixel(200, 200, 200), "brightness(4)"), pixel(255, 255, 255));
    }

    #[test]
    fn test_contrast_positive() {
        let result = apply(&pixel(64, 128, 192), "contrast(200%)");
        assert!(result[0] < 64, "Dark pixel should get darker");
        assert!((result[1] as i32 - 128).abs() < 5, "Mid pixel should stay near middle");
        assert_eq!(result[2], 255, "Bright pixel should clip at white");
    }

    #[test]
    fn test_contrast_negative() {
        let result = apply(&pixel(0, 128, 255), "contrast(50%)");
        assert!(result[0] > 0, "Black should move toward gray");
        assert!(result[2] < 255, "White should move toward gray");
    }

    #[test]
    fn test_grayscale_is_achromatic() {
        let result = apply(&pixel(200, 50, 120), "grayscale(100%)");
        assert_eq!(result[0], result[1]);
        assert_eq!(result[1], result[2]);

        let expected = LUMINANCE_R * 200.0 + LUMINANCE_G * 50.0 + LUMINANCE_B * 120.0;
        assert!((result[0] as f32 - expected).abs() <= 1.0);
    }

    #[test]
    fn test_saturate_zero_matches_gray() {
        let result = apply(&pixel(200, 50, 120), "saturate(0)");
        assert!((result[0] as i32 - result[1] as i32).abs() <= 1);
        assert!((result[1] as i32 - result[2] as i32).abs() <= 1);
    }

    #[test]
    fn test_invert() {
        assert_eq!(apply(&pixel(0, 100, 255), "invert(100%)"), pixel(255, 155, 0));
    }

    #[test]
    fn test_sepia_warms_gray() {
        let result = apply(&pixel(128, 128, 128), "sepia(100%)");
        assert!(result[0] > result[1]);
        assert!(result[1] > result[2]);
    }

    #[test]
    fn test_alpha_preserved() {
        let pixels = vec![10, 20, 30, 77];
        let result = apply(&pixels, "invert(1) contrast(150%)");
        assert_eq!(result[3], 77);
    }

    // ===== Presets and transforms =====

    #[test]
    fn test_presets_lookup() {
        for preset in FilterPreset::ALL {
            assert_eq!(FilterChain::preset(preset.name()).unwrap(), preset.chain());
        }
        assert_eq!(FilterChain::preset("NOIR").unwrap(), FilterPreset::Noir.chain());
        assert!(FilterChain::preset("lomo").is_err());
    }

    #[test]
    fn test_apply_filter_keeps_dimensions_and_defaults_to_png() {
        let raster = Raster::filled(7, 3, [90, 180, 30, 255])
            .unwrap()
            .with_format(ImageFormat::Jpeg);
        let result = apply_filter(&raster, &FilterPreset::Vivid.chain(), None).unwrap();

        assert_eq!(result.dimensions(), (7, 3));
        assert_eq!(result.format(), ImageFormat::Png);

        let result = apply_filter(&raster, &FilterChain::default(), Some(ImageFormat::WebP)).unwrap();
        assert_eq!(result.format(), ImageFormat::WebP);
        assert_eq!(result.pixels(), raster.pixels());
    }

    #[test]
    fn test_apply_filter_rejects_invalid_chain() {
        let raster = Raster::filled(2, 2, [0, 0, 0, 255]).unwrap();
        let chain = FilterChain::new(vec![FilterOp::Brightness(f32::NAN)]);
        assert!(matches!(
            apply_filter(&raster, &chain, None),
            Err(EditError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_from_percentages() {
        let chain = FilterChain::from_percentages(110.0, 110.0, 110.0);
        assert_eq!(chain.to_string(), "brightness(110%) contrast(110%) saturate(110%)");
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn op_strategy() -> impl Strategy<Value = FilterOp> {
        prop_oneof![
            (0.0f32..3.0).prop_map(FilterOp::Brightness),
            (0.0f32..3.0).prop_map(FilterOp::Contrast),
            (0.0f32..3.0).prop_map(FilterOp::Saturate),
            (0.0f32..1.0).prop_map(FilterOp::Grayscale),
            (0.0f32..1.0).prop_map(FilterOp::Sepia),
            (0.0f32..1.0).prop_map(FilterOp::Invert),
            (-360.0f32..360.0).prop_map(FilterOp::HueRotate),
        ]
    }

    proptest! {
        /// Property: Filtering is deterministic.
        #[test]
        fn prop_filter_is_deterministic(
            ops in prop::collection::vec(op_strategy(), 0..5),
            rgba in any::<[u8; 4]>(),
        ) {
            let raster = Raster::filled(5, 4, rgba).unwrap();
            let chain = FilterChain::new(ops);
            let a = apply_filter(&raster, &chain, None).unwrap();
            let b = apply_filter(&raster, &chain, None).unwrap();
            prop_assert_eq!(a, b);
        }

        /// Property: Dimensions and alpha are preserved.
        #[test]
        fn prop_filter_preserves_shape_and_alpha(
            ops in prop::collection::vec(op_strategy(), 0..5),
            rgba in any::<[u8; 4]>(),
        ) {
            let raster = Raster::filled(3, 6, rgba).unwrap();
            let result = apply_filter(&raster, &FilterChain::new(ops), None).unwrap();
            prop_assert_eq!(result.dimensions(), raster.dimensions());
            for px in result.pixels().chunks_exact(CHANNELS) {
                prop_assert_eq!(px[3], rgba[3]);
            }
        }
    }
}
