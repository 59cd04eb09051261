//! Boundary to the external enhancement advisor.
//!
//! The advisor looks at an image and proposes brightness, contrast and
//! saturation percentages plus a short review. How it is reached (HTTP,
//! a JS callback...) is the caller's business; this module only defines the
//! contract and parses the service's JSON reply.

use serde::{Deserialize, Serialize};

use crate::error::{EditError, EditResult};
use crate::filter::FilterChain;
use crate::raster::{ImageFormat, Raster};

/// Percentages applied when the advisor cannot be reached.
pub const FALLBACK_PERCENT: f32 = 110.0;

/// Source of enhancement suggestions.
///
/// Implementations report any transport or parsing problem as
/// [`EditError::AdvisorUnavailable`]; the registry then falls back to a
/// fixed adjustment.
pub trait Advisor {
    fn suggest(&self, raster: &Raster, format: ImageFormat) -> EditResult<Suggestion>;
}

impl<F> Advisor for F
where
    F: Fn(&Raster, ImageFormat) -> EditResult<Suggestion>,
{
    fn suggest(&self, raster: &Raster, format: ImageFormat) -> EditResult<Suggestion> {
        self(raster, format)
    }
}

/// Adjustment percentages (100 = unchanged).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AdjustmentPercents {
    pub brightness: f32,
    pub contrast: f32,
    pub saturation: f32,
}

impl AdjustmentPercents {
    pub fn fallback() -> Self {
        Self {
            brightness: FALLBACK_PERCENT,
            contrast: FALLBACK_PERCENT,
            saturation: FALLBACK_PERCENT,
        }
    }

    pub fn chain(&self) -> FilterChain {
        FilterChain::from_percentages(self.brightness, self.contrast, self.saturation)
    }
}

/// Advisor reply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    pub aesthetic_review: String,
    pub adjustments: AdjustmentPercents,
}

impl Suggestion {
    /// Parse the service's JSON reply.
    ///
    /// Malformed JSON, missing fields and negative or non-finite
    /// percentages are all reported as `AdvisorUnavailable`.
    pub fn from_json(json: &str) -> EditResult<Self> {
        let suggestion: Suggestion = serde_json::from_str(json)
            .map_err(|e| EditError::advisor_unavailable(format!("malformed reply: {e}")))?;
        suggestion.validate()?;
        Ok(suggestion)
    }

    pub fn validate(&self) -> EditResult<()> {
        let AdjustmentPercents {
            brightness,
            contrast,
            saturation,
        } = self.adjustments;
        if [brightness, contrast, saturation]
            .iter()
            .all(|v| v.is_finite() && *v >= 0.0)
        {
            Ok(())
        } else {
            Err(EditError::advisor_unavailable(format!(
                "adjustments out of range: {brightness}/{contrast}/{saturation}"
            )))
        }
    }
}

/// Where an enhancement's adjustments came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnhanceSource {
    Advisor,
    Fallback,
}

impl EnhanceSource {
    /// History label for an enhancement from this source.
    pub fn label(self) -> &'static str {
        match self {
            EnhanceSource::Advisor => "AI Enhance",
            EnhanceSource::Fallback => "Auto Enhance",
        }
    }
}

/// Result of [`Registry::enhance_active`](crate::Registry::enhance_active).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnhanceOutcome {
    pub source: EnhanceSource,
    pub adjustments: AdjustmentPercents,
    /// The advisor's review; `None` on fallback.
    pub review: Option<String>,
}
