//! Batch re-encoding of every open project.
//!
//! Conversion reads each project's current version and never appends to a
//! history. The current rasters are snapshotted before any encoding starts,
//! so the batch works on one consistent view of the registry.

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use crate::error::EditResult;
use crate::export::{encode_artifact, ExportArtifact, CONVERTED_PREFIX};
use crate::raster::{ImageFormat, Raster};
use crate::registry::{ProjectId, Registry};

/// Result of converting one project.
#[derive(Debug)]
pub struct ConversionOutcome {
    pub project: ProjectId,
    pub name: String,
    pub result: EditResult<ExportArtifact>,
}

impl ConversionOutcome {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Success and failure counts over a batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BatchReport {
    pub succeeded: usize,
    pub failed: usize,
}

impl BatchReport {
    pub fn from_outcomes(outcomes: &[ConversionOutcome]) -> Self {
        let succeeded = outcomes.iter().filter(|o| o.is_ok()).count();
        Self {
            succeeded,
            failed: outcomes.len() - succeeded,
        }
    }

    pub fn total(&self) -> usize {
        self.succeeded + self.failed
    }
}

/// Re-encode every project's current raster as `format`.
///
/// Artifacts are named `converted_<name>.<ext>`. A failing project does
/// not stop the others; the output has one outcome per project, in
/// registry order.
pub fn convert_all(
    registry: &Registry,
    format: ImageFormat,
    quality: f32,
) -> Vec<ConversionOutcome> {
    convert_all_with(registry, |raster, name| {
        encode_artifact(raster, name, CONVERTED_PREFIX, format, quality)
    })
}

/// Run a batch with a caller-supplied encoder.
///
/// `encode` receives each snapshot raster and the project name.
pub fn convert_all_with<F>(registry: &Registry, mut encode: F) -> Vec<ConversionOutcome>
where
    F: FnMut(&Raster, &str) -> EditResult<ExportArtifact>,
{
    let snapshots: Vec<(ProjectId, String, Arc<Raster>)> = registry
        .projects()
        .iter()
        .map(|p| (p.id(), p.name().to_string(), Arc::clone(p.current_raster())))
        .collect();

    let outcomes: Vec<ConversionOutcome> = snapshots
        .into_iter()
        .map(|(project, name, raster)| {
            let result = encode(&raster, &name);
            if let Err(err) = &result {
                warn!("Batch conversion failed for project {} ({}): {}", project, name, err);
            }
            ConversionOutcome {
                project,
                name,
                result,
            }
        })
        .collect();

    let report = BatchReport::from_outcomes(&outcomes);
    info!(
        "Batch conversion finished: {} succeeded, {} failed",
        report.succeeded, report.failed
    );
    outcomes
}
