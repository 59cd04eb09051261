//! Photodesk Core - non-destructive photo editing
//!
//! This crate provides the editing model behind Photodesk: a library of pure
//! raster transforms, per-image edit histories with undo/redo, a registry of
//! open projects, and batch re-encoding.
//!
//! ```text
//! UI action -> Registry::apply_to_active -> transform(current raster)
//!           -> EditHistory::append -> project shows the new current version
//! ```

pub mod advisor;
pub mod batch;
pub mod config;
pub mod decode;
pub mod encode;
pub mod error;
pub mod export;
pub mod filter;
pub mod history;
pub mod raster;
pub mod registry;
pub mod transform;

pub use advisor::{Advisor, EnhanceOutcome, EnhanceSource, Suggestion};
pub use batch::{convert_all, convert_all_with, BatchReport, ConversionOutcome};
pub use config::RegistryConfig;
pub use decode::{decode_image, ImageMetadata};
pub use error::{EditError, EditResult};
pub use export::ExportArtifact;
pub use filter::{FilterChain, FilterOp, FilterPreset};
pub use history::{EditHistory, Version, VersionMetadata};
pub use raster::{ImageFormat, Raster};
pub use registry::{ImportSource, Project, ProjectId, Registry};
pub use transform::Transform;
