//! Project registry: the set of open images and which one is being edited.
//!
//! Each [`Project`] owns an [`EditHistory`]. All edits go through
//! [`Registry::apply_to_active`], which reads the active project's current
//! raster, runs a transform on it and appends the result. Because every
//! mutation takes `&mut Registry`, two edits can never interleave on the
//! same project.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::advisor::{AdjustmentPercents, Advisor, EnhanceOutcome, EnhanceSource};
use crate::config::RegistryConfig;
use crate::decode::{decode_image, DecodeError, ImageMetadata};
use crate::error::{EditError, EditResult};
use crate::export::{encode_artifact, ExportArtifact, EDITED_PREFIX};
use crate::filter::apply_filter;
use crate::history::{EditHistory, Version, VersionMetadata};
use crate::raster::{ImageFormat, Raster};
use crate::transform::{generate_thumbnail, Transform};

/// Name used when an import carries no usable name.
const DEFAULT_NAME: &str = "image";

/// Stable identifier of a project within one registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectId(u64);

impl ProjectId {
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Where an imported payload came from.
#[derive(Debug, Clone)]
pub enum ImportSource {
    /// A local file or clipboard payload.
    Bytes(Vec<u8>),
    /// A remote resource the caller already fetched.
    Fetched {
        url: String,
        bytes: Vec<u8>,
        /// `Content-Type` header, if the response had one.
        content_type: Option<String>,
    },
}

impl ImportSource {
    fn bytes(&self) -> &[u8] {
        match self {
            ImportSource::Bytes(bytes) | ImportSource::Fetched { bytes, .. } => bytes,
        }
    }

    /// Reject fetched payloads whose content type is not `image/*`.
    fn check_content_type(&self) -> Result<(), DecodeError> {
        if let ImportSource::Fetched {
            content_type: Some(content_type),
            ..
        } = self
        {
            let mime = content_type.trim().to_ascii_lowercase();
            if !mime.starts_with("image/") {
                return Err(DecodeError::NotAnImage);
            }
        }
        Ok(())
    }

    /// Last path segment of a fetched URL, without query or fragment.
    fn default_name(&self) -> Option<String> {
        let ImportSource::Fetched { url, .. } = self else {
            return None;
        };
        let path = url.split(['?', '#']).next().unwrap_or_default();
        path.rsplit('/')
            .next()
            .filter(|segment| !segment.is_empty() && !segment.contains(':'))
            .map(str::to_string)
    }
}

/// One open image and its edit history.
#[derive(Debug, Clone)]
pub struct Project {
    id: ProjectId,
    name: String,
    history: EditHistory,
}

impl Project {
    fn new(id: ProjectId, name: String, raster: Raster) -> Self {
        let original = Version::original(Arc::new(raster), &name);
        Self {
            id,
            name,
            history: EditHistory::new(original),
        }
    }

    pub fn id(&self) -> ProjectId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn history(&self) -> &EditHistory {
        &self.history
    }

    /// Raster of the version under the history cursor.
    pub fn current_raster(&self) -> &Arc<Raster> {
        self.history.current().raster()
    }

    pub fn current_metadata(&self) -> &VersionMetadata {
        self.history.current().metadata()
    }

    /// Import-style summary of the current version.
    pub fn image_metadata(&self) -> ImageMetadata {
        let current = self.current_metadata();
        let original = self.history.versions()[0].metadata();
        ImageMetadata {
            width: current.width,
            height: current.height,
            format: current.format,
            size: current.byte_size,
            original_size: original.byte_size,
            name: self.name.clone(),
        }
    }

    /// Labels of the last `n` actions up to the cursor.
    pub fn recent_actions(&self, n: usize) -> Vec<&str> {
        self.history.recent_labels(n)
    }

    /// Preview of the current raster fitting within `size × size`.
    pub fn thumbnail(&self, size: u32) -> EditResult<Raster> {
        generate_thumbnail(self.current_raster(), size)
    }

    /// Encode the current version as `edited_<name>.<ext>`.
    pub fn export(&self, format: ImageFormat, quality: f32) -> EditResult<ExportArtifact> {
        encode_artifact(self.current_raster(), &self.name, EDITED_PREFIX, format, quality)
    }
}

/// Ordered collection of projects with an active selection.
#[derive(Debug, Default)]
pub struct Registry {
    config: RegistryConfig,
    projects: Vec<Project>,
    active: Option<usize>,
    next_id: u64,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: RegistryConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Decode a payload and open it as a new project.
    ///
    /// `name` overrides the display name; fetched payloads otherwise take
    /// the last URL segment. Nothing is added if decoding fails.
    pub fn import(
        &mut self,
        source: ImportSource,
        name: Option<&str>,
    ) -> EditResult<(ProjectId, ImageMetadata)> {
        source.check_content_type()?;
        let raster = decode_image(source.bytes())?;

        let name = name
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_string)
            .or_else(|| source.default_name())
            .unwrap_or_else(|| DEFAULT_NAME.to_string());

        let id = ProjectId(self.next_id);
        self.next_id += 1;

        let project = Project::new(id, name, raster);
        let metadata = project.image_metadata();
        self.projects.push(project);

        if self.config.activate_on_import || self.active.is_none() {
            self.active = Some(self.projects.len() - 1);
        }

        info!(
            "Imported project {} ({}x{} {}, {} bytes) as {:?}",
            id, metadata.width, metadata.height, metadata.format, metadata.size, metadata.name
        );
        Ok((id, metadata))
    }

    /// Close a project. The active selection moves to a neighbour.
    pub fn remove(&mut self, id: ProjectId) -> EditResult<Project> {
        let index = self.index_of(id)?;
        let project = self.projects.remove(index);

        self.active = match self.active {
            _ if self.projects.is_empty() => None,
            Some(active) if index < active => Some(active - 1),
            Some(active) if index == active => Some(index.min(self.projects.len() - 1)),
            other => other,
        };

        info!(
            "Removed project {} ({} left, active: {:?})",
            id,
            self.projects.len(),
            self.active_id()
        );
        Ok(project)
    }

    pub fn set_active(&mut self, id: ProjectId) -> EditResult<()> {
        let index = self.index_of(id)?;
        self.active = Some(index);
        debug!("Active project is now {}", id);
        Ok(())
    }

    /// Run `transform` on the active project's current raster and append
    /// the result as a version labelled `label`.
    ///
    /// On error the history is left untouched.
    pub fn apply_to_active<F>(&mut self, label: &str, transform: F) -> EditResult<&Project>
    where
        F: FnOnce(&Raster) -> EditResult<Raster>,
    {
        let index = self.active.ok_or(EditError::NoActiveProject)?;
        let project = &mut self.projects[index];

        let source = Arc::clone(project.current_raster());
        let result = transform(&source)?;

        let version = Version::new(Arc::new(result), &project.name, label);
        project.history.append(version);
        info!(
            "Applied {:?} to project {} (history length {})",
            label,
            project.id,
            project.history.len()
        );
        Ok(&*project)
    }

    /// Apply a described transform, labelled with its own label.
    pub fn apply_transform(&mut self, transform: &Transform) -> EditResult<&Project> {
        let source = self.active().ok_or(EditError::NoActiveProject)?.current_raster();
        let label = transform.label(source);
        self.apply_to_active(&label, |raster| transform.apply(raster))
    }

    pub fn undo_active(&mut self) -> EditResult<&Version> {
        let index = self.active.ok_or(EditError::NoActiveProject)?;
        Ok(Self::step_back(&mut self.projects[index]))
    }

    pub fn redo_active(&mut self) -> EditResult<&Version> {
        let index = self.active.ok_or(EditError::NoActiveProject)?;
        Ok(Self::step_forward(&mut self.projects[index]))
    }

    pub fn undo(&mut self, id: ProjectId) -> EditResult<&Version> {
        let index = self.index_of(id)?;
        Ok(Self::step_back(&mut self.projects[index]))
    }

    pub fn redo(&mut self, id: ProjectId) -> EditResult<&Version> {
        let index = self.index_of(id)?;
        Ok(Self::step_forward(&mut self.projects[index]))
    }

    fn step_back(project: &mut Project) -> &Version {
        if !project.history.can_undo() {
            debug!("Nothing to undo in project {}", project.id);
        }
        project.history.undo()
    }

    fn step_forward(project: &mut Project) -> &Version {
        if !project.history.can_redo() {
            debug!("Nothing to redo in project {}", project.id);
        }
        project.history.redo()
    }

    /// Ask `advisor` for adjustments and apply them to the active project.
    ///
    /// If the advisor is unavailable, a fixed 110% brightness, contrast and
    /// saturation boost is applied instead. Any other error is returned.
    pub fn enhance_active(&mut self, advisor: &dyn Advisor) -> EditResult<EnhanceOutcome> {
        let raster = Arc::clone(
            self.active()
                .ok_or(EditError::NoActiveProject)?
                .current_raster(),
        );

        let outcome = match advisor
            .suggest(&raster, raster.format())
            .and_then(|s| s.validate().map(|()| s))
        {
            Ok(suggestion) => EnhanceOutcome {
                source: EnhanceSource::Advisor,
                adjustments: suggestion.adjustments,
                review: Some(suggestion.aesthetic_review),
            },
            Err(EditError::AdvisorUnavailable(reason)) => {
                warn!("Advisor unavailable ({}), using fallback adjustments", reason);
                EnhanceOutcome {
                    source: EnhanceSource::Fallback,
                    adjustments: AdjustmentPercents::fallback(),
                    review: None,
                }
            }
            Err(err) => return Err(err),
        };

        let chain = outcome.adjustments.chain();
        self.apply_to_active(outcome.source.label(), |r| apply_filter(r, &chain, None))?;
        Ok(outcome)
    }

    /// Encode the active project's current version.
    ///
    /// `None` picks the configured export format and quality.
    pub fn export_active(
        &self,
        format: Option<ImageFormat>,
        quality: Option<f32>,
    ) -> EditResult<ExportArtifact> {
        let project = self.active().ok_or(EditError::NoActiveProject)?;
        project.export(
            format.unwrap_or(self.config.export_format),
            quality.unwrap_or(self.config.export_quality),
        )
    }

    /// Thumbnail of a project at the configured size.
    pub fn thumbnail(&self, id: ProjectId) -> EditResult<Raster> {
        self.get(id)?.thumbnail(self.config.thumbnail_size)
    }

    /// The configured number of recent action labels for a project.
    pub fn recent_actions(&self, id: ProjectId) -> EditResult<Vec<&str>> {
        Ok(self.get(id)?.recent_actions(self.config.history_preview_len))
    }

    pub fn get(&self, id: ProjectId) -> EditResult<&Project> {
        self.index_of(id).map(|index| &self.projects[index])
    }

    pub fn active(&self) -> Option<&Project> {
        self.active.map(|index| &self.projects[index])
    }

    pub fn active_id(&self) -> Option<ProjectId> {
        self.active().map(Project::id)
    }

    /// Projects in tab order.
    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    /// Close every project. Ids are not reused afterwards.
    pub fn clear(&mut self) {
        if !self.projects.is_empty() {
            info!("Closing {} projects", self.projects.len());
        }
        self.projects.clear();
        self.active = None;
    }

    fn index_of(&self, id: ProjectId) -> EditResult<usize> {
        self.projects
            .iter()
            .position(|p| p.id == id)
            .ok_or(EditError::NotFound(id))
    }
}
