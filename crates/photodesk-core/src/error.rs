//! Error taxonomy for editing operations.
//!
//! Codec failures keep their own error types (`DecodeError`, `EncodeError`)
//! and convert into [`EditError`] at the transform and registry boundary.

use thiserror::Error;

use crate::decode::DecodeError;
use crate::encode::EncodeError;
use crate::registry::ProjectId;

/// Errors surfaced by transforms, the registry and the batch orchestrator.
#[derive(Debug, Error)]
pub enum EditError {
    /// Caller input outside an operation's domain (dimensions, quality, scale...).
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// The source image could not be read.
    #[error("Decode failure: {0}")]
    DecodeFailure(#[from] DecodeError),

    /// The target format is unsupported or the encoder failed.
    #[error("Encode failure: {0}")]
    EncodeFailure(#[from] EncodeError),

    /// No project with this id is open.
    #[error("Project not found: {0}")]
    NotFound(ProjectId),

    /// An edit was requested while no project is active.
    #[error("No active project")]
    NoActiveProject,

    /// The suggestion service failed or returned malformed data.
    #[error("Advisor unavailable: {0}")]
    AdvisorUnavailable(String),
}

impl EditError {
    pub fn invalid_parameter<T: Into<String>>(msg: T) -> Self {
        Self::InvalidParameter(msg.into())
    }

    pub fn advisor_unavailable<T: Into<String>>(msg: T) -> Self {
        Self::AdvisorUnavailable(msg.into())
    }
}

/// Convenience result type for editing operations.
pub type EditResult<T> = Result<T, EditError>;
