//! Error types for the result preparation workflow.
//!
//! Each variant tags the step that failed so a failed preparation is
//! diagnosable from the error alone, instead of collapsing every failure
//! into an undifferentiated false.

use crate::database::RepositoryError;

use super::types::CollaboratorError;

/// Step-tagged failure of a result preparation.
#[derive(Debug, thiserror::Error)]
pub enum PreparationError {
    #[error("result builder failed: {0}")]
    Build(#[source] CollaboratorError),

    #[error("result exporter failed: {0}")]
    Export(#[source] CollaboratorError),

    #[error("result upload failed: {0}")]
    Upload(#[source] CollaboratorError),

    #[error("result upload returned no usable storage location")]
    EmptyUploadLocation,

    #[error("persistence failed: {0}")]
    Persistence(#[from] RepositoryError),

    #[error("preparation was cancelled")]
    Cancelled,
}
