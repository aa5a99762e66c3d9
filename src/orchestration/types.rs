//! Collaborator seams consumed by the orchestration workflows.
//!
//! The fee arithmetic, flat-file layout and blob storage all live outside
//! this core; the workflows depend on these traits and on nothing concrete.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::database::RepositoryError;
use crate::models::{CalcResultsRequest, CalculationRun, NewResultFileMetadata};

/// Boxed error type for collaborators supplied by the host application.
pub type CollaboratorError = Box<dyn std::error::Error + Send + Sync>;

/// Identifying detail of a built result aggregate, used to derive the
/// artifact file name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalcResultDetail {
    pub run_id: i64,
    pub run_name: String,
    pub run_date: DateTime<Utc>,
}

/// The full result aggregate produced by the builder.
///
/// The business sections are opaque to this core; only the detail header is
/// inspected, for file naming.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalcResult {
    pub detail: CalcResultDetail,
    pub sections: serde_json::Value,
}

/// Builds the full result aggregate for a run.
#[async_trait]
pub trait CalcResultBuilder: Send + Sync {
    async fn build(&self, request: &CalcResultsRequest) -> Result<CalcResult, CollaboratorError>;
}

/// Serializes a result aggregate into flat-file text.
pub trait CalcResultExporter: Send + Sync {
    fn export(&self, results: &CalcResult) -> Result<String, CollaboratorError>;
}

/// Uploads exported content to durable storage.
///
/// Returns the storage location reference; an empty location means the
/// upload produced nothing usable and is treated as a failure by the
/// workflow.
#[async_trait]
pub trait StorageService: Send + Sync {
    async fn upload(&self, file_name: &str, content: &str) -> Result<String, CollaboratorError>;
}

/// Persistence seam for calculation runs and result file metadata.
///
/// The run lookup and the classification writes are the only operations
/// that touch the run record.
#[async_trait]
pub trait RunRepository: Send + Sync {
    /// Fetch a run by id; `Ok(None)` when no such run exists.
    async fn find_run(&self, run_id: i64) -> Result<Option<CalculationRun>, RepositoryError>;

    /// Persist the result file metadata and the `unclassified`
    /// classification in one transaction.
    async fn record_success(
        &self,
        run_id: i64,
        metadata: NewResultFileMetadata,
    ) -> Result<(), RepositoryError>;

    /// Set the run's classification to `error`.
    async fn mark_error(&self, run_id: i64) -> Result<(), RepositoryError>;
}
