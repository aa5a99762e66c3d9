//! # Result Preparation Workflow
//!
//! Prepares the exported result artifact for a calculation run: validate
//! prerequisites, build and export the aggregate, upload it, persist the
//! file metadata and drive the classification state machine.
//!
//! ## Failure policy
//!
//! - Absent run: no-op outcome, nothing mutated.
//! - Missing prerequisite reference: no-op outcome, classification left
//!   untouched. This asymmetry against later failures is observed product
//!   behavior and is kept.
//! - Already-classified run: no-op outcome, nothing mutated. A redelivered
//!   request for a prepared run must not disturb its terminal
//!   classification.
//! - Any failure or cancellation from the build step onward: the run is
//!   marked `error` so it never appears to be silently still running after
//!   a real attempt.
//!
//! Two concurrent preparations of the same run id are serialized through
//! [`RunLockRegistry`].

use std::future::Future;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use super::errors::PreparationError;
use super::run_lock::RunLockRegistry;
use super::types::{CalcResultBuilder, CalcResultExporter, RunRepository, StorageService};
use crate::models::{CalcResultsRequest, CalculationRun, NewResultFileMetadata, ResultFileName};
use crate::state_machine::RunClassification;
use crate::validation::{validate_run_references, ValidationResult};

/// Outcome of one preparation attempt.
#[derive(Debug)]
pub enum PreparationOutcome {
    /// Artifact uploaded, metadata persisted, run moved to `unclassified`
    Completed { file_name: String, location: String },
    /// No run record exists for the requested id; nothing was mutated
    RunNotFound,
    /// Prerequisite references are missing; classification left untouched
    InvalidRun(ValidationResult),
    /// The run is already terminally classified; nothing was mutated
    AlreadyClassified(RunClassification),
    /// A step from build onward failed; the run was marked `error`
    Failed(PreparationError),
}

impl PreparationOutcome {
    /// Collapse to the boolean contract of the surrounding trigger surface.
    pub fn succeeded(&self) -> bool {
        matches!(self, Self::Completed { .. })
    }
}

/// The result preparation workflow over its collaborator seams.
pub struct ResultPreparationWorkflow {
    repository: Arc<dyn RunRepository>,
    builder: Arc<dyn CalcResultBuilder>,
    exporter: Arc<dyn CalcResultExporter>,
    storage: Arc<dyn StorageService>,
    locks: RunLockRegistry,
}

impl ResultPreparationWorkflow {
    pub fn new(
        repository: Arc<dyn RunRepository>,
        builder: Arc<dyn CalcResultBuilder>,
        exporter: Arc<dyn CalcResultExporter>,
        storage: Arc<dyn StorageService>,
    ) -> Self {
        Self {
            repository,
            builder,
            exporter,
            storage,
            locks: RunLockRegistry::new(),
        }
    }

    /// Prepare the exported results for a run.
    ///
    /// Cancellation during build or upload is routed to the error path like
    /// any other failure.
    pub async fn prepare_calc_results(
        &self,
        request: &CalcResultsRequest,
        cancel: CancellationToken,
    ) -> PreparationOutcome {
        let _guard = self.locks.acquire(request.run_id).await;

        let run = match self.repository.find_run(request.run_id).await {
            Ok(Some(run)) => run,
            Ok(None) => {
                info!(run_id = request.run_id, "Calculation run not found");
                return PreparationOutcome::RunNotFound;
            }
            Err(lookup_error) => {
                // The run is unknown at this point, so there is nothing to
                // classify.
                error!(run_id = request.run_id, error = %lookup_error, "Run lookup failed");
                return PreparationOutcome::Failed(PreparationError::Persistence(lookup_error));
            }
        };

        let validation = validate_run_references(&run);
        if !validation.is_valid() {
            warn!(
                run_id = run.id,
                errors = ?validation.error_messages(),
                "Calculation run failed prerequisite validation"
            );
            return PreparationOutcome::InvalidRun(validation);
        }

        // A terminally classified run was already prepared (or already
        // failed); a redelivered request must not disturb that record.
        if run.classification.is_terminal() {
            warn!(
                run_id = run.id,
                classification = %run.classification,
                "Calculation run is already classified, skipping preparation"
            );
            return PreparationOutcome::AlreadyClassified(run.classification);
        }

        match self.prepare_validated_run(&run, request, &cancel).await {
            Ok((file_name, location)) => {
                info!(run_id = run.id, %file_name, "Calculation results prepared");
                PreparationOutcome::Completed {
                    file_name,
                    location,
                }
            }
            Err(preparation_error) => {
                error!(run_id = run.id, error = %preparation_error, "Result preparation failed");
                if let Err(mark_error) = self.repository.mark_error(run.id).await {
                    // Marking must never mask the original failure.
                    error!(run_id = run.id, error = %mark_error, "Failed to mark run as errored");
                }
                PreparationOutcome::Failed(preparation_error)
            }
        }
    }

    /// Steps from build through persistence; any error routes the caller to
    /// the error classification.
    async fn prepare_validated_run(
        &self,
        run: &CalculationRun,
        request: &CalcResultsRequest,
        cancel: &CancellationToken,
    ) -> Result<(String, String), PreparationError> {
        debug!(run_id = run.id, "Builder started");
        let results = with_cancellation(cancel, self.builder.build(request))
            .await?
            .map_err(PreparationError::Build)?;
        debug!(run_id = run.id, "Builder finished");

        let exported = self
            .exporter
            .export(&results)
            .map_err(PreparationError::Export)?;

        let file_name = ResultFileName::new(
            results.detail.run_id,
            &results.detail.run_name,
            results.detail.run_date,
        )
        .to_string();

        debug!(run_id = run.id, %file_name, "Uploading result artifact");
        let location = with_cancellation(cancel, self.storage.upload(&file_name, &exported))
            .await?
            .map_err(PreparationError::Upload)?;
        if location.is_empty() {
            return Err(PreparationError::EmptyUploadLocation);
        }

        let metadata = NewResultFileMetadata {
            calculation_run_id: run.id,
            file_name: file_name.clone(),
            storage_location: location.clone(),
        };
        self.repository.record_success(run.id, metadata).await?;

        Ok((file_name, location))
    }
}

impl std::fmt::Debug for ResultPreparationWorkflow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResultPreparationWorkflow")
            .finish_non_exhaustive()
    }
}

/// Race a step against the cancellation token; cancellation becomes a
/// step failure.
async fn with_cancellation<T>(
    cancel: &CancellationToken,
    step: impl Future<Output = T>,
) -> Result<T, PreparationError> {
    match cancel.run_until_cancelled(step).await {
        Some(value) => Ok(value),
        None => Err(PreparationError::Cancelled),
    }
}
