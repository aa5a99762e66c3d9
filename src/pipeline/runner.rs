//! # Pipeline Run Driver
//!
//! Drives one remote pipeline run to completion: trigger, bounded status
//! polling, and exactly one outcome report.
//!
//! ## Failure semantics
//!
//! - Trigger failures are fatal and propagate; they are never retried.
//! - Status query failures are ignored and retried within the attempt
//!   budget; exhausting the budget leaves the last known status in place
//!   (`NotStarted` if no query ever succeeded).
//! - The outcome report is posted exactly once regardless of how polling
//!   ended; a transport failure of the report propagates.
//! - The fixed inter-poll delay races the shutdown token so a stopping
//!   process does not sit out the remaining interval. Cancellation never
//!   changes the attempt-count contract.

use std::sync::Arc;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use super::client::{ClientError, ExecutionPipelineClient};
use super::reporting::{ReportError, StatusReporter, StatusUpdate};
use super::status::PipelineStatus;
use super::types::{PipelineRunHandle, PipelineRunRequest};

/// Errors from driving a pipeline run.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("failed to trigger pipeline '{pipeline}': {source}")]
    Trigger {
        pipeline: String,
        #[source]
        source: ClientError,
    },

    #[error("failed to report outcome for run {run_id}: {source}")]
    Report {
        run_id: i64,
        #[source]
        source: ReportError,
    },
}

/// Seam for the polling driver so the orchestrator can be tested against a
/// mock.
#[async_trait]
pub trait PipelineRunDriver: Send + Sync {
    /// Drive one pipeline run to completion. `Ok(true)` iff the run reached
    /// `Succeeded` and the outcome report was acknowledged with a success
    /// status code.
    async fn process(&self, request: &PipelineRunRequest) -> Result<bool, PipelineError>;
}

/// Polling implementation of [`PipelineRunDriver`].
pub struct PipelineRunner {
    client: Arc<dyn ExecutionPipelineClient>,
    reporter: Arc<dyn StatusReporter>,
    shutdown: CancellationToken,
}

impl PipelineRunner {
    pub fn new(
        client: Arc<dyn ExecutionPipelineClient>,
        reporter: Arc<dyn StatusReporter>,
        shutdown: CancellationToken,
    ) -> Self {
        Self {
            client,
            reporter,
            shutdown,
        }
    }

    /// Poll the run's status until terminal or the attempt budget is spent.
    async fn poll_to_completion(
        &self,
        request: &PipelineRunRequest,
        handle: &PipelineRunHandle,
    ) -> PipelineStatus {
        let mut status = PipelineStatus::NotStarted;
        let mut checks = 0u32;

        loop {
            checks += 1;
            match self.client.run_status(&request.pipeline_url, handle).await {
                Ok(current) => {
                    status = current;
                    if status.is_terminal() {
                        break;
                    }
                }
                Err(error) => {
                    // Transient; keep the last known status and try again
                    // unless this was the final permitted attempt.
                    warn!(
                        run_id = request.run_id,
                        pipeline = %request.pipeline_name,
                        check = checks,
                        %error,
                        "Pipeline status query failed"
                    );
                    if checks >= request.max_checks {
                        break;
                    }
                }
            }

            if checks >= request.max_checks {
                break;
            }

            tokio::select! {
                () = tokio::time::sleep(request.check_interval) => {}
                () = self.shutdown.cancelled() => {}
            }
        }

        status
    }
}

impl std::fmt::Debug for PipelineRunner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PipelineRunner").finish_non_exhaustive()
    }
}

#[async_trait]
impl PipelineRunDriver for PipelineRunner {
    async fn process(&self, request: &PipelineRunRequest) -> Result<bool, PipelineError> {
        let calendar_year = request.financial_year.to_calendar_year();

        let handle = self
            .client
            .create_run(&request.pipeline_url, &request.pipeline_name, calendar_year)
            .await
            .map_err(|source| PipelineError::Trigger {
                pipeline: request.pipeline_name.clone(),
                source,
            })?;

        info!(
            run_id = request.run_id,
            pipeline = %request.pipeline_name,
            %handle,
            calendar_year,
            "Pipeline run triggered"
        );

        let status = self.poll_to_completion(request, &handle).await;
        let succeeded = status.is_successful();

        info!(
            run_id = request.run_id,
            pipeline = %request.pipeline_name,
            %status,
            succeeded,
            "Pipeline run polling finished"
        );

        let update = StatusUpdate::new(request.run_id, succeeded);
        let report_acknowledged = self
            .reporter
            .report(&request.status_update_endpoint, &update)
            .await
            .map_err(|source| PipelineError::Report {
                run_id: request.run_id,
                source,
            })?;

        Ok(succeeded && report_acknowledged)
    }
}
