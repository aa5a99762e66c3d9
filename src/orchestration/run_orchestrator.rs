//! # Run Orchestrator
//!
//! Sequences the data refresh pipelines for a calculation run and posts the
//! aggregate outcome report.
//!
//! ## Overview
//!
//! When the refresh flag is enabled, the organisation-data pipeline runs
//! first and the POM-data pipeline runs only if it succeeded; the aggregate
//! outcome is the POM outcome (false whenever the organisation pipeline
//! failed). When the flag is disabled the refresh phase is trivially
//! successful and no pipeline is driven.
//!
//! The driver already posts one report per pipeline run; this orchestrator
//! posts one more for the aggregate. Both report sites are deliberate.

use std::sync::Arc;

use tracing::info;

use crate::config::PipelineConfig;
use crate::models::RunParameters;
use crate::pipeline::{
    PipelineError, PipelineRunDriver, PipelineRunRequest, StatusReporter, StatusUpdate,
};

/// Orchestrates the pipeline phase of one calculation run.
pub struct RunOrchestrator {
    driver: Arc<dyn PipelineRunDriver>,
    reporter: Arc<dyn StatusReporter>,
    config: PipelineConfig,
}

impl RunOrchestrator {
    pub fn new(
        driver: Arc<dyn PipelineRunDriver>,
        reporter: Arc<dyn StatusReporter>,
        config: PipelineConfig,
    ) -> Self {
        Self {
            driver,
            reporter,
            config,
        }
    }

    /// Run the refresh pipelines as configured and post the aggregate
    /// outcome report. Returns `Ok(true)` iff that report was acknowledged
    /// with a success status code.
    pub async fn start_process(&self, params: &RunParameters) -> Result<bool, PipelineError> {
        info!(run_id = params.run_id, "Calculation run process started");

        let refresh_successful = if self.config.execute_refresh_pipelines {
            self.run_refresh_pipelines(params).await?
        } else {
            info!(run_id = params.run_id, "Refresh pipelines disabled, skipping");
            true
        };

        let update = StatusUpdate::new(params.run_id, refresh_successful);
        let report_acknowledged = self
            .reporter
            .report(&self.config.status_update_endpoint, &update)
            .await
            .map_err(|source| PipelineError::Report {
                run_id: params.run_id,
                source,
            })?;

        info!(
            run_id = params.run_id,
            refresh_successful, report_acknowledged, "Calculation run process finished"
        );

        Ok(report_acknowledged)
    }

    /// Drive org-data, then pom-data only on success.
    async fn run_refresh_pipelines(&self, params: &RunParameters) -> Result<bool, PipelineError> {
        let org_request = PipelineRunRequest::for_pipeline(
            &self.config,
            params,
            &self.config.org_data_pipeline_name,
        );
        let org_successful = self.driver.process(&org_request).await?;
        info!(run_id = params.run_id, org_successful, "Org data pipeline finished");

        if !org_successful {
            return Ok(false);
        }

        let pom_request = PipelineRunRequest::for_pipeline(
            &self.config,
            params,
            &self.config.pom_data_pipeline_name,
        );
        let pom_successful = self.driver.process(&pom_request).await?;
        info!(run_id = params.run_id, pom_successful, "Pom data pipeline finished");

        Ok(pom_successful)
    }
}

impl std::fmt::Debug for RunOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RunOrchestrator")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
