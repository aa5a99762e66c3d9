//! Per-invocation value types for driving one pipeline run.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;
use uuid::Uuid;

use crate::config::PipelineConfig;
use crate::models::{FinancialYear, RunParameters};

/// Everything needed to drive one remote pipeline run to completion.
///
/// Built per invocation from the pipeline configuration plus the run
/// parameters; never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineRunRequest {
    pub run_id: i64,
    pub financial_year: FinancialYear,
    pub pipeline_url: Url,
    pub pipeline_name: String,
    pub max_checks: u32,
    pub check_interval: Duration,
    pub status_update_endpoint: Url,
}

impl PipelineRunRequest {
    /// Build a request for the named pipeline from configuration and run
    /// parameters.
    pub fn for_pipeline(
        config: &PipelineConfig,
        params: &RunParameters,
        pipeline_name: &str,
    ) -> Self {
        Self {
            run_id: params.run_id,
            financial_year: params.financial_year.clone(),
            pipeline_url: config.pipeline_url.clone(),
            pipeline_name: pipeline_name.to_string(),
            max_checks: config.max_check_count,
            check_interval: config.check_interval(),
            status_update_endpoint: config.status_update_endpoint.clone(),
        }
    }
}

/// Opaque correlation handle for a triggered pipeline run.
///
/// Returned by the execution service on trigger; only meaningful for
/// addressing status polls within the same invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PipelineRunHandle(Uuid);

impl PipelineRunHandle {
    pub fn new(id: Uuid) -> Self {
        Self(id)
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl fmt::Display for PipelineRunHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
