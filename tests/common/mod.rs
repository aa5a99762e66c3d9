//! Mock collaborators for exercising the orchestration workflows without a
//! real execution service, storage account or database.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use url::Url;

use calcrun_core::config::PipelineConfig;
use calcrun_core::database::RepositoryError;
use calcrun_core::models::{
    CalcResultsRequest, CalculationRun, FinancialYear, NewResultFileMetadata, RunParameters,
};
use calcrun_core::orchestration::types::{
    CalcResult, CalcResultBuilder, CalcResultDetail, CalcResultExporter, CollaboratorError,
    RunRepository, StorageService,
};
use calcrun_core::pipeline::{
    ClientError, ExecutionPipelineClient, PipelineError, PipelineRunDriver, PipelineRunHandle,
    PipelineRunRequest, PipelineStatus, ReportError, StatusReporter, StatusUpdate,
};
use calcrun_core::state_machine::RunClassification;

pub fn pipeline_config(execute_refresh_pipelines: bool) -> PipelineConfig {
    PipelineConfig {
        pipeline_url: Url::parse("https://pipelines.example.com").unwrap(),
        org_data_pipeline_name: "org-data-refresh".to_string(),
        pom_data_pipeline_name: "pom-data-refresh".to_string(),
        max_check_count: 3,
        check_interval_ms: 1,
        status_update_endpoint: Url::parse("https://status.example.com/update").unwrap(),
        execute_refresh_pipelines,
    }
}

pub fn run_parameters(run_id: i64) -> RunParameters {
    RunParameters {
        run_id,
        financial_year: FinancialYear::new("2024-25").unwrap(),
        user: "scheduler".to_string(),
    }
}

pub fn pipeline_run_request(run_id: i64, max_checks: u32) -> PipelineRunRequest {
    let mut config = pipeline_config(true);
    config.max_check_count = max_checks;
    PipelineRunRequest::for_pipeline(&config, &run_parameters(run_id), "org-data-refresh")
}

pub fn calculation_run(run_id: i64) -> CalculationRun {
    CalculationRun {
        id: run_id,
        name: "Autumn run".to_string(),
        financial_year: FinancialYear::new("2024-25").unwrap(),
        classification: RunClassification::Running,
        organisation_data_master_id: Some(1),
        pom_data_master_id: Some(2),
        default_parameter_setting_master_id: Some(3),
        lapcap_data_master_id: Some(4),
        created_at: Utc::now().naive_utc(),
        created_by: "intake".to_string(),
    }
}

pub fn calc_result(run_id: i64) -> CalcResult {
    CalcResult {
        detail: CalcResultDetail {
            run_id,
            run_name: "Autumn run".to_string(),
            run_date: Utc.with_ymd_and_hms(2024, 11, 21, 9, 0, 0).unwrap(),
        },
        sections: serde_json::json!({"summary": []}),
    }
}

pub fn collaborator_error(message: &str) -> CollaboratorError {
    message.to_string().into()
}

/// Execution service client replaying canned trigger and status responses.
pub struct MockExecutionClient {
    create_results: Mutex<VecDeque<Result<PipelineRunHandle, ClientError>>>,
    status_results: Mutex<VecDeque<Result<PipelineStatus, ClientError>>>,
    pub create_calls: Mutex<Vec<String>>,
    pub status_calls: Mutex<usize>,
}

impl MockExecutionClient {
    pub fn new(
        create_results: Vec<Result<PipelineRunHandle, ClientError>>,
        status_results: Vec<Result<PipelineStatus, ClientError>>,
    ) -> Self {
        Self {
            create_results: Mutex::new(create_results.into()),
            status_results: Mutex::new(status_results.into()),
            create_calls: Mutex::new(Vec::new()),
            status_calls: Mutex::new(0),
        }
    }

    pub fn triggering(status_results: Vec<Result<PipelineStatus, ClientError>>) -> Self {
        Self::new(
            vec![Ok(PipelineRunHandle::new(uuid::Uuid::new_v4()))],
            status_results,
        )
    }

    pub fn status_query_count(&self) -> usize {
        *self.status_calls.lock().unwrap()
    }
}

#[async_trait]
impl ExecutionPipelineClient for MockExecutionClient {
    async fn create_run(
        &self,
        _pipeline_url: &Url,
        pipeline_name: &str,
        _calendar_year: i32,
    ) -> Result<PipelineRunHandle, ClientError> {
        self.create_calls
            .lock()
            .unwrap()
            .push(pipeline_name.to_string());
        self.create_results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(PipelineRunHandle::new(uuid::Uuid::new_v4())))
    }

    async fn run_status(
        &self,
        _pipeline_url: &Url,
        _handle: &PipelineRunHandle,
    ) -> Result<PipelineStatus, ClientError> {
        *self.status_calls.lock().unwrap() += 1;
        self.status_results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Ok(PipelineStatus::InProgress))
    }
}

/// Status reporter recording every report it is asked to send.
pub struct MockStatusReporter {
    acknowledge: bool,
    pub sent: Mutex<Vec<(Url, StatusUpdate)>>,
}

impl MockStatusReporter {
    pub fn acknowledging() -> Self {
        Self {
            acknowledge: true,
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn rejecting() -> Self {
        Self {
            acknowledge: false,
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn sent_updates(&self) -> Vec<StatusUpdate> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .map(|(_, update)| update.clone())
            .collect()
    }
}

#[async_trait]
impl StatusReporter for MockStatusReporter {
    async fn report(&self, endpoint: &Url, update: &StatusUpdate) -> Result<bool, ReportError> {
        self.sent
            .lock()
            .unwrap()
            .push((endpoint.clone(), update.clone()));
        Ok(self.acknowledge)
    }
}

/// Pipeline run driver replaying canned outcomes per invocation.
pub struct MockDriver {
    outcomes: Mutex<VecDeque<Result<bool, PipelineError>>>,
    pub requests: Mutex<Vec<PipelineRunRequest>>,
}

impl MockDriver {
    pub fn new(outcomes: Vec<Result<bool, PipelineError>>) -> Self {
        Self {
            outcomes: Mutex::new(outcomes.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn invocation_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn pipelines_driven(&self) -> Vec<String> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .map(|request| request.pipeline_name.clone())
            .collect()
    }
}

#[async_trait]
impl PipelineRunDriver for MockDriver {
    async fn process(&self, request: &PipelineRunRequest) -> Result<bool, PipelineError> {
        self.requests.lock().unwrap().push(request.clone());
        self.outcomes
            .lock()
            .unwrap()
            .pop_front()
            .expect("driver invoked more times than outcomes were provided")
    }
}

/// In-memory repository tracking every mutation.
#[derive(Default)]
pub struct MockRepository {
    pub run: Mutex<Option<CalculationRun>>,
    pub fail_lookup: bool,
    pub fail_record_success: bool,
    pub recorded_metadata: Mutex<Vec<NewResultFileMetadata>>,
    pub error_marks: Mutex<Vec<i64>>,
}

impl MockRepository {
    pub fn with_run(run: CalculationRun) -> Self {
        Self {
            run: Mutex::new(Some(run)),
            ..Self::default()
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn classification_of_stored_run(&self) -> Option<RunClassification> {
        self.run
            .lock()
            .unwrap()
            .as_ref()
            .map(|run| run.classification)
    }
}

#[async_trait]
impl RunRepository for MockRepository {
    async fn find_run(&self, run_id: i64) -> Result<Option<CalculationRun>, RepositoryError> {
        if self.fail_lookup {
            return Err(RepositoryError::InvalidRunData {
                run_id,
                detail: "simulated lookup failure".to_string(),
            });
        }
        Ok(self
            .run
            .lock()
            .unwrap()
            .clone()
            .filter(|run| run.id == run_id))
    }

    async fn record_success(
        &self,
        run_id: i64,
        metadata: NewResultFileMetadata,
    ) -> Result<(), RepositoryError> {
        if self.fail_record_success {
            return Err(RepositoryError::InvalidRunData {
                run_id,
                detail: "simulated persistence failure".to_string(),
            });
        }
        self.recorded_metadata.lock().unwrap().push(metadata);
        if let Some(run) = self.run.lock().unwrap().as_mut() {
            run.classification = RunClassification::Unclassified;
        }
        Ok(())
    }

    async fn mark_error(&self, run_id: i64) -> Result<(), RepositoryError> {
        self.error_marks.lock().unwrap().push(run_id);
        if let Some(run) = self.run.lock().unwrap().as_mut() {
            run.classification = RunClassification::Error;
        }
        Ok(())
    }
}

/// Builder returning a canned aggregate, a failure, or never completing.
pub enum MockBuilder {
    Succeeding(CalcResult),
    Failing(String),
    NeverCompleting,
}

#[async_trait]
impl CalcResultBuilder for MockBuilder {
    async fn build(&self, _request: &CalcResultsRequest) -> Result<CalcResult, CollaboratorError> {
        match self {
            Self::Succeeding(result) => Ok(result.clone()),
            Self::Failing(message) => Err(collaborator_error(message)),
            Self::NeverCompleting => {
                futures::future::pending::<()>().await;
                unreachable!()
            }
        }
    }
}

/// Exporter producing fixed flat-file text or failing.
pub enum MockExporter {
    Succeeding(String),
    Failing(String),
}

impl CalcResultExporter for MockExporter {
    fn export(&self, _results: &CalcResult) -> Result<String, CollaboratorError> {
        match self {
            Self::Succeeding(content) => Ok(content.clone()),
            Self::Failing(message) => Err(collaborator_error(message)),
        }
    }
}

/// Storage returning a fixed location, an empty location, or failing.
pub enum MockStorage {
    Succeeding(String),
    EmptyLocation,
    Failing(String),
}

#[async_trait]
impl StorageService for MockStorage {
    async fn upload(&self, _file_name: &str, _content: &str) -> Result<String, CollaboratorError> {
        match self {
            Self::Succeeding(location) => Ok(location.clone()),
            Self::EmptyLocation => Ok(String::new()),
            Self::Failing(message) => Err(collaborator_error(message)),
        }
    }
}

pub fn arc<T>(value: T) -> Arc<T> {
    Arc::new(value)
}
