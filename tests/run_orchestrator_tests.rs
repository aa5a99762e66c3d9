//! Orchestrator sequencing: refresh flag, org-then-pom ordering, aggregate
//! reporting.

mod common;

use std::sync::Arc;

use calcrun_core::orchestration::RunOrchestrator;
use calcrun_core::pipeline::{
    ClientError, PipelineError, PipelineRunDriver, StatusReporter,
};
use common::{arc, pipeline_config, run_parameters, MockDriver, MockStatusReporter};

#[tokio::test]
async fn disabled_refresh_flag_skips_drivers_but_still_reports() {
    let driver = arc(MockDriver::new(vec![]));
    let reporter = arc(MockStatusReporter::acknowledging());
    let orchestrator = RunOrchestrator::new(
        Arc::clone(&driver) as Arc<dyn PipelineRunDriver>,
        Arc::clone(&reporter) as Arc<dyn StatusReporter>,
        pipeline_config(false),
    );

    let outcome = orchestrator.start_process(&run_parameters(21)).await.unwrap();

    assert!(outcome);
    assert_eq!(driver.invocation_count(), 0);
    let updates = reporter.sent_updates();
    assert_eq!(updates.len(), 1);
    assert_eq!(updates[0].run_id, 21);
    assert!(updates[0].is_successful);
}

#[tokio::test]
async fn both_pipelines_run_in_order_when_org_succeeds() {
    let driver = arc(MockDriver::new(vec![Ok(true), Ok(true)]));
    let reporter = arc(MockStatusReporter::acknowledging());
    let orchestrator = RunOrchestrator::new(
        Arc::clone(&driver) as Arc<dyn PipelineRunDriver>,
        Arc::clone(&reporter) as Arc<dyn StatusReporter>,
        pipeline_config(true),
    );

    let outcome = orchestrator.start_process(&run_parameters(22)).await.unwrap();

    assert!(outcome);
    assert_eq!(
        driver.pipelines_driven(),
        vec!["org-data-refresh".to_string(), "pom-data-refresh".to_string()]
    );
    let updates = reporter.sent_updates();
    assert_eq!(updates.len(), 1);
    assert!(updates[0].is_successful);
}

#[tokio::test]
async fn pom_pipeline_is_never_driven_when_org_fails() {
    let driver = arc(MockDriver::new(vec![Ok(false)]));
    let reporter = arc(MockStatusReporter::acknowledging());
    let orchestrator = RunOrchestrator::new(
        Arc::clone(&driver) as Arc<dyn PipelineRunDriver>,
        Arc::clone(&reporter) as Arc<dyn StatusReporter>,
        pipeline_config(true),
    );

    let outcome = orchestrator.start_process(&run_parameters(23)).await.unwrap();

    // The aggregate report still goes out and its acknowledgement decides
    // the return value.
    assert!(outcome);
    assert_eq!(driver.pipelines_driven(), vec!["org-data-refresh".to_string()]);
    let updates = reporter.sent_updates();
    assert_eq!(updates.len(), 1);
    assert!(!updates[0].is_successful);
}

#[tokio::test]
async fn failed_pom_pipeline_reports_unsuccessful_aggregate() {
    let driver = arc(MockDriver::new(vec![Ok(true), Ok(false)]));
    let reporter = arc(MockStatusReporter::acknowledging());
    let orchestrator = RunOrchestrator::new(
        Arc::clone(&driver) as Arc<dyn PipelineRunDriver>,
        Arc::clone(&reporter) as Arc<dyn StatusReporter>,
        pipeline_config(true),
    );

    orchestrator.start_process(&run_parameters(24)).await.unwrap();

    assert_eq!(driver.invocation_count(), 2);
    assert!(!reporter.sent_updates()[0].is_successful);
}

#[tokio::test]
async fn rejected_aggregate_report_returns_false() {
    let driver = arc(MockDriver::new(vec![]));
    let reporter = arc(MockStatusReporter::rejecting());
    let orchestrator = RunOrchestrator::new(
        Arc::clone(&driver) as Arc<dyn PipelineRunDriver>,
        Arc::clone(&reporter) as Arc<dyn StatusReporter>,
        pipeline_config(false),
    );

    let outcome = orchestrator.start_process(&run_parameters(25)).await.unwrap();

    assert!(!outcome);
}

#[tokio::test]
async fn driver_error_propagates() {
    let driver = arc(MockDriver::new(vec![Err(PipelineError::Trigger {
        pipeline: "org-data-refresh".to_string(),
        source: ClientError::Malformed("trigger rejected".to_string()),
    })]));
    let reporter = arc(MockStatusReporter::acknowledging());
    let orchestrator = RunOrchestrator::new(
        Arc::clone(&driver) as Arc<dyn PipelineRunDriver>,
        Arc::clone(&reporter) as Arc<dyn StatusReporter>,
        pipeline_config(true),
    );

    let result = orchestrator.start_process(&run_parameters(26)).await;

    assert!(matches!(result, Err(PipelineError::Trigger { .. })));
    assert!(reporter.sent_updates().is_empty());
}
