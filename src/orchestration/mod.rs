//! # Orchestration
//!
//! The two workflows that make up the calculation run lifecycle:
//!
//! - [`run_orchestrator`] - sequences the data refresh pipelines and posts
//!   the aggregate outcome report
//! - [`result_preparation`] - validates a run, builds/exports/uploads the
//!   result artifact and drives the classification state machine
//!
//! Collaborator seams live in [`types`]; preparations of the same run id
//! are serialized through [`run_lock`].

pub mod errors;
pub mod result_preparation;
pub mod run_lock;
pub mod run_orchestrator;
pub mod types;

pub use errors::PreparationError;
pub use result_preparation::{PreparationOutcome, ResultPreparationWorkflow};
pub use run_lock::RunLockRegistry;
pub use run_orchestrator::RunOrchestrator;
pub use types::{
    CalcResult, CalcResultBuilder, CalcResultDetail, CalcResultExporter, CollaboratorError,
    RunRepository, StorageService,
};
