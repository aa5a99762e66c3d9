//! Top-level error type aggregating the per-module errors.

use crate::config::ConfigurationError;
use crate::database::RepositoryError;
use crate::orchestration::PreparationError;
use crate::pipeline::PipelineError;
use crate::state_machine::StateMachineError;

#[derive(Debug, thiserror::Error)]
pub enum CalcRunError {
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("pipeline error: {0}")]
    Pipeline(#[from] PipelineError),

    #[error("preparation error: {0}")]
    Preparation(#[from] PreparationError),

    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),

    #[error("state machine error: {0}")]
    StateMachine(#[from] StateMachineError),
}

pub type Result<T> = std::result::Result<T, CalcRunError>;
