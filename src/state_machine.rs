//! # Run Classification State Machine
//!
//! Lifecycle state management for calculation runs.
//!
//! A run is created by the intake process in the `Running` classification.
//! This core owns exactly two transitions out of it: a successful result
//! preparation moves the run to `Unclassified` (ready for a classification
//! decision downstream), and any failure after validation moves it to
//! `Error`. Both outcomes are terminal as far as this core is concerned.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Classification states for a calculation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunClassification {
    /// Initial state set by the intake process before this core runs
    Running,
    /// Result preparation completed; awaiting downstream classification
    Unclassified,
    /// Result preparation failed after validation
    Error,
}

/// Events that drive classification transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassificationEvent {
    /// Result preparation completed successfully
    PreparationSucceeded,
    /// Result preparation failed or was cancelled
    PreparationFailed,
}

impl RunClassification {
    /// Check if this is a terminal state (no further transitions owned by this core).
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Unclassified | Self::Error)
    }

    /// Attempt to transition on an event, returning the target state.
    pub fn transition(
        self,
        event: ClassificationEvent,
    ) -> Result<RunClassification, StateMachineError> {
        match (self, event) {
            (Self::Running, ClassificationEvent::PreparationSucceeded) => Ok(Self::Unclassified),
            (Self::Running, ClassificationEvent::PreparationFailed) => Ok(Self::Error),
            (from, event) => Err(StateMachineError::InvalidTransition { from, event }),
        }
    }
}

impl fmt::Display for RunClassification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Running => write!(f, "running"),
            Self::Unclassified => write!(f, "unclassified"),
            Self::Error => write!(f, "error"),
        }
    }
}

impl FromStr for RunClassification {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "running" => Ok(Self::Running),
            "unclassified" => Ok(Self::Unclassified),
            "error" => Ok(Self::Error),
            _ => Err(format!("Invalid run classification: {s}")),
        }
    }
}

/// Error types for classification transitions.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StateMachineError {
    #[error("invalid classification transition from '{from}' on {event:?}")]
    InvalidTransition {
        from: RunClassification,
        event: ClassificationEvent,
    },
}
