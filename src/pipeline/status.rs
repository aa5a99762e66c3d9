//! Pipeline run status values reported by the execution service.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Status of a remote pipeline run.
///
/// Anything other than `InProgress` ends the poll loop, `Queued` included.
/// Status strings the execution service may add in future arrive as
/// [`Other`] and are treated as terminal and unsuccessful rather than
/// polled forever.
///
/// [`Other`]: PipelineStatus::Other
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PipelineStatus {
    /// No successful status query has been made yet
    NotStarted,
    /// Accepted by the execution service but not yet running
    Queued,
    /// The run is executing
    InProgress,
    /// The run completed successfully
    Succeeded,
    /// The run completed with an error
    Failed,
    /// The run was cancelled in the execution service
    Cancelled,
    /// Unrecognized status string from the execution service
    Other(String),
}

impl PipelineStatus {
    /// Check if this status ends the poll loop.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::InProgress)
    }

    /// Check if this status represents a successful run.
    pub fn is_successful(&self) -> bool {
        matches!(self, Self::Succeeded)
    }
}

impl fmt::Display for PipelineStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotStarted => write!(f, "NotStarted"),
            Self::Queued => write!(f, "Queued"),
            Self::InProgress => write!(f, "InProgress"),
            Self::Succeeded => write!(f, "Succeeded"),
            Self::Failed => write!(f, "Failed"),
            Self::Cancelled => write!(f, "Cancelled"),
            Self::Other(value) => write!(f, "{value}"),
        }
    }
}

impl From<String> for PipelineStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "NotStarted" => Self::NotStarted,
            "Queued" => Self::Queued,
            "InProgress" => Self::InProgress,
            "Succeeded" => Self::Succeeded,
            "Failed" => Self::Failed,
            "Cancelled" => Self::Cancelled,
            _ => Self::Other(value),
        }
    }
}

impl From<PipelineStatus> for String {
    fn from(value: PipelineStatus) -> Self {
        value.to_string()
    }
}
