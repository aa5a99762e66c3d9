//! # Result File Naming and Metadata
//!
//! Deterministic naming for exported result artifacts and the metadata
//! record persisted once an artifact has been uploaded.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Deterministic file name for an exported result artifact.
///
/// The name is a pure function of the run id, run name and run date, so a
/// re-run for the same inputs derives the same name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultFileName {
    run_id: i64,
    run_name: String,
    run_date: DateTime<Utc>,
}

impl ResultFileName {
    pub fn new(run_id: i64, run_name: &str, run_date: DateTime<Utc>) -> Self {
        Self {
            run_id,
            run_name: run_name.to_string(),
            run_date,
        }
    }
}

impl fmt::Display for ResultFileName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}_Results File_{}.csv",
            self.run_id,
            self.run_name,
            self.run_date.format("%d%m%Y")
        )
    }
}

/// Metadata persisted for an uploaded result file.
///
/// Exactly one record exists per successfully prepared run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultFileMetadata {
    pub id: i64,
    pub calculation_run_id: i64,
    pub file_name: String,
    pub storage_location: String,
}

/// Metadata for creation (without the generated id).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewResultFileMetadata {
    pub calculation_run_id: i64,
    pub file_name: String,
    pub storage_location: String,
}
