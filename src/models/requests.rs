//! Request DTOs handed to the orchestrator components by the trigger surface.

use serde::{Deserialize, Serialize};

use super::financial_year::FinancialYear;

/// Parameters for starting the pipeline phase of a calculation run.
///
/// Produced by the external intake surface (queue message, timer, HTTP);
/// this core only consumes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunParameters {
    pub run_id: i64,
    pub financial_year: FinancialYear,
    /// Identity of the actor that requested the run, carried for audit only.
    pub user: String,
}

/// Request to prepare the exported results for an already-classified run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalcResultsRequest {
    pub run_id: i64,
}
