//! # Calculation Run Model
//!
//! The persistent record for one calculation run of the reporting scheme.
//!
//! ## Overview
//!
//! A `CalculationRun` is created by the external intake process with its
//! classification set to `Running` and four references to the master data
//! sets the calculation depends on. This core reads the record, and the
//! result preparation workflow is the only place that mutates it, via the
//! classification column.
//!
//! ## Database Schema
//!
//! Maps to the `calculation_runs` table:
//! - `id`: primary key (BIGINT)
//! - `name`: run display name
//! - `financial_year`: `YYYY-YY` label
//! - `classification`: lifecycle state (`running` / `unclassified` / `error`)
//! - four nullable master-data references
//! - `created_at` / `created_by` audit columns

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::financial_year::FinancialYear;
use crate::state_machine::RunClassification;

/// A calculation run record as read from storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationRun {
    pub id: i64,
    pub name: String,
    pub financial_year: FinancialYear,
    pub classification: RunClassification,
    pub organisation_data_master_id: Option<i64>,
    pub pom_data_master_id: Option<i64>,
    pub default_parameter_setting_master_id: Option<i64>,
    pub lapcap_data_master_id: Option<i64>,
    pub created_at: NaiveDateTime,
    pub created_by: String,
}
