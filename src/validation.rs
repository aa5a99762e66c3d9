//! # Calculation Run Validation
//!
//! Prerequisite checks applied before result preparation is allowed to run.
//!
//! A run can only be prepared once all four master-data references have been
//! populated by the data refresh pipelines. A failed validation is a silent
//! no-op outcome: the run's classification is left untouched.

use crate::models::CalculationRun;

/// Outcome of validating a calculation run's prerequisite references.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationResult {
    error_messages: Vec<String>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.error_messages.is_empty()
    }

    pub fn error_messages(&self) -> &[String] {
        &self.error_messages
    }

    fn push_missing(&mut self, field: &str) {
        self.error_messages.push(format!("{field} is null"));
    }
}

/// Validate that all four prerequisite master-data references are present.
///
/// Reports one message per missing reference, in schema column order.
pub fn validate_run_references(run: &CalculationRun) -> ValidationResult {
    let mut result = ValidationResult::default();

    if run.organisation_data_master_id.is_none() {
        result.push_missing("organisation_data_master_id");
    }
    if run.pom_data_master_id.is_none() {
        result.push_missing("pom_data_master_id");
    }
    if run.default_parameter_setting_master_id.is_none() {
        result.push_missing("default_parameter_setting_master_id");
    }
    if run.lapcap_data_master_id.is_none() {
        result.push_missing("lapcap_data_master_id");
    }

    result
}
