//! # Calculation Run Repository
//!
//! Postgres implementation of the [`RunRepository`] seam.
//!
//! ## Database Schema
//!
//! Two tables are touched:
//! - `calculation_runs`: the run record; only the `classification` column is
//!   ever updated here
//! - `calculation_run_result_files`: one metadata row per successfully
//!   prepared run
//!
//! The success path writes the metadata row and the classification update in
//! a single transaction so a run can never appear `unclassified` without its
//! file metadata.

use async_trait::async_trait;
use chrono::NaiveDateTime;
use sqlx::{FromRow, PgPool};
use tracing::debug;

use super::RepositoryError;
use crate::models::{CalculationRun, FinancialYear, NewResultFileMetadata};
use crate::orchestration::types::RunRepository;
use crate::state_machine::RunClassification;

/// Row shape for `calculation_runs`; string columns are converted to their
/// typed forms after the fetch.
#[derive(Debug, FromRow)]
struct CalculationRunRow {
    id: i64,
    name: String,
    financial_year: String,
    classification: String,
    organisation_data_master_id: Option<i64>,
    pom_data_master_id: Option<i64>,
    default_parameter_setting_master_id: Option<i64>,
    lapcap_data_master_id: Option<i64>,
    created_at: NaiveDateTime,
    created_by: String,
}

impl TryFrom<CalculationRunRow> for CalculationRun {
    type Error = RepositoryError;

    fn try_from(row: CalculationRunRow) -> Result<Self, Self::Error> {
        let financial_year: FinancialYear =
            row.financial_year
                .parse()
                .map_err(|error| RepositoryError::InvalidRunData {
                    run_id: row.id,
                    detail: format!("{error}"),
                })?;
        let classification: RunClassification =
            row.classification
                .parse()
                .map_err(|error| RepositoryError::InvalidRunData {
                    run_id: row.id,
                    detail: error,
                })?;

        Ok(CalculationRun {
            id: row.id,
            name: row.name,
            financial_year,
            classification,
            organisation_data_master_id: row.organisation_data_master_id,
            pom_data_master_id: row.pom_data_master_id,
            default_parameter_setting_master_id: row.default_parameter_setting_master_id,
            lapcap_data_master_id: row.lapcap_data_master_id,
            created_at: row.created_at,
            created_by: row.created_by,
        })
    }
}

/// Postgres-backed [`RunRepository`].
#[derive(Debug, Clone)]
pub struct PgRunRepository {
    pool: PgPool,
}

impl PgRunRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RunRepository for PgRunRepository {
    async fn find_run(&self, run_id: i64) -> Result<Option<CalculationRun>, RepositoryError> {
        let row = sqlx::query_as::<_, CalculationRunRow>(
            r#"
            SELECT id, name, financial_year, classification,
                   organisation_data_master_id, pom_data_master_id,
                   default_parameter_setting_master_id, lapcap_data_master_id,
                   created_at, created_by
            FROM calculation_runs
            WHERE id = $1
            "#,
        )
        .bind(run_id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(CalculationRun::try_from).transpose()
    }

    async fn record_success(
        &self,
        run_id: i64,
        metadata: NewResultFileMetadata,
    ) -> Result<(), RepositoryError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO calculation_run_result_files (calculation_run_id, file_name, storage_location)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(metadata.calculation_run_id)
        .bind(&metadata.file_name)
        .bind(&metadata.storage_location)
        .execute(&mut *tx)
        .await?;

        sqlx::query("UPDATE calculation_runs SET classification = $2 WHERE id = $1")
            .bind(run_id)
            .bind(RunClassification::Unclassified.to_string())
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        debug!(run_id, file_name = %metadata.file_name, "Recorded successful preparation");
        Ok(())
    }

    async fn mark_error(&self, run_id: i64) -> Result<(), RepositoryError> {
        sqlx::query("UPDATE calculation_runs SET classification = $2 WHERE id = $1")
            .bind(run_id)
            .bind(RunClassification::Error.to_string())
            .execute(&self.pool)
            .await?;

        debug!(run_id, "Marked run as errored");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn row() -> CalculationRunRow {
        CalculationRunRow {
            id: 3,
            name: "Winter run".to_string(),
            financial_year: "2024-25".to_string(),
            classification: "running".to_string(),
            organisation_data_master_id: Some(1),
            pom_data_master_id: Some(2),
            default_parameter_setting_master_id: Some(3),
            lapcap_data_master_id: Some(4),
            created_at: Utc::now().naive_utc(),
            created_by: "intake".to_string(),
        }
    }

    #[test]
    fn row_converts_to_typed_run() {
        let run = CalculationRun::try_from(row()).unwrap();
        assert_eq!(run.id, 3);
        assert_eq!(run.classification, RunClassification::Running);
        assert_eq!(run.financial_year.to_calendar_year(), 2023);
    }

    #[test]
    fn row_with_bad_classification_is_rejected() {
        let mut bad = row();
        bad.classification = "finished".to_string();
        assert!(matches!(
            CalculationRun::try_from(bad),
            Err(RepositoryError::InvalidRunData { run_id: 3, .. })
        ));
    }

    #[test]
    fn row_with_bad_financial_year_is_rejected() {
        let mut bad = row();
        bad.financial_year = "24-25".to_string();
        assert!(CalculationRun::try_from(bad).is_err());
    }
}
