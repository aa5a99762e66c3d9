//! # Database Layer
//!
//! The sqlx-backed repository for calculation run records and result file
//! metadata. Query detail stays behind the [`RunRepository`] seam so the
//! workflow never touches SQL directly.
//!
//! [`RunRepository`]: crate::orchestration::types::RunRepository

pub mod run_repository;

pub use run_repository::PgRunRepository;

/// Errors raised by repository operations.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("calculation run {run_id} has invalid stored data: {detail}")]
    InvalidRunData { run_id: i64, detail: String },
}
