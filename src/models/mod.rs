//! Data models for the calculation run lifecycle.

pub mod calculation_run;
pub mod financial_year;
pub mod requests;
pub mod result_file;

pub use calculation_run::CalculationRun;
pub use financial_year::{FinancialYear, FinancialYearError};
pub use requests::{CalcResultsRequest, RunParameters};
pub use result_file::{NewResultFileMetadata, ResultFileMetadata, ResultFileName};
