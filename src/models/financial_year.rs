//! # Financial Year
//!
//! Validated financial-year label used throughout the calculation run lifecycle.
//!
//! Runs are keyed by a UK-style financial year label such as `2024-25`. The
//! data refresh pipelines, however, ingest calendar-year data, so the label
//! carries a conversion to the calendar year whose figures feed the run.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A financial year label in `YYYY-YY` form, e.g. `2024-25`.
///
/// The second component must be the final two digits of the year following
/// the start year. Construction is validated; an in-range value can always
/// be converted to its calendar year.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FinancialYear {
    start_year: i32,
}

impl FinancialYear {
    /// Parse and validate a financial year label.
    pub fn new(label: &str) -> Result<Self, FinancialYearError> {
        label.parse()
    }

    /// The calendar year of the first day of this financial year.
    pub fn start_year(&self) -> i32 {
        self.start_year
    }

    /// The calendar year whose source data feeds a run for this financial
    /// year. Data for a financial year is reported against the preceding
    /// calendar year.
    pub fn to_calendar_year(&self) -> i32 {
        self.start_year - 1
    }
}

impl fmt::Display for FinancialYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{:02}", self.start_year, (self.start_year + 1) % 100)
    }
}

impl FromStr for FinancialYear {
    type Err = FinancialYearError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || FinancialYearError::InvalidLabel(s.to_string());

        let (start, end) = s.split_once('-').ok_or_else(invalid)?;
        if start.len() != 4 || end.len() != 2 {
            return Err(invalid());
        }

        let start_year: i32 = start.parse().map_err(|_| invalid())?;
        let end_digits: i32 = end.parse().map_err(|_| invalid())?;
        if end_digits != (start_year + 1) % 100 {
            return Err(FinancialYearError::NonConsecutive(s.to_string()));
        }

        Ok(Self { start_year })
    }
}

impl TryFrom<String> for FinancialYear {
    type Error = FinancialYearError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<FinancialYear> for String {
    fn from(value: FinancialYear) -> Self {
        value.to_string()
    }
}

/// Error raised for malformed financial year labels.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FinancialYearError {
    #[error("invalid financial year label '{0}', expected YYYY-YY")]
    InvalidLabel(String),
    #[error("financial year '{0}' does not span consecutive years")]
    NonConsecutive(String),
}
