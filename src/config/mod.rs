//! # Configuration
//!
//! Explicit, typed configuration for the orchestrator components.
//!
//! All settings are loaded once at startup into an immutable
//! [`CalculatorConfig`] and passed by value into the components that need
//! them. There are no ambient environment lookups at call sites and no
//! silent fallbacks: a missing or invalid value fails the load.

pub mod error;
pub mod loader;

use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

pub use error::{ConfigResult, ConfigurationError};
pub use loader::load;

/// Root configuration for the calculation run core.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CalculatorConfig {
    /// Remote pipeline execution and status reporting settings
    pub pipeline: PipelineConfig,
    /// Database connection settings
    pub database: DatabaseConfig,
}

impl CalculatorConfig {
    /// Validate the configuration, rejecting values the components cannot
    /// operate with.
    pub fn validate(&self) -> ConfigResult<()> {
        self.pipeline.validate()?;
        self.database.validate()
    }
}

/// Settings for the remote pipeline execution service.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PipelineConfig {
    /// Base URL of the execution service that hosts the pipelines
    pub pipeline_url: Url,
    /// Name of the organisation-data refresh pipeline (dataset A)
    pub org_data_pipeline_name: String,
    /// Name of the POM-data refresh pipeline (dataset B)
    pub pom_data_pipeline_name: String,
    /// Maximum number of status polls before a run is treated as unresolved
    pub max_check_count: u32,
    /// Fixed delay between status polls, in milliseconds
    pub check_interval_ms: u64,
    /// Endpoint that receives outcome reports
    pub status_update_endpoint: Url,
    /// Whether the data refresh pipelines run at all; when false the
    /// pipeline phase is trivially successful
    pub execute_refresh_pipelines: bool,
}

impl PipelineConfig {
    /// The delay between status polls as a [`Duration`].
    pub fn check_interval(&self) -> Duration {
        Duration::from_millis(self.check_interval_ms)
    }

    fn validate(&self) -> ConfigResult<()> {
        if self.max_check_count == 0 {
            return Err(ConfigurationError::Invalid {
                field: "pipeline.max_check_count",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.org_data_pipeline_name.trim().is_empty() {
            return Err(ConfigurationError::Invalid {
                field: "pipeline.org_data_pipeline_name",
                reason: "must not be empty".to_string(),
            });
        }
        if self.pom_data_pipeline_name.trim().is_empty() {
            return Err(ConfigurationError::Invalid {
                field: "pipeline.pom_data_pipeline_name",
                reason: "must not be empty".to_string(),
            });
        }
        Ok(())
    }
}

/// Database connection configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "DatabaseConfig::default_pool")]
    pub pool: u32,
}

impl DatabaseConfig {
    fn default_pool() -> u32 {
        10
    }

    fn validate(&self) -> ConfigResult<()> {
        if self.url.trim().is_empty() {
            return Err(ConfigurationError::Invalid {
                field: "database.url",
                reason: "must not be empty".to_string(),
            });
        }
        Ok(())
    }
}
