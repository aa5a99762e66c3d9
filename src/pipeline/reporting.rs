//! # Outcome Reporting
//!
//! JSON status reports posted to the external status-tracking endpoint.
//!
//! Both the polling driver (once per pipeline run) and the run orchestrator
//! (once per aggregate outcome) report through this seam.

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use serde::Serialize;
use tracing::debug;
use url::Url;

/// The status API expects this literal placeholder rather than a real actor
/// identity.
const UPDATED_BY_PLACEHOLDER: &str = "string";

/// Body of an outcome report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusUpdate {
    #[serde(rename = "runId")]
    pub run_id: i64,
    #[serde(rename = "updatedBy")]
    pub updated_by: String,
    #[serde(rename = "isSuccessful")]
    pub is_successful: bool,
}

impl StatusUpdate {
    pub fn new(run_id: i64, is_successful: bool) -> Self {
        Self {
            run_id,
            updated_by: UPDATED_BY_PLACEHOLDER.to_string(),
            is_successful,
        }
    }
}

/// Errors raised while sending an outcome report.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("failed to serialize outcome report: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("outcome report POST to {endpoint} failed: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
}

/// Seam for posting outcome reports.
///
/// `Ok(true)` means the endpoint acknowledged with a success status code;
/// `Ok(false)` means it answered with a non-success code. Transport errors
/// are `Err`.
#[async_trait]
pub trait StatusReporter: Send + Sync {
    async fn report(&self, endpoint: &Url, update: &StatusUpdate) -> Result<bool, ReportError>;
}

/// Reqwest-backed [`StatusReporter`].
#[derive(Debug, Clone)]
pub struct HttpStatusReporter {
    http: Client,
}

impl HttpStatusReporter {
    pub fn new(http: Client) -> Self {
        Self { http }
    }
}

#[async_trait]
impl StatusReporter for HttpStatusReporter {
    async fn report(&self, endpoint: &Url, update: &StatusUpdate) -> Result<bool, ReportError> {
        let body = serde_json::to_vec(update)?;

        let response = self
            .http
            .post(endpoint.clone())
            .header(CONTENT_TYPE, "application/json; charset=utf-8")
            .body(body)
            .send()
            .await
            .map_err(|source| ReportError::Transport {
                endpoint: endpoint.to_string(),
                source,
            })?;

        debug!(
            run_id = update.run_id,
            is_successful = update.is_successful,
            status = %response.status(),
            "Outcome report sent"
        );

        Ok(response.status().is_success())
    }
}
