//! # Remote Pipeline Execution
//!
//! Everything needed to drive the data refresh pipelines in the external
//! execution service:
//!
//! - [`types`] - per-invocation run request and correlation handle
//! - [`status`] - wire status values and terminal-state rules
//! - [`credentials`] - credential acquisition seam
//! - [`client`] - execution service HTTP client
//! - [`reporting`] - outcome report contract and POST
//! - [`runner`] - the trigger-poll-report driver

pub mod client;
pub mod credentials;
pub mod reporting;
pub mod runner;
pub mod status;
pub mod types;

pub use client::{ClientError, ExecutionPipelineClient, HttpExecutionClient};
pub use credentials::{CredentialError, CredentialProvider, StaticTokenProvider};
pub use reporting::{HttpStatusReporter, ReportError, StatusReporter, StatusUpdate};
pub use runner::{PipelineError, PipelineRunDriver, PipelineRunner};
pub use status::PipelineStatus;
pub use types::{PipelineRunHandle, PipelineRunRequest};
