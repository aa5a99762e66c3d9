#![allow(clippy::missing_errors_doc)] // Allow public functions without # Errors sections
#![allow(clippy::must_use_candidate)] // Allow methods without must_use when context is clear

//! # Calcrun Core
//!
//! Lifecycle orchestration core for periodic regulatory fee calculation
//! runs.
//!
//! ## Overview
//!
//! A calculation run is created by an external intake process, has its
//! source data refreshed by remote pipelines in an execution service, and
//! ends with an exported result artifact in durable storage. This crate owns
//! the control flow between those systems; the fee arithmetic, flat-file
//! layout and storage backend are collaborators behind trait seams.
//!
//! ## Module Organization
//!
//! - [`pipeline`] - execution service client, status polling driver and
//!   outcome reporting
//! - [`orchestration`] - the run orchestrator and the result preparation
//!   workflow
//! - [`models`] - calculation run records, request DTOs, file naming
//! - [`state_machine`] - run classification lifecycle
//! - [`validation`] - prerequisite reference checks
//! - [`database`] - sqlx-backed run repository
//! - [`config`] - typed, validated configuration
//! - [`error`] - structured error handling
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use calcrun_core::config;
//! use calcrun_core::pipeline::{
//!     HttpExecutionClient, HttpStatusReporter, PipelineRunner, StaticTokenProvider,
//! };
//! use calcrun_core::orchestration::RunOrchestrator;
//! use tokio_util::sync::CancellationToken;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = config::load(None)?;
//! let http = reqwest::Client::new();
//! let shutdown = CancellationToken::new();
//!
//! let client = Arc::new(HttpExecutionClient::new(
//!     http.clone(),
//!     Arc::new(StaticTokenProvider::new("token")),
//! ));
//! let reporter = Arc::new(HttpStatusReporter::new(http));
//! let driver = Arc::new(PipelineRunner::new(client, reporter.clone(), shutdown));
//!
//! let orchestrator = RunOrchestrator::new(driver, reporter, config.pipeline.clone());
//! # let _ = orchestrator;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod database;
pub mod error;
pub mod logging;
pub mod models;
pub mod orchestration;
pub mod pipeline;
pub mod state_machine;
pub mod validation;

pub use error::{CalcRunError, Result};
