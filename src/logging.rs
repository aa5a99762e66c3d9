//! # Structured Logging
//!
//! Console logging via `tracing` with an environment-driven filter.

use std::sync::OnceLock;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

static LOGGER_INITIALIZED: OnceLock<()> = OnceLock::new();

/// Initialize structured logging.
///
/// The filter is taken from `RUST_LOG`, defaulting to `info`. Safe to call
/// more than once; an already-installed global subscriber is left in place.
pub fn init_logging() {
    LOGGER_INITIALIZED.get_or_init(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        let subscriber = tracing_subscriber::registry()
            .with(fmt::layer().with_target(true).with_level(true))
            .with(filter);

        if subscriber.try_init().is_err() {
            tracing::debug!("global tracing subscriber already initialized");
        }
    });
}
