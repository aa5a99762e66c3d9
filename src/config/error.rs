//! Configuration error types.

/// Errors raised while loading or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigurationError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("invalid configuration value for '{field}': {reason}")]
    Invalid {
        field: &'static str,
        reason: String,
    },
}

pub type ConfigResult<T> = Result<T, ConfigurationError>;
