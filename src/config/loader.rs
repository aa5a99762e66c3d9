//! Configuration loader.
//!
//! Loads the typed configuration from an optional file source plus
//! `CALCRUN__`-prefixed environment overrides, then validates it before
//! handing it to the rest of the system.

use std::path::Path;

use config::{Config, Environment, File};
use tracing::debug;

use super::{CalculatorConfig, ConfigResult};

/// Default base name searched for in the working directory (any format the
/// `config` crate understands, e.g. `calcrun.toml`).
const DEFAULT_CONFIG_BASENAME: &str = "calcrun";

/// Environment variable prefix; `CALCRUN__PIPELINE__MAX_CHECK_COUNT=5`
/// overrides `pipeline.max_check_count`.
const ENV_PREFIX: &str = "CALCRUN";

/// Load and validate configuration.
///
/// When `path` is given the file must exist; otherwise the default base name
/// is searched for and may be absent, in which case environment variables
/// alone must provide a complete configuration.
pub fn load(path: Option<&Path>) -> ConfigResult<CalculatorConfig> {
    let mut builder = Config::builder();
    builder = match path {
        Some(path) => builder.add_source(File::from(path)),
        None => builder.add_source(File::with_name(DEFAULT_CONFIG_BASENAME).required(false)),
    };
    builder = builder.add_source(Environment::with_prefix(ENV_PREFIX).separator("__"));

    let config: CalculatorConfig = builder.build()?.try_deserialize()?;
    config.validate()?;

    debug!(
        pipeline_url = %config.pipeline.pipeline_url,
        max_check_count = config.pipeline.max_check_count,
        execute_refresh_pipelines = config.pipeline.execute_refresh_pipelines,
        "Configuration loaded"
    );

    Ok(config)
}
