//! Command handlers -- one module per subcommand

pub mod columns;
pub mod config;
pub mod render;

use std::path::Path;

use tracing::debug;

use loglayout_core::config::LoglayoutConfig;
use loglayout_core::error::{ConfigError, LoglayoutError};

/// Load the effective configuration for a command.
///
/// A missing file falls back to built-in defaults; env overrides and
/// validation apply either way.
pub async fn load_config(path: &Path) -> Result<LoglayoutConfig, LoglayoutError> {
    match LoglayoutConfig::load(path).await {
        Err(LoglayoutError::Config(ConfigError::FileNotFound { path })) => {
            debug!(path = %path, "config file not found, using defaults");
            let mut config = LoglayoutConfig::default();
            config.apply_env_overrides();
            config.validate()?;
            Ok(config)
        }
        other => other,
    }
}
