//! Logging initialization for the loglayout CLI.
//!
//! Configures `tracing-subscriber` from the `[general]` section of
//! `LoglayoutConfig`. Diagnostics go to stderr so rendered documents and
//! reports on stdout stay machine-readable.

use anyhow::Result;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use loglayout_core::config::GeneralConfig;

/// Resolve the filter directive.
///
/// Precedence: `--log-level` flag, then `RUST_LOG`, then the config file.
pub fn filter_directive(config: &GeneralConfig, cli_level: Option<&str>) -> String {
    if let Some(level) = cli_level {
        return level.to_owned();
    }
    std::env::var(EnvFilter::DEFAULT_ENV)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| config.log_level.clone())
}

/// Initialize the global tracing subscriber.
///
/// Must be called exactly once, before any tracing macros are used.
///
/// # Formats
///
/// * `"json"` - Machine-parseable JSON lines
/// * `"pretty"` - Human-readable colored output
pub fn init_tracing(config: &GeneralConfig, cli_level: Option<&str>) -> Result<()> {
    let env_filter = EnvFilter::try_new(filter_directive(config, cli_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    match config.log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(std::io::stderr),
                )
                .try_init()
                .map_err(|e| {
                    anyhow::anyhow!("failed to initialize JSON tracing subscriber: {}", e)
                })?;
        }
        "pretty" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .pretty()
                        .with_writer(std::io::stderr),
                )
                .try_init()
                .map_err(|e| {
                    anyhow::anyhow!("failed to initialize pretty tracing subscriber: {}", e)
                })?;
        }
        _ => {
            return Err(anyhow::anyhow!(
                "unknown log format '{}', expected 'json' or 'pretty'",
                config.log_format
            ));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn general(level: &str, format: &str) -> GeneralConfig {
        GeneralConfig {
            log_level: level.to_owned(),
            log_format: format.to_owned(),
        }
    }

    #[test]
    fn test_cli_level_wins() {
        let config = general("warn", "json");
        assert_eq!(filter_directive(&config, Some("trace")), "trace");
    }

    #[test]
    fn test_unknown_format_rejected() {
        let config = general("info", "xml");
        let err = init_tracing(&config, None).expect_err("xml is not a log format");
        assert!(err.to_string().contains("unknown log format 'xml'"));
    }
}
