//! CLI-specific error types and exit code mapping

use loglayout_core::error::LoglayoutError;
use loglayout_html::HtmlLayoutError;

/// CLI-specific error type.
///
/// Each variant carries enough context for a user-friendly message.
/// The `exit_code()` method maps errors to standard Unix exit codes.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Configuration loading or validation failure.
    #[error("configuration error: {0}")]
    Config(String),

    /// A subcommand-specific operation failed.
    #[error("{0}")]
    Command(String),

    /// JSON serialisation failed during output rendering.
    #[error("json output error: {0}")]
    JsonSerialize(#[from] serde_json::Error),

    /// IO error (file read, stdout write, etc.).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Wrapped domain error from loglayout-core.
    #[error("{0}")]
    Core(LoglayoutError),

    /// HTML layout construction or rendering failed.
    #[error("layout error: {0}")]
    Layout(#[from] HtmlLayoutError),
}

impl From<LoglayoutError> for CliError {
    fn from(e: LoglayoutError) -> Self {
        match e {
            LoglayoutError::Config(config) => Self::Config(config.to_string()),
            LoglayoutError::Io(io) => Self::Io(io),
            other => Self::Core(other),
        }
    }
}

impl CliError {
    /// Map the error to a process exit code.
    ///
    /// | Code | Meaning                 |
    /// |------|-------------------------|
    /// | 0    | Success                 |
    /// | 1    | General / command error |
    /// | 2    | Configuration error     |
    /// | 10   | IO error                |
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) => 2,
            Self::Layout(HtmlLayoutError::Configuration { .. }) => 2,
            Self::Io(_) => 10,
            Self::JsonSerialize(_) | Self::Command(_) | Self::Core(_) | Self::Layout(_) => 1,
        }
    }
}
