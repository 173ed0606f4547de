/// Player CLI error types
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Catalog error: {0}")]
    Catalog(#[from] melodify_core::CoreError),

    #[error("Playback error: {0}")]
    Playback(#[from] melodify_playback::PlaybackError),

    #[error("Invalid command '{line}': {reason}")]
    Command { line: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CliError {
    pub(crate) fn command(line: &str, reason: impl Into<String>) -> Self {
        Self::Command {
            line: line.to_string(),
            reason: reason.into(),
        }
    }
}

impl From<config::ConfigError> for CliError {
    fn from(err: config::ConfigError) -> Self {
        CliError::Config(err.to_string())
    }
}
