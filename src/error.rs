//! Centralized error types for Jiwa.
//!
//! This module aggregates the errors of every layer into one type that the
//! binary turns into a single diagnostic line and a non-zero exit status.

use thiserror::Error;

use crate::api::ApiError;
use crate::batch::BatchError;
use crate::config::ConfigError;
use crate::editor::ExternalEditorError;
use crate::input::InputError;

/// The main application error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration-related errors.
    #[error("{0}")]
    Config(#[from] ConfigError),

    /// API-related errors.
    #[error("{0}")]
    Api(#[from] ApiError),

    /// Issue references that could not be resolved.
    #[error("{0}")]
    Input(#[from] InputError),

    /// A batch stopped part way through.
    #[error("{0}")]
    Batch(#[from] BatchError),

    /// The external editor failed.
    #[error("{0}")]
    Editor(#[from] ExternalEditorError),

    /// IO errors (reading input files, etc.).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The command was invoked with the wrong arguments.
    #[error("{0}")]
    Usage(String),

    /// Ctrl-C arrived while a command was running.
    #[error("interrupted")]
    Interrupted,
}

impl AppError {
    /// Create a usage error.
    pub fn usage(msg: impl Into<String>) -> Self {
        AppError::Usage(msg.into())
    }

    /// Get a one-line message for display on stderr.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Config(e) => format!("Configuration error: {}", e),
            AppError::Api(e) => api_message(e),
            AppError::Input(e) => format!("Invalid input: {}", e),
            AppError::Batch(e) => format!(
                "failed on {} after {} processed: {}",
                e.failed_key,
                e.processed.len(),
                api_message(&e.source)
            ),
            AppError::Editor(e) => format!("Editor error: {}", e),
            AppError::Io(e) => format!("IO error: {}", e),
            AppError::Usage(msg) => format!("Usage: {}", msg),
            AppError::Interrupted => {
                "interrupted, the last request may or may not have been applied".to_string()
            }
        }
    }

    /// Get a suggested action for the user.
    pub fn suggested_action(&self) -> Option<&'static str> {
        match self {
            AppError::Config(ConfigError::ReadError { .. }) => {
                Some("Create the configuration file or point to one with --config.")
            }
            AppError::Config(ConfigError::MissingCredentials)
            | AppError::Api(ApiError::Configuration(_)) => {
                Some("Set JIWA_USERNAME and JIWA_PASSWORD, or JIWA_TOKEN.")
            }
            AppError::Api(ApiError::AmbiguousOutcome { .. }) => {
                Some("Check the issue in JIRA before running the command again.")
            }
            AppError::Batch(e) if matches!(e.source, ApiError::AmbiguousOutcome { .. }) => {
                Some("Check the failed issue in JIRA before running the command again.")
            }
            AppError::Editor(_) => Some("Set $EDITOR to the editor you want to use."),
            _ => None,
        }
    }
}

/// The status code and raw body of API errors go out as-is; everything else
/// uses the error's own message.
fn api_message(e: &ApiError) -> String {
    match e {
        ApiError::Api { status, body } if body.trim().is_empty() => {
            format!("JIRA returned HTTP {} with an empty body", status)
        }
        _ => e.to_string(),
    }
}

/// Result type for application operations.
pub type Result<T> = std::result::Result<T, AppError>;
