use std::io;
use thiserror::Error;

/// Application-wide error type, consolidating all possible errors into a single enum.
///
/// User input never produces one of these: empty messages, empty notes and
/// blank navigation paths are ignored by the session actor. Errors are
/// reserved for startup (catalog, configuration) and for talking to a
/// session that has already been torn down.
#[derive(Debug, Error)]
pub enum AppError {
    /// Represents standard input/output errors (e.g. reading a catalog file).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Represents malformed JSON in a catalog document.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Represents errors specific to the actor system, such as communication failures.
    #[error("Actor error: {0}")]
    Actor(#[from] crate::actors::messages::ActorError),

    /// Represents data validation errors (e.g., a content item without a title).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Represents configuration-related errors (e.g., unparseable environment variables).
    #[error("Configuration error: {0}")]
    Config(String),

    /// Represents an inconsistent catalog (duplicate identifiers and the like).
    #[error("Catalog error: {0}")]
    Catalog(String),

    /// Represents errors from operations that did not complete in time.
    #[error("Operation timed out: {0}")]
    Timeout(String),
}

impl From<tokio::time::error::Elapsed> for AppError {
    fn from(err: tokio::time::error::Elapsed) -> Self {
        AppError::Timeout(format!("Operation timed out: {}", err))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::Validation(format!("Validation errors: {}", err))
    }
}
