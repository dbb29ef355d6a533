use std::result::Result as StdResult;

use thiserror::Error;

/// Unified error type for the domain, storage, and service layers.
#[derive(Error, Debug)]
pub enum WorklogError {
    #[error("Record not found: {0}")]
    RecordNotFound(String),
    #[error("Ambiguous record reference `{0}` matches several records")]
    AmbiguousReference(String),
    #[error("Persistence error: {0}")]
    StorageError(String),
    #[error("Serialization error: {0}")]
    SerdeError(String),
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Validation failed: {0}")]
    Validation(String),
}

pub type Result<T> = StdResult<T, WorklogError>;

/// User-facing CLI error wrapper.
#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] WorklogError),
    #[error("Invalid input: {0}")]
    Input(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Line editor error: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),
    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),
}

impl From<std::io::Error> for WorklogError {
    fn from(err: std::io::Error) -> Self {
        WorklogError::StorageError(err.to_string())
    }
}

impl From<serde_json::Error> for WorklogError {
    fn from(err: serde_json::Error) -> Self {
        WorklogError::SerdeError(err.to_string())
    }
}
