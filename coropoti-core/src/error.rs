//! Error types for the COROPOTI client.

use thiserror::Error;

/// Errors that can occur in client-side scheduling operations.
#[derive(Error, Debug)]
pub enum CoropotiError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Not logged in. Run `coropoti login` first")]
    NotLoggedIn,

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid date '{0}'. Expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Invalid time '{0}'. Expected HH:MM or HH:MM:SS")]
    InvalidTime(String),

    #[error("Session error: {0}")]
    Session(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for client-side operations.
pub type CoropotiResult<T> = Result<T, CoropotiError>;
