//! Error taxonomy shared by every command.

use crate::types::ResourceKind;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("configuration error: {message}")]
    Config { message: String },

    #[error("invalid input: {message}")]
    Validation { message: String },

    #[error("{kind} '{name}' not found")]
    NotFound { kind: ResourceKind, name: String },

    #[error("conflict: {message}")]
    Conflict { message: String },

    #[error("request failed ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn config(message: impl Into<String>) -> Self {
        Error::Config { message: message.into() }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Error::Validation { message: message.into() }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Error::Conflict { message: message.into() }
    }

    /// Process exit code, consumed only by `main`.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Config { .. } | Error::Validation { .. } => 2,
            Error::NotFound { .. } => 3,
            Error::Conflict { .. } => 4,
            _ => 1,
        }
    }
}
