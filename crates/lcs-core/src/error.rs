//! Error types for lcs-core

use thiserror::Error;

/// Result type alias using lcs-core's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Configuration engine error types
///
/// Prompt derivation and materialization never fail; these cover reading
/// schema documents and driving an interactive session.
#[derive(Error, Debug)]
pub enum Error {
    /// Schema document root is not a JSON object
    #[error("Invalid schema document: {message}")]
    InvalidSchema { message: String },

    /// Answer document is not a flat JSON object
    #[error("Invalid answers document: {message}")]
    InvalidAnswers { message: String },

    /// Prompt backend failed to produce an answer
    #[error("Prompt '{path}' failed: {message}")]
    Prompt { path: String, message: String },

    /// Operator aborted the session
    #[error("Prompt session interrupted at '{path}'")]
    Interrupted { path: String },

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create an invalid schema error
    pub fn invalid_schema(message: impl Into<String>) -> Self {
        Self::InvalidSchema {
            message: message.into(),
        }
    }

    /// Create an invalid answers error
    pub fn invalid_answers(message: impl Into<String>) -> Self {
        Self::InvalidAnswers {
            message: message.into(),
        }
    }

    /// Create a prompt error
    pub fn prompt(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Prompt {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create an interrupted error
    pub fn interrupted(path: impl Into<String>) -> Self {
        Self::Interrupted { path: path.into() }
    }
}
