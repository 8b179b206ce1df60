//! Error types for whow.

use std::path::PathBuf;

use thiserror::Error;

use crate::record::RecordKind;

/// Errors that can occur in whow operations.
#[derive(Error, Debug)]
pub enum WhowError {
    #[error("A {kind} named '{name}' already exists")]
    AlreadyExists { kind: &'static str, name: String },

    #[error("No {kind} named '{name}' exists")]
    NotFound { kind: &'static str, name: String },

    #[error("No {kind} with index {index} exists")]
    IndexNotFound { kind: RecordKind, index: u32 },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Corrupt record {}: {reason}", path.display())]
    CorruptRecord { path: PathBuf, reason: String },

    #[error("Fatal: {0}")]
    FatalConfig(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl WhowError {
    /// Fatal errors abort the whole process rather than a single command.
    pub fn is_fatal(&self) -> bool {
        matches!(self, WhowError::FatalConfig(_))
    }
}

impl From<toml::ser::Error> for WhowError {
    fn from(e: toml::ser::Error) -> Self {
        WhowError::Serialization(e.to_string())
    }
}

/// Result type alias for whow operations.
pub type WhowResult<T> = Result<T, WhowError>;
