use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while building a signature registry.
///
/// These only ever surface at startup; matching itself cannot fail.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("Empty pattern for {mime_type} at offset {offset}")]
    EmptyPattern { mime_type: String, offset: usize },

    #[error("Pattern for {mime_type} at offset {offset} contains only wildcards")]
    WildcardOnlyPattern { mime_type: String, offset: usize },

    #[error("Signature for {mime_type} at offset {offset} ends past the {limit} byte limit")]
    OffsetTooLarge {
        mime_type: String,
        offset: usize,
        limit: usize,
    },

    #[error("Mime type must not be blank")]
    BlankMimeType,

    #[error(
        "Signature at offset {offset} is registered for both {existing} and {conflicting}"
    )]
    DuplicateSignature {
        offset: usize,
        existing: String,
        conflicting: String,
    },

    #[error("Mime type {0} registered twice with different metadata")]
    ConflictingContentType(String),

    #[error("Invalid pattern token {token:?}: {message}")]
    InvalidPattern { token: String, message: String },

    #[error("Malformed signature table: {0}")]
    MalformedTable(String),
}

impl From<serde_json::Error> for ConfigurationError {
    fn from(err: serde_json::Error) -> Self {
        ConfigurationError::MalformedTable(err.to_string())
    }
}

/// Errors raised while loading a candidate buffer for identification.
#[derive(Error, Debug)]
pub enum IdentifyError {
    #[error("I/O error reading {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("I/O error: {0}")]
    Read(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, IdentifyError>;
