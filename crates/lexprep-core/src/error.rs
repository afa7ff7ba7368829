//! Error types for lexprep.

use std::path::PathBuf;

use thiserror::Error;

use crate::types::DocumentFormat;

/// Main error type for lexprep operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Text extraction failed
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractError),

    /// I/O error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Writing an output artifact failed
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

/// Text extraction errors.
#[derive(Error, Debug)]
pub enum ExtractError {
    /// The file extension is not one of the recognized document formats.
    #[error("unsupported file format: {0}")]
    UnsupportedFormat(String),

    /// The format is recognized but no extractor is registered for it.
    #[error("no extractor registered for {0}")]
    NotRegistered(DocumentFormat),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("extraction failed: {0}")]
    Failed(String),
}

/// Result type alias for lexprep operations.
pub type Result<T> = std::result::Result<T, Error>;
