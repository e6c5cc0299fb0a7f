//! Error types for vocab-core.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using PipelineError.
pub type Result<T> = std::result::Result<T, PipelineError>;

/// Fatal errors. Any of these aborts the run.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("no file provided")]
    MissingFilename,

    #[error("unsupported file type: {0}")]
    UnsupportedFileType(String),

    #[error("extraction failed: {0}")]
    Extraction(#[from] ExtractionError),

    #[error("dictionary unavailable: {0}")]
    DictionaryUnavailable(String),

    #[error("serialization failed: {0}")]
    Serialization(#[from] SerializeError),

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Document text extraction failures.
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF error: {0}")]
    Pdf(String),

    #[error("DOCX error: {0}")]
    Docx(String),

    #[error("extraction task failed: {0}")]
    Join(String),
}

/// Per-word dictionary lookup failures. Never fatal.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("no results found for word: {0}")]
    NotFound(String),

    #[error("backend error: {status} - {message}")]
    Backend { status: u16, message: String },

    #[error("network error: {0}")]
    Network(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("lookup timed out after {0:?}")]
    Timeout(std::time::Duration),
}

/// Deck package serialization failures.
#[derive(Debug, Error)]
pub enum SerializeError {
    #[error("database error: {0}")]
    Database(String),

    #[error("archive error: {0}")]
    Archive(String),

    #[error("encoding error: {0}")]
    Encoding(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
