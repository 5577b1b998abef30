//! Error types for the tabsift pipeline.
//!
//! This module provides a comprehensive error handling strategy using `thiserror`
//! for automatic error trait implementations. All errors in the pipeline are
//! represented by the `SiftError` enum.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for the tabsift pipeline.
#[derive(Error, Debug)]
pub enum SiftError {
    /// The input path does not exist.
    #[error("Input file not found: {path}")]
    NotFound {
        /// The path that was looked up.
        path: PathBuf,
    },

    /// The input parsed but is unusable (empty file, malformed content,
    /// empty table, missing required columns).
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Error from I/O operations, typically during persistence.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error from the CSV parser or writer.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Error from the spreadsheet writer.
    #[error("Spreadsheet error: {0}")]
    Spreadsheet(#[from] rust_xlsxwriter::XlsxError),

    /// Error from serialization/deserialization operations.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Generic internal error for unexpected conditions.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// A type alias for `Result<T, SiftError>`.
///
/// This is the standard `Result` type used throughout the pipeline.
pub type Result<T> = std::result::Result<T, SiftError>;

impl SiftError {
    /// Creates a not-found error for the given path.
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        Self::NotFound { path: path.into() }
    }

    /// Creates an invalid-data error with the given message.
    pub fn invalid_data(msg: impl Into<String>) -> Self {
        Self::InvalidData(msg.into())
    }

    /// Creates an internal error with the given message.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// A short user-facing category for this error, used by the CLI driver
    /// to prefix its messages.
    pub fn category(&self) -> &'static str {
        match self {
            SiftError::NotFound { .. } => "File Error",
            SiftError::InvalidData(_) | SiftError::Csv(_) => "Data Error",
            SiftError::Io(_) | SiftError::Spreadsheet(_) => "IO Error",
            SiftError::Serialization(_) | SiftError::Internal(_) => "Unexpected Error",
        }
    }
}
