//! Error types for format readers and writers

use thiserror::Error;

/// Format errors
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid file: {0}")]
    InvalidFile(String),
}

/// Result type alias for format operations
pub type Result<T> = std::result::Result<T, Error>;
