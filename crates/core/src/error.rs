//! Error types for the notes pipeline

use thiserror::Error;

/// Core pipeline errors
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Format error: {0}")]
    Format(#[from] notescope_formats::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(#[from] notescope_filters::Error),
}

/// Result type alias for core operations
pub type Result<T> = std::result::Result<T, Error>;
