//! Error types for distcheck

use thiserror::Error;

/// distcheck error type
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Computation error (a test routine could not run on the given data)
    #[error("Computation error: {0}")]
    Computation(String),

    /// The two datasets disagree in shape (column count or column length)
    #[error("Shape mismatch: {0}")]
    ShapeMismatch(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
