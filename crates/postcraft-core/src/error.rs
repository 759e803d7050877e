//! Error types for Postcraft.

use thiserror::Error;

/// Main error type for Postcraft operations.
#[derive(Error, Debug)]
pub enum PostcraftError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Invalid aspect ratio: {0}")]
    InvalidAspectRatio(String),

    #[error("Invalid color: {0}")]
    InvalidColor(String),

    #[error("Overlay not found: {0}")]
    NotFound(String),
}

/// Result type alias for Postcraft operations.
pub type Result<T> = std::result::Result<T, PostcraftError>;
