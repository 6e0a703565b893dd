//! Error types for region file operations.

use thiserror::Error;

/// Errors that can occur reading or writing region documents.
#[derive(Error, Debug)]
pub enum FormatError {
    /// I/O error during file operations
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing or serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A region entry that cannot be turned into a region
    #[error("Invalid region #{index}: {message}")]
    InvalidRegion {
        /// Position of the entry in the `regions` array
        index: usize,
        /// Description of the problem
        message: String,
    },
}

impl FormatError {
    /// Create an invalid region error with a message.
    pub fn invalid_region(index: usize, message: impl Into<String>) -> Self {
        Self::InvalidRegion {
            index,
            message: message.into(),
        }
    }
}
