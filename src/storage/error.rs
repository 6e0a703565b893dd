//! Error types for storage collaborators.

use thiserror::Error;

use crate::format::FormatError;

/// Errors from loading or saving maps and regions.
#[derive(Error, Debug)]
pub enum StorageError {
    /// I/O error during file operations
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Stored region data could not be read or written
    #[error("Region data error: {0}")]
    Format(#[from] FormatError),

    /// Image could not be probed
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// Map id is empty or would leave the library directory
    #[error("Invalid map id: {0:?}")]
    InvalidMapId(String),

    /// No map with this id
    #[error("Map not found: {0}")]
    NotFound(String),

    /// Save requested before any map was loaded
    #[error("No map loaded")]
    NoMapLoaded,
}
