//! Error types for unbank

use thiserror::Error;

/// Main error type for unbank operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("Entry not found: {0}")]
    EntryNotFound(String),

    #[error("Malformed memlist: {0}")]
    MalformedMemlist(String),

    #[error("Slice out of bounds: {0}")]
    SliceOutOfBounds(String),

    #[error("Decompression error: {0}")]
    Decompression(String),
}

/// Result type alias for unbank operations
pub type Result<T> = std::result::Result<T, Error>;
