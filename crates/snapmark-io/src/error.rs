//! Error types for file I/O operations.

use thiserror::Error;

/// Error types for file I/O operations.
///
/// Each variant represents a specific failure mode on the read/write path.
#[derive(Error, Debug)]
pub enum IoError {
    /// File does not exist or its path cannot be resolved.
    #[error("File not found: {0}")]
    NotFound(String),

    /// File exceeds the configured size limit.
    #[error("File too large: {0} bytes (limit: {1})")]
    TooLarge(u64, u64),

    /// File contains binary content (NUL bytes detected).
    #[error("Binary file detected")]
    BinaryFile,

    /// File content is not valid UTF-8. Decoding is strict: a lossy
    /// replacement would change bytes the caller promises not to touch.
    #[error("UTF-8 decoding error")]
    Encoding,

    /// Low-level I/O error from std::io.
    #[error("IO error: {0}")]
    System(#[from] std::io::Error),
}
