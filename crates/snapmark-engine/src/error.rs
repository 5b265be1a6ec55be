//! Error types for patch operations.

use snapmark_io::IoError;
use thiserror::Error;

/// Error types for one patch cycle.
///
/// Every variant aborts only the current cycle: the file lock is released by
/// scope, and no partial content is ever written. A locator miss is not an
/// error and is reported through `PatchOutcome::Miss` instead.
#[derive(Error, Debug)]
pub enum PatchError {
    /// File I/O failure (read, write, or lock-key resolution).
    #[error("IO error: {0}")]
    Io(#[from] IoError),

    /// Source file is not syntactically valid.
    #[error("Parse error: {0}")]
    Parse(String),

    /// The value to embed has no textual literal form in the target source.
    #[error("Unrenderable value: {0}")]
    UnrenderableValue(String),

    /// Patch spans are out of bounds, unordered, or overlapping.
    #[error("Splice error: {0}")]
    Splice(String),
}
