//! snapmark-io - File I/O layer for the snapmark engine.
//!
//! Everything the patching engine needs from the filesystem lives here:
//! bounded, strictly decoded reads; durable whole-file writes; and the
//! process-wide, path-keyed exclusive lock that serializes concurrent
//! read-modify-write cycles against the same file.
//!
//! # Architecture
//!
//! ```text
//! snapmark-io/src/
//! ├── lib.rs      # Re-exports (this file)
//! ├── error.rs    # IoError enum (thiserror)
//! ├── detect.rs   # Binary detection and strict UTF-8 decoding
//! ├── read.rs     # Bounded synchronous reads
//! ├── write.rs    # Durable whole-file writes (flush before return)
//! └── lock.rs     # Path-keyed exclusive lock registry
//! ```

// ============================================================================
// Module Declarations
// ============================================================================

mod detect;
mod error;
mod lock;
mod read;
mod write;

// ============================================================================
// Public Re-exports
// ============================================================================

pub use detect::{decode_text, is_binary};
pub use error::IoError;
pub use lock::with_path_lock;
pub use read::read_text_bounded;
pub use write::write_text_durable;
