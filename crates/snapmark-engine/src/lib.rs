//! snapmark-engine - Source-locating and patching engine.
//!
//! Given a Python test file containing a marker call (`mark(expr)` or
//! `snapmark.mark(expr)`) at a known line and an already-evaluated value,
//! this engine rewrites that one call site to embed the value as a second
//! argument, leaving every other byte of the file untouched. The companion
//! form `mark_raise(fn)` records an observed exception class as the leading
//! argument instead. A call that already carries two arguments is an
//! ordinary assertion handled outside this engine; it produces no patch.
//!
//! # Architecture
//!
//! ```text
//! snapmark-engine/src/
//! ├── lib.rs      # Re-exports (this file)
//! ├── error.rs    # PatchError enum (thiserror)
//! ├── types.rs    # Span, ArgOrder, EngineConfig, PatchOutcome
//! ├── syntax.rs   # Tree-sitter parse with position metadata
//! ├── locate.rs   # Marker-call locator (line + call shape)
//! ├── render.rs   # Runtime value -> Python literal
//! ├── patch.rs    # Replacement builder and byte-range splicer
//! ├── diff.rs     # Unified diff previews (similar)
//! └── engine.rs   # File mutation coordinator (lock, read, write)
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use snapmark_engine::{ArgOrder, EmbedValue, EngineConfig, MarkerEngine};
//!
//! // test_upper.py line 5: mark(upper("hi"))
//! let outcome = MarkerEngine::apply_patch_to_file(
//!     "test_upper.py",
//!     5,
//!     &EmbedValue::Literal(serde_json::json!("HI")),
//!     ArgOrder::Append,
//!     &EngineConfig::default(),
//! )?;
//! // line 5 is now: mark(upper("hi"), "HI")
//! ```
//!
//! # Limitations
//!
//! Two single-argument marker calls on one textual line are disambiguated by
//! taking the first in pre-order. A process killed between the start of the
//! write and its completion can leave a truncated file; the write is durable
//! (synced) but not transactional.

// ============================================================================
// Module Declarations
// ============================================================================

mod diff;
mod engine;
mod error;
mod locate;
mod patch;
mod render;
mod syntax;
mod types;

// ============================================================================
// Public Re-exports
// ============================================================================

pub use engine::MarkerEngine;
pub use error::PatchError;
pub use types::{ArgOrder, EngineConfig, PatchLocation, PatchOutcome, PatchReport, Span};

// Locator surface, exposed for tooling and tests
pub use locate::{MARKER_NAMESPACE, MARKER_RAISE, MARKER_VALUE, MarkerCall, locate,
    marker_calls_on_line};

// Parsing and splicing building blocks
pub use patch::{Patch, build_patch, splice};
pub use syntax::{ParsedSource, parse};

// Value boundary
pub use render::{EmbedValue, RaiseOutcome, render_literal};

// Diff preview utility
pub use diff::unified_diff;
