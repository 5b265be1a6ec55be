//! Core types for the patching pipeline.

use serde::Serialize;

/// Half-open byte range into a specific source text.
///
/// A span is only meaningful against the text it was computed from; the
/// engine never carries spans across re-reads of a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Span {
    /// Start byte offset (inclusive).
    pub start: usize,
    /// End byte offset (exclusive).
    pub end: usize,
}

impl Span {
    /// Create a span from byte offsets.
    #[must_use]
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Slice `source` to this span's range.
    ///
    /// Callers must pass the text the span was computed from.
    #[must_use]
    pub fn text<'s>(&self, source: &'s str) -> &'s str {
        &source[self.start..self.end]
    }
}

/// Where the embedded value lands in the rewritten argument list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ArgOrder {
    /// Value becomes the trailing argument: `mark(expr, value)`.
    Append,
    /// Value becomes the leading argument: `mark_raise(value, fn)`.
    Prepend,
}

/// Configuration for patch operations.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Maximum source file size in bytes (default 1MB).
    pub max_file_size: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_file_size: 1024 * 1024, // 1MB
        }
    }
}

/// Outcome of one patch cycle, used for diagnostics only.
///
/// The contract of a file-level patch is the file mutation itself; callers
/// that need the new text re-read the file.
#[derive(Debug, Clone, Serialize)]
pub enum PatchOutcome {
    /// A marker call was rewritten. The report carries the new content and
    /// a preview of the change.
    Patched(PatchReport),
    /// No single-argument marker call exists on the target line. This is a
    /// recognized no-op: a previous run may already have patched the call.
    Miss,
}

impl PatchOutcome {
    /// Whether this outcome produced no patch.
    #[must_use]
    pub fn is_miss(&self) -> bool {
        matches!(self, Self::Miss)
    }
}

/// Diagnostics for a successful patch.
#[derive(Debug, Clone, Serialize)]
pub struct PatchReport {
    /// Full modified content, as written to the file.
    pub modified: String,
    /// Unified diff of original vs modified content.
    pub diff: String,
    /// Position and text of the rewritten call.
    pub location: PatchLocation,
}

/// Location of the rewritten call within the file.
#[derive(Debug, Clone, Serialize)]
pub struct PatchLocation {
    /// Line number (1-indexed) where the call starts.
    pub line: usize,
    /// Column number (1-indexed) where the call starts.
    pub column: usize,
    /// Original call text that was replaced.
    pub original_text: String,
    /// Replacement call text.
    pub new_text: String,
}
