//! The file mutation coordinator: the read-parse-locate-patch-write cycle.

use std::path::Path;

use crate::diff::unified_diff;
use crate::error::PatchError;
use crate::locate;
use crate::patch::{build_patch, splice};
use crate::render::{EmbedValue, render_literal};
use crate::syntax;
use crate::types::{ArgOrder, EngineConfig, PatchLocation, PatchOutcome, PatchReport};

/// MarkerEngine - locates one marker call and rewrites it in place.
///
/// `patch_content` is the pure pipeline over in-memory text;
/// `apply_patch_to_file` wraps it in the lock/read/write cycle.
pub struct MarkerEngine;

impl MarkerEngine {
    /// Run the parse → locate → render → build → splice pipeline on text.
    ///
    /// Everything outside the matched call's byte range survives verbatim.
    /// Returns `PatchOutcome::Miss` when no single-argument marker call
    /// starts on `line`.
    ///
    /// # Errors
    /// `PatchError::Parse` for invalid source and
    /// `PatchError::UnrenderableValue` for values without a literal form.
    pub fn patch_content(
        content: &str,
        line: usize,
        value: &EmbedValue,
        order: ArgOrder,
    ) -> Result<PatchOutcome, PatchError> {
        let parsed = syntax::parse(content)?;

        let Some(call) = locate::locate(&parsed, content, line) else {
            tracing::debug!(line, "no single-argument marker call on target line");
            return Ok(PatchOutcome::Miss);
        };

        let literal = render_literal(value)?;
        let patch = build_patch(content, &call, &literal, order);
        let modified = splice(content, std::slice::from_ref(&patch))?;

        let location = PatchLocation {
            line: call.line,
            column: column_of(content, call.span.start),
            original_text: call.span.text(content).to_string(),
            new_text: patch.replacement,
        };
        let diff = unified_diff(content, &modified);

        Ok(PatchOutcome::Patched(PatchReport {
            modified,
            diff,
            location,
        }))
    }

    /// Rewrite the marker call on `line` of the file at `path` to embed
    /// `value`, serialized against every other patcher of the same path.
    ///
    /// The cycle holds the path's exclusive lock from the read through the
    /// durable write, so the patch is always computed against the most
    /// recently written state of the file. On `Miss` no write happens and
    /// the file is untouched. The lock is released on every exit path.
    ///
    /// # Errors
    /// `PatchError::Io` for lock-key resolution and read/write failures, plus
    /// everything `patch_content` reports. Any error leaves the file as it
    /// was.
    pub fn apply_patch_to_file<P: AsRef<Path>>(
        path: P,
        line: usize,
        value: &EmbedValue,
        order: ArgOrder,
        config: &EngineConfig,
    ) -> Result<PatchOutcome, PatchError> {
        let path = path.as_ref();

        snapmark_io::with_path_lock(path, || {
            let content = snapmark_io::read_text_bounded(path, config.max_file_size)?;
            let outcome = Self::patch_content(&content, line, value, order)?;

            if let PatchOutcome::Patched(report) = &outcome {
                snapmark_io::write_text_durable(path, &report.modified)?;
                tracing::debug!(
                    path = %path.display(),
                    line,
                    "recorded value at marker call"
                );
            }

            Ok(outcome)
        })?
    }
}

/// 1-based column of a byte offset within its line.
fn column_of(content: &str, offset: usize) -> usize {
    let line_start = content[..offset].rfind('\n').map_or(0, |i| i + 1);
    offset - line_start + 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_patch_content_append() {
        let content = "mark(upper(\"hi\"))\n";
        let value = EmbedValue::Literal(json!("HI"));
        let outcome =
            MarkerEngine::patch_content(content, 1, &value, ArgOrder::Append).unwrap();

        let PatchOutcome::Patched(report) = outcome else {
            panic!("expected a patch");
        };
        assert_eq!(report.modified, "mark(upper(\"hi\"), \"HI\")\n");
        assert_eq!(report.location.original_text, "mark(upper(\"hi\"))");
        assert!(report.diff.contains("+mark(upper(\"hi\"), \"HI\")"));
    }

    #[test]
    fn test_patch_content_prepend() {
        let content = "mark_raise(fn)\n";
        let value = EmbedValue::Raise(crate::render::RaiseOutcome::Raised(
            "SomeError".to_string(),
        ));
        let outcome =
            MarkerEngine::patch_content(content, 1, &value, ArgOrder::Prepend).unwrap();

        let PatchOutcome::Patched(report) = outcome else {
            panic!("expected a patch");
        };
        assert_eq!(report.modified, "mark_raise(SomeError, fn)\n");
    }

    #[test]
    fn test_patch_content_miss_on_empty_line() {
        let content = "x = 1\n\nmark(compute())\n";
        let value = EmbedValue::Literal(json!(1));
        let outcome = MarkerEngine::patch_content(content, 2, &value, ArgOrder::Append).unwrap();
        assert!(outcome.is_miss());
    }

    #[test]
    fn test_patch_content_location_column() {
        let content = "def t():\n    mark(compute())\n";
        let value = EmbedValue::Literal(json!(1));
        let outcome = MarkerEngine::patch_content(content, 2, &value, ArgOrder::Append).unwrap();

        let PatchOutcome::Patched(report) = outcome else {
            panic!("expected a patch");
        };
        assert_eq!(report.location.line, 2);
        assert_eq!(report.location.column, 5);
    }

    #[test]
    fn test_unrenderable_value_aborts_before_splice() {
        let content = "mark(compute())\n";
        let value = EmbedValue::Opaque("<thread lock>".to_string());
        let result = MarkerEngine::patch_content(content, 1, &value, ArgOrder::Append);
        assert!(matches!(result, Err(PatchError::UnrenderableValue(_))));
    }
}
