//! Building a replacement for a matched call and splicing patches into text.

use crate::error::PatchError;
use crate::locate::MarkerCall;
use crate::types::{ArgOrder, Span};

/// One textual edit: replace the bytes of `span` with `replacement`.
#[derive(Debug, Clone)]
pub struct Patch {
    /// Byte range of the original text to replace.
    pub span: Span,
    /// Replacement text.
    pub replacement: String,
}

/// Render the two-argument replacement for a matched marker call.
///
/// The callee spelling and the retained arguments are copied verbatim from
/// the original source, so their formatting survives; only the rendered
/// literal is new text. The result is a syntactically valid call on its own.
#[must_use]
pub fn build_patch(source: &str, call: &MarkerCall, literal: &str, order: ArgOrder) -> Patch {
    let callee = call.callee.text(source);
    let retained: Vec<&str> = call.args.iter().map(|span| span.text(source)).collect();
    let retained = retained.join(", ");

    let replacement = match order {
        ArgOrder::Append => format!("{callee}({retained}, {literal})"),
        ArgOrder::Prepend => format!("{callee}({literal}, {retained})"),
    };

    Patch {
        span: call.span,
        replacement,
    }
}

/// Splice an ordered, non-overlapping set of patches into `original`.
///
/// Regions outside the patched spans are copied byte-for-byte; with zero
/// patches the output equals the input exactly.
///
/// # Errors
/// Returns `PatchError::Splice` for spans that are out of bounds, descending,
/// overlapping, or not on character boundaries.
pub fn splice(original: &str, patches: &[Patch]) -> Result<String, PatchError> {
    let mut out = String::with_capacity(original.len());
    let mut cursor = 0usize;

    for patch in patches {
        let Span { start, end } = patch.span;
        if end < start || end > original.len() {
            return Err(PatchError::Splice(format!(
                "span {start}..{end} is out of bounds for {} bytes",
                original.len()
            )));
        }
        if start < cursor {
            return Err(PatchError::Splice(format!(
                "span {start}..{end} overlaps a previous patch or is out of order"
            )));
        }
        if !original.is_char_boundary(start) || !original.is_char_boundary(end) {
            return Err(PatchError::Splice(format!(
                "span {start}..{end} does not fall on character boundaries"
            )));
        }

        out.push_str(&original[cursor..start]);
        out.push_str(&patch.replacement);
        cursor = end;
    }

    out.push_str(&original[cursor..]);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn patch(start: usize, end: usize, replacement: &str) -> Patch {
        Patch {
            span: Span::new(start, end),
            replacement: replacement.to_string(),
        }
    }

    #[test]
    fn test_identity_with_zero_patches() {
        let original = "line1\nline2\nline3\n";
        assert_eq!(splice(original, &[]).unwrap(), original);
    }

    #[test]
    fn test_single_patch_locality() {
        let original = "aaa bbb ccc";
        let result = splice(original, &[patch(4, 7, "XXXX")]).unwrap();
        assert_eq!(result, "aaa XXXX ccc");
    }

    #[test]
    fn test_multiple_ordered_patches() {
        let original = "one two three";
        let patches = [patch(0, 3, "1"), patch(8, 13, "3")];
        assert_eq!(splice(original, &patches).unwrap(), "1 two 3");
    }

    #[test]
    fn test_overlapping_patches_rejected() {
        let original = "abcdef";
        let patches = [patch(0, 4, "x"), patch(2, 6, "y")];
        assert!(matches!(
            splice(original, &patches),
            Err(PatchError::Splice(_))
        ));
    }

    #[test]
    fn test_out_of_bounds_rejected() {
        assert!(matches!(
            splice("short", &[patch(0, 99, "x")]),
            Err(PatchError::Splice(_))
        ));
    }

    #[test]
    fn test_non_char_boundary_rejected() {
        let original = "caf\u{e9} au lait";
        // Offset 4 falls inside the two-byte encoding of e-acute.
        assert!(matches!(
            splice(original, &[patch(4, 5, "x")]),
            Err(PatchError::Splice(_))
        ));
    }

    #[test]
    fn test_adjacent_patches_allowed() {
        let original = "abcd";
        let patches = [patch(0, 2, "X"), patch(2, 4, "Y")];
        assert_eq!(splice(original, &patches).unwrap(), "XY");
    }
}
