//! Locating marker calls in a parsed source file.
//!
//! A marker call is a Python call whose callee is one of the recognized
//! marker names, either bare (`mark(...)`) or qualified by the fixed
//! namespace (`snapmark.mark(...)`). The locator disambiguates by the
//! 1-based line on which the call starts.

use tree_sitter::Node;

use crate::syntax::ParsedSource;
use crate::types::Span;

/// Marker form that records an evaluated value (`mark(expr)`).
pub const MARKER_VALUE: &str = "mark";
/// Marker form that records an observed exception class (`mark_raise(fn)`).
pub const MARKER_RAISE: &str = "mark_raise";
/// Namespace under which both markers are also recognized.
pub const MARKER_NAMESPACE: &str = "snapmark";

/// One marker call found in the source, with byte-precise positions.
#[derive(Debug, Clone)]
pub struct MarkerCall {
    /// Resolved marker name (`mark` or `mark_raise`).
    pub name: &'static str,
    /// Byte range of the whole call expression.
    pub span: Span,
    /// Byte range of the callee (preserves the bare or qualified spelling).
    pub callee: Span,
    /// 1-based line on which the call starts.
    pub line: usize,
    /// Byte ranges of the arguments, in order. Comments inside the argument
    /// list are not arguments.
    pub args: Vec<Span>,
}

/// All marker calls starting on `line`, in stable pre-order.
#[must_use]
pub fn marker_calls_on_line(parsed: &ParsedSource, source: &str, line: usize) -> Vec<MarkerCall> {
    let mut calls = Vec::new();
    collect(parsed.root(), source, line, &mut calls);
    calls
}

/// The call to patch on `line`: the first single-argument marker call in
/// pre-order.
///
/// A two-argument call already carries a recorded value and is skipped; the
/// equality check for that shape runs outside this engine. When two
/// single-argument marker calls share one line, the first in pre-order wins;
/// the engine does not attempt heuristic disambiguation (known limitation).
#[must_use]
pub fn locate(parsed: &ParsedSource, source: &str, line: usize) -> Option<MarkerCall> {
    for call in marker_calls_on_line(parsed, source, line) {
        match call.args.len() {
            1 => return Some(call),
            2 => {
                tracing::trace!(line, marker = call.name, "marker already recorded; skipping");
            }
            _ => {}
        }
    }
    None
}

fn collect(node: Node<'_>, source: &str, line: usize, out: &mut Vec<MarkerCall>) {
    if node.kind() == "call" {
        if let Some(call) = marker_call(node, source) {
            if call.line == line {
                out.push(call);
            }
        }
    }
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        collect(child, source, line, out);
    }
}

fn marker_call(node: Node<'_>, source: &str) -> Option<MarkerCall> {
    let callee = node.child_by_field_name("function")?;
    let name = marker_name(callee, source)?;

    let arg_list = node.child_by_field_name("arguments")?;
    if arg_list.kind() != "argument_list" {
        // `mark(x for x in xs)` parses the generator as the arguments node;
        // that shape is never a marker call we rewrite.
        return None;
    }

    let mut args = Vec::new();
    let mut cursor = arg_list.walk();
    for child in arg_list.named_children(&mut cursor) {
        if child.kind() == "comment" {
            continue;
        }
        args.push(Span::new(child.start_byte(), child.end_byte()));
    }

    Some(MarkerCall {
        name,
        span: Span::new(node.start_byte(), node.end_byte()),
        callee: Span::new(callee.start_byte(), callee.end_byte()),
        line: node.start_position().row + 1,
        args,
    })
}

fn marker_name(callee: Node<'_>, source: &str) -> Option<&'static str> {
    match callee.kind() {
        "identifier" => recognized(node_text(callee, source)),
        "attribute" => {
            let object = callee.child_by_field_name("object")?;
            let attribute = callee.child_by_field_name("attribute")?;
            if object.kind() != "identifier" || node_text(object, source) != MARKER_NAMESPACE {
                return None;
            }
            recognized(node_text(attribute, source))
        }
        _ => None,
    }
}

fn recognized(name: &str) -> Option<&'static str> {
    match name {
        MARKER_VALUE => Some(MARKER_VALUE),
        MARKER_RAISE => Some(MARKER_RAISE),
        _ => None,
    }
}

fn node_text<'s>(node: Node<'_>, source: &'s str) -> &'s str {
    node.utf8_text(source.as_bytes()).unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::parse;

    fn locate_in(source: &str, line: usize) -> Option<MarkerCall> {
        let parsed = parse(source).unwrap();
        locate(&parsed, source, line)
    }

    #[test]
    fn test_bare_marker_found() {
        let source = "mark(upper(\"hi\"))\n";
        let call = locate_in(source, 1).unwrap();
        assert_eq!(call.name, MARKER_VALUE);
        assert_eq!(call.span.text(source), "mark(upper(\"hi\"))");
        assert_eq!(call.args.len(), 1);
        assert_eq!(call.args[0].text(source), "upper(\"hi\")");
    }

    #[test]
    fn test_qualified_marker_found() {
        let source = "snapmark.mark(compute())\n";
        let call = locate_in(source, 1).unwrap();
        assert_eq!(call.name, MARKER_VALUE);
        assert_eq!(call.callee.text(source), "snapmark.mark");
    }

    #[test]
    fn test_other_namespace_not_recognized() {
        let source = "other.mark(compute())\n";
        assert!(locate_in(source, 1).is_none());
    }

    #[test]
    fn test_wrong_line_is_a_miss() {
        let source = "x = 1\nmark(compute())\n";
        assert!(locate_in(source, 1).is_none());
        assert!(locate_in(source, 2).is_some());
    }

    #[test]
    fn test_two_argument_shape_is_skipped() {
        let source = "mark(compute(), \"recorded\")\n";
        assert!(locate_in(source, 1).is_none());
    }

    #[test]
    fn test_unrelated_call_is_not_a_marker() {
        let source = "print(compute())\n";
        assert!(locate_in(source, 1).is_none());
    }

    #[test]
    fn test_raise_marker_found() {
        let source = "mark_raise(fn)\n";
        let call = locate_in(source, 1).unwrap();
        assert_eq!(call.name, MARKER_RAISE);
    }

    #[test]
    fn test_first_in_pre_order_wins_on_shared_line() {
        let source = "mark(first()); mark(second())\n";
        let call = locate_in(source, 1).unwrap();
        assert_eq!(call.args[0].text(source), "first()");
    }

    #[test]
    fn test_comment_in_argument_list_is_not_an_argument() {
        let source = "mark(\n    compute()  # pending\n)\n";
        let call = locate_in(source, 1).unwrap();
        assert_eq!(call.args.len(), 1);
        assert_eq!(call.args[0].text(source), "compute()");
    }

    #[test]
    fn test_nested_marker_call_is_located() {
        let source = "def test_case():\n    mark(compute())\n";
        let call = locate_in(source, 2).unwrap();
        assert_eq!(call.line, 2);
    }

    #[test]
    fn test_all_candidates_exposed_regardless_of_arity() {
        let source = "mark(compute(), \"recorded\")\n";
        let parsed = parse(source).unwrap();
        let calls = marker_calls_on_line(&parsed, source, 1);
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].args.len(), 2);
    }
}
