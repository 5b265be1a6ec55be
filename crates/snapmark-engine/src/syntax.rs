//! Tree-sitter based parsing of the target Python source.
//!
//! The parse is lossless by construction: the engine never re-renders the
//! tree, it only reads node positions and copies byte slices of the original
//! text, so every untouched byte survives verbatim.

use tree_sitter::{Language, Node, Parser, Tree};

use crate::error::PatchError;

/// A parsed source file, position-aware via tree-sitter.
#[derive(Debug)]
pub struct ParsedSource {
    tree: Tree,
}

impl ParsedSource {
    /// Root node of the parse tree.
    #[must_use]
    pub fn root(&self) -> Node<'_> {
        self.tree.root_node()
    }
}

/// Parse `source` as Python.
///
/// # Errors
/// Returns `PatchError::Parse` with the first error location when the source
/// is not syntactically valid, and when the grammar cannot be loaded.
pub fn parse(source: &str) -> Result<ParsedSource, PatchError> {
    let language: Language = tree_sitter_python::LANGUAGE.into();
    let mut parser = Parser::new();
    parser
        .set_language(&language)
        .map_err(|e| PatchError::Parse(format!("failed to load Python grammar: {e}")))?;

    let tree = parser
        .parse(source, None)
        .ok_or_else(|| PatchError::Parse("parser produced no tree".to_string()))?;

    let root = tree.root_node();
    if root.has_error() {
        let node = first_syntax_error(root).unwrap_or(root);
        let pos = node.start_position();
        return Err(PatchError::Parse(format!(
            "syntax error at line {}, column {}",
            pos.row + 1,
            pos.column + 1
        )));
    }

    Ok(ParsedSource { tree })
}

/// Locate the first ERROR or MISSING node in document order.
fn first_syntax_error<'t>(node: Node<'t>) -> Option<Node<'t>> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    if !node.has_error() {
        return None;
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if let Some(err) = first_syntax_error(child) {
            return Some(err);
        }
    }
    None
}
