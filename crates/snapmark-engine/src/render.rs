//! Rendering runtime values as Python source literals.
//!
//! The evaluation side hands the engine an already-evaluated value; this
//! module turns it into source text the target file's own syntax accepts.
//! Values with no agreed textual form are an error, never a silent coercion.

use serde::Serialize;
use serde_json::Value;

use crate::error::PatchError;

/// A runtime value crossing the evaluation boundary into the engine.
#[derive(Debug, Clone, Serialize)]
pub enum EmbedValue {
    /// A plain data value, rendered as a Python literal.
    Literal(Value),
    /// The outcome of running a guarded callable that was expected to raise.
    Raise(RaiseOutcome),
    /// A runtime object with no literal source form; carries its repr for
    /// diagnostics. Always an `UnrenderableValue` error.
    Opaque(String),
}

/// What happened when a guarded callable ran.
///
/// The "nothing was raised" case is data, not control flow: callers report
/// it here instead of signalling it with an exception of their own.
#[derive(Debug, Clone, Serialize)]
pub enum RaiseOutcome {
    /// An exception of the named class was observed. The name may be dotted
    /// (`module.SomeError`).
    Raised(String),
    /// The callable returned without raising; there is nothing to record.
    NoException,
}

/// Render `value` as a Python source literal.
///
/// # Errors
/// Returns `PatchError::UnrenderableValue` for opaque values, for the
/// no-exception sentinel, and for exception names that are not identifier
/// paths.
pub fn render_literal(value: &EmbedValue) -> Result<String, PatchError> {
    match value {
        EmbedValue::Literal(v) => Ok(render_json(v)),
        EmbedValue::Raise(RaiseOutcome::Raised(name)) => {
            if is_identifier_path(name) {
                Ok(name.clone())
            } else {
                Err(PatchError::UnrenderableValue(format!(
                    "exception name {name:?} is not an identifier path"
                )))
            }
        }
        EmbedValue::Raise(RaiseOutcome::NoException) => Err(PatchError::UnrenderableValue(
            "guarded callable raised no exception; nothing to record".to_string(),
        )),
        EmbedValue::Opaque(repr) => Err(PatchError::UnrenderableValue(format!(
            "value {repr} has no literal source form"
        ))),
    }
}

fn render_json(value: &Value) -> String {
    match value {
        Value::Null => "None".to_string(),
        Value::Bool(true) => "True".to_string(),
        Value::Bool(false) => "False".to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => render_string(s),
        Value::Array(items) => {
            let parts: Vec<String> = items.iter().map(render_json).collect();
            format!("[{}]", parts.join(", "))
        }
        Value::Object(map) => {
            let parts: Vec<String> = map
                .iter()
                .map(|(k, v)| format!("{}: {}", render_string(k), render_json(v)))
                .collect();
            format!("{{{}}}", parts.join(", "))
        }
    }
}

/// Quote a string for Python source.
///
/// Multi-line strings that need no escaping render as triple-quoted blocks
/// so recorded values stay readable in the test file; everything else gets a
/// double-quoted string with escapes.
fn render_string(s: &str) -> String {
    if is_triple_quotable(s) {
        return format!("\"\"\"{s}\"\"\"");
    }

    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 => {
                out.push_str(&format!("\\x{:02x}", c as u32));
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

fn is_triple_quotable(s: &str) -> bool {
    s.contains('\n')
        && !s.contains('"')
        && !s.contains('\\')
        && s.chars().all(|c| c == '\n' || (c as u32) >= 0x20)
}

/// Validate a bare or dotted identifier (`SomeError`, `module.SomeError`).
fn is_identifier_path(name: &str) -> bool {
    !name.is_empty()
        && name.split('.').all(|segment| {
            let mut chars = segment.chars();
            match chars.next() {
                Some(c) if c.is_ascii_alphabetic() || c == '_' => {
                    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
                }
                _ => false,
            }
        })
}
