//! Diff previews for patch reports, using the `similar` crate.

use similar::{ChangeTag, TextDiff};

/// Render a unified-style diff between original and patched content.
///
/// Line-based with three lines of context per hunk; hunks are separated by
/// a bare `@@` marker. Intended for logs and patch reports, not for feeding
/// back into `patch(1)`.
#[must_use]
pub fn unified_diff(original: &str, modified: &str) -> String {
    let diff = TextDiff::from_lines(original, modified);
    let mut output = String::new();

    for (idx, group) in diff.grouped_ops(3).iter().enumerate() {
        if idx > 0 {
            output.push_str("@@\n");
        }
        for op in group {
            for change in diff.iter_changes(op) {
                let sign = match change.tag() {
                    ChangeTag::Delete => '-',
                    ChangeTag::Insert => '+',
                    ChangeTag::Equal => ' ',
                };
                output.push(sign);
                output.push_str(change.value());
                if change.missing_newline() {
                    output.push('\n');
                }
            }
        }
    }

    output
}
