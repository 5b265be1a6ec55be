//! Binary detection and strict text decoding.

use memchr::memchr;

use crate::error::IoError;

/// Quick binary detection - checks the first 8KB for NUL bytes.
///
/// Files containing NUL bytes in the first 8KB are considered binary.
/// This is a fast heuristic that works well for source files.
#[must_use]
pub fn is_binary(buffer: &[u8]) -> bool {
    let check_len = std::cmp::min(buffer.len(), 8192);
    memchr(0, &buffer[..check_len]).is_some()
}

/// Decode bytes to a String, strictly.
///
/// Binary content and invalid UTF-8 are both rejected. Decoding must be
/// strict because callers splice byte-precise edits back into the decoded
/// text: a lossy U+FFFD substitution would silently alter bytes outside the
/// edited range.
///
/// # Errors
/// Returns `IoError::BinaryFile` for binary content and `IoError::Encoding`
/// for invalid UTF-8.
pub fn decode_text(buffer: Vec<u8>) -> Result<String, IoError> {
    if is_binary(&buffer) {
        return Err(IoError::BinaryFile);
    }

    String::from_utf8(buffer).map_err(|_| IoError::Encoding)
}
