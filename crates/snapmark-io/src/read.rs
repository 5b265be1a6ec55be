//! Bounded synchronous reads of source files.

use std::fs as std_fs;
use std::io::Read;
use std::path::Path;

use crate::detect::decode_text;
use crate::error::IoError;

/// Read a source file with size, binary, and encoding checks.
///
/// The file is read fresh on every call; nothing is cached between
/// invocations, so the returned text always reflects the current on-disk
/// state.
///
/// # Arguments
/// * `path` - Path to the file
/// * `max_bytes` - Maximum file size in bytes
///
/// # Errors
/// Returns `IoError::NotFound` for a missing file, `IoError::TooLarge` past
/// the size limit, and the `decode_text` errors for non-text content.
pub fn read_text_bounded<P: AsRef<Path>>(path: P, max_bytes: u64) -> Result<String, IoError> {
    let path = path.as_ref();

    let metadata = std_fs::metadata(path)
        .map_err(|_| IoError::NotFound(path.to_string_lossy().to_string()))?;

    if metadata.len() > max_bytes {
        return Err(IoError::TooLarge(metadata.len(), max_bytes));
    }

    let mut file = std_fs::File::open(path)?;
    let mut buffer = Vec::with_capacity(metadata.len() as usize);
    file.read_to_end(&mut buffer)?;

    decode_text(buffer)
}
