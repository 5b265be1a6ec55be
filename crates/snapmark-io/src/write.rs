//! Durable whole-file writes.

use std::fs as std_fs;
use std::io::Write;
use std::path::Path;

use crate::error::IoError;

/// Replace the content of `path` with `content` and flush to stable storage.
///
/// The write replaces the whole file in one operation and calls `sync_all`
/// before returning, so a caller holding a lock on the path can release it
/// knowing the bytes have reached disk. A process killed mid-write can still
/// leave a truncated file behind; callers treat that as an accepted
/// limitation of in-place source rewriting.
///
/// # Errors
/// Returns `IoError::System` for any create/write/sync failure.
pub fn write_text_durable<P: AsRef<Path>>(path: P, content: &str) -> Result<(), IoError> {
    let mut file = std_fs::File::create(path.as_ref())?;
    file.write_all(content.as_bytes())?;
    file.sync_all()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_round_trip() {
        let dir = TempDir::new().unwrap();
        let p = dir.path().join("out.py");
        write_text_durable(&p, "mark(1, 2)\n").unwrap();
        assert_eq!(std_fs::read_to_string(&p).unwrap(), "mark(1, 2)\n");
    }

    #[test]
    fn test_write_replaces_existing_content() {
        let dir = TempDir::new().unwrap();
        let p = dir.path().join("out.py");
        std_fs::write(&p, "a much longer original content line\n").unwrap();
        write_text_durable(&p, "short\n").unwrap();
        assert_eq!(std_fs::read_to_string(&p).unwrap(), "short\n");
    }

    #[test]
    fn test_write_into_missing_directory_fails() {
        let result = write_text_durable("/nonexistent/dir/out.py", "x");
        assert!(matches!(result, Err(IoError::System(_))));
    }
}
