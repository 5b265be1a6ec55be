//! Path-keyed exclusive locks for read-modify-write cycles.
//!
//! Concurrent callers rewriting the same file must each observe a fully
//! consistent on-disk snapshot to compute correct byte offsets, so the lock
//! is whole-file and process-wide, keyed by canonicalized path. Two
//! operations on the same file serialize fully even when they would touch
//! disjoint byte ranges.

use std::fs as std_fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use dashmap::DashMap;
use once_cell::sync::Lazy;

use crate::error::IoError;

/// Process-wide registry of per-path locks.
///
/// Entries are never removed; the set of files a test run patches is small
/// and bounded by the source tree.
static PATH_LOCKS: Lazy<DashMap<PathBuf, Arc<Mutex<()>>>> = Lazy::new(DashMap::new);

/// Run `f` while holding the exclusive lock for `path`.
///
/// Acquisition blocks until the lock is available; no timeout is imposed.
/// The lock is released when `f` returns, on every exit path, including a
/// panic inside `f` (the guard is an RAII scope). A lock poisoned by a
/// panicking holder is taken over rather than treated as an error: the
/// protected state lives on disk, not inside the mutex.
///
/// # Errors
/// Returns `IoError::NotFound` when `path` cannot be canonicalized, which
/// for this engine means the file to patch does not exist.
pub fn with_path_lock<P: AsRef<Path>, T>(path: P, f: impl FnOnce() -> T) -> Result<T, IoError> {
    let path = path.as_ref();
    let key = std_fs::canonicalize(path)
        .map_err(|_| IoError::NotFound(path.to_string_lossy().to_string()))?;

    // Clone the Arc out of the registry before blocking on the mutex, so the
    // registry shard is not held across the wait.
    let slot = {
        let entry = PATH_LOCKS
            .entry(key)
            .or_insert_with(|| Arc::new(Mutex::new(())));
        Arc::clone(entry.value())
    };

    let _guard = slot.lock().unwrap_or_else(PoisonError::into_inner);
    tracing::trace!(path = %path.display(), "acquired file lock");
    Ok(f())
}
