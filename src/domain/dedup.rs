//! Name-based duplicate detection.
//!
//! A possible duplicate is any file under the directory tree carrying the
//! same file name at a different path. Names only, no content hashing, so
//! this flags candidates rather than proving duplication. Not called by the
//! pipeline; exposed for callers that want a pre-upload check.

use std::io;
use std::path::Path;

/// Whether a file with the same name as `path` already exists somewhere
/// under `directory` (excluding `path` itself).
pub fn check_duplicate(path: &Path, directory: &Path) -> io::Result<bool> {
    let file_name = match path.file_name() {
        Some(name) => name.to_os_string(),
        None => return Ok(false),
    };

    let mut stack = vec![directory.to_path_buf()];
    while let Some(dir) = stack.pop() {
        for entry in std::fs::read_dir(&dir)? {
            let entry = entry?;
            let entry_path = entry.path();
            if entry_path.is_dir() {
                stack.push(entry_path);
            } else if entry.file_name() == file_name && entry_path != path {
                return Ok(true);
            }
        }
    }

    Ok(false)
}
