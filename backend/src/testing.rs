//! Helpers for tests that read fixture files.
//!
//! These panic instead of returning errors, ending the calling test with the
//! offending path in the message.

use std::path::PathBuf;

/// Joins `parts` into a path and reads it as UTF-8 text.
///
/// ```ignore
/// let content = read_file_as_string(&["folderA", "folderB", "file.txt"]);
/// ```
pub fn read_file_as_string(parts: &[&str]) -> String {
    let bytes = read_file_as_bytes(parts);
    match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(err) => panic!("{} is not valid UTF-8: {err}", join(parts).display()),
    }
}

/// Joins `parts` into a path and reads the raw bytes.
pub fn read_file_as_bytes(parts: &[&str]) -> Vec<u8> {
    let path = join(parts);
    match std::fs::read(&path) {
        Ok(bytes) => bytes,
        Err(err) => panic!("cannot read {}: {err}", path.display()),
    }
}

fn join(parts: &[&str]) -> PathBuf {
    parts.iter().collect()
}
