// PlaceBoard - platform/fs.rs
//
// Filesystem helpers shared by the JSON store.

use crate::util::constants::TEMP_FILE_SUFFIX;
use std::io;
use std::path::{Path, PathBuf};

/// Sibling temp path used while writing `path` atomically.
pub fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".");
    name.push(TEMP_FILE_SUFFIX);
    path.with_file_name(name)
}

/// Write `bytes` to `path` atomically (write temp → rename).
///
/// Creates parent directories as needed. A crash between write and rename
/// loses the new content but never corrupts the previous file.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let tmp = temp_path(path);
    std::fs::write(&tmp, bytes)?;

    if let Err(e) = std::fs::rename(&tmp, path) {
        let _ = std::fs::remove_file(&tmp);
        return Err(e);
    }

    tracing::trace!(path = %path.display(), bytes = bytes.len(), "File written atomically");
    Ok(())
}

/// Read a file into a string, or `Ok(None)` if it does not exist.
pub fn read_if_exists(path: &Path) -> io::Result<Option<String>> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}
