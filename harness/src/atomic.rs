//! Temp-file-then-rename writes for run artifacts.

use std::io;
use std::path::{Path, PathBuf};

/// Write `content` to a temp file beside `path`, then rename it into place.
///
/// Readers see either the old file or the complete new one. On failure
/// the temp file is removed.
pub(crate) fn write_atomic(path: &Path, content: &[u8]) -> io::Result<()> {
    let temp_path = temp_path_for(path)?;
    if let Err(e) = std::fs::write(&temp_path, content) {
        let _ = std::fs::remove_file(&temp_path);
        return Err(e);
    }
    if let Err(e) = std::fs::rename(&temp_path, path) {
        let _ = std::fs::remove_file(&temp_path);
        return Err(e);
    }
    Ok(())
}

fn temp_path_for(path: &Path) -> io::Result<PathBuf> {
    let dir = path.parent().ok_or_else(|| {
        io::Error::new(io::ErrorKind::InvalidInput, "path has no parent directory")
    })?;
    let name = path.file_name().ok_or_else(|| {
        io::Error::new(io::ErrorKind::InvalidInput, "path has no file name")
    })?;
    Ok(dir.join(format!(".tmp_{}", name.to_string_lossy())))
}
