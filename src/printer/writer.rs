//! Filesystem helpers for the printer.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::{DocToolsError, Result};

/// Writes `content` to a temporary file next to `path` and renames it over
/// `path`, creating parent directories as needed.
pub fn write_atomic(path: &Path, content: &str) -> Result<()> {
    let parent = path
        .parent()
        .ok_or_else(|| DocToolsError::io(format!("{} has no parent directory", path.display())))?;

    fs::create_dir_all(parent).map_err(|e| {
        DocToolsError::io(format!("Failed to create {}: {}", parent.display(), e))
    })?;

    let write_error =
        |e: std::io::Error| DocToolsError::io(format!("Failed to write {}: {}", path.display(), e));

    let mut file = NamedTempFile::new_in(parent).map_err(write_error)?;
    file.write_all(content.as_bytes()).map_err(write_error)?;
    file.flush().map_err(write_error)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.as_file()
            .set_permissions(fs::Permissions::from_mode(0o644))
            .map_err(write_error)?;
    }

    file.persist(path).map_err(|e| write_error(e.error))?;
    Ok(())
}

/// Recursively deletes `path`. A missing directory is not an error.
pub fn remove_dir_all(path: &Path) -> Result<()> {
    match fs::remove_dir_all(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(DocToolsError::io(format!(
            "Failed to remove {}: {}",
            path.display(),
            e
        ))),
    }
}
