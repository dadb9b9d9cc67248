// src/file.rs

use std::{
    fs,
    io,
    path::Path,
};

use serde::Serialize;

/// Create `dir` (and parents) unless it already exists as a directory.
pub fn ensure_directory(dir: &Path) -> io::Result<()> {
    if dir.as_os_str().is_empty() {
        return Ok(());
    }
    if dir.exists() && !dir.is_dir() {
        return Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("Path exists but is not a directory: {}", dir.display()),
        ));
    }
    if !dir.exists() { fs::create_dir_all(dir)?; }
    Ok(())
}

/// Pretty-print `value` as JSON into `path`, creating parent directories.
/// Non-ASCII text (Korean names) is written as-is, not escaped.
pub fn write_json_pretty<T: Serialize + ?Sized>(path: &Path, value: &T) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        ensure_directory(parent)?;
    }
    let text = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
    fs::write(path, text)
}
