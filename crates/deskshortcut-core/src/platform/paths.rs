//! Platform-specific path utilities.

use crate::error::{Result, ShortcutError};
use std::path::{Path, PathBuf};

/// Get the user's desktop directory.
///
/// # Platform Behavior
/// Uses the `dirs` crate which handles platform differences:
/// - **Linux**: `XDG_DESKTOP_DIR` from user-dirs, else `~/Desktop`
/// - **Windows**: `C:\Users\{user}\Desktop`
/// - **macOS**: `~/Desktop`
pub fn desktop_dir() -> Result<PathBuf> {
    dirs::desktop_dir().ok_or_else(|| ShortcutError::Config {
        message: "Could not determine desktop directory".to_string(),
    })
}

/// Destination of a shortcut for `source` inside `dir`: the directory joined with
/// the source's basename.
pub fn shortcut_destination(source: &Path, dir: &Path) -> Result<PathBuf> {
    let name = source.file_name().ok_or_else(|| ShortcutError::Config {
        message: format!("Launcher path has no file name: {}", source.display()),
    })?;
    Ok(dir.join(name))
}

/// Make `path` absolute against the current directory without touching the
/// filesystem.
///
/// Commands run through an escalation front-end may start in another working
/// directory, so every path handed to them must be absolute.
pub fn absolute_path(path: &Path) -> std::io::Result<PathBuf> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        std::path::absolute(path)
    }
}
