//! Platform-specific file permission handling.

use std::io;
use std::path::Path;
use tracing::debug;

/// "Write" bit for users other than owner and group.
pub const OTHERS_WRITE: u32 = 0o002;

/// Check whether a mode allows anyone to modify the file.
pub fn is_world_writable(mode: u32) -> bool {
    mode & OTHERS_WRITE != 0
}

/// Check whether the current process may execute `path`.
///
/// # Platform Behavior
/// - **Unix**: `access(path, X_OK)` against the real uid and gid
/// - **Other**: always false; there is no execute bit to query
pub fn can_execute(path: &Path) -> bool {
    #[cfg(unix)]
    {
        use nix::unistd::{access, AccessFlags};
        access(path, AccessFlags::X_OK).is_ok()
    }

    #[cfg(not(unix))]
    {
        let _ = path;
        false
    }
}

/// Set the permission bits of `path` to exactly `mode`.
///
/// # Platform Behavior
/// - **Unix**: `chmod(path, mode)`
/// - **Windows**: No-op (executability is decided by extension)
pub async fn set_mode(path: &Path, mode: u32) -> io::Result<()> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        tokio::fs::set_permissions(path, std::fs::Permissions::from_mode(mode)).await?;
        debug!("Set mode {:o} on: {}", mode, path.display());
    }

    #[cfg(not(unix))]
    {
        debug!("Skipping mode {:o} on non-Unix platform for: {}", mode, path.display());
    }

    Ok(())
}
