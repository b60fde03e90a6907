//! Shortcut artifact creation.

use crate::config::ShortcutMode;
use crate::error::{Result, ShortcutError};
use crate::platform;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Where a shortcut will be placed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortcutTarget {
    /// Directory receiving the shortcut.
    pub dir: PathBuf,
    /// Full destination path (`dir` joined with the launcher's basename).
    pub path: PathBuf,
}

impl ShortcutTarget {
    /// Derive the target for `source` inside `dir`.
    pub fn for_source(source: &Path, dir: &Path) -> Result<Self> {
        Ok(Self {
            dir: dir.to_path_buf(),
            path: platform::shortcut_destination(source, dir)?,
        })
    }
}

/// Creates the shortcut artifact on disk.
#[async_trait]
pub trait ArtifactCreator: Send + Sync {
    /// Copy `source` to `dest` and set the copy's mode to exactly `mode_bits`.
    async fn copy(&self, source: &Path, dest: &Path, mode_bits: u32) -> Result<()>;

    /// Create `dest_dir/<basename of source>` as a symbolic link to `source`.
    async fn symlink(&self, source: &Path, dest_dir: &Path) -> Result<()>;
}

/// Dispatch to the creator method for `mode`.
pub async fn create_artifact(
    creator: &dyn ArtifactCreator,
    mode: ShortcutMode,
    source: &Path,
    target: &ShortcutTarget,
    copy_mode_bits: u32,
) -> Result<()> {
    match mode {
        ShortcutMode::Copy => creator.copy(source, &target.path, copy_mode_bits).await,
        ShortcutMode::Symlink => creator.symlink(source, &target.dir).await,
    }
}

/// Artifact creator backed by the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsArtifactCreator;

impl FsArtifactCreator {
    pub fn new() -> Self {
        Self
    }

    async fn ensure_dir(dir: &Path) -> Result<()> {
        tokio::fs::create_dir_all(dir)
            .await
            .map_err(|e| ShortcutError::artifact_io(e, dir))
    }
}

#[async_trait]
impl ArtifactCreator for FsArtifactCreator {
    async fn copy(&self, source: &Path, dest: &Path, mode_bits: u32) -> Result<()> {
        if let Some(parent) = dest.parent() {
            Self::ensure_dir(parent).await?;
        }

        // A link at the destination is replaced, never written through.
        if let Ok(md) = tokio::fs::symlink_metadata(dest).await {
            if md.file_type().is_symlink() {
                tokio::fs::remove_file(dest)
                    .await
                    .map_err(|e| ShortcutError::artifact_io(e, dest))?;
            }
        }

        if let (Ok(src), Ok(dst)) = (
            tokio::fs::canonicalize(source).await,
            tokio::fs::canonicalize(dest).await,
        ) {
            if src == dst {
                return Err(ShortcutError::ArtifactCreationFailed {
                    path: dest.to_path_buf(),
                    message: "launcher is already at the shortcut location".to_string(),
                    source: None,
                });
            }
        }

        // An existing shortcut of the same name is overwritten.
        tokio::fs::copy(source, dest)
            .await
            .map_err(|e| ShortcutError::artifact_io(e, dest))?;
        platform::set_mode(dest, mode_bits)
            .await
            .map_err(|e| ShortcutError::artifact_io(e, dest))?;

        debug!(
            "Copied {} to {} with mode {:o}",
            source.display(),
            dest.display(),
            mode_bits
        );
        Ok(())
    }

    async fn symlink(&self, source: &Path, dest_dir: &Path) -> Result<()> {
        let dest = platform::shortcut_destination(source, dest_dir)?;
        Self::ensure_dir(dest_dir).await?;

        let source =
            platform::absolute_path(source).map_err(|e| ShortcutError::artifact_io(e, &dest))?;

        match tokio::fs::symlink_metadata(&dest).await {
            Ok(md) if md.file_type().is_symlink() => {
                tokio::fs::remove_file(&dest)
                    .await
                    .map_err(|e| ShortcutError::artifact_io(e, &dest))?;
            }
            Ok(_) => {
                return Err(ShortcutError::ArtifactCreationFailed {
                    path: dest,
                    message: "destination exists and is not a symbolic link".to_string(),
                    source: None,
                });
            }
            Err(_) => {}
        }

        #[cfg(unix)]
        {
            tokio::fs::symlink(&source, &dest)
                .await
                .map_err(|e| ShortcutError::artifact_io(e, &dest))?;
            debug!("Linked {} -> {}", dest.display(), source.display());
            Ok(())
        }

        #[cfg(not(unix))]
        {
            Err(ShortcutError::ArtifactCreationFailed {
                path: dest,
                message: format!(
                    "symbolic link shortcuts are not supported on this platform ({})",
                    source.display()
                ),
                source: None,
            })
        }
    }
}
