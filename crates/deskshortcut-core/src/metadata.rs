//! Launcher file metadata.
//!
//! A [`LauncherMetadata`] snapshot is taken once at the start of each operation and
//! is the only input the permission oracle sees about the file.

use crate::error::{Result, ShortcutError};
use crate::platform;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Owner of a launcher file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Owner {
    /// Owner resolved to a user name.
    Named(String),
    /// The owning uid has no known user name.
    Unknown,
}

impl Owner {
    pub fn name(&self) -> Option<&str> {
        match self {
            Owner::Named(name) => Some(name),
            Owner::Unknown => None,
        }
    }
}

/// Snapshot of the launcher file's ownership and permission state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LauncherMetadata {
    pub owner: Owner,
    /// Whether the invoking user may execute the file.
    pub can_execute: bool,
    /// Whether users other than owner and group may write the file.
    pub writable_by_others: bool,
}

impl LauncherMetadata {
    pub fn new(owner: Owner, can_execute: bool, writable_by_others: bool) -> Self {
        Self {
            owner,
            can_execute,
            writable_by_others,
        }
    }
}

/// Source of launcher metadata.
#[async_trait]
pub trait FileMetadataProvider: Send + Sync {
    /// Query owner, execute access and the world-write bit for `path`.
    ///
    /// A missing or unreadable file is `ShortcutError::MetadataUnavailable`.
    async fn query_metadata(&self, path: &Path) -> Result<LauncherMetadata>;
}

/// Metadata provider backed by the local filesystem and user database.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsMetadataProvider;

impl FsMetadataProvider {
    pub fn new() -> Self {
        Self
    }

    /// Resolve the owner name of `path`, or `UnknownOwner` when the uid has no name.
    #[cfg(unix)]
    fn owner_name(path: &Path, uid: u32) -> Result<String> {
        platform::user_name_for_uid(uid).ok_or_else(|| ShortcutError::UnknownOwner {
            path: path.to_path_buf(),
            uid,
        })
    }
}

#[async_trait]
impl FileMetadataProvider for FsMetadataProvider {
    #[cfg(unix)]
    async fn query_metadata(&self, path: &Path) -> Result<LauncherMetadata> {
        use std::os::unix::fs::MetadataExt;

        let md = tokio::fs::metadata(path)
            .await
            .map_err(|e| ShortcutError::metadata_io(&e, path))?;
        if !md.is_file() {
            return Err(ShortcutError::MetadataUnavailable {
                path: path.to_path_buf(),
                message: "not a regular file".to_string(),
            });
        }

        let uid = md.uid();
        let writable_by_others = platform::is_world_writable(md.mode());

        let owned: PathBuf = path.to_path_buf();
        let (owner, can_execute) = tokio::task::spawn_blocking(move || {
            let owner = match FsMetadataProvider::owner_name(&owned, uid) {
                Ok(name) => Owner::Named(name),
                Err(e) => {
                    warn!("{}; treating launcher as foreign-owned", e);
                    Owner::Unknown
                }
            };
            (owner, platform::permissions::can_execute(&owned))
        })
        .await
        .map_err(|e| ShortcutError::MetadataUnavailable {
            path: path.to_path_buf(),
            message: format!("metadata lookup task failed: {}", e),
        })?;

        debug!(
            "Metadata for {}: owner={:?} can_execute={} writable_by_others={}",
            path.display(),
            owner,
            can_execute,
            writable_by_others
        );

        Ok(LauncherMetadata::new(owner, can_execute, writable_by_others))
    }

    #[cfg(not(unix))]
    async fn query_metadata(&self, path: &Path) -> Result<LauncherMetadata> {
        Err(ShortcutError::MetadataUnavailable {
            path: path.to_path_buf(),
            message: "ownership and mode bits are not available on this platform".to_string(),
        })
    }
}
