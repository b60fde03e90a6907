//! Error types for desktop shortcut creation.
//!
//! Every asynchronous step of a shortcut operation converts its low-level failure
//! into one of these variants before returning. The raw text of the underlying
//! failure is kept as diagnostic detail, but the variant decides how the host
//! reports it.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for shortcut operations.
#[derive(Debug, Error)]
pub enum ShortcutError {
    // Source launcher errors
    #[error("Launcher metadata unavailable for {path:?}: {message}")]
    MetadataUnavailable { path: PathBuf, message: String },

    #[error("No user name is known for uid {uid} owning {path:?}")]
    UnknownOwner { path: PathBuf, uid: u32 },

    // Permission fix errors
    #[error("Permission fix was denied or failed: {message}")]
    PermissionFixDenied {
        message: String,
        /// Exit status of the permission command, if it ran to completion.
        exit_code: Option<i32>,
    },

    // Destination errors
    #[error("Failed to create shortcut at {path:?}: {message}")]
    ArtifactCreationFailed {
        path: PathBuf,
        message: String,
        #[source]
        source: Option<std::io::Error>,
    },

    // Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid shortcut mode: {0} (expected \"copy\" or \"symlink\")")]
    InvalidShortcutMode(String),
}

/// Result type alias for shortcut operations.
pub type Result<T> = std::result::Result<T, ShortcutError>;

/// Failure taxonomy surfaced to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    MetadataUnavailable,
    PermissionFixDenied,
    ArtifactCreationFailed,
    UnknownOwner,
    Config,
}

impl ShortcutError {
    /// Create an artifact error from an IO failure at `path`.
    pub fn artifact_io(err: std::io::Error, path: impl Into<PathBuf>) -> Self {
        ShortcutError::ArtifactCreationFailed {
            message: err.to_string(),
            path: path.into(),
            source: Some(err),
        }
    }

    /// Create a metadata error from an IO failure at `path`.
    pub fn metadata_io(err: &std::io::Error, path: impl Into<PathBuf>) -> Self {
        ShortcutError::MetadataUnavailable {
            path: path.into(),
            message: err.to_string(),
        }
    }

    /// The taxonomy kind of this error.
    pub fn kind(&self) -> FailureKind {
        match self {
            ShortcutError::MetadataUnavailable { .. } => FailureKind::MetadataUnavailable,
            ShortcutError::UnknownOwner { .. } => FailureKind::UnknownOwner,
            ShortcutError::PermissionFixDenied { .. } => FailureKind::PermissionFixDenied,
            ShortcutError::ArtifactCreationFailed { .. } => FailureKind::ArtifactCreationFailed,
            ShortcutError::Config { .. } | ShortcutError::InvalidShortcutMode(_) => {
                FailureKind::Config
            }
        }
    }

    /// Convert to a process exit code for command-line hosts.
    pub fn exit_code(&self) -> i32 {
        self.kind().exit_code()
    }
}

impl FailureKind {
    /// Process exit code for command-line hosts.
    ///
    /// - 2: configuration or usage error
    /// - 3: launcher metadata unavailable
    /// - 4: permission fix denied or dismissed
    /// - 5: shortcut artifact could not be created
    pub fn exit_code(&self) -> i32 {
        match self {
            FailureKind::Config => 2,
            FailureKind::MetadataUnavailable | FailureKind::UnknownOwner => 3,
            FailureKind::PermissionFixDenied => 4,
            FailureKind::ArtifactCreationFailed => 5,
        }
    }
}
