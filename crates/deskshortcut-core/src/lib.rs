//! Deskshortcut Core - permission-aware desktop shortcuts for launcher files.
//!
//! Creating the shortcut itself is one copy or symlink. The work is in deciding
//! whether the launcher's permissions must change first, whether the current user
//! may change them or needs privilege escalation, and in never creating the
//! shortcut when that change failed or was dismissed.
//!
//! # Example
//!
//! ```rust,ignore
//! use deskshortcut_core::{ShortcutConfig, ShortcutMaker, ShortcutMode};
//!
//! #[tokio::main]
//! async fn main() -> deskshortcut_core::Result<()> {
//!     let config = ShortcutConfig::from_environment(ShortcutMode::Symlink)?;
//!     let maker = ShortcutMaker::new(config)?;
//!
//!     let outcome = maker
//!         .make_shortcut("/usr/share/applications/firefox.desktop", ShortcutMode::Symlink)
//!         .await;
//!     println!("Finished in state {}", outcome.state());
//!
//!     Ok(())
//! }
//! ```

pub mod artifact;
pub mod config;
pub mod error;
pub mod menu;
pub mod metadata;
pub mod oracle;
pub mod platform;
pub mod process;
pub mod shortcut;

// Re-export commonly used types
pub use artifact::{ArtifactCreator, FsArtifactCreator, ShortcutTarget};
pub use config::{Identity, ShortcutConfig, ShortcutDefaults, ShortcutMode};
pub use error::{FailureKind, Result, ShortcutError};
pub use menu::{insert_add_to_desktop, ContextMenu, MenuLabels, MenuPlacement};
pub use metadata::{FileMetadataProvider, FsMetadataProvider, LauncherMetadata, Owner};
pub use oracle::{PermissionDecision, PermissionOracle};
pub use process::{ProcessOutput, ProcessRunner, TokioProcessRunner};
pub use shortcut::{
    OperationFailure, OperationState, ShortcutMaker, ShortcutOperation, ShortcutOutcome,
};
