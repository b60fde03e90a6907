//! Platform abstraction layer.
//!
//! All `#[cfg]` blocks for OS-specific behavior live here rather than in the
//! shortcut pipeline.
//!
//! - `identity` - User name lookups (current user, owner of a uid)
//! - `paths` - Desktop directory and shortcut destination paths
//! - `permissions` - Mode bit inspection and changes
//!
//! Only Unix-like systems carry the owner and mode-bit model the permission
//! oracle reasons about; elsewhere metadata queries report the launcher as
//! unavailable.

pub mod identity;
pub mod paths;
pub mod permissions;

pub use identity::{current_user_name, user_name_for_uid};
pub use paths::{absolute_path, desktop_dir, shortcut_destination};
pub use permissions::{is_world_writable, set_mode};
