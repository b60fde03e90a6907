//! Desktop shortcut creation for launcher files.
//!
//! Provides:
//! - [`ShortcutOperation`] - one query → decide → fix → create pipeline
//! - [`ShortcutMaker`] - host-facing entry point that starts fresh operations
//! - [`OperationState`] / [`ShortcutOutcome`] - progress and terminal reports
//!
//! # Example
//!
//! ```rust,ignore
//! use deskshortcut_core::{ShortcutMaker, ShortcutMode};
//!
//! #[tokio::main]
//! async fn main() -> deskshortcut_core::Result<()> {
//!     let maker = ShortcutMaker::from_environment()?;
//!     let outcome = maker
//!         .make_shortcut("/usr/share/applications/org.gnome.Terminal.desktop", ShortcutMode::Copy)
//!         .await;
//!     println!("{:?}", outcome.state());
//!     Ok(())
//! }
//! ```

mod maker;
mod operation;
mod state;

pub use maker::ShortcutMaker;
pub use operation::ShortcutOperation;
pub use state::{OperationFailure, OperationState, ShortcutOutcome};
