//! External process execution for permission fixes.
//!
//! Plain and elevated permission changes go through the same [`ProcessRunner`];
//! elevation is only a different argv prefix.

mod command;
mod runner;
mod traits;

pub use command::permission_fix_argv;
pub use runner::TokioProcessRunner;
pub use traits::{ProcessOutput, ProcessRunner};
