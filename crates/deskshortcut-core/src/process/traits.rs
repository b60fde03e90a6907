//! External process runner trait.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::io;

/// Captured result of a process that ran to completion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessOutput {
    /// Whether the process exited successfully.
    pub succeeded: bool,
    /// Exit code, if the process was not killed by a signal.
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ProcessOutput {
    /// A successful run with no output.
    pub fn success() -> Self {
        Self {
            succeeded: true,
            exit_code: Some(0),
            ..Default::default()
        }
    }

    /// A failed run with the given exit code and stderr text.
    pub fn failure(exit_code: i32, stderr: impl Into<String>) -> Self {
        Self {
            succeeded: false,
            exit_code: Some(exit_code),
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }
}

/// Runs an external command.
///
/// Dismissing an escalation prompt shows up as an unsuccessful [`ProcessOutput`],
/// the same as any other non-zero exit. `Err` means the command could not be
/// started at all.
#[async_trait]
pub trait ProcessRunner: Send + Sync {
    /// Run `argv[0]` with the remaining arguments and wait for it to exit.
    async fn run(&self, argv: &[String]) -> io::Result<ProcessOutput>;
}
