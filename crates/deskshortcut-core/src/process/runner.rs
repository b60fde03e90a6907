//! Process runner backed by `tokio::process`.

use super::traits::{ProcessOutput, ProcessRunner};
use async_trait::async_trait;
use std::io;
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

/// Spawns commands on the tokio runtime and captures their output.
///
/// No timeout is applied: an escalation front-end waits as long as the user
/// leaves its prompt open.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioProcessRunner;

impl TokioProcessRunner {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ProcessRunner for TokioProcessRunner {
    async fn run(&self, argv: &[String]) -> io::Result<ProcessOutput> {
        let (program, args) = argv
            .split_first()
            .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "empty argv"))?;

        debug!("Running {:?}", argv);
        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await?;

        let result = ProcessOutput {
            succeeded: output.status.success(),
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };
        debug!(
            "{} exited with {:?} (succeeded={})",
            program, result.exit_code, result.succeeded
        );
        Ok(result)
    }
}
