//! The shortcut pipeline.
//!
//! One operation queries launcher metadata, asks the [`PermissionOracle`] what has
//! to change, applies that change (directly or through the escalation prefix) and
//! only then creates the shortcut artifact. Every failure is terminal; nothing is
//! retried.
//!
//! The launcher's permissions may change between the metadata query and the fix.
//! That race is inherent to changing modes out of process and is not guarded.

use super::state::{OperationFailure, OperationState, ShortcutOutcome};
use crate::artifact::{create_artifact, ArtifactCreator, ShortcutTarget};
use crate::config::{ShortcutConfig, ShortcutMode};
use crate::error::{Result, ShortcutError};
use crate::metadata::FileMetadataProvider;
use crate::oracle::PermissionOracle;
use crate::platform;
use crate::process::{permission_fix_argv, ProcessRunner};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// A single shortcut creation for one launcher file.
pub struct ShortcutOperation {
    config: ShortcutConfig,
    source: PathBuf,
    metadata_provider: Arc<dyn FileMetadataProvider>,
    runner: Arc<dyn ProcessRunner>,
    creator: Arc<dyn ArtifactCreator>,
}

impl ShortcutOperation {
    pub fn new(
        config: ShortcutConfig,
        source: impl Into<PathBuf>,
        metadata_provider: Arc<dyn FileMetadataProvider>,
        runner: Arc<dyn ProcessRunner>,
        creator: Arc<dyn ArtifactCreator>,
    ) -> Self {
        Self {
            config,
            source: source.into(),
            metadata_provider,
            runner,
            creator,
        }
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn mode(&self) -> ShortcutMode {
        self.config.mode
    }

    /// Run the operation on the tokio runtime without waiting for it.
    pub fn spawn(self) -> JoinHandle<ShortcutOutcome> {
        tokio::spawn(self.run())
    }

    /// Run the operation to a terminal state.
    pub async fn run(self) -> ShortcutOutcome {
        let mut outcome = ShortcutOutcome::started(self.source.clone(), self.config.mode);

        match self.drive(&mut outcome).await {
            Ok(()) => {
                advance(&mut outcome, OperationState::Done);
                if let Some(target) = &outcome.target {
                    info!(
                        "Created {} shortcut {} for {}",
                        self.config.mode,
                        target.path.display(),
                        self.source.display()
                    );
                }
            }
            Err(e) => {
                warn!("Failed to create shortcut for {}: {}", self.source.display(), e);
                advance(&mut outcome, OperationState::Failed(e.kind()));
                outcome.failure = Some(OperationFailure::from(&e));
            }
        }

        outcome
    }

    async fn drive(&self, outcome: &mut ShortcutOutcome) -> Result<()> {
        // The fix may run under an escalation front-end with its own working
        // directory, so everything past this point sees an absolute path.
        let source = platform::absolute_path(&self.source)
            .map_err(|e| ShortcutError::metadata_io(&e, &self.source))?;

        let metadata = self
            .metadata_provider
            .query_metadata(&source)
            .await
            .map_err(|e| self.metadata_unavailable(e))?;
        outcome.metadata = Some(metadata.clone());
        advance(outcome, OperationState::MetadataQueried);

        let target = ShortcutTarget::for_source(&source, &self.config.desktop_dir)
            .map_err(|e| self.metadata_unavailable(e))?;
        outcome.target = Some(target.clone());

        let decision =
            PermissionOracle::new(self.config.mode).decide(&self.config.identity, &metadata);
        outcome.decision = Some(decision);
        advance(outcome, OperationState::DecisionMade);

        match permission_fix_argv(&self.config, &decision, &source) {
            None => advance(outcome, OperationState::NoFixNeeded),
            Some(argv) => {
                advance(
                    outcome,
                    if decision.requires_elevation {
                        OperationState::ElevatedFixInProgress
                    } else {
                        OperationState::SelfFixInProgress
                    },
                );
                self.apply_fix(&argv).await?;
            }
        }

        create_artifact(
            self.creator.as_ref(),
            self.config.mode,
            &source,
            &target,
            self.config.copy_mode_bits,
        )
        .await
        .map_err(|e| match e {
            e @ ShortcutError::ArtifactCreationFailed { .. } => e,
            other => ShortcutError::ArtifactCreationFailed {
                path: target.path.clone(),
                message: other.to_string(),
                source: None,
            },
        })?;
        advance(outcome, OperationState::ArtifactCreated);

        Ok(())
    }

    /// Run the permission command; anything short of a clean exit is a denial.
    async fn apply_fix(&self, argv: &[String]) -> Result<()> {
        let program = argv.first().map(String::as_str).unwrap_or("permission command");
        let output = self
            .runner
            .run(argv)
            .await
            .map_err(|e| ShortcutError::PermissionFixDenied {
                message: format!("could not run {}: {}", program, e),
                exit_code: None,
            })?;

        if output.succeeded {
            return Ok(());
        }

        let detail = output.stderr.trim();
        Err(ShortcutError::PermissionFixDenied {
            message: if detail.is_empty() {
                format!("{} exited with {:?}", program, output.exit_code)
            } else {
                detail.to_string()
            },
            exit_code: output.exit_code,
        })
    }

    fn metadata_unavailable(&self, err: ShortcutError) -> ShortcutError {
        match err {
            e @ ShortcutError::MetadataUnavailable { .. } => e,
            other => ShortcutError::MetadataUnavailable {
                path: self.source.clone(),
                message: other.to_string(),
            },
        }
    }
}

fn advance(outcome: &mut ShortcutOutcome, next: OperationState) {
    debug!("{} -> {}", outcome.state(), next);
    debug_assert!(!outcome.state().is_terminal());
    outcome.trace.push(next);
}
