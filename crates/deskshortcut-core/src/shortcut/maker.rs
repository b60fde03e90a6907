//! Host-facing shortcut entry point.

use super::operation::ShortcutOperation;
use super::state::ShortcutOutcome;
use crate::artifact::{ArtifactCreator, FsArtifactCreator};
use crate::config::{ShortcutConfig, ShortcutMode};
use crate::error::Result;
use crate::metadata::{FileMetadataProvider, FsMetadataProvider};
use crate::process::{ProcessRunner, TokioProcessRunner};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Creates desktop shortcuts on behalf of a host UI.
///
/// Each call starts an independent [`ShortcutOperation`] with freshly queried
/// metadata; nothing is remembered between calls.
#[derive(Clone)]
pub struct ShortcutMaker {
    config: ShortcutConfig,
    metadata_provider: Arc<dyn FileMetadataProvider>,
    runner: Arc<dyn ProcessRunner>,
    creator: Arc<dyn ArtifactCreator>,
}

impl ShortcutMaker {
    /// Create a maker with filesystem-backed collaborators.
    pub fn new(config: ShortcutConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            metadata_provider: Arc::new(FsMetadataProvider::new()),
            runner: Arc::new(TokioProcessRunner::new()),
            creator: Arc::new(FsArtifactCreator::new()),
        })
    }

    /// Create a maker for the current user and desktop directory.
    pub fn from_environment() -> Result<Self> {
        Self::new(ShortcutConfig::from_environment(ShortcutMode::default())?)
    }

    pub fn with_metadata_provider(mut self, provider: Arc<dyn FileMetadataProvider>) -> Self {
        self.metadata_provider = provider;
        self
    }

    pub fn with_runner(mut self, runner: Arc<dyn ProcessRunner>) -> Self {
        self.runner = runner;
        self
    }

    pub fn with_artifact_creator(mut self, creator: Arc<dyn ArtifactCreator>) -> Self {
        self.creator = creator;
        self
    }

    pub fn config(&self) -> &ShortcutConfig {
        &self.config
    }

    /// Build an operation for `source` in the requested mode.
    pub fn operation(&self, source: impl Into<PathBuf>, mode: ShortcutMode) -> ShortcutOperation {
        let mut config = self.config.clone();
        config.mode = mode;
        ShortcutOperation::new(
            config,
            source,
            self.metadata_provider.clone(),
            self.runner.clone(),
            self.creator.clone(),
        )
    }

    /// Create a shortcut for `source` and wait for the terminal outcome.
    pub async fn make_shortcut(
        &self,
        source: impl Into<PathBuf>,
        mode: ShortcutMode,
    ) -> ShortcutOutcome {
        self.operation(source, mode).run().await
    }

    /// Start creating a shortcut in the background.
    pub fn spawn_shortcut(
        &self,
        source: impl Into<PathBuf>,
        mode: ShortcutMode,
    ) -> JoinHandle<ShortcutOutcome> {
        self.operation(source, mode).spawn()
    }
}
