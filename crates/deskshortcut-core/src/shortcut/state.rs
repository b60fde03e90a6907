//! Operation states and terminal outcomes.

use crate::artifact::ShortcutTarget;
use crate::config::ShortcutMode;
use crate::error::{FailureKind, ShortcutError};
use crate::metadata::LauncherMetadata;
use crate::oracle::PermissionDecision;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// States of a shortcut operation.
///
/// `Start → MetadataQueried → DecisionMade → {NoFixNeeded | SelfFixInProgress |
/// ElevatedFixInProgress} → ArtifactCreated → Done`, with `Failed` reachable from
/// every non-terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "reason", rename_all = "snake_case")]
pub enum OperationState {
    Start,
    MetadataQueried,
    DecisionMade,
    NoFixNeeded,
    SelfFixInProgress,
    ElevatedFixInProgress,
    ArtifactCreated,
    Done,
    Failed(FailureKind),
}

impl OperationState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, OperationState::Done | OperationState::Failed(_))
    }
}

impl fmt::Display for OperationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperationState::Failed(kind) => write!(f, "Failed({:?})", kind),
            other => write!(f, "{:?}", other),
        }
    }
}

/// Why an operation failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationFailure {
    pub kind: FailureKind,
    /// Underlying diagnostic text.
    pub message: String,
}

impl From<&ShortcutError> for OperationFailure {
    fn from(err: &ShortcutError) -> Self {
        Self {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

/// Terminal report of one shortcut operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortcutOutcome {
    pub source: PathBuf,
    pub mode: ShortcutMode,
    pub target: Option<ShortcutTarget>,
    pub metadata: Option<LauncherMetadata>,
    pub decision: Option<PermissionDecision>,
    /// Every state visited, ending in `Done` or `Failed`.
    pub trace: Vec<OperationState>,
    pub failure: Option<OperationFailure>,
}

impl ShortcutOutcome {
    pub(crate) fn started(source: PathBuf, mode: ShortcutMode) -> Self {
        Self {
            source,
            mode,
            target: None,
            metadata: None,
            decision: None,
            trace: vec![OperationState::Start],
            failure: None,
        }
    }

    /// The last state reached.
    pub fn state(&self) -> OperationState {
        self.trace.last().copied().unwrap_or(OperationState::Start)
    }

    pub fn is_done(&self) -> bool {
        self.state() == OperationState::Done
    }

    pub fn failure_kind(&self) -> Option<FailureKind> {
        self.failure.as_ref().map(|f| f.kind)
    }

    /// Exit code for command-line hosts: 0 when done.
    pub fn exit_code(&self) -> i32 {
        self.failure_kind().map(|k| k.exit_code()).unwrap_or(0)
    }
}
