//! End-to-end tests for shortcut operations.
//!
//! These run the real metadata provider and artifact creator against temporary
//! directories. The permission runner is replaced with a recording fake wherever
//! the scenario would otherwise need an escalation prompt.

#![cfg(unix)]

use async_trait::async_trait;
use deskshortcut_core::{
    ArtifactCreator, FailureKind, FsArtifactCreator, FsMetadataProvider, Identity,
    OperationState, ProcessOutput, ProcessRunner, ShortcutConfig, ShortcutMaker, ShortcutMode,
    TokioProcessRunner,
};
use std::io;
use std::os::unix::fs::{MetadataExt, PermissionsExt};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

const FOREIGN_USER: &str = "deskshortcut-test-nobody";

/// Runner that records every argv and answers with a fixed output.
struct RecordingRunner {
    reply: ProcessOutput,
    calls: Mutex<Vec<Vec<String>>>,
}

impl RecordingRunner {
    fn replying(reply: ProcessOutput) -> Arc<Self> {
        Arc::new(Self {
            reply,
            calls: Mutex::new(Vec::new()),
        })
    }

    fn calls(&self) -> Vec<Vec<String>> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ProcessRunner for RecordingRunner {
    async fn run(&self, argv: &[String]) -> io::Result<ProcessOutput> {
        self.calls.lock().unwrap().push(argv.to_vec());
        Ok(self.reply.clone())
    }
}

/// Artifact creator that only counts invocations.
#[derive(Default)]
struct CountingCreator {
    calls: Mutex<usize>,
}

#[async_trait]
impl ArtifactCreator for CountingCreator {
    async fn copy(&self, _source: &Path, _dest: &Path, _mode_bits: u32) -> deskshortcut_core::Result<()> {
        *self.calls.lock().unwrap() += 1;
        Ok(())
    }

    async fn symlink(&self, _source: &Path, _dest_dir: &Path) -> deskshortcut_core::Result<()> {
        *self.calls.lock().unwrap() += 1;
        Ok(())
    }
}

struct TestEnv {
    _root: TempDir,
    apps_dir: PathBuf,
    desktop_dir: PathBuf,
}

/// Create an applications directory and an empty desktop directory.
fn create_test_env() -> TestEnv {
    let root = TempDir::new().expect("Failed to create temp dir");
    let apps_dir = root.path().join("applications");
    let desktop_dir = root.path().join("Desktop");
    std::fs::create_dir_all(&apps_dir).unwrap();
    std::fs::create_dir_all(&desktop_dir).unwrap();
    TestEnv {
        _root: root,
        apps_dir,
        desktop_dir,
    }
}

fn write_launcher(dir: &Path, mode: u32) -> PathBuf {
    let path = dir.join("org.example.Editor.desktop");
    std::fs::write(
        &path,
        "[Desktop Entry]\nType=Application\nName=Editor\nExec=editor %U\n",
    )
    .unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(mode)).unwrap();
    path
}

fn mode_of(path: &Path) -> u32 {
    std::fs::metadata(path).unwrap().permissions().mode() & 0o777
}

fn maker(identity: &str, desktop_dir: &Path) -> ShortcutMaker {
    let config = ShortcutConfig::new(Identity::new(identity), desktop_dir, ShortcutMode::Copy);
    ShortcutMaker::new(config).unwrap()
}

#[tokio::test]
async fn test_owner_world_writable_is_fixed_then_copied() {
    let env = create_test_env();
    let source = write_launcher(&env.apps_dir, 0o666);

    let uid = std::fs::metadata(&source).unwrap().uid();
    let Some(owner) = deskshortcut_core::platform::user_name_for_uid(uid) else {
        // Without a passwd entry for our uid, the launcher has no named owner.
        return;
    };

    let maker = maker(&owner, &env.desktop_dir).with_runner(Arc::new(TokioProcessRunner::new()));
    let outcome = maker.make_shortcut(&source, ShortcutMode::Copy).await;

    assert_eq!(
        outcome.trace,
        vec![
            OperationState::Start,
            OperationState::MetadataQueried,
            OperationState::DecisionMade,
            OperationState::SelfFixInProgress,
            OperationState::ArtifactCreated,
            OperationState::Done,
        ]
    );
    assert_eq!(mode_of(&source) & 0o002, 0);
    assert_eq!(mode_of(&source), 0o664);

    let dest = env.desktop_dir.join("org.example.Editor.desktop");
    assert!(dest.exists());
    assert_eq!(mode_of(&dest), 0o764);
    assert_eq!(outcome.target.unwrap().path, dest);
}

#[tokio::test]
async fn test_foreign_executable_launcher_needs_no_fix() {
    let env = create_test_env();
    let source = write_launcher(&env.apps_dir, 0o755);
    let runner = RecordingRunner::replying(ProcessOutput::success());

    let maker = maker(FOREIGN_USER, &env.desktop_dir).with_runner(runner.clone());
    let outcome = maker.make_shortcut(&source, ShortcutMode::Symlink).await;

    assert_eq!(
        outcome.trace,
        vec![
            OperationState::Start,
            OperationState::MetadataQueried,
            OperationState::DecisionMade,
            OperationState::NoFixNeeded,
            OperationState::ArtifactCreated,
            OperationState::Done,
        ]
    );
    assert!(runner.calls().is_empty());

    let dest = env.desktop_dir.join("org.example.Editor.desktop");
    assert_eq!(std::fs::read_link(&dest).unwrap(), source);
    assert_eq!(outcome.exit_code(), 0);
}

#[tokio::test]
async fn test_dismissed_elevation_creates_nothing() {
    let env = create_test_env();
    let source = write_launcher(&env.apps_dir, 0o644);
    let runner = RecordingRunner::replying(ProcessOutput::failure(
        126,
        "Error executing command as another user: Request dismissed",
    ));

    let maker = maker(FOREIGN_USER, &env.desktop_dir).with_runner(runner.clone());
    let outcome = maker.make_shortcut(&source, ShortcutMode::Symlink).await;

    assert_eq!(
        outcome.trace,
        vec![
            OperationState::Start,
            OperationState::MetadataQueried,
            OperationState::DecisionMade,
            OperationState::ElevatedFixInProgress,
            OperationState::Failed(FailureKind::PermissionFixDenied),
        ]
    );
    assert_eq!(
        runner.calls(),
        vec![vec![
            "pkexec".to_string(),
            "chmod".to_string(),
            "a+x".to_string(),
            "--".to_string(),
            source.to_string_lossy().into_owned(),
        ]]
    );
    assert!(std::fs::symlink_metadata(env.desktop_dir.join("org.example.Editor.desktop")).is_err());
    assert_eq!(mode_of(&source), 0o644);

    let failure = outcome.failure.unwrap();
    assert!(failure.message.contains("Request dismissed"));
}

#[tokio::test]
async fn test_missing_launcher_reports_metadata_unavailable() {
    let env = create_test_env();
    let runner = RecordingRunner::replying(ProcessOutput::success());
    let creator = Arc::new(CountingCreator::default());

    let maker = maker(FOREIGN_USER, &env.desktop_dir)
        .with_runner(runner.clone())
        .with_artifact_creator(creator.clone());
    let outcome = maker
        .make_shortcut(env.apps_dir.join("missing.desktop"), ShortcutMode::Copy)
        .await;

    assert_eq!(
        outcome.trace,
        vec![
            OperationState::Start,
            OperationState::Failed(FailureKind::MetadataUnavailable),
        ]
    );
    assert!(outcome.metadata.is_none());
    assert!(outcome.decision.is_none());
    assert!(runner.calls().is_empty());
    assert_eq!(*creator.calls.lock().unwrap(), 0);
}

#[tokio::test]
async fn test_failed_fix_never_reaches_artifact_creator() {
    let env = create_test_env();
    let source = write_launcher(&env.apps_dir, 0o666);
    let creator = Arc::new(CountingCreator::default());

    // The launcher has no execute bits, so a link also needs "a+x".
    for (mode, expression) in [(ShortcutMode::Copy, "o-w"), (ShortcutMode::Symlink, "o-w,a+x")] {
        let runner = RecordingRunner::replying(ProcessOutput::failure(127, ""));
        let maker = maker(FOREIGN_USER, &env.desktop_dir)
            .with_metadata_provider(Arc::new(FsMetadataProvider::new()))
            .with_runner(runner.clone())
            .with_artifact_creator(creator.clone());

        let outcome = maker.make_shortcut(&source, mode).await;
        assert_eq!(outcome.failure_kind(), Some(FailureKind::PermissionFixDenied));
        assert_eq!(outcome.state(), OperationState::Failed(FailureKind::PermissionFixDenied));
        let calls = runner.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0][0], "pkexec");
        assert_eq!(calls[0][2], expression);
    }

    assert_eq!(*creator.calls.lock().unwrap(), 0);
    assert_eq!(mode_of(&source), 0o666);
}

#[tokio::test]
async fn test_concurrent_operations_are_independent() {
    let env = create_test_env();
    let good = write_launcher(&env.apps_dir, 0o755);
    let missing = env.apps_dir.join("gone.desktop");

    let maker = maker(FOREIGN_USER, &env.desktop_dir)
        .with_runner(RecordingRunner::replying(ProcessOutput::success()))
        .with_artifact_creator(Arc::new(FsArtifactCreator::new()));

    let first = maker.spawn_shortcut(&good, ShortcutMode::Copy);
    let second = maker.spawn_shortcut(&missing, ShortcutMode::Copy);

    let first = first.await.unwrap();
    let second = second.await.unwrap();

    assert!(first.is_done());
    assert_eq!(second.failure_kind(), Some(FailureKind::MetadataUnavailable));
    assert!(env.desktop_dir.join("org.example.Editor.desktop").exists());
}
