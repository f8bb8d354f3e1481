// tests/real_process.rs
#![cfg(unix)]

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use tempfile::TempDir;

use cleanrun::engine::{RunState, Runtime};
use cleanrun::exec::{DirectLauncher, TermSignaller};
use cleanrun::fs::{FileSystem, RealFileSystem};
use cleanrun::types::CleanupMode;
use cleanrun_test_utils::builders::SettingsBuilder;
use cleanrun_test_utils::{drive_until_settled, init_tracing};

const BUDGET: Duration = Duration::from_secs(20);

fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, format!("#!/usr/bin/env bash\n{body}\n")).unwrap();
    path
}

fn runtime_for(
    script: &Path,
    temp: &TempDir,
    mode: CleanupMode,
) -> Runtime<DirectLauncher, TermSignaller> {
    let settings = SettingsBuilder::new(script, temp.path())
        .mode(mode)
        .poll_interval(Duration::from_millis(25))
        .build();
    let fs: Arc<dyn FileSystem> = Arc::new(RealFileSystem);
    Runtime::new(&settings, DirectLauncher::new().quiet(), TermSignaller, fs)
}

fn leftover_artifacts(temp: &TempDir) -> Vec<PathBuf> {
    std::fs::read_dir(temp.path())
        .unwrap()
        .map(|e| e.unwrap().path())
        .filter(|p| {
            p.file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.starts_with("cleanrun_"))
        })
        .collect()
}

#[tokio::test]
async fn script_exiting_zero_succeeds() {
    init_tracing();
    let temp = tempfile::tempdir().unwrap();
    let script = write_script(temp.path(), "ok.sh", "exit 0");
    let mut runtime = runtime_for(&script, &temp, CleanupMode::Standard);

    assert_eq!(runtime.start().await, RunState::Running);
    let state = tokio::time::timeout(BUDGET, drive_until_settled(&mut runtime))
        .await
        .unwrap();

    assert_eq!(state, RunState::Success);
    assert!(leftover_artifacts(&temp).is_empty());
}

#[tokio::test]
async fn script_exiting_nonzero_fails() {
    init_tracing();
    let temp = tempfile::tempdir().unwrap();
    let script = write_script(temp.path(), "bad.sh", "exit 1");
    let mut runtime = runtime_for(&script, &temp, CleanupMode::Standard);

    runtime.start().await;
    let state = tokio::time::timeout(BUDGET, drive_until_settled(&mut runtime))
        .await
        .unwrap();

    assert_eq!(state, RunState::Failure);
    assert_eq!(
        runtime.lifecycle().last_outcome().and_then(|o| o.exit_code()),
        Some(1)
    );
}

#[tokio::test]
async fn deep_flag_reaches_the_script() {
    init_tracing();
    let temp = tempfile::tempdir().unwrap();
    let script = write_script(
        temp.path(),
        "flag.sh",
        "[ \"$1\" = \"--deep-clean\" ] && [ \"$#\" -eq 1 ] || exit 7",
    );
    let mut runtime = runtime_for(&script, &temp, CleanupMode::Deep);

    runtime.start().await;
    let state = tokio::time::timeout(BUDGET, drive_until_settled(&mut runtime))
        .await
        .unwrap();

    assert_eq!(state, RunState::Success);
}

#[tokio::test]
async fn path_with_quote_and_space_runs() {
    init_tracing();
    let temp = tempfile::tempdir().unwrap();
    let dir = temp.path().join("it's a dir");
    std::fs::create_dir(&dir).unwrap();
    let script = write_script(&dir, "clean up.sh", "exit 0");
    let mut runtime = runtime_for(&script, &temp, CleanupMode::Standard);

    runtime.start().await;
    let state = tokio::time::timeout(BUDGET, drive_until_settled(&mut runtime))
        .await
        .unwrap();

    assert_eq!(state, RunState::Success);
}

#[tokio::test]
async fn cancel_stops_a_long_running_script() {
    init_tracing();
    let temp = tempfile::tempdir().unwrap();
    let script = write_script(temp.path(), "slow.sh", "sleep 30\nexit 0");
    let mut runtime = runtime_for(&script, &temp, CleanupMode::Standard);

    runtime.start().await;
    let pid_path = runtime.artifacts().unwrap().pid_path().to_path_buf();

    // Wait for the shell to record itself, then for the script to start.
    tokio::time::timeout(BUDGET, async {
        while !pid_path.exists() {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .unwrap();
    tokio::time::sleep(Duration::from_millis(300)).await;

    runtime.request_cancel();
    let state = tokio::time::timeout(BUDGET, drive_until_settled(&mut runtime))
        .await
        .unwrap();

    assert_eq!(state, RunState::Cancelled);
    assert!(leftover_artifacts(&temp).is_empty());
}
