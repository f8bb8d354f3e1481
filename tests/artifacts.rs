// tests/artifacts.rs

use std::collections::HashSet;
use std::path::Path;

use cleanrun::artifacts::RunArtifacts;
use cleanrun::fs::mock::MockFileSystem;
use cleanrun::fs::{FileSystem, RealFileSystem};

#[test]
fn artifacts_live_under_temp_root_and_share_the_run_id() {
    let fs = MockFileSystem::new();
    let root = Path::new("/mock/tmp");

    let artifacts = RunArtifacts::create(&fs, root);
    let id = artifacts.run_id().to_string();

    assert_eq!(artifacts.status_path().parent(), Some(root));
    assert_eq!(artifacts.pid_path().parent(), Some(root));
    assert!(artifacts.status_path().to_string_lossy().contains(&id));
    assert!(artifacts.pid_path().to_string_lossy().contains(&id));
    assert_ne!(artifacts.status_path(), artifacts.pid_path());
}

#[test]
fn create_does_not_write_anything() {
    let fs = MockFileSystem::new();
    let artifacts = RunArtifacts::create(&fs, Path::new("/mock/tmp"));

    assert!(!fs.exists(artifacts.status_path()));
    assert!(!fs.exists(artifacts.pid_path()));
    assert!(fs.paths().is_empty());
}

#[test]
fn sequential_creates_never_collide() {
    let fs = MockFileSystem::new();
    let root = Path::new("/mock/tmp");

    let mut seen = HashSet::new();
    for _ in 0..200 {
        let artifacts = RunArtifacts::create(&fs, root);
        assert!(seen.insert(artifacts.status_path().to_path_buf()));
        assert!(seen.insert(artifacts.pid_path().to_path_buf()));
    }
}

#[test]
fn dispose_removes_both_files_and_is_idempotent() {
    let fs = MockFileSystem::new();
    let artifacts = RunArtifacts::create(&fs, Path::new("/mock/tmp"));
    fs.add_file(artifacts.status_path(), "0\n");
    fs.add_file(artifacts.pid_path(), "4242\n");

    artifacts.dispose(&fs);
    assert!(!fs.exists(artifacts.status_path()));
    assert!(!fs.exists(artifacts.pid_path()));

    // Nothing left to delete the second time.
    artifacts.dispose(&fs);
}

#[test]
fn dispose_swallows_removal_errors() {
    let fs = MockFileSystem::new();
    let artifacts = RunArtifacts::create(&fs, Path::new("/mock/tmp"));
    fs.add_file(artifacts.status_path(), "0\n");
    fs.add_file(artifacts.pid_path(), "4242\n");
    fs.fail_removal_of(artifacts.status_path());

    artifacts.dispose(&fs);

    // The failing file stays, the other one is still cleaned up.
    assert!(fs.exists(artifacts.status_path()));
    assert!(!fs.exists(artifacts.pid_path()));
}

#[test]
fn dispose_on_real_filesystem_tolerates_missing_files() {
    let dir = tempfile::tempdir().unwrap();
    let fs = RealFileSystem;
    let artifacts = RunArtifacts::create(&fs, dir.path());

    fs.write(artifacts.pid_path(), b"4242\n").unwrap();
    artifacts.dispose(&fs);

    assert!(!artifacts.pid_path().exists());
    assert!(!artifacts.status_path().exists());
}
