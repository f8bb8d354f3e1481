// src/artifacts.rs

//! Per-run status / pid files.
//!
//! Each run gets two files in a shared temp root, both named after a random
//! v4 UUID so that runs from this process or from a previous one never
//! share a path. The spawned shell is the only writer; the coordinator only
//! reads them and deletes them when the run settles.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use uuid::Uuid;

use crate::fs::FileSystem;

/// Identifier shared by a run's artifacts, its watcher and its events.
pub type RunId = Uuid;

const STATUS_PREFIX: &str = "cleanrun_status_";
const PID_PREFIX: &str = "cleanrun_pid_";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunArtifacts {
    run_id: RunId,
    status_path: PathBuf,
    pid_path: PathBuf,
}

impl RunArtifacts {
    /// Pick fresh artifact paths under `temp_root`.
    ///
    /// Nothing is written; the returned paths do not exist yet.
    pub fn create(fs: &dyn FileSystem, temp_root: &Path) -> Self {
        loop {
            let run_id = Uuid::new_v4();
            let artifacts = Self::for_run(temp_root, run_id);
            if !fs.exists(&artifacts.status_path) && !fs.exists(&artifacts.pid_path) {
                debug!(
                    %run_id,
                    status = ?artifacts.status_path,
                    pid = ?artifacts.pid_path,
                    "created run artifacts"
                );
                return artifacts;
            }
            debug!(%run_id, "artifact path already taken; drawing a new run id");
        }
    }

    fn for_run(temp_root: &Path, run_id: RunId) -> Self {
        Self {
            run_id,
            status_path: temp_root.join(format!("{STATUS_PREFIX}{run_id}.txt")),
            pid_path: temp_root.join(format!("{PID_PREFIX}{run_id}.txt")),
        }
    }

    pub fn run_id(&self) -> RunId {
        self.run_id
    }

    pub fn status_path(&self) -> &Path {
        &self.status_path
    }

    pub fn pid_path(&self) -> &Path {
        &self.pid_path
    }

    /// Delete both files if present. Failures are logged and ignored.
    pub fn dispose(&self, fs: &dyn FileSystem) {
        for path in [&self.status_path, &self.pid_path] {
            if let Err(e) = fs.remove_file(path) {
                warn!(
                    run_id = %self.run_id,
                    path = ?path,
                    error = %e,
                    "failed to remove run artifact"
                );
            }
        }
        debug!(run_id = %self.run_id, "disposed run artifacts");
    }
}
