// src/exec/cancel.rs

//! Best-effort cancellation of a running script.
//!
//! The coordinator is not the parent of the shell doing the work, so the
//! only handle it has is the pid the shell wrote into the pid file. That
//! pid is signalled twice: once as a process group (reaching the script
//! and anything it spawned) and once directly, in case the shell does not
//! lead its own group. Delivery failures are logged and dropped; the run
//! still settles through the status file.

use std::io;
use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::fs::FileSystem;

/// Sends a termination signal to a pid (positive) or process group
/// (negative).
pub trait Signaller: Send + Sync {
    fn terminate(&self, target: i32) -> io::Result<()>;
}

impl<S: Signaller + ?Sized> Signaller for Arc<S> {
    fn terminate(&self, target: i32) -> io::Result<()> {
        (**self).terminate(target)
    }
}

/// `SIGTERM` via `kill(2)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TermSignaller;

impl Signaller for TermSignaller {
    #[cfg(unix)]
    fn terminate(&self, target: i32) -> io::Result<()> {
        // Safety: kill() takes plain integers and touches no memory of ours.
        let rc = unsafe { libc::kill(target, libc::SIGTERM) };
        if rc == 0 {
            Ok(())
        } else {
            Err(io::Error::last_os_error())
        }
    }

    #[cfg(not(unix))]
    fn terminate(&self, _target: i32) -> io::Result<()> {
        Err(io::Error::new(
            io::ErrorKind::Unsupported,
            "process signals are only available on unix",
        ))
    }
}

/// Read the shell pid recorded for a run.
///
/// Returns `None` when the file is missing, unparsable, or holds a pid of
/// 0 or 1: signalling those would hit our own group or init.
pub fn read_shell_pid(fs: &dyn FileSystem, pid_path: &Path) -> Option<i32> {
    let raw = fs.read_to_string(pid_path).ok()?;
    match raw.trim().parse::<i32>() {
        Ok(pid) if pid > 1 => Some(pid),
        Ok(pid) => {
            debug!(pid, "recorded pid is not a valid signal target");
            None
        }
        Err(e) => {
            debug!(raw = %raw.trim(), error = %e, "recorded pid is not a number");
            None
        }
    }
}

#[derive(Debug, Clone)]
pub struct CancellationController<S> {
    signaller: S,
}

impl<S: Signaller> CancellationController<S> {
    pub fn new(signaller: S) -> Self {
        Self { signaller }
    }

    /// Signal the shell recorded in `pid_path`, if there is a usable one.
    ///
    /// Returns the pid that was targeted, or `None` when nothing was sent.
    pub fn signal(&self, fs: &dyn FileSystem, pid_path: &Path) -> Option<i32> {
        let Some(pid) = read_shell_pid(fs, pid_path) else {
            info!(
                pid_file = ?pid_path,
                "no shell pid recorded yet; waiting for the script to report"
            );
            return None;
        };

        for target in [-pid, pid] {
            match self.signaller.terminate(target) {
                Ok(()) => debug!(target, "sent SIGTERM"),
                Err(e) => warn!(target, error = %e, "failed to deliver SIGTERM"),
            }
        }

        info!(pid, "termination requested for cleanup shell");
        Some(pid)
    }
}
