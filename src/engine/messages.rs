// src/engine/messages.rs

use std::fmt;
use std::path::Path;

use crate::engine::{FailureCause, RunOutcome};
use crate::types::CleanupMode;
use crate::watch::UNKNOWN_EXIT_CODE;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Success,
    Error,
}

/// One short human-readable line describing the latest transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub text: String,
    pub kind: StatusKind,
}

impl StatusLine {
    fn new(text: impl Into<String>, kind: StatusKind) -> Self {
        Self {
            text: text.into(),
            kind,
        }
    }

    pub fn mode_selected(mode: CleanupMode) -> Self {
        Self::new(
            format!("{} selected. {}.", mode.title(), mode.subtitle()),
            StatusKind::Info,
        )
    }

    pub fn launching(mode: CleanupMode, host: &str) -> Self {
        Self::new(
            format!("Launching {} in {host}...", mode.title()),
            StatusKind::Info,
        )
    }

    pub fn cancel_requested(host: &str) -> Self {
        Self::new(
            format!("Cancel requested. Stopping cleanup in {host}..."),
            StatusKind::Error,
        )
    }

    pub fn for_outcome(outcome: &RunOutcome, log_hint: &str) -> Self {
        match outcome {
            RunOutcome::Success => Self::new(
                format!("Cleanup completed successfully. Check {log_hint} for details."),
                StatusKind::Success,
            ),
            RunOutcome::Cancelled => Self::new(
                "Cleanup cancelled. You can run it again any time.",
                StatusKind::Error,
            ),
            RunOutcome::Failure(cause) => {
                Self::new(failure_text(cause, log_hint), StatusKind::Error)
            }
        }
    }
}

fn failure_text(cause: &FailureCause, log_hint: &str) -> String {
    match cause {
        FailureCause::ExitCode(UNKNOWN_EXIT_CODE) => {
            format!("Cleanup failed (exit code unknown). See {log_hint}.")
        }
        FailureCause::ExitCode(code) => {
            format!("Cleanup failed (exit code {code}). See {log_hint}.")
        }
        FailureCause::ScriptMissing(path) => missing_script_text(path),
        FailureCause::LaunchFailed { host } => format!("Could not open {host} to run cleanup."),
        FailureCause::TimedOut => {
            format!("Cleanup timed out before reporting an exit code. See {log_hint}.")
        }
    }
}

fn missing_script_text(path: &Path) -> String {
    format!("Could not find the cleanup script at {}.", path.display())
}

impl fmt::Display for StatusLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
