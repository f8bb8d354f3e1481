// src/engine/mod.rs

//! Run lifecycle engine.
//!
//! - [`core`] holds the pure `RunLifecycle` state machine: no channels, no
//!   Tokio, no filesystem. It decides transitions and the message that goes
//!   with each one.
//! - [`runtime`] is the async IO shell around it. It owns the run artifacts,
//!   the completion watcher, the host launcher and the signaller, and it is
//!   the only task that ever mutates run state.
//! - [`messages`] holds the user-facing status lines.

use std::path::PathBuf;

use crate::artifacts::RunId;
use crate::types::CleanupMode;

pub mod core;
pub mod messages;
pub mod runtime;

pub use self::core::{resolve_outcome, RunLifecycle};
pub use messages::{StatusKind, StatusLine};
pub use runtime::{Runtime, RuntimeHandle};

/// Where a run currently stands. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Idle,
    Running,
    Success,
    Failure,
    Cancelled,
}

impl RunState {
    pub fn is_running(self) -> bool {
        self == RunState::Running
    }

    /// Success, Failure or Cancelled. Settled runs can be started again.
    pub fn is_settled(self) -> bool {
        matches!(
            self,
            RunState::Success | RunState::Failure | RunState::Cancelled
        )
    }

    pub fn label(self) -> &'static str {
        match self {
            RunState::Idle => "idle",
            RunState::Running => "running",
            RunState::Success => "success",
            RunState::Failure => "failure",
            RunState::Cancelled => "cancelled",
        }
    }
}

/// Why a run ended in [`RunState::Failure`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureCause {
    /// The script exited non-zero (or reported garbage, see
    /// [`UNKNOWN_EXIT_CODE`](crate::watch::UNKNOWN_EXIT_CODE)).
    ExitCode(i32),
    /// The target script does not exist.
    ScriptMissing(PathBuf),
    /// The host refused or could not be reached.
    LaunchFailed { host: String },
    /// No exit code arrived before the configured timeout.
    TimedOut,
}

/// How a run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    Success,
    Failure(FailureCause),
    Cancelled,
}

impl RunOutcome {
    pub fn state(&self) -> RunState {
        match self {
            RunOutcome::Success => RunState::Success,
            RunOutcome::Failure(_) => RunState::Failure,
            RunOutcome::Cancelled => RunState::Cancelled,
        }
    }

    /// The script's exit code, when the outcome carries one.
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            RunOutcome::Success => Some(0),
            RunOutcome::Failure(FailureCause::ExitCode(code)) => Some(*code),
            _ => None,
        }
    }
}

/// Runtime options used by the async shell.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuntimeOptions {
    /// Stop the event loop as soon as a run settles (one-shot CLI mode).
    pub exit_when_settled: bool,
}

/// Events flowing into the runtime from the presentation layer and the
/// completion watcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuntimeEvent {
    /// Begin a run with the current mode.
    StartRequested,
    /// Ask the running script to stop.
    CancelRequested,
    /// Cancel when running, otherwise close (Ctrl-C, close button).
    InterruptRequested,
    /// Change the cleanup mode. Ignored while running.
    ModeSelected(CleanupMode),
    /// The status file of `run_id` held `exit_code`.
    StatusResolved { run_id: RunId, exit_code: i32 },
    /// `run_id` hit its timeout before reporting.
    WatchTimedOut { run_id: RunId },
    /// Tear down and stop the event loop.
    ShutdownRequested,
}

/// Published after every transition, for the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunUpdate {
    pub state: RunState,
    pub mode: CleanupMode,
    pub status: StatusLine,
}
