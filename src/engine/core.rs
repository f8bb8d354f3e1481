// src/engine/core.rs

//! Pure run lifecycle state machine.
//!
//! `RunLifecycle` owns the run state, the selected mode and the cancellation
//! flag. It performs no IO: the async shell (`engine::runtime::Runtime`)
//! does the launching, signalling and polling, and reports what happened
//! through the transition methods here. Each accepted transition returns the
//! [`RunUpdate`] to publish; a rejected one returns `None` and changes
//! nothing.
//!
//! ```text
//! Idle ──start──▶ Running ──resolve──▶ Success | Failure | Cancelled
//!                    │                          │
//!                    └──launch fails──▶ Failure  └──start──▶ Running
//! ```

use tracing::{debug, info, warn};

use crate::artifacts::RunId;
use crate::engine::messages::StatusLine;
use crate::engine::{FailureCause, RunOutcome, RunState, RunUpdate};
use crate::types::CleanupMode;

/// Map an observed exit code to an outcome.
///
/// A cancellation request wins over whatever the script reported, even a
/// clean `0`: the script may have finished just before the signal landed,
/// but the user asked for it to stop.
pub fn resolve_outcome(exit_code: i32, cancel_requested: bool) -> RunOutcome {
    if cancel_requested {
        RunOutcome::Cancelled
    } else if exit_code == 0 {
        RunOutcome::Success
    } else {
        RunOutcome::Failure(FailureCause::ExitCode(exit_code))
    }
}

#[derive(Debug, Clone)]
pub struct RunLifecycle {
    state: RunState,
    mode: CleanupMode,
    cancel_requested: bool,
    active_run: Option<RunId>,
    host: String,
    log_hint: String,
    last_outcome: Option<RunOutcome>,
    status: Option<StatusLine>,
}

impl RunLifecycle {
    pub fn new(mode: CleanupMode, log_hint: impl Into<String>) -> Self {
        Self {
            state: RunState::Idle,
            mode,
            cancel_requested: false,
            active_run: None,
            host: String::new(),
            log_hint: log_hint.into(),
            last_outcome: None,
            status: None,
        }
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn mode(&self) -> CleanupMode {
        self.mode
    }

    pub fn cancel_requested(&self) -> bool {
        self.cancel_requested
    }

    /// Run currently being watched, if any.
    pub fn active_run(&self) -> Option<RunId> {
        self.active_run
    }

    pub fn last_outcome(&self) -> Option<&RunOutcome> {
        self.last_outcome.as_ref()
    }

    /// Latest status line, `None` before anything happened.
    pub fn status(&self) -> Option<&StatusLine> {
        self.status.as_ref()
    }

    /// Change the cleanup mode. Rejected while a run is in progress.
    pub fn select_mode(&mut self, mode: CleanupMode) -> Option<RunUpdate> {
        if self.state.is_running() {
            warn!(
                requested = %mode,
                current = %self.mode,
                "mode cannot change while a run is in progress"
            );
            return None;
        }
        self.mode = mode;
        debug!(%mode, "cleanup mode selected");
        Some(self.publish(StatusLine::mode_selected(mode)))
    }

    /// Enter `Running` for a freshly created run.
    ///
    /// Returns `None` (and changes nothing) if a run is already active.
    pub fn begin_run(&mut self, run_id: RunId, host: &str) -> Option<RunUpdate> {
        if self.state.is_running() {
            debug!(active = ?self.active_run, "start ignored: a run is already in progress");
            return None;
        }

        self.state = RunState::Running;
        self.cancel_requested = false;
        self.active_run = Some(run_id);
        self.host = host.to_string();
        info!(%run_id, mode = %self.mode, host, "run started");
        Some(self.publish(StatusLine::launching(self.mode, host)))
    }

    /// The start attempt failed before a watcher was started: the script is
    /// missing or the host did not accept the command.
    pub fn fail_start(&mut self, cause: FailureCause) -> RunUpdate {
        warn!(?cause, "run could not be launched");
        self.settle(RunOutcome::Failure(cause))
    }

    /// Record a cancellation request. The state stays `Running` until the
    /// watcher reports; `None` if there is nothing to cancel.
    pub fn request_cancel(&mut self) -> Option<RunUpdate> {
        if !self.state.is_running() {
            debug!(state = self.state.label(), "cancel ignored: no run in progress");
            return None;
        }
        self.cancel_requested = true;
        info!(run_id = ?self.active_run, "cancellation requested");
        Some(self.publish(StatusLine::cancel_requested(&self.host)))
    }

    /// The watcher for `run_id` read `exit_code` from the status file.
    ///
    /// Reports for anything but the active run are ignored.
    pub fn resolve(&mut self, run_id: RunId, exit_code: i32) -> Option<RunUpdate> {
        if !self.is_active(run_id) {
            debug!(%run_id, exit_code, "ignoring completion for a run that is not active");
            return None;
        }
        let outcome = resolve_outcome(exit_code, self.cancel_requested);
        Some(self.settle(outcome))
    }

    /// The watcher for `run_id` gave up waiting.
    pub fn time_out(&mut self, run_id: RunId) -> Option<RunUpdate> {
        if !self.is_active(run_id) {
            debug!(%run_id, "ignoring timeout for a run that is not active");
            return None;
        }
        let outcome = if self.cancel_requested {
            RunOutcome::Cancelled
        } else {
            RunOutcome::Failure(FailureCause::TimedOut)
        };
        Some(self.settle(outcome))
    }

    fn is_active(&self, run_id: RunId) -> bool {
        self.state.is_running() && self.active_run == Some(run_id)
    }

    fn settle(&mut self, outcome: RunOutcome) -> RunUpdate {
        let status = StatusLine::for_outcome(&outcome, &self.log_hint);
        self.state = outcome.state();
        self.active_run = None;
        info!(
            state = self.state.label(),
            exit_code = ?outcome.exit_code(),
            cancel_requested = self.cancel_requested,
            "run settled"
        );
        self.last_outcome = Some(outcome);
        self.publish(status)
    }

    fn publish(&mut self, status: StatusLine) -> RunUpdate {
        self.status = Some(status.clone());
        RunUpdate {
            state: self.state,
            mode: self.mode,
            status,
        }
    }
}
