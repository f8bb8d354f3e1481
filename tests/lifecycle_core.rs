// tests/lifecycle_core.rs

use std::path::PathBuf;

use uuid::Uuid;

use cleanrun::engine::{
    resolve_outcome, FailureCause, RunLifecycle, RunOutcome, RunState, StatusKind,
};
use cleanrun::types::CleanupMode;

fn lifecycle() -> RunLifecycle {
    RunLifecycle::new(CleanupMode::Standard, "~/cleanup.log")
}

fn running() -> (RunLifecycle, Uuid) {
    let mut lc = lifecycle();
    let id = Uuid::new_v4();
    lc.begin_run(id, "Terminal").unwrap();
    (lc, id)
}

#[test]
fn outcome_table_without_cancel() {
    assert_eq!(resolve_outcome(0, false), RunOutcome::Success);
    assert_eq!(
        resolve_outcome(1, false),
        RunOutcome::Failure(FailureCause::ExitCode(1))
    );
    assert_eq!(
        resolve_outcome(-1, false),
        RunOutcome::Failure(FailureCause::ExitCode(-1))
    );
}

#[test]
fn cancel_request_wins_over_any_exit_code_including_zero() {
    for code in [0, 1, 2, 143, -1] {
        assert_eq!(resolve_outcome(code, true), RunOutcome::Cancelled, "code {code}");
    }
}

#[test]
fn starts_idle_with_no_status() {
    let lc = lifecycle();
    assert_eq!(lc.state(), RunState::Idle);
    assert!(lc.status().is_none());
    assert!(lc.active_run().is_none());
}

#[test]
fn begin_run_enters_running_and_names_the_host() {
    let mut lc = lifecycle();
    let id = Uuid::new_v4();

    let update = lc.begin_run(id, "Terminal").unwrap();

    assert_eq!(update.state, RunState::Running);
    assert_eq!(update.status.text, "Launching Standard Clean in Terminal...");
    assert_eq!(lc.active_run(), Some(id));
    assert!(!lc.cancel_requested());
}

#[test]
fn second_begin_while_running_is_rejected() {
    let (mut lc, id) = running();

    assert!(lc.begin_run(Uuid::new_v4(), "Terminal").is_none());
    assert_eq!(lc.active_run(), Some(id));
}

#[test]
fn success_resolution() {
    let (mut lc, id) = running();

    let update = lc.resolve(id, 0).unwrap();

    assert_eq!(update.state, RunState::Success);
    assert_eq!(update.status.kind, StatusKind::Success);
    assert_eq!(
        update.status.text,
        "Cleanup completed successfully. Check ~/cleanup.log for details."
    );
    assert!(lc.active_run().is_none());
}

#[test]
fn failure_resolution_reports_exit_code() {
    let (mut lc, id) = running();

    let update = lc.resolve(id, 2).unwrap();

    assert_eq!(update.state, RunState::Failure);
    assert_eq!(update.status.text, "Cleanup failed (exit code 2). See ~/cleanup.log.");
    assert_eq!(lc.last_outcome().and_then(|o| o.exit_code()), Some(2));
}

#[test]
fn unknown_exit_code_is_a_failure_with_unknown_text() {
    let (mut lc, id) = running();

    let update = lc.resolve(id, -1).unwrap();

    assert_eq!(update.state, RunState::Failure);
    assert!(update.status.text.contains("exit code unknown"));
}

#[test]
fn cancel_keeps_running_until_resolved() {
    let (mut lc, id) = running();

    let update = lc.request_cancel().unwrap();
    assert_eq!(update.state, RunState::Running);
    assert_eq!(update.status.text, "Cancel requested. Stopping cleanup in Terminal...");
    assert!(lc.cancel_requested());

    let update = lc.resolve(id, 143).unwrap();
    assert_eq!(update.state, RunState::Cancelled);
}

#[test]
fn cancel_then_clean_exit_still_settles_cancelled() {
    let (mut lc, id) = running();
    lc.request_cancel().unwrap();

    assert_eq!(lc.resolve(id, 0).unwrap().state, RunState::Cancelled);
}

#[test]
fn cancel_when_not_running_is_ignored() {
    let mut lc = lifecycle();
    assert!(lc.request_cancel().is_none());
    assert!(!lc.cancel_requested());
}

#[test]
fn cancel_flag_resets_for_the_next_run() {
    let (mut lc, id) = running();
    lc.request_cancel().unwrap();
    lc.resolve(id, 143).unwrap();

    let next = Uuid::new_v4();
    lc.begin_run(next, "Terminal").unwrap();
    assert!(!lc.cancel_requested());
    assert_eq!(lc.resolve(next, 0).unwrap().state, RunState::Success);
}

#[test]
fn reports_for_other_runs_are_ignored() {
    let (mut lc, id) = running();

    assert!(lc.resolve(Uuid::new_v4(), 0).is_none());
    assert!(lc.time_out(Uuid::new_v4()).is_none());
    assert_eq!(lc.state(), RunState::Running);

    lc.resolve(id, 0).unwrap();
    // A late duplicate for the settled run changes nothing.
    assert!(lc.resolve(id, 1).is_none());
    assert_eq!(lc.state(), RunState::Success);
}

#[test]
fn mode_is_locked_while_running() {
    let (mut lc, id) = running();

    assert!(lc.select_mode(CleanupMode::Deep).is_none());
    assert_eq!(lc.mode(), CleanupMode::Standard);

    lc.resolve(id, 0).unwrap();
    let update = lc.select_mode(CleanupMode::Deep).unwrap();
    assert_eq!(update.mode, CleanupMode::Deep);
    assert_eq!(update.state, RunState::Success);
    assert_eq!(lc.mode(), CleanupMode::Deep);
}

#[test]
fn mode_selection_describes_the_mode() {
    let mut lc = lifecycle();
    let update = lc.select_mode(CleanupMode::Deep).unwrap();
    assert!(update.status.text.starts_with("Deep Clean selected."));
    assert_eq!(update.status.kind, StatusKind::Info);
}

#[test]
fn launch_failure_settles_as_failure() {
    let (mut lc, _) = running();

    let update = lc.fail_start(FailureCause::LaunchFailed {
        host: "Terminal".to_string(),
    });

    assert_eq!(update.state, RunState::Failure);
    assert_eq!(update.status.text, "Could not open Terminal to run cleanup.");
    assert!(lc.active_run().is_none());
}

#[test]
fn missing_script_names_the_path() {
    let mut lc = lifecycle();

    let update = lc.fail_start(FailureCause::ScriptMissing(PathBuf::from("/opt/cleanup.sh")));

    assert_eq!(update.state, RunState::Failure);
    assert!(update.status.text.contains("/opt/cleanup.sh"));
}

#[test]
fn timeout_is_failure_unless_cancel_was_requested() {
    let (mut lc, id) = running();
    let update = lc.time_out(id).unwrap();
    assert_eq!(update.state, RunState::Failure);
    assert_eq!(lc.last_outcome(), Some(&RunOutcome::Failure(FailureCause::TimedOut)));

    let (mut lc, id) = running();
    lc.request_cancel().unwrap();
    assert_eq!(lc.time_out(id).unwrap().state, RunState::Cancelled);
}

#[test]
fn settled_states_can_start_again() {
    for code in [0, 1] {
        let (mut lc, id) = running();
        lc.resolve(id, code).unwrap();
        assert!(lc.state().is_settled());
        assert!(lc.begin_run(Uuid::new_v4(), "Terminal").is_some());
    }
}
