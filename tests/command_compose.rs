// tests/command_compose.rs

use std::path::Path;
use std::process::Command;

use cleanrun::exec::{shell_quote, CommandComposer};
use cleanrun::types::CleanupMode;

fn composer() -> CommandComposer {
    CommandComposer::new("cleanrun", "~/cleanup.log")
}

fn build(script: &str, mode: CleanupMode) -> String {
    composer().build(
        Path::new(script),
        Path::new("/tmp/cleanrun_status_abc.txt"),
        Path::new("/tmp/cleanrun_pid_abc.txt"),
        mode,
    )
}

#[test]
fn shell_quote_wraps_plain_values() {
    assert_eq!(shell_quote("abc"), "'abc'");
    assert_eq!(shell_quote(""), "''");
    assert_eq!(shell_quote("a b"), "'a b'");
    assert_eq!(shell_quote("$HOME; rm -rf /"), "'$HOME; rm -rf /'");
}

#[test]
fn shell_quote_closes_escapes_and_reopens_single_quotes() {
    assert_eq!(shell_quote("it's"), "'it'\\''s'");
    assert_eq!(shell_quote("'"), "''\\'''");
}

#[test]
fn pid_is_recorded_before_the_script_runs() {
    let cmd = build("/opt/cleanup.sh", CleanupMode::Standard);

    let pid_at = cmd.find("echo $$ > '/tmp/cleanrun_pid_abc.txt'").unwrap();
    let chmod_at = cmd.find("chmod +x '/opt/cleanup.sh'").unwrap();
    let script_at = cmd.find("/usr/bin/env bash '/opt/cleanup.sh'").unwrap();
    let status_at = cmd
        .find("echo \"$EXIT_CODE\" > '/tmp/cleanrun_status_abc.txt'")
        .unwrap();

    assert!(pid_at < chmod_at);
    assert!(chmod_at < script_at);
    assert!(script_at < status_at);
}

#[test]
fn exit_code_is_captured_right_after_the_script() {
    let cmd = build("/opt/cleanup.sh", CleanupMode::Standard);
    assert!(cmd.contains("/usr/bin/env bash '/opt/cleanup.sh'; EXIT_CODE=$?;"));
}

#[test]
fn standard_mode_passes_no_extra_argument() {
    let cmd = build("/opt/cleanup.sh", CleanupMode::Standard);
    assert!(!cmd.contains("--deep-clean"));
}

#[test]
fn deep_mode_appends_exactly_one_flag() {
    let cmd = build("/opt/cleanup.sh", CleanupMode::Deep);
    assert!(cmd.contains("/usr/bin/env bash '/opt/cleanup.sh' --deep-clean;"));
    assert_eq!(cmd.matches("--deep-clean").count(), 1);
}

#[test]
fn progress_text_names_mode_and_log_location() {
    let cmd = build("/opt/cleanup.sh", CleanupMode::Deep);
    assert!(cmd.contains("echo 'Mode: Deep Clean'"));
    assert!(cmd.contains("echo 'Log file: ~/cleanup.log'"));
    assert!(cmd.contains("echo \"Exit code: $EXIT_CODE\""));
}

#[cfg(unix)]
#[test]
fn command_with_quote_and_space_in_path_is_valid_shell() {
    let cmd = build("/tmp/it's a dir/clean up.sh", CleanupMode::Deep);

    // `sh -n` parses without executing.
    let status = Command::new("sh").arg("-n").arg("-c").arg(&cmd).status().unwrap();
    assert!(status.success(), "composed command failed to parse: {cmd}");
}

#[cfg(unix)]
#[test]
fn quoted_value_round_trips_through_sh() {
    let value = "it's a \"path\" with $dollar `ticks` and\nnewline";
    let output = Command::new("sh")
        .arg("-c")
        .arg(format!("printf '%s' {}", shell_quote(value)))
        .output()
        .unwrap();

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), value);
}
