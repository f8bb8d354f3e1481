// src/exec/compose.rs

//! Shell command composition.
//!
//! The host runs one command string. That string has to record the shell's
//! pid, run the script in the chosen mode, and leave the script's exit code
//! in the status file, which is the only thing the watcher looks at.

use std::path::Path;

use crate::types::CleanupMode;

/// Quote `value` for a POSIX shell.
///
/// Wraps in single quotes; an embedded `'` becomes `'\''` (close, escaped
/// quote, reopen). Nothing inside single quotes is special to the shell.
pub fn shell_quote(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('\'');
    for ch in value.chars() {
        if ch == '\'' {
            quoted.push_str("'\\''");
        } else {
            quoted.push(ch);
        }
    }
    quoted.push('\'');
    quoted
}

fn quote_path(path: &Path) -> String {
    shell_quote(&path.to_string_lossy())
}

/// Builds the command line handed to the host process.
#[derive(Debug, Clone)]
pub struct CommandComposer {
    banner: String,
    log_hint: String,
}

impl CommandComposer {
    pub fn new(banner: impl Into<String>, log_hint: impl Into<String>) -> Self {
        Self {
            banner: banner.into(),
            log_hint: log_hint.into(),
        }
    }

    /// Compose the full command for one run.
    ///
    /// Order matters. The `TERM` trap comes first: it keeps the outer shell
    /// alive long enough to record the exit code of a script that was
    /// signalled, so it must be in place before the pid becomes visible.
    /// The pid goes to disk next, before any real work, and the status
    /// write is the last thing that touches the artifacts.
    pub fn build(
        &self,
        script: &Path,
        status_path: &Path,
        pid_path: &Path,
        mode: CleanupMode,
    ) -> String {
        let script = quote_path(script);
        let mode_arg = match mode.script_flag() {
            Some(flag) => format!(" {flag}"),
            None => String::new(),
        };

        let steps = [
            "trap ':' TERM".to_string(),
            format!("echo $$ > {}", quote_path(pid_path)),
            "clear 2>/dev/null".to_string(),
            format!("echo {}", shell_quote(&self.banner)),
            format!("echo {}", shell_quote(&format!("Mode: {}", mode.title()))),
            "echo".to_string(),
            format!("chmod +x {script}"),
            format!("/usr/bin/env bash {script}{mode_arg}"),
            "EXIT_CODE=$?".to_string(),
            format!("echo \"$EXIT_CODE\" > {}", quote_path(status_path)),
            "echo".to_string(),
            "echo \"Exit code: $EXIT_CODE\"".to_string(),
            format!("echo {}", shell_quote(&format!("Log file: {}", self.log_hint))),
        ];

        let mut command = steps.join("; ");
        command.push(';');
        command
    }
}
