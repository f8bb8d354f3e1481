// src/exec/terminal.rs

//! Terminal-app host driven through `osascript`.
//!
//! Two quoting layers are in play: the command line is already shell
//! quoted by the composer, and here it is escaped again as an AppleScript
//! string literal.

use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;
use std::process::Stdio;

use tokio::process::Command;
use tracing::{debug, error, info};

use crate::errors::{CleanrunError, Result};

use super::backend::HostLauncher;

pub const DEFAULT_OSASCRIPT: &str = "/usr/bin/osascript";
pub const DEFAULT_TERMINAL_APP: &str = "Terminal";

/// Escape `value` for use inside an AppleScript double-quoted string.
pub fn escape_for_applescript(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

/// The `osascript` argument list that activates `app` and submits
/// `command_line` to it in a new session.
pub fn applescript_args(app: &str, command_line: &str) -> Vec<String> {
    let app = escape_for_applescript(app);
    vec![
        "-e".to_string(),
        format!("tell application \"{app}\" to activate"),
        "-e".to_string(),
        format!(
            "tell application \"{app}\" to do script \"{}\"",
            escape_for_applescript(command_line)
        ),
    ]
}

#[derive(Debug, Clone)]
pub struct TerminalLauncher {
    osascript: PathBuf,
    app: String,
}

impl TerminalLauncher {
    pub fn new(osascript: impl Into<PathBuf>, app: impl Into<String>) -> Self {
        Self {
            osascript: osascript.into(),
            app: app.into(),
        }
    }
}

impl Default for TerminalLauncher {
    fn default() -> Self {
        Self::new(DEFAULT_OSASCRIPT, DEFAULT_TERMINAL_APP)
    }
}

impl HostLauncher for TerminalLauncher {
    fn launch(
        &mut self,
        command_line: &str,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>> {
        let args = applescript_args(&self.app, command_line);

        Box::pin(async move {
            debug!(app = %self.app, osascript = ?self.osascript, "submitting command to terminal");

            let output = Command::new(&self.osascript)
                .args(&args)
                .stdin(Stdio::null())
                .output()
                .await
                .map_err(|e| {
                    CleanrunError::LaunchError(format!(
                        "could not run {:?}: {e}",
                        self.osascript
                    ))
                })?;

            if output.status.success() {
                info!(app = %self.app, "terminal accepted command");
                Ok(())
            } else {
                let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
                error!(
                    app = %self.app,
                    status = ?output.status,
                    stderr = %stderr,
                    "terminal rejected command"
                );
                Err(CleanrunError::LaunchError(format!(
                    "{} did not accept the command: {stderr}",
                    self.app
                )))
            }
        })
    }

    fn host_name(&self) -> &str {
        &self.app
    }
}
