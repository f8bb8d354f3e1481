// src/exec/direct.rs

//! Host that runs the composed command as a direct `sh -c` child.
//!
//! The child becomes the leader of a new process group, so the pid it
//! records is also a valid group id for cancellation. The launcher does not
//! wait for the command; a background task only reaps the child.

use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;
use std::process::Stdio;

use tokio::process::Command;
use tracing::{debug, info, warn};

use crate::errors::{CleanrunError, Result};

use super::backend::HostLauncher;

#[derive(Debug, Clone)]
pub struct DirectLauncher {
    shell: PathBuf,
    show_output: bool,
}

impl DirectLauncher {
    pub fn new() -> Self {
        Self {
            shell: PathBuf::from("/bin/sh"),
            show_output: true,
        }
    }

    /// Discard the command's stdout/stderr instead of inheriting them.
    pub fn quiet(mut self) -> Self {
        self.show_output = false;
        self
    }

    fn output(&self) -> Stdio {
        if self.show_output {
            Stdio::inherit()
        } else {
            Stdio::null()
        }
    }
}

impl Default for DirectLauncher {
    fn default() -> Self {
        Self::new()
    }
}

impl HostLauncher for DirectLauncher {
    fn launch(
        &mut self,
        command_line: &str,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>> {
        let mut cmd = Command::new(&self.shell);
        cmd.arg("-c")
            .arg(command_line)
            .stdin(Stdio::null())
            .stdout(self.output())
            .stderr(self.output());

        #[cfg(unix)]
        cmd.process_group(0);

        Box::pin(async move {
            let mut child = cmd.spawn().map_err(|e| {
                CleanrunError::LaunchError(format!("could not spawn {:?}: {e}", self.shell))
            })?;

            let pid = child.id();
            info!(?pid, shell = ?self.shell, "spawned command in its own process group");

            tokio::spawn(async move {
                match child.wait().await {
                    Ok(status) => debug!(?pid, ?status, "host shell exited"),
                    Err(e) => warn!(?pid, error = %e, "failed to wait for host shell"),
                }
            });

            Ok(())
        })
    }

    fn host_name(&self) -> &str {
        "shell"
    }
}
