// src/exec/backend.rs

//! Pluggable host abstraction.
//!
//! The runtime hands the composed command line to a `HostLauncher` and only
//! learns whether the *submission* worked. The script itself keeps running
//! in the host afterwards; its outcome arrives through the status file.
//!
//! - [`TerminalLauncher`](super::TerminalLauncher) submits to a terminal app.
//! - [`DirectLauncher`](super::DirectLauncher) spawns a shell child.
//! - Tests provide launchers that only record the command.

use std::future::Future;
use std::pin::Pin;

use crate::errors::Result;

/// Trait abstracting how a composed command gets executed.
pub trait HostLauncher: Send {
    /// Submit `command_line` to the host.
    ///
    /// Resolves once the host accepted (or rejected) the command. `Ok(())`
    /// means the command is now running asynchronously in the host.
    fn launch(
        &mut self,
        command_line: &str,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>>;

    /// Short human-readable name used in status messages.
    fn host_name(&self) -> &str;
}

impl<L: HostLauncher + ?Sized> HostLauncher for Box<L> {
    fn launch(
        &mut self,
        command_line: &str,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>> {
        (**self).launch(command_line)
    }

    fn host_name(&self) -> &str {
        (**self).host_name()
    }
}
