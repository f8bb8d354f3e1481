// src/exec/mod.rs

//! Process side of a run.
//!
//! - [`compose`] builds the shell command line the host executes.
//! - [`backend`] defines the [`HostLauncher`] trait the runtime talks to.
//! - [`terminal`] drives an interactive terminal app via `osascript`.
//! - [`direct`] spawns `sh -c` directly, for hosts without a terminal
//!   scripting interface.
//! - [`cancel`] reads the recorded shell pid and sends termination signals.

pub mod backend;
pub mod cancel;
pub mod compose;
pub mod direct;
pub mod terminal;

pub use backend::HostLauncher;
pub use cancel::{CancellationController, Signaller, TermSignaller};
pub use compose::{shell_quote, CommandComposer};
pub use direct::DirectLauncher;
pub use terminal::TerminalLauncher;
