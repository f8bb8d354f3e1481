// src/watch/mod.rs

//! Completion detection.
//!
//! The coordinator is not the parent of the script, so it cannot wait on
//! it. Instead the composed command writes the exit code to the run's
//! status file and this module polls for it:
//!
//! - [`status`] turns raw status file contents into an exit code.
//! - [`poller`] runs the per-run polling task and reports back to the
//!   runtime via `RuntimeEvent`s. Filesystem events from `notify` only
//!   shorten the wait; the fixed interval is what guarantees progress.

pub mod poller;
pub mod status;

pub use poller::{CompletionWatcher, WatchOptions, DEFAULT_POLL_INTERVAL};
pub use status::{parse_status, read_status, StatusRead, UNKNOWN_EXIT_CODE};
