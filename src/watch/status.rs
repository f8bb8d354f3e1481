// src/watch/status.rs

use std::path::Path;

use tracing::{debug, warn};

use crate::fs::FileSystem;

/// Exit code reported when the status file holds something that is not an
/// integer. Real exit statuses are never negative.
pub const UNKNOWN_EXIT_CODE: i32 = -1;

/// What a single look at the status file found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusRead {
    /// Absent or still empty: the script has not finished.
    Pending,
    /// The script finished with this exit code.
    Exited(i32),
}

/// Interpret status file contents (surrounding whitespace ignored).
pub fn parse_status(raw: &str) -> StatusRead {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return StatusRead::Pending;
    }

    match trimmed.parse::<i32>() {
        Ok(code) => StatusRead::Exited(code),
        Err(e) => {
            warn!(raw = %trimmed, error = %e, "status file does not hold an exit code");
            StatusRead::Exited(UNKNOWN_EXIT_CODE)
        }
    }
}

/// Read and interpret the status file. A file that cannot be read counts
/// as not written yet.
pub fn read_status(fs: &dyn FileSystem, status_path: &Path) -> StatusRead {
    match fs.read_to_string(status_path) {
        Ok(raw) => parse_status(&raw),
        Err(e) => {
            debug!(path = ?status_path, error = %e, "status file not readable yet");
            StatusRead::Pending
        }
    }
}
