// src/config/model.rs

use std::path::PathBuf;

use serde::Deserialize;

use crate::exec::terminal::{DEFAULT_OSASCRIPT, DEFAULT_TERMINAL_APP};
use crate::types::{CleanupMode, HostKind};

/// Top-level configuration as read from a TOML file.
///
/// ```toml
/// [run]
/// script = "scripts/cleanup.sh"
/// mode = "deep"
/// poll_interval_ms = 800
///
/// [host]
/// kind = "terminal"
/// terminal_app = "Terminal"
/// ```
///
/// Every section and key is optional.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawConfigFile {
    #[serde(default)]
    pub run: RunSection,

    #[serde(default)]
    pub host: HostSection,
}

/// A `RawConfigFile` that passed validation.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    pub run: RunSection,
    pub host: HostSection,
}

impl ConfigFile {
    /// Construct without validation. Use `ConfigFile::try_from` instead.
    pub(crate) fn new_unchecked(run: RunSection, host: HostSection) -> Self {
        Self { run, host }
    }
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self::new_unchecked(RunSection::default(), HostSection::default())
    }
}

/// `[run]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct RunSection {
    /// Target cleanup script. Defaults to `cleanup.sh` in the working
    /// directory.
    #[serde(default)]
    pub script: Option<PathBuf>,

    /// `"standard"` (default) or `"deep"`.
    #[serde(default)]
    pub mode: CleanupMode,

    /// Delay between status file checks.
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    /// Give up on a run after this many seconds. Absent or `0` disables the
    /// timeout.
    #[serde(default)]
    pub timeout_secs: Option<u64>,

    /// Directory for per-run artifacts. Defaults to the OS temp dir.
    #[serde(default)]
    pub temp_dir: Option<PathBuf>,

    /// Log location named in status messages.
    #[serde(default = "default_log_hint")]
    pub log_hint: String,

    /// Wake the watcher on filesystem events as well as on the interval.
    #[serde(default = "default_fs_events")]
    pub fs_events: bool,
}

fn default_poll_interval_ms() -> u64 {
    800
}

fn default_log_hint() -> String {
    "~/cleanup.log".to_string()
}

fn default_fs_events() -> bool {
    true
}

impl Default for RunSection {
    fn default() -> Self {
        Self {
            script: None,
            mode: CleanupMode::default(),
            poll_interval_ms: default_poll_interval_ms(),
            timeout_secs: None,
            temp_dir: None,
            log_hint: default_log_hint(),
            fs_events: default_fs_events(),
        }
    }
}

/// `[host]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct HostSection {
    /// `"terminal"` or `"direct"`. Defaults to `terminal` on macOS.
    #[serde(default)]
    pub kind: HostKind,

    /// Application that receives the `do script` request.
    #[serde(default = "default_terminal_app")]
    pub terminal_app: String,

    /// Path to `osascript`.
    #[serde(default = "default_osascript")]
    pub osascript: PathBuf,
}

fn default_terminal_app() -> String {
    DEFAULT_TERMINAL_APP.to_string()
}

fn default_osascript() -> PathBuf {
    PathBuf::from(DEFAULT_OSASCRIPT)
}

impl Default for HostSection {
    fn default() -> Self {
        Self {
            kind: HostKind::default(),
            terminal_app: default_terminal_app(),
            osascript: default_osascript(),
        }
    }
}
