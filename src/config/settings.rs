// src/config/settings.rs

//! Resolved settings handed to the runtime.

use std::path::PathBuf;
use std::time::Duration;

use crate::config::model::ConfigFile;
use crate::types::{CleanupMode, HostKind};
use crate::watch::WatchOptions;

/// Title echoed at the top of the host's output.
pub const DEFAULT_BANNER: &str = "cleanrun";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostSettings {
    pub kind: HostKind,
    pub terminal_app: String,
    pub osascript: PathBuf,
}

#[derive(Debug, Clone)]
pub struct RunSettings {
    pub script: PathBuf,
    pub mode: CleanupMode,
    pub temp_root: PathBuf,
    pub watch: WatchOptions,
    pub log_hint: String,
    pub banner: String,
    pub host: HostSettings,
}

impl RunSettings {
    pub fn from_config(cfg: &ConfigFile) -> Self {
        let run = &cfg.run;
        Self {
            script: run
                .script
                .clone()
                .unwrap_or_else(|| PathBuf::from("cleanup.sh")),
            mode: run.mode,
            temp_root: run.temp_dir.clone().unwrap_or_else(std::env::temp_dir),
            watch: WatchOptions {
                interval: Duration::from_millis(run.poll_interval_ms),
                timeout: timeout_from_secs(run.timeout_secs),
                fs_events: run.fs_events,
            },
            log_hint: run.log_hint.clone(),
            banner: DEFAULT_BANNER.to_string(),
            host: HostSettings {
                kind: cfg.host.kind,
                terminal_app: cfg.host.terminal_app.clone(),
                osascript: cfg.host.osascript.clone(),
            },
        }
    }
}

impl Default for RunSettings {
    fn default() -> Self {
        Self::from_config(&ConfigFile::default())
    }
}

/// `0` means "no timeout".
pub fn timeout_from_secs(secs: Option<u64>) -> Option<Duration> {
    secs.filter(|s| *s > 0).map(Duration::from_secs)
}
