#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::time::Duration;

use cleanrun::config::{HostSettings, RunSettings};
use cleanrun::types::{CleanupMode, HostKind};
use cleanrun::watch::WatchOptions;

/// Builder for `RunSettings` with test-friendly defaults: a fast poll
/// interval, no filesystem events, no timeout.
pub struct SettingsBuilder {
    settings: RunSettings,
}

impl SettingsBuilder {
    pub fn new(script: impl AsRef<Path>, temp_root: impl AsRef<Path>) -> Self {
        Self {
            settings: RunSettings {
                script: script.as_ref().to_path_buf(),
                mode: CleanupMode::Standard,
                temp_root: temp_root.as_ref().to_path_buf(),
                watch: WatchOptions {
                    interval: Duration::from_millis(10),
                    timeout: None,
                    fs_events: false,
                },
                log_hint: "~/cleanup.log".to_string(),
                banner: "cleanrun".to_string(),
                host: HostSettings {
                    kind: HostKind::Direct,
                    terminal_app: "Terminal".to_string(),
                    osascript: PathBuf::from("/usr/bin/osascript"),
                },
            },
        }
    }

    pub fn mode(mut self, mode: CleanupMode) -> Self {
        self.settings.mode = mode;
        self
    }

    pub fn poll_interval(mut self, interval: Duration) -> Self {
        self.settings.watch.interval = interval;
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.settings.watch.timeout = Some(timeout);
        self
    }

    pub fn fs_events(mut self, enabled: bool) -> Self {
        self.settings.watch.fs_events = enabled;
        self
    }

    pub fn log_hint(mut self, hint: &str) -> Self {
        self.settings.log_hint = hint.to_string();
        self
    }

    pub fn build(self) -> RunSettings {
        self.settings
    }
}
