use std::fmt;

use serde::Deserialize;

/// Cleanup intensity handed to the target script.
///
/// The value only ever comes from this closed set; the extra argument for
/// [`CleanupMode::Deep`] is a fixed flag, never user text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CleanupMode {
    #[default]
    Standard,
    Deep,
}

impl CleanupMode {
    /// Flag appended to the script invocation for this mode, if any.
    pub fn script_flag(self) -> Option<&'static str> {
        match self {
            CleanupMode::Standard => None,
            CleanupMode::Deep => Some("--deep-clean"),
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            CleanupMode::Standard => "Standard Clean",
            CleanupMode::Deep => "Deep Clean",
        }
    }

    pub fn subtitle(self) -> &'static str {
        match self {
            CleanupMode::Standard => "Balanced reset for most users",
            CleanupMode::Deep => "Aggressive cleanup and extra wiping",
        }
    }
}

impl fmt::Display for CleanupMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CleanupMode::Standard => f.write_str("standard"),
            CleanupMode::Deep => f.write_str("deep"),
        }
    }
}

/// Which process hosts the composed command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HostKind {
    /// An interactive terminal application driven through `osascript`.
    Terminal,
    /// A plain `sh -c` child in its own process group, output inherited.
    Direct,
}

impl Default for HostKind {
    fn default() -> Self {
        if cfg!(target_os = "macos") {
            HostKind::Terminal
        } else {
            HostKind::Direct
        }
    }
}
