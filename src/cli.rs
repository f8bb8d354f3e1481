// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::types::{CleanupMode, HostKind};

/// Command-line arguments for `cleanrun`.
///
/// Flags override the matching keys of the config file.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "cleanrun",
    version,
    about = "Run a cleanup script in a terminal host and track its outcome.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the config file (TOML).
    ///
    /// Default: `cleanrun.toml` in the current working directory, if present.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Cleanup script to run.
    #[arg(long, value_name = "PATH")]
    pub script: Option<PathBuf>,

    /// Cleanup intensity.
    #[arg(long, value_enum, value_name = "MODE")]
    pub mode: Option<ModeArg>,

    /// Process that hosts the script (terminal app or direct shell child).
    #[arg(long, value_enum, value_name = "HOST")]
    pub host: Option<HostArg>,

    /// Delay between status checks, in milliseconds.
    #[arg(long, value_name = "MS")]
    pub poll_interval_ms: Option<u64>,

    /// Give up waiting after this many seconds (0 = never).
    #[arg(long, value_name = "SECS")]
    pub timeout_secs: Option<u64>,

    /// Directory for the per-run status / pid files.
    #[arg(long, value_name = "DIR")]
    pub temp_dir: Option<PathBuf>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `CLEANRUN_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Read commands (start, cancel, standard, deep, quit) from stdin
    /// instead of running once.
    #[arg(long)]
    pub interactive: bool,

    /// Print the resolved settings and the host command, don't launch.
    #[arg(long)]
    pub dry_run: bool,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    Standard,
    Deep,
}

impl From<ModeArg> for CleanupMode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Standard => CleanupMode::Standard,
            ModeArg::Deep => CleanupMode::Deep,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum HostArg {
    Terminal,
    Direct,
}

impl From<HostArg> for HostKind {
    fn from(arg: HostArg) -> Self {
        match arg {
            HostArg::Terminal => HostKind::Terminal,
            HostArg::Direct => HostKind::Direct,
        }
    }
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
