// src/lib.rs

pub mod artifacts;
pub mod cli;
pub mod config;
pub mod engine;
pub mod errors;
pub mod exec;
pub mod fs;
pub mod logging;
pub mod types;
pub mod ui;
pub mod watch;

use std::sync::Arc;

use tracing::{debug, info};

use crate::cli::CliArgs;
use crate::config::{load_optional, RunSettings};
use crate::engine::{RunState, Runtime, RuntimeOptions};
use crate::errors::{CleanrunError, Result};
use crate::exec::{CommandComposer, DirectLauncher, HostLauncher, TermSignaller, TerminalLauncher};
use crate::fs::{FileSystem, RealFileSystem};
use crate::types::HostKind;
use crate::watch::WatchOptions;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading and CLI overrides
/// - the host launcher and signaller
/// - the runtime and its presentation (status lines, stdin commands)
/// - Ctrl-C handling
///
/// Returns the state the last run ended in.
pub async fn run(args: CliArgs) -> Result<RunState> {
    let cfg = load_optional(args.config.as_deref())?;
    let mut settings = RunSettings::from_config(&cfg);
    apply_cli_overrides(&mut settings, &args)?;

    if args.dry_run {
        print_dry_run(&settings);
        return Ok(RunState::Idle);
    }

    let launcher = build_launcher(&settings);
    let fs: Arc<dyn FileSystem> = Arc::new(RealFileSystem);

    let options = RuntimeOptions {
        exit_when_settled: !args.interactive,
    };
    let mut runtime = Runtime::new(&settings, launcher, TermSignaller, fs).with_options(options);
    let reporter = ui::spawn_reporter(runtime.subscribe());
    let handle = runtime.handle();

    // Ctrl-C → cancel the run, or close when nothing is running.
    {
        let handle = handle.clone();
        tokio::spawn(async move {
            loop {
                if let Err(e) = tokio::signal::ctrl_c().await {
                    eprintln!("failed to listen for Ctrl+C: {e}");
                    return;
                }
                if handle.interrupt().await.is_err() {
                    return;
                }
            }
        });
    }

    if args.interactive {
        ui::spawn_command_reader(handle);
    } else {
        info!(script = ?settings.script, mode = %settings.mode, "starting single run");
        handle.start().await?;
    }

    let final_state = runtime.run().await?;
    // The runtime dropped its update sender, so the reporter drains and ends.
    let _ = reporter.await;
    Ok(final_state)
}

/// Process exit code for the state a run ended in.
pub fn exit_code_for(state: RunState) -> i32 {
    match state {
        RunState::Idle | RunState::Success => 0,
        RunState::Cancelled => 130,
        RunState::Running | RunState::Failure => 1,
    }
}

/// Layer CLI flags over file settings.
pub fn apply_cli_overrides(settings: &mut RunSettings, args: &CliArgs) -> Result<()> {
    if let Some(script) = &args.script {
        settings.script = script.clone();
    }
    if let Some(mode) = args.mode {
        settings.mode = mode.into();
    }
    if let Some(host) = args.host {
        settings.host.kind = host.into();
    }
    if let Some(ms) = args.poll_interval_ms {
        if ms == 0 {
            return Err(CleanrunError::ConfigError(
                "--poll-interval-ms must be >= 1 (got 0)".to_string(),
            ));
        }
        settings.watch.interval = std::time::Duration::from_millis(ms);
    }
    if let Some(secs) = args.timeout_secs {
        settings.watch.timeout = config::settings::timeout_from_secs(Some(secs));
    }
    if let Some(dir) = &args.temp_dir {
        settings.temp_root = dir.clone();
    }
    Ok(())
}

fn build_launcher(settings: &RunSettings) -> Box<dyn HostLauncher> {
    match settings.host.kind {
        HostKind::Terminal => Box::new(TerminalLauncher::new(
            settings.host.osascript.clone(),
            settings.host.terminal_app.clone(),
        )),
        HostKind::Direct => Box::new(DirectLauncher::new()),
    }
}

/// Simple dry-run output: settings plus the command the host would get.
fn print_dry_run(settings: &RunSettings) {
    let WatchOptions {
        interval,
        timeout,
        fs_events,
    } = settings.watch;

    println!("cleanrun dry-run");
    println!("  script      = {}", settings.script.display());
    println!("  mode        = {} ({})", settings.mode, settings.mode.title());
    println!("  host        = {:?}", settings.host.kind);
    if settings.host.kind == HostKind::Terminal {
        println!("  terminal    = {}", settings.host.terminal_app);
        println!("  osascript   = {}", settings.host.osascript.display());
    }
    println!("  temp_root   = {}", settings.temp_root.display());
    println!("  poll        = {}ms (fs events: {fs_events})", interval.as_millis());
    match timeout {
        Some(t) => println!("  timeout     = {}s", t.as_secs()),
        None => println!("  timeout     = none"),
    }
    println!();

    let composer = CommandComposer::new(settings.banner.clone(), settings.log_hint.clone());
    let status = settings.temp_root.join("cleanrun_status_<run-id>.txt");
    let pid = settings.temp_root.join("cleanrun_pid_<run-id>.txt");
    println!("command:");
    println!("  {}", composer.build(&settings.script, &status, &pid, settings.mode));

    debug!("dry-run complete (no execution)");
}
