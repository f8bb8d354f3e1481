// src/ui.rs

//! Plain-text presentation layer.
//!
//! Prints every [`RunUpdate`] as one line on stdout and, in interactive
//! mode, turns stdin lines into runtime events.

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::engine::{RunUpdate, RuntimeEvent, RuntimeHandle, StatusKind};
use crate::types::CleanupMode;

pub const HELP: &str = "commands: start | cancel | standard | deep | quit";

/// Render an update as a single status line.
pub fn format_update(update: &RunUpdate) -> String {
    let marker = match update.status.kind {
        StatusKind::Info => "..",
        StatusKind::Success => "ok",
        StatusKind::Error => "!!",
    };
    format!(
        "[{marker}] {:<9} {}",
        update.state.label(),
        update.status.text
    )
}

/// Map an interactive command line to an event. `None` for anything
/// unrecognised.
pub fn parse_command(line: &str) -> Option<RuntimeEvent> {
    match line.trim().to_lowercase().as_str() {
        "start" | "s" | "run" => Some(RuntimeEvent::StartRequested),
        "cancel" | "c" => Some(RuntimeEvent::CancelRequested),
        "standard" => Some(RuntimeEvent::ModeSelected(CleanupMode::Standard)),
        "deep" => Some(RuntimeEvent::ModeSelected(CleanupMode::Deep)),
        "quit" | "q" | "exit" => Some(RuntimeEvent::ShutdownRequested),
        _ => None,
    }
}

/// Print updates until the runtime drops its sender.
pub fn spawn_reporter(mut updates: mpsc::UnboundedReceiver<RunUpdate>) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(update) = updates.recv().await {
            println!("{}", format_update(&update));
        }
        debug!("update stream closed");
    })
}

/// Forward stdin commands to the runtime. EOF shuts the runtime down.
pub fn spawn_command_reader(handle: RuntimeHandle) -> JoinHandle<()> {
    tokio::spawn(async move {
        println!("{HELP}");
        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        loop {
            let line = match lines.next_line().await {
                Ok(Some(line)) => line,
                Ok(None) => break,
                Err(e) => {
                    debug!(error = %e, "stdin read failed");
                    break;
                }
            };

            if line.trim().is_empty() {
                continue;
            }

            match parse_command(&line) {
                Some(event) => {
                    let quit = event == RuntimeEvent::ShutdownRequested;
                    if handle.send(event).await.is_err() || quit {
                        return;
                    }
                }
                None => println!("{HELP}"),
            }
        }

        let _ = handle.shutdown().await;
    })
}
