// src/watch/poller.rs

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::artifacts::RunId;
use crate::engine::RuntimeEvent;
use crate::fs::FileSystem;
use crate::watch::status::{read_status, StatusRead};

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(800);

#[derive(Debug, Clone, Copy)]
pub struct WatchOptions {
    /// Fixed delay between status file checks.
    pub interval: Duration,
    /// Give up after this long and report `WatchTimedOut`.
    pub timeout: Option<Duration>,
    /// Also check whenever `notify` reports a change next to the status file.
    pub fs_events: bool,
}

impl Default for WatchOptions {
    fn default() -> Self {
        Self {
            interval: DEFAULT_POLL_INTERVAL,
            timeout: None,
            fs_events: true,
        }
    }
}

/// Handle for one run's polling task.
///
/// The task sends exactly one event (`StatusResolved` or `WatchTimedOut`)
/// and ends. Stopping or dropping the handle aborts it without sending
/// anything.
#[derive(Debug)]
pub struct CompletionWatcher {
    run_id: RunId,
    task: JoinHandle<()>,
}

impl CompletionWatcher {
    /// Start polling `status_path` in the background.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn begin(
        fs: Arc<dyn FileSystem>,
        run_id: RunId,
        status_path: PathBuf,
        options: WatchOptions,
        runtime_tx: mpsc::Sender<RuntimeEvent>,
    ) -> Self {
        let fs_events = if options.fs_events {
            match watch_status_dir(&status_path) {
                Ok(events) => Some(events),
                Err(e) => {
                    debug!(%run_id, error = %e, "filesystem events unavailable; polling only");
                    None
                }
            }
        } else {
            None
        };

        info!(
            %run_id,
            path = ?status_path,
            interval_ms = options.interval.as_millis() as u64,
            "watching for run completion"
        );

        let task = tokio::spawn(poll_status(
            fs,
            run_id,
            status_path,
            options,
            fs_events,
            runtime_tx,
        ));

        Self { run_id, task }
    }

    pub fn run_id(&self) -> RunId {
        self.run_id
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Cancel any pending poll without resolving the run.
    pub fn stop(&mut self) {
        if !self.task.is_finished() {
            debug!(run_id = %self.run_id, "stopping completion watcher");
        }
        self.task.abort();
    }
}

impl Drop for CompletionWatcher {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Keeps a `notify` watcher alive and yields a unit per relevant event.
struct FsEvents {
    _watcher: RecommendedWatcher,
    rx: mpsc::UnboundedReceiver<()>,
}

fn watch_status_dir(status_path: &Path) -> notify::Result<FsEvents> {
    let dir = status_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."))
        .to_path_buf();
    // Compare by file name: notify may report a canonicalised directory.
    let file_name = status_path.file_name().map(|n| n.to_os_string());

    let (tx, rx) = mpsc::unbounded_channel::<()>();
    let mut watcher = RecommendedWatcher::new(
        move |res: notify::Result<Event>| {
            if let Ok(event) = res {
                let relevant = event
                    .paths
                    .iter()
                    .any(|p| p.file_name().map(|n| n.to_os_string()) == file_name);
                if relevant {
                    let _ = tx.send(());
                }
            }
        },
        Config::default(),
    )?;
    watcher.watch(&dir, RecursiveMode::NonRecursive)?;

    Ok(FsEvents {
        _watcher: watcher,
        rx,
    })
}

async fn next_fs_event(events: &mut Option<FsEvents>) -> Option<()> {
    match events {
        Some(ev) => {
            let received = ev.rx.recv().await;
            if received.is_none() {
                *events = None;
            }
            received
        }
        None => std::future::pending().await,
    }
}

/// A timeout too large to represent as an instant means no deadline.
fn deadline_after(timeout: Duration, run_id: RunId) -> Option<Instant> {
    let deadline = Instant::now().checked_add(timeout);
    if deadline.is_none() {
        debug!(%run_id, ?timeout, "timeout out of range; waiting without a deadline");
    }
    deadline
}

async fn sleep_until_deadline(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}

async fn poll_status(
    fs: Arc<dyn FileSystem>,
    run_id: RunId,
    status_path: PathBuf,
    options: WatchOptions,
    mut fs_events: Option<FsEvents>,
    runtime_tx: mpsc::Sender<RuntimeEvent>,
) {
    let mut ticker = tokio::time::interval(options.interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let deadline = options.timeout.and_then(|t| deadline_after(t, run_id));

    let event = loop {
        tokio::select! {
            _ = ticker.tick() => {}
            Some(()) = next_fs_event(&mut fs_events) => {
                debug!(%run_id, "filesystem event near status file");
            }
            _ = sleep_until_deadline(deadline) => {
                warn!(%run_id, timeout = ?options.timeout, "run did not report completion in time");
                break RuntimeEvent::WatchTimedOut { run_id };
            }
        }

        match read_status(fs.as_ref(), &status_path) {
            StatusRead::Pending => continue,
            StatusRead::Exited(exit_code) => {
                info!(%run_id, exit_code, "run reported completion");
                break RuntimeEvent::StatusResolved { run_id, exit_code };
            }
        }
    };

    if runtime_tx.send(event).await.is_err() {
        debug!(%run_id, "runtime gone before completion could be delivered");
    }
}
