// src/engine/runtime.rs

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, error, info};

use crate::artifacts::RunArtifacts;
use crate::config::RunSettings;
use crate::errors::{Error, Result};
use crate::exec::{CancellationController, CommandComposer, HostLauncher, Signaller};
use crate::fs::FileSystem;
use crate::types::CleanupMode;
use crate::watch::{CompletionWatcher, WatchOptions};

use super::core::RunLifecycle;
use super::{FailureCause, RunState, RunUpdate, RuntimeEvent, RuntimeOptions};

/// Cloneable sender the presentation layer uses to drive the runtime.
#[derive(Debug, Clone)]
pub struct RuntimeHandle {
    tx: mpsc::Sender<RuntimeEvent>,
}

impl RuntimeHandle {
    pub async fn send(&self, event: RuntimeEvent) -> Result<()> {
        self.tx.send(event).await.map_err(Error::from)?;
        Ok(())
    }

    pub async fn start(&self) -> Result<()> {
        self.send(RuntimeEvent::StartRequested).await
    }

    pub async fn cancel(&self) -> Result<()> {
        self.send(RuntimeEvent::CancelRequested).await
    }

    pub async fn interrupt(&self) -> Result<()> {
        self.send(RuntimeEvent::InterruptRequested).await
    }

    pub async fn select_mode(&self, mode: CleanupMode) -> Result<()> {
        self.send(RuntimeEvent::ModeSelected(mode)).await
    }

    pub async fn shutdown(&self) -> Result<()> {
        self.send(RuntimeEvent::ShutdownRequested).await
    }
}

/// Async IO shell around [`RunLifecycle`].
///
/// One `Runtime` owns everything a run touches: the artifacts, the watcher
/// handle, the launcher and the signaller. All events (user commands and
/// watcher reports alike) are processed sequentially on the task that calls
/// [`Runtime::run`], so run state has a single writer and needs no locks.
pub struct Runtime<L: HostLauncher, S: Signaller> {
    core: RunLifecycle,
    script: PathBuf,
    temp_root: PathBuf,
    watch_options: WatchOptions,
    composer: CommandComposer,
    launcher: L,
    canceller: CancellationController<S>,
    fs: Arc<dyn FileSystem>,
    event_tx: mpsc::Sender<RuntimeEvent>,
    event_rx: mpsc::Receiver<RuntimeEvent>,
    updates: Option<mpsc::UnboundedSender<RunUpdate>>,
    artifacts: Option<RunArtifacts>,
    watcher: Option<CompletionWatcher>,
    options: RuntimeOptions,
}

impl<L: HostLauncher, S: Signaller> fmt::Debug for Runtime<L, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Runtime")
            .field("core", &self.core)
            .field("artifacts", &self.artifacts)
            .field("watcher", &self.watcher)
            .finish_non_exhaustive()
    }
}

impl<L: HostLauncher, S: Signaller> Runtime<L, S> {
    pub fn new(
        settings: &RunSettings,
        launcher: L,
        signaller: S,
        fs: Arc<dyn FileSystem>,
    ) -> Self {
        let (event_tx, event_rx) = mpsc::channel::<RuntimeEvent>(64);
        Self {
            core: RunLifecycle::new(settings.mode, settings.log_hint.clone()),
            script: settings.script.clone(),
            temp_root: settings.temp_root.clone(),
            watch_options: settings.watch,
            composer: CommandComposer::new(settings.banner.clone(), settings.log_hint.clone()),
            launcher,
            canceller: CancellationController::new(signaller),
            fs,
            event_tx,
            event_rx,
            updates: None,
            artifacts: None,
            watcher: None,
            options: RuntimeOptions::default(),
        }
    }

    pub fn with_options(mut self, options: RuntimeOptions) -> Self {
        self.options = options;
        self
    }

    pub fn handle(&self) -> RuntimeHandle {
        RuntimeHandle {
            tx: self.event_tx.clone(),
        }
    }

    /// Receive every [`RunUpdate`] published from now on. A later call
    /// replaces the previous subscriber.
    pub fn subscribe(&mut self) -> mpsc::UnboundedReceiver<RunUpdate> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.updates = Some(tx);
        rx
    }

    pub fn state(&self) -> RunState {
        self.core.state()
    }

    pub fn mode(&self) -> CleanupMode {
        self.core.mode()
    }

    pub fn lifecycle(&self) -> &RunLifecycle {
        &self.core
    }

    /// Artifacts of the current run, if one is in flight.
    pub fn artifacts(&self) -> Option<&RunArtifacts> {
        self.artifacts.as_ref()
    }

    /// Whether a completion watcher is currently polling.
    pub fn is_watching(&self) -> bool {
        self.watcher.as_ref().is_some_and(|w| !w.is_finished())
    }

    /// Start a run with the current mode.
    ///
    /// A no-op while a run is in progress. Returns once the host accepted
    /// or rejected the command; a rejection (or a missing script) leaves
    /// the state at `Failure` without ever starting a watcher.
    pub async fn start(&mut self) -> RunState {
        if self.core.state().is_running() {
            debug!("start requested while running; ignoring");
            return self.core.state();
        }

        if !self.fs.is_file(&self.script) {
            error!(script = ?self.script, "cleanup script not found");
            let update = self
                .core
                .fail_start(FailureCause::ScriptMissing(self.script.clone()));
            self.publish(update);
            return self.core.state();
        }

        self.stop_watcher();
        self.dispose_artifacts();

        let artifacts = RunArtifacts::create(self.fs.as_ref(), &self.temp_root);
        let host = self.launcher.host_name().to_string();
        let Some(update) = self.core.begin_run(artifacts.run_id(), &host) else {
            return self.core.state();
        };
        self.publish(update);

        let command = self.composer.build(
            &self.script,
            artifacts.status_path(),
            artifacts.pid_path(),
            self.core.mode(),
        );
        debug!(run_id = %artifacts.run_id(), %command, "composed host command");
        self.artifacts = Some(artifacts.clone());

        match self.launcher.launch(&command).await {
            Ok(()) => {
                self.watcher = Some(CompletionWatcher::begin(
                    Arc::clone(&self.fs),
                    artifacts.run_id(),
                    artifacts.status_path().to_path_buf(),
                    self.watch_options,
                    self.event_tx.clone(),
                ));
            }
            Err(err) => {
                error!(run_id = %artifacts.run_id(), error = %err, "host launch failed");
                let update = self.core.fail_start(FailureCause::LaunchFailed { host });
                self.publish(update);
                self.dispose_artifacts();
            }
        }

        self.core.state()
    }

    /// Ask the running script to stop.
    ///
    /// The state stays `Running`; the run settles as `Cancelled` once the
    /// watcher sees the status file.
    pub fn request_cancel(&mut self) {
        let Some(update) = self.core.request_cancel() else {
            return;
        };
        self.publish(update);

        if let Some(artifacts) = &self.artifacts {
            self.canceller.signal(self.fs.as_ref(), artifacts.pid_path());
        }
    }

    /// Change the mode; returns `false` when rejected (run in progress).
    pub fn select_mode(&mut self, mode: CleanupMode) -> bool {
        match self.core.select_mode(mode) {
            Some(update) => {
                self.publish(update);
                true
            }
            None => false,
        }
    }

    /// Wait for the next event addressed to this runtime.
    pub async fn next_event(&mut self) -> Option<RuntimeEvent> {
        self.event_rx.recv().await
    }

    /// Apply one event. Returns whether the event loop should keep going.
    pub async fn handle_event(&mut self, event: RuntimeEvent) -> bool {
        match event {
            RuntimeEvent::StartRequested => {
                self.start().await;
            }
            RuntimeEvent::CancelRequested => self.request_cancel(),
            RuntimeEvent::InterruptRequested => {
                if !self.core.state().is_running() {
                    info!("interrupt with no run in progress; closing");
                    return false;
                }
                if self.core.cancel_requested() {
                    info!("second interrupt while cancelling; closing");
                    return false;
                }
                self.request_cancel();
            }
            RuntimeEvent::ModeSelected(mode) => {
                self.select_mode(mode);
            }
            RuntimeEvent::StatusResolved { run_id, exit_code } => {
                if let Some(update) = self.core.resolve(run_id, exit_code) {
                    self.finish_run(update);
                }
            }
            RuntimeEvent::WatchTimedOut { run_id } => {
                if let Some(update) = self.core.time_out(run_id) {
                    self.finish_run(update);
                }
            }
            RuntimeEvent::ShutdownRequested => {
                info!("shutdown requested");
                return false;
            }
        }

        !(self.options.exit_when_settled && self.core.state().is_settled())
    }

    /// Main event loop.
    ///
    /// Runs until shutdown (or, with `exit_when_settled`, until a run
    /// settles), then tears down and returns the final state.
    pub async fn run(mut self) -> Result<RunState> {
        info!("cleanrun runtime started");

        loop {
            let event = match self.next_event().await {
                Some(e) => e,
                None => {
                    info!("runtime event channel closed; exiting");
                    break;
                }
            };

            debug!(?event, "runtime received event");

            if !self.handle_event(event).await {
                break;
            }
        }

        self.teardown();
        info!(state = self.core.state().label(), "runtime exiting");
        Ok(self.core.state())
    }

    /// Stop watching and delete artifacts without touching run state.
    pub fn teardown(&mut self) {
        self.stop_watcher();
        self.dispose_artifacts();
    }

    fn finish_run(&mut self, update: RunUpdate) {
        self.publish(update);
        self.stop_watcher();
        self.dispose_artifacts();
    }

    fn stop_watcher(&mut self) {
        if let Some(mut watcher) = self.watcher.take() {
            watcher.stop();
        }
    }

    fn dispose_artifacts(&mut self) {
        if let Some(artifacts) = self.artifacts.take() {
            artifacts.dispose(self.fs.as_ref());
        }
    }

    fn publish(&self, update: RunUpdate) {
        debug!(state = update.state.label(), status = %update.status, "run update");
        if let Some(tx) = &self.updates {
            if tx.send(update).is_err() {
                debug!("update subscriber gone");
            }
        }
    }
}

impl<L: HostLauncher, S: Signaller> Drop for Runtime<L, S> {
    fn drop(&mut self) {
        self.teardown();
    }
}
