use std::future::Future;
use std::io;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use cleanrun::errors::{CleanrunError, Result};
use cleanrun::exec::{HostLauncher, Signaller};

/// A fake host that:
/// - records every command it was asked to run
/// - accepts or rejects the submission, as configured.
///
/// Nothing is executed; tests play the shell by writing the pid / status
/// files themselves.
#[derive(Debug, Clone, Default)]
pub struct FakeLauncher {
    commands: Arc<Mutex<Vec<String>>>,
    reject: bool,
}

impl FakeLauncher {
    pub fn new() -> Self {
        Self::default()
    }

    /// A host that refuses every submission.
    pub fn rejecting() -> Self {
        Self {
            reject: true,
            ..Self::default()
        }
    }

    pub fn commands(&self) -> Vec<String> {
        self.commands.lock().unwrap().clone()
    }
}

impl HostLauncher for FakeLauncher {
    fn launch(
        &mut self,
        command_line: &str,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>> {
        self.commands.lock().unwrap().push(command_line.to_string());
        let reject = self.reject;

        Box::pin(async move {
            if reject {
                Err(CleanrunError::LaunchError("fake host unavailable".to_string()))
            } else {
                Ok(())
            }
        })
    }

    fn host_name(&self) -> &str {
        "FakeTerm"
    }
}

/// Records every signal target instead of signalling.
#[derive(Debug, Clone, Default)]
pub struct RecordingSignaller {
    targets: Arc<Mutex<Vec<i32>>>,
    fail: bool,
}

impl RecordingSignaller {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records targets but reports every delivery as failed.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn targets(&self) -> Vec<i32> {
        self.targets.lock().unwrap().clone()
    }
}

impl Signaller for RecordingSignaller {
    fn terminate(&self, target: i32) -> io::Result<()> {
        self.targets.lock().unwrap().push(target);
        if self.fail {
            Err(io::Error::new(io::ErrorKind::NotFound, "no such process"))
        } else {
            Ok(())
        }
    }
}
