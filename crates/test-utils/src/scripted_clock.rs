use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use dirmon::engine::Clock;
use dirmon::fs::mock::MockFileSystem;
use tokio_util::sync::CancellationToken;

/// A clock whose `sleep` returns immediately.
///
/// Each sleep consumes the next scripted step: the listed files are touched
/// in the mock filesystem, so the following cycle sees them as changed. Once
/// the script is exhausted, the next sleep cancels the token and the loop
/// stops. With `n` steps the loop therefore runs `n + 1` cycles.
#[derive(Debug, Clone)]
pub struct ScriptedClock {
    fs: MockFileSystem,
    cancel: CancellationToken,
    steps: Vec<Vec<String>>,
    next: usize,
    sleeps: Arc<Mutex<Vec<Duration>>>,
}

impl ScriptedClock {
    pub fn new(fs: &MockFileSystem, cancel: &CancellationToken) -> Self {
        Self {
            fs: fs.clone(),
            cancel: cancel.clone(),
            steps: Vec::new(),
            next: 0,
            sleeps: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Append a step that touches `files` (may be empty: "time passes").
    pub fn then_touch(mut self, files: &[&str]) -> Self {
        self.steps
            .push(files.iter().map(|s| s.to_string()).collect());
        self
    }

    /// Append `n` steps that touch nothing.
    pub fn then_idle(mut self, n: usize) -> Self {
        for _ in 0..n {
            self.steps.push(Vec::new());
        }
        self
    }

    /// Delays the loop asked for, in order.
    pub fn sleeps_handle(&self) -> Arc<Mutex<Vec<Duration>>> {
        Arc::clone(&self.sleeps)
    }
}

impl Clock for ScriptedClock {
    fn sleep(&mut self, delay: Duration) -> Pin<Box<dyn Future<Output = ()> + Send + '_>> {
        self.sleeps.lock().unwrap().push(delay);

        match self.steps.get(self.next) {
            Some(files) => {
                self.fs.touch_all(files);
                self.next += 1;
            }
            None => self.cancel.cancel(),
        }

        Box::pin(async {})
    }
}
