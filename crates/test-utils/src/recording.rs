use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use dirmon::exec::ChangeHandler;
use dirmon::fs::mock::MockFileSystem;

/// A change handler that:
/// - records every delivery, as strings, in order
/// - optionally touches files in a mock filesystem while "handling" a path,
///   to simulate a command that writes files (for cascade tests)
/// - optionally fails on a given delivery number.
#[derive(Debug, Clone, Default)]
pub struct RecordingHandler {
    calls: Arc<Mutex<Vec<Vec<String>>>>,
    side_effects: Vec<(String, Vec<String>)>,
    fs: Option<MockFileSystem>,
    fail_on_call: Option<usize>,
}

impl RecordingHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// When a delivery contains `trigger`, touch `outputs` in `fs`.
    pub fn touching(mut self, fs: &MockFileSystem, trigger: &str, outputs: &[&str]) -> Self {
        self.fs = Some(fs.clone());
        self.side_effects.push((
            trigger.to_string(),
            outputs.iter().map(|s| s.to_string()).collect(),
        ));
        self
    }

    /// Fail the `n`-th delivery (1-based).
    pub fn failing_on(mut self, n: usize) -> Self {
        self.fail_on_call = Some(n);
        self
    }

    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls.lock().unwrap().clone()
    }

    /// Calls flattened the way the CLI would substitute them: paths joined by
    /// single spaces.
    pub fn joined(&self) -> Vec<String> {
        self.calls().into_iter().map(|c| c.join(" ")).collect()
    }
}

impl ChangeHandler for RecordingHandler {
    fn handle(
        &mut self,
        changed: Vec<PathBuf>,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<()>> + Send + '_>> {
        let names: Vec<String> = changed
            .iter()
            .map(|p| p.to_string_lossy().into_owned())
            .collect();

        let call_no = {
            let mut guard = self.calls.lock().unwrap();
            guard.push(names.clone());
            guard.len()
        };

        if let Some(fs) = &self.fs {
            for (trigger, outputs) in &self.side_effects {
                if names.iter().any(|n| n == trigger) {
                    fs.touch_all(outputs);
                }
            }
        }

        let fail = self.fail_on_call == Some(call_no);
        Box::pin(async move {
            if fail {
                anyhow::bail!("handler failed on call {call_no}");
            }
            Ok(())
        })
    }
}
