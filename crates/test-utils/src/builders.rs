#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use dirmon::engine::DirectoryMonitor;
use dirmon::fs::mock::MockFileSystem;

/// The file set used throughout the behaviour tests.
pub const FIXTURE_FILES: &[&str] = &[
    "Abby.txt",
    "Billy.rb",
    "Cindy.rb",
    "Dan.dat",
    "Ellie.txt",
    "Frank.rb",
    "Gloria.txt",
    "Hank.dat",
    "Ira.rb.foo",
];

/// Builder for a `DirectoryMonitor` over a `MockFileSystem`.
pub struct MonitorBuilder {
    fs: MockFileSystem,
    suffix: String,
    delay: Duration,
}

impl MonitorBuilder {
    pub fn new() -> Self {
        Self {
            fs: MockFileSystem::new(),
            suffix: ".*".to_string(),
            delay: Duration::from_secs(1),
        }
    }

    /// Start from the standard fixture tree.
    pub fn with_fixture_files(self) -> Self {
        self.fs.touch_all(FIXTURE_FILES);
        self
    }

    pub fn with_file(self, path: &str) -> Self {
        self.fs.touch(path);
        self
    }

    pub fn suffix(mut self, suffix: &str) -> Self {
        self.suffix = suffix.to_string();
        self
    }

    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Returns the monitor plus a handle to its (shared) filesystem.
    pub fn build(self) -> (DirectoryMonitor, MockFileSystem) {
        let monitor = DirectoryMonitor::new(
            Arc::new(self.fs.clone()),
            ".",
            &self.suffix,
            self.delay,
        )
        .expect("Failed to build monitor from builder");
        (monitor, self.fs)
    }
}

impl Default for MonitorBuilder {
    fn default() -> Self {
        Self::new()
    }
}
