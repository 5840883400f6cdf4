// src/watch/state.rs

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Last-recorded modification time for every path the monitor has seen.
///
/// Entries are only ever inserted or overwritten. A file that disappears
/// keeps its stale entry; deletions are not tracked.
#[derive(Debug, Default, Clone)]
pub struct ModTimeStore {
    stamps: HashMap<PathBuf, SystemTime>,
}

impl ModTimeStore {
    pub fn new() -> Self {
        Self {
            stamps: HashMap::new(),
        }
    }

    pub fn get(&self, path: &Path) -> Option<SystemTime> {
        self.stamps.get(path).copied()
    }

    /// Record `stamp` for `path`, replacing any previous value.
    pub fn record(&mut self, path: &Path, stamp: SystemTime) {
        match self.stamps.get_mut(path) {
            Some(existing) => *existing = stamp,
            None => {
                self.stamps.insert(path.to_path_buf(), stamp);
            }
        }
    }

    /// True if `path` is unknown or was recorded with a different time.
    pub fn is_changed(&self, path: &Path, current: SystemTime) -> bool {
        self.stamps.get(path) != Some(&current)
    }

    pub fn len(&self) -> usize {
        self.stamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stamps.is_empty()
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.stamps.contains_key(path)
    }
}
