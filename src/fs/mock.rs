// src/fs/mock.rs

use super::FileSystem;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

#[derive(Debug, Default)]
struct MockState {
    /// Files in creation order; this is the order `list` reports them in.
    files: Vec<(PathBuf, SystemTime)>,
    /// Logical clock: every `touch` advances it by one tick.
    ticks: u64,
    /// When set, `list` fails as if the root were unreadable.
    unreadable: bool,
}

/// In-memory filesystem with deterministic modification times.
///
/// Cloning shares the underlying state, so a test can keep one handle to
/// mutate the tree while the monitor owns another.
#[derive(Debug, Clone, Default)]
pub struct MockFileSystem {
    state: Arc<Mutex<MockState>>,
}

impl MockFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create `path`, or bump its modification time if it already exists.
    ///
    /// Every call yields a strictly later timestamp than the previous one.
    pub fn touch(&self, path: impl AsRef<Path>) {
        let mut state = self.lock();
        state.ticks += 1;
        let stamp = UNIX_EPOCH + Duration::from_secs(state.ticks);
        Self::upsert(&mut state, path.as_ref(), stamp);
    }

    /// Touch several files in order.
    pub fn touch_all<I, P>(&self, paths: I)
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        for path in paths {
            self.touch(path);
        }
    }

    /// Set an exact modification time, creating the file if needed.
    pub fn set_modified(&self, path: impl AsRef<Path>, stamp: SystemTime) {
        let mut state = self.lock();
        Self::upsert(&mut state, path.as_ref(), stamp);
    }

    /// Delete a file. Returns whether it existed.
    pub fn remove(&self, path: impl AsRef<Path>) -> bool {
        let mut state = self.lock();
        let before = state.files.len();
        state.files.retain(|(p, _)| p != path.as_ref());
        state.files.len() != before
    }

    /// Make subsequent `list` calls fail (or succeed again).
    pub fn set_unreadable(&self, unreadable: bool) {
        self.lock().unreadable = unreadable;
    }

    fn upsert(state: &mut MockState, path: &Path, stamp: SystemTime) {
        match state.files.iter().position(|(p, _)| p == path) {
            Some(i) => state.files[i].1 = stamp,
            None => state.files.push((path.to_path_buf(), stamp)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        // A panicking test thread must not hide the tree from the others.
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl FileSystem for MockFileSystem {
    fn list(&self, root: &Path) -> io::Result<Vec<PathBuf>> {
        let state = self.lock();
        if state.unreadable {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("{}: permission denied", root.display()),
            ));
        }

        // Paths are stored as given; "." means "everything".
        let all = root == Path::new(".");
        Ok(state
            .files
            .iter()
            .filter(|(p, _)| all || p.starts_with(root))
            .map(|(p, _)| p.clone())
            .collect())
    }

    fn modified(&self, path: &Path) -> io::Result<SystemTime> {
        let state = self.lock();
        state
            .files
            .iter()
            .find(|(p, _)| p == path)
            .map(|(_, stamp)| *stamp)
            .ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("No such file: {}", path.display()),
                )
            })
    }
}
