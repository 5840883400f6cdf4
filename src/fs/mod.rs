// src/fs/mod.rs

//! Filesystem collaborator used by the scanner.
//!
//! The monitor only needs two primitives: enumerate every file under a root,
//! and read a file's modification time. Both live behind [`FileSystem`] so the
//! scan/detect/refresh logic can run against [`mock::MockFileSystem`] in tests.

use std::fmt::Debug;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

pub mod mock;

/// Abstract filesystem interface.
pub trait FileSystem: Send + Sync + Debug {
    /// Return every file (not directory) reachable under `root`.
    ///
    /// Order must be stable across repeated calls on an unchanged tree.
    fn list(&self, root: &Path) -> io::Result<Vec<PathBuf>>;

    /// Current modification time of `path`.
    fn modified(&self, path: &Path) -> io::Result<SystemTime>;
}

/// Implementation that uses `std::fs`.
///
/// The walk is depth-first pre-order with each directory's entries sorted by
/// name, so discovery order only changes when the tree does.
#[derive(Debug, Clone, Default)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn list(&self, root: &Path) -> io::Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        let mut stack = vec![(root.to_path_buf(), true)];

        while let Some((path, is_dir)) = stack.pop() {
            if !is_dir {
                files.push(path);
                continue;
            }
            let mut entries = read_dir_sorted(&path)?;
            // Reversed so the smallest name is popped first.
            entries.reverse();
            stack.extend(entries);
        }

        Ok(files)
    }

    fn modified(&self, path: &Path) -> io::Result<SystemTime> {
        // Same view of links as the walk: the link's own time, never its target's.
        fs::symlink_metadata(path)?.modified()
    }
}

fn read_dir_sorted(dir: &Path) -> io::Result<Vec<(PathBuf, bool)>> {
    let with_dir = |e: io::Error| io::Error::new(e.kind(), format!("{}: {e}", dir.display()));

    let mut entries = Vec::new();
    for entry in fs::read_dir(dir).map_err(with_dir)? {
        let entry = entry.map_err(with_dir)?;
        // Symlinks are not followed, so a link to a directory is reported as
        // an entry rather than walked.
        let is_dir = entry.file_type().map_err(with_dir)?.is_dir();
        entries.push((entry.path(), is_dir));
    }
    entries.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(entries)
}
