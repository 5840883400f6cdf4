// src/watch/detector.rs

//! Change detection and state refresh.
//!
//! Both operate on a list of paths produced by [`Scanner::scan`], so the
//! caller decides when the tree is walked.

use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use tracing::trace;

use crate::errors::{DirmonError, Result};
use crate::watch::scanner::Scanner;
use crate::watch::state::ModTimeStore;

/// A path reported as changed, with the modification time observed when it
/// was detected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangedFile {
    pub path: PathBuf,
    pub modified: SystemTime,
}

/// Return the paths (in scan order) that are new to `baseline` or whose
/// modification time differs from the recorded one.
///
/// Does not touch `baseline`.
pub fn detect_changes(
    scanner: &Scanner,
    baseline: &ModTimeStore,
    scanned: &[PathBuf],
) -> Result<Vec<ChangedFile>> {
    let mut changed = Vec::new();
    for path in scanned {
        let modified = scanner.modified(path)?;
        if baseline.is_changed(path, modified) {
            trace!(?path, "changed");
            changed.push(ChangedFile {
                path: path.clone(),
                modified,
            });
        }
    }
    Ok(changed)
}

/// Record the current modification time of every path in `paths`.
///
/// Overwrites unconditionally. A path that no longer exists yields
/// [`DirmonError::Vanished`].
pub fn refresh<P: AsRef<Path>>(
    scanner: &Scanner,
    store: &mut ModTimeStore,
    paths: &[P],
) -> Result<()> {
    for path in paths {
        let path = path.as_ref();
        let modified = scanner.modified(path).map_err(|err| match err {
            DirmonError::ModTime { path, source } if source.kind() == io::ErrorKind::NotFound => {
                DirmonError::Vanished(path)
            }
            other => other,
        })?;
        store.record(path, modified);
    }
    Ok(())
}
