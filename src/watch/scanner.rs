// src/watch/scanner.rs

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use tracing::trace;

use crate::errors::{DirmonError, Result};
use crate::fs::FileSystem;
use crate::watch::pattern::SuffixPattern;

/// Enumerates the files under `root` whose path matches the suffix pattern.
#[derive(Clone)]
pub struct Scanner {
    fs: Arc<dyn FileSystem>,
    root: PathBuf,
    pattern: SuffixPattern,
}

impl fmt::Debug for Scanner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scanner")
            .field("root", &self.root)
            .field("pattern", &self.pattern)
            .finish_non_exhaustive()
    }
}

impl Scanner {
    pub fn new(fs: Arc<dyn FileSystem>, root: impl Into<PathBuf>, pattern: SuffixPattern) -> Self {
        Self {
            fs,
            root: root.into(),
            pattern,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn pattern(&self) -> &SuffixPattern {
        &self.pattern
    }

    /// Matching paths in walk order. No side effects.
    pub fn scan(&self) -> Result<Vec<PathBuf>> {
        let all = self.fs.list(&self.root).map_err(|source| DirmonError::Walk {
            path: self.root.clone(),
            source,
        })?;
        let total = all.len();

        let matching: Vec<PathBuf> = all
            .into_iter()
            .filter(|p| self.pattern.matches(p))
            .collect();

        trace!(total, matching = matching.len(), "scanned tree");
        Ok(matching)
    }

    /// Current modification time of `path`.
    pub fn modified(&self, path: &Path) -> Result<SystemTime> {
        self.fs
            .modified(path)
            .map_err(|source| DirmonError::ModTime {
                path: path.to_path_buf(),
                source,
            })
    }
}
