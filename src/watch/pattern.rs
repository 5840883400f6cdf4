// src/watch/pattern.rs

use std::fmt;
use std::path::Path;

use regex::Regex;

use crate::errors::{DirmonError, Result};

/// Suffix used when the caller doesn't restrict the watched files.
pub const DEFAULT_SUFFIX: &str = ".*";

/// A regular expression anchored at the end of a path.
///
/// The user-supplied fragment is grouped before anchoring, so an alternation
/// like `\.rb|\.yaml` means "ends with `.rb` or `.yaml`" rather than
/// "contains `.rb` or ends with `.yaml`".
///
/// Note that this is a regex, not a glob: `.txt` also matches `atxt`. Escape
/// the dot (`\.txt`) to match a literal period.
#[derive(Clone)]
pub struct SuffixPattern {
    source: String,
    re: Regex,
}

impl SuffixPattern {
    pub fn new(suffix: &str) -> Result<Self> {
        let re = Regex::new(&format!("(?:{suffix})$")).map_err(|source| {
            DirmonError::InvalidPattern {
                pattern: suffix.to_string(),
                source,
            }
        })?;
        Ok(Self {
            source: suffix.to_string(),
            re,
        })
    }

    /// The fragment as supplied, before grouping and anchoring.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn matches_str(&self, path: &str) -> bool {
        self.re.is_match(path)
    }

    /// Match against the path's string form, with `\` normalised to `/` so
    /// patterns behave the same on Windows.
    pub fn matches(&self, path: &Path) -> bool {
        let s = path.to_string_lossy();
        if s.contains('\\') {
            self.matches_str(&s.replace('\\', "/"))
        } else {
            self.matches_str(&s)
        }
    }
}

impl fmt::Debug for SuffixPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SuffixPattern").field(&self.source).finish()
    }
}

impl PartialEq for SuffixPattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}
