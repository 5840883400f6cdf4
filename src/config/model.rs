// src/config/model.rs

use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

use crate::engine::MonitorOptions;
use crate::watch::SuffixPattern;

/// Optional settings file, as read from TOML.
///
/// ```toml
/// [monitor]
/// suffix = "\\.rb|\\.yaml"
/// delay = 2.5
/// loop = false
/// force = false
/// cascade = false
/// root = "."
/// cascade_limit = 16
///
/// [command]
/// token = "%%"
/// verbose = true
/// ```
///
/// Every key is optional; anything left out falls back to the CLI flag or
/// the built-in default. Unknown keys are rejected.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawConfigFile {
    #[serde(default)]
    pub monitor: MonitorSection,

    #[serde(default)]
    pub command: CommandSection,
}

/// `[monitor]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MonitorSection {
    /// Suffix regex, anchored at the end of each path.
    pub suffix: Option<String>,

    /// Seconds between scans; fractions allowed.
    pub delay: Option<f64>,

    /// Run the handler once per changed file.
    #[serde(rename = "loop")]
    pub per_file: Option<bool>,

    pub force: Option<bool>,

    pub cascade: Option<bool>,

    /// Directory tree to watch.
    pub root: Option<PathBuf>,

    /// How often one file may be delivered within a cascading cycle.
    pub cascade_limit: Option<usize>,
}

/// `[command]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CommandSection {
    pub token: Option<String>,
    pub verbose: Option<bool>,
}

/// A settings file that passed validation.
///
/// Only constructible through `TryFrom<RawConfigFile>`, so holders can rely
/// on the delay being usable and the suffix compiling.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    raw: RawConfigFile,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(raw: RawConfigFile) -> Self {
        Self { raw }
    }

    pub fn monitor(&self) -> &MonitorSection {
        &self.raw.monitor
    }

    pub fn command(&self) -> &CommandSection {
        &self.raw.command
    }
}

/// Fully resolved settings for one watch session.
#[derive(Debug, Clone)]
pub struct Settings {
    pub pattern: SuffixPattern,
    pub delay: Duration,
    pub root: PathBuf,
    pub options: MonitorOptions,
    pub command: String,
    pub token: String,
    pub verbose: bool,
}
