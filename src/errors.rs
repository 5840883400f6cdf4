// src/errors.rs

//! Crate-wide error aliases and helpers.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DirmonError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Invalid suffix pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Failed to walk directory tree at {path:?}: {source}")]
    Walk {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read modification time of {path:?}: {source}")]
    ModTime {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A watched file was seen by a scan but was gone by the time its
    /// timestamp was refreshed.
    #[error("Watched file disappeared before refresh: {0:?}")]
    Vanished(PathBuf),

    #[error("Change handler failed: {0:#}")]
    Handler(anyhow::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, DirmonError>;
