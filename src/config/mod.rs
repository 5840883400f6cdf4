// src/config/mod.rs

//! Settings for a watch session.
//!
//! Responsibilities:
//! - Define the optional TOML settings file (`model.rs`).
//! - Load it from disk (`loader.rs`).
//! - Validate it, and merge it with CLI flags and defaults (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{load_and_validate, load_from_path, load_from_str};
pub use model::{CommandSection, ConfigFile, MonitorSection, RawConfigFile, Settings};
pub use validate::{resolve_settings, DEFAULT_DELAY_SECS};
