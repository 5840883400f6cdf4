// src/watch/mod.rs

//! Polling change detection.
//!
//! This module is responsible for:
//! - Compiling the end-anchored suffix regex (`pattern`).
//! - Walking the tree through the [`crate::fs::FileSystem`] collaborator and
//!   keeping only matching paths (`scanner`).
//! - Remembering the last-seen modification time per path (`state`).
//! - Comparing a scan against that memory and refreshing it (`detector`).
//!
//! It knows nothing about delivery modes or the loop; see [`crate::engine`].

pub mod detector;
pub mod pattern;
pub mod scanner;
pub mod state;

pub use detector::{detect_changes, refresh, ChangedFile};
pub use pattern::{SuffixPattern, DEFAULT_SUFFIX};
pub use scanner::Scanner;
pub use state::ModTimeStore;
