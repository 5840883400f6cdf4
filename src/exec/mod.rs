// src/exec/mod.rs

//! What happens when files change.
//!
//! - [`backend`] defines the [`ChangeHandler`] trait the monitor delivers to,
//!   plus a closure adapter.
//! - [`command`] is the CLI's handler: substitute the changed paths into a
//!   shell-command template and run it with `tokio::process::Command`.

pub mod backend;
pub mod command;

pub use backend::{ChangeHandler, FnHandler};
pub use command::{render_command, ShellCommand, DEFAULT_TOKEN};
