// src/exec/backend.rs

//! Pluggable change handler abstraction.
//!
//! The monitor talks to a `ChangeHandler` instead of running commands
//! itself. Production code uses [`super::ShellCommand`]; tests provide a
//! handler that records what it was given.

use std::fmt;
use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;

/// Receives the changed files of a cycle.
///
/// In batched mode `changed` holds every changed file of the cycle; in
/// per-file mode it holds exactly one. It is never empty.
///
/// Errors are not handled by the monitor: they stop the loop and surface as
/// [`crate::errors::DirmonError::Handler`].
pub trait ChangeHandler: Send {
    fn handle(
        &mut self,
        changed: Vec<PathBuf>,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<()>> + Send + '_>>;
}

/// Adapter for a synchronous closure.
pub struct FnHandler<F>(pub F);

impl<F> fmt::Debug for FnHandler<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnHandler").finish_non_exhaustive()
    }
}

impl<F> ChangeHandler for FnHandler<F>
where
    F: FnMut(Vec<PathBuf>) -> anyhow::Result<()> + Send,
{
    fn handle(
        &mut self,
        changed: Vec<PathBuf>,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<()>> + Send + '_>> {
        let result = (self.0)(changed);
        Box::pin(async move { result })
    }
}

impl<H: ChangeHandler + ?Sized> ChangeHandler for Box<H> {
    fn handle(
        &mut self,
        changed: Vec<PathBuf>,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<()>> + Send + '_>> {
        (**self).handle(changed)
    }
}
