// src/engine/clock.rs

//! Pluggable suspend operation for the poll loop.
//!
//! Production uses [`TokioClock`]. Tests provide their own `Clock` that
//! returns immediately, which lets them drive the loop one cycle at a time
//! without wall-clock delay.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

pub trait Clock: Send {
    /// Suspend for `delay`. The runtime races this against cancellation, so
    /// implementations don't need to handle it themselves.
    fn sleep(&mut self, delay: Duration) -> Pin<Box<dyn Future<Output = ()> + Send + '_>>;
}

/// Real clock backed by `tokio::time::sleep`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioClock;

impl Clock for TokioClock {
    fn sleep(&mut self, delay: Duration) -> Pin<Box<dyn Future<Output = ()> + Send + '_>> {
        Box::pin(tokio::time::sleep(delay))
    }
}
