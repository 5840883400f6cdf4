// src/engine/runtime.rs

use std::fmt;

use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::errors::Result;
use crate::exec::ChangeHandler;
use crate::types::MonitorPhase;

use super::clock::Clock;
use super::core::DirectoryMonitor;
use super::{MonitorOptions, RunSummary};

/// Drives a [`DirectoryMonitor`] forever: cycle, sleep, cycle, ...
///
/// Strictly sequential. Cancellation is checked at the top of every cycle
/// and raced against the sleep; a cycle that has started always runs its
/// deliveries and update to completion (or to the first error).
pub struct Runtime<C: Clock, H: ChangeHandler> {
    monitor: DirectoryMonitor,
    options: MonitorOptions,
    clock: C,
    handler: H,
}

impl<C: Clock, H: ChangeHandler> fmt::Debug for Runtime<C, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Runtime")
            .field("monitor", &self.monitor)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl<C: Clock, H: ChangeHandler> Runtime<C, H> {
    pub fn new(monitor: DirectoryMonitor, options: MonitorOptions, clock: C, handler: H) -> Self {
        Self {
            monitor,
            options,
            clock,
            handler,
        }
    }

    pub fn monitor(&self) -> &DirectoryMonitor {
        &self.monitor
    }

    /// Main loop. Returns once `cancel` fires, or on the first error.
    ///
    /// Without `force`, the tree is primed silently before the first cycle.
    /// With `force`, the store is left as is, so on a fresh monitor the first
    /// cycle reports every matching file.
    pub async fn run(&mut self, cancel: &CancellationToken) -> Result<RunSummary> {
        let mut summary = RunSummary::default();

        if cancel.is_cancelled() {
            info!("cancelled before start");
            self.monitor.set_phase(MonitorPhase::Stopped);
            return Ok(summary);
        }

        if self.options.force {
            info!("force: first cycle reports every watched file");
        } else {
            self.monitor.prime()?;
        }

        let delay = self.monitor.delay();
        info!(
            root = ?self.monitor.scanner().root(),
            pattern = self.monitor.scanner().pattern().as_str(),
            ?delay,
            delivery = ?self.options.delivery,
            cascade = self.options.cascade,
            "monitor started"
        );

        loop {
            if cancel.is_cancelled() {
                break;
            }

            let report = self.monitor.run_cycle(&self.options, &mut self.handler).await?;
            summary.absorb(&report);

            self.monitor.set_phase(MonitorPhase::Sleeping);
            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    debug!("cancelled while sleeping");
                    break;
                }
                _ = self.clock.sleep(delay) => {}
            }
            self.monitor.set_phase(MonitorPhase::Idle);
        }

        self.monitor.set_phase(MonitorPhase::Stopped);
        info!(
            cycles = summary.cycles,
            invocations = summary.invocations,
            "monitor stopped"
        );
        Ok(summary)
    }
}
