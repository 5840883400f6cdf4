// src/engine/mod.rs

//! Poll-detect-notify engine.
//!
//! - [`core`] holds [`DirectoryMonitor`]: the modification-time store plus
//!   the synchronous scan/detect/refresh steps and a single async cycle.
//! - [`runtime`] is the loop around it: prime (unless forced), run a cycle,
//!   sleep on a [`Clock`], repeat until cancelled.
//! - [`clock`] abstracts the sleep so tests can drive the loop by hand.

/// Default cap on how often a single file is delivered within one cascading
/// cycle.
pub const DEFAULT_CASCADE_LIMIT: usize = 16;

/// Flags chosen at the loop entry point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonitorOptions {
    pub delivery: DeliveryMode,
    /// Skip the silent priming scan so the first cycle reports every
    /// matching file.
    pub force: bool,
    /// Re-scan after each delivery so changes made by the handler are
    /// delivered in the same cycle.
    pub cascade: bool,
    /// Maximum deliveries of one file per cascading cycle. Values below 1
    /// act as 1.
    pub cascade_limit: usize,
}

impl Default for MonitorOptions {
    fn default() -> Self {
        Self {
            delivery: DeliveryMode::Batched,
            force: false,
            cascade: false,
            cascade_limit: DEFAULT_CASCADE_LIMIT,
        }
    }
}

impl MonitorOptions {
    pub fn per_file(mut self, per_file: bool) -> Self {
        self.delivery = DeliveryMode::from_loop_flag(per_file);
        self
    }

    pub fn force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    pub fn cascade(mut self, cascade: bool) -> Self {
        self.cascade = cascade;
        self
    }
}

/// What happened during one cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CycleReport {
    /// 1-based cycle number.
    pub cycle: u64,
    /// Files found changed by the cycle's first detection.
    pub detected: usize,
    /// Handler invocations.
    pub invocations: usize,
    /// Paths delivered, in delivery order (repeats possible with cascade).
    pub delivered: Vec<std::path::PathBuf>,
    /// Extra scans performed because of cascade.
    pub rescans: usize,
    /// Paths recorded by the refresh step.
    pub refreshed: usize,
}

/// Totals over a whole run of the loop.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub cycles: u64,
    pub invocations: usize,
    pub files_delivered: usize,
}

impl RunSummary {
    pub fn absorb(&mut self, report: &CycleReport) {
        self.cycles += 1;
        self.invocations += report.invocations;
        self.files_delivered += report.delivered.len();
    }
}

pub mod clock;
pub mod core;
pub mod runtime;

pub use clock::{Clock, TokioClock};
pub use self::core::DirectoryMonitor;
pub use crate::types::{DeliveryMode, MonitorPhase};
pub use runtime::Runtime;
