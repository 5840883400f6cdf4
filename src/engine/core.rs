// src/engine/core.rs

//! The monitor itself: modification-time state plus one poll cycle.
//!
//! [`DirectoryMonitor`] owns the only mutable state of a watch session, the
//! [`ModTimeStore`]. The synchronous steps (`scan`, `detect_changes`,
//! `refresh`, `prime`) are usable on their own; [`DirectoryMonitor::run_cycle`]
//! strings them together with delivery to a [`ChangeHandler`].

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, trace, warn};

use crate::engine::{CycleReport, MonitorOptions};
use crate::errors::{DirmonError, Result};
use crate::exec::ChangeHandler;
use crate::fs::FileSystem;
use crate::types::{DeliveryMode, MonitorPhase};
use crate::watch::detector::{self, ChangedFile};
use crate::watch::{ModTimeStore, Scanner, SuffixPattern};

/// Convert a user-facing number of seconds into a delay.
///
/// Fractions are allowed; negative, NaN and infinite values are rejected.
pub fn delay_from_secs(secs: f64) -> Result<Duration> {
    Duration::try_from_secs_f64(secs).map_err(|e| {
        DirmonError::ConfigError(format!(
            "delay must be a finite, non-negative number of seconds (got {secs}): {e}"
        ))
    })
}

#[derive(Debug)]
pub struct DirectoryMonitor {
    scanner: Scanner,
    delay: Duration,
    store: ModTimeStore,
    phase: MonitorPhase,
    cycles: u64,
}

impl DirectoryMonitor {
    /// Build a monitor watching `root` for paths ending in `suffix`.
    ///
    /// The state store starts empty; see [`DirectoryMonitor::prime`].
    pub fn new(
        fs: Arc<dyn FileSystem>,
        root: impl Into<PathBuf>,
        suffix: &str,
        delay: Duration,
    ) -> Result<Self> {
        let pattern = SuffixPattern::new(suffix)?;
        Ok(Self::with_scanner(Scanner::new(fs, root, pattern), delay))
    }

    pub fn with_scanner(scanner: Scanner, delay: Duration) -> Self {
        Self {
            scanner,
            delay,
            store: ModTimeStore::new(),
            phase: MonitorPhase::Idle,
            cycles: 0,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn phase(&self) -> MonitorPhase {
        self.phase
    }

    /// Number of cycles started so far.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    pub fn scanner(&self) -> &Scanner {
        &self.scanner
    }

    pub fn store(&self) -> &ModTimeStore {
        &self.store
    }

    pub(crate) fn set_phase(&mut self, phase: MonitorPhase) {
        if self.phase != phase {
            trace!(from = ?self.phase, to = ?phase, "monitor phase");
            self.phase = phase;
        }
    }

    /// Matching paths under the root, in walk order.
    pub fn scan(&self) -> Result<Vec<PathBuf>> {
        self.scanner.scan()
    }

    /// Scan and return the paths that are new or whose modification time
    /// differs from the store. Does not update the store.
    pub fn detect_changes(&self) -> Result<Vec<PathBuf>> {
        let scanned = self.scanner.scan()?;
        let changed = detector::detect_changes(&self.scanner, &self.store, &scanned)?;
        Ok(changed.into_iter().map(|c| c.path).collect())
    }

    /// Record the current modification time of each path.
    pub fn refresh<P: AsRef<Path>>(&mut self, paths: &[P]) -> Result<()> {
        detector::refresh(&self.scanner, &mut self.store, paths)
    }

    /// Silent scan-and-record pass: afterwards only files modified later are
    /// reported. Returns the number of paths recorded.
    pub fn prime(&mut self) -> Result<usize> {
        let scanned = self.scanner.scan()?;
        self.refresh(&scanned)?;
        debug!(files = scanned.len(), "primed modification times");
        Ok(scanned.len())
    }

    /// Run one scan → deliver → update cycle.
    ///
    /// The handler is invoked only for non-empty change sets. Handler errors
    /// abort the cycle before the store is updated.
    pub async fn run_cycle<H>(
        &mut self,
        options: &MonitorOptions,
        handler: &mut H,
    ) -> Result<CycleReport>
    where
        H: ChangeHandler + ?Sized,
    {
        self.cycles += 1;
        let mut report = CycleReport {
            cycle: self.cycles,
            ..CycleReport::default()
        };

        self.set_phase(MonitorPhase::Scanning);
        let scanned = self.scanner.scan()?;
        let changed = detector::detect_changes(&self.scanner, &self.store, &scanned)?;
        report.detected = changed.len();

        self.set_phase(MonitorPhase::Delivering);
        let observed = if options.cascade {
            self.deliver_cascading(options, changed, scanned, handler, &mut report)
                .await?
        } else {
            deliver(options.delivery, &changed, handler, &mut report).await?;
            if report.invocations == 0 {
                scanned
            } else {
                // Pick up anything the handler created or touched.
                self.scanner.scan()?
            }
        };

        self.set_phase(MonitorPhase::Updating);
        self.refresh(&observed)?;
        report.refreshed = observed.len();

        debug!(
            cycle = report.cycle,
            detected = report.detected,
            invocations = report.invocations,
            rescans = report.rescans,
            "cycle complete"
        );
        Ok(report)
    }

    /// Deliver one unit, re-scan, re-detect, and repeat until nothing is
    /// pending. Returns the last scan.
    ///
    /// The baseline for re-detection is the store overlaid with the times
    /// observed for files already delivered in this cycle, so a delivered
    /// file comes back only if it changed again.
    async fn deliver_cascading<H>(
        &mut self,
        options: &MonitorOptions,
        mut pending: Vec<ChangedFile>,
        mut scanned: Vec<PathBuf>,
        handler: &mut H,
        report: &mut CycleReport,
    ) -> Result<Vec<PathBuf>>
    where
        H: ChangeHandler + ?Sized,
    {
        // A limit of 0 would absorb every change unseen.
        let limit = options.cascade_limit.max(1);
        let mut baseline = self.store.clone();
        let mut delivered_counts: HashMap<PathBuf, usize> = HashMap::new();

        loop {
            // Files over the limit are absorbed into the baseline unseen.
            pending.retain(|file| {
                let count = delivered_counts.get(&file.path).copied().unwrap_or(0);
                if count >= limit {
                    warn!(
                        path = ?file.path,
                        limit,
                        "file keeps changing during cascade; not delivering it again this cycle"
                    );
                    baseline.record(&file.path, file.modified);
                    false
                } else {
                    true
                }
            });

            if pending.is_empty() {
                break;
            }

            let unit: Vec<ChangedFile> = match options.delivery {
                DeliveryMode::Batched => std::mem::take(&mut pending),
                DeliveryMode::PerFile => vec![pending.remove(0)],
            };

            deliver(DeliveryMode::Batched, &unit, handler, report).await?;
            for file in &unit {
                baseline.record(&file.path, file.modified);
                *delivered_counts.entry(file.path.clone()).or_insert(0) += 1;
            }

            scanned = self.scanner.scan()?;
            report.rescans += 1;
            pending = detector::detect_changes(&self.scanner, &baseline, &scanned)?;
            trace!(pending = pending.len(), "cascade re-detect");
        }

        Ok(scanned)
    }
}

/// Hand `changed` to the handler according to `mode`. Empty sets are never
/// delivered.
async fn deliver<H>(
    mode: DeliveryMode,
    changed: &[ChangedFile],
    handler: &mut H,
    report: &mut CycleReport,
) -> Result<()>
where
    H: ChangeHandler + ?Sized,
{
    if changed.is_empty() {
        return Ok(());
    }

    let paths: Vec<PathBuf> = changed.iter().map(|c| c.path.clone()).collect();
    let units: Vec<Vec<PathBuf>> = match mode {
        DeliveryMode::Batched => vec![paths],
        DeliveryMode::PerFile => paths.into_iter().map(|p| vec![p]).collect(),
    };

    for unit in units {
        debug!(files = ?unit, "delivering changes");
        report.delivered.extend(unit.iter().cloned());
        report.invocations += 1;
        handler.handle(unit).await.map_err(DirmonError::Handler)?;
    }
    Ok(())
}
