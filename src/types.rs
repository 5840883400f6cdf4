/// How the changed files of one cycle are handed to the change handler.
///
/// - `Batched`: one call with every changed file (default).
/// - `PerFile`: one call per changed file, in discovery order. This is the
///   CLI's `--loop` flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeliveryMode {
    #[default]
    Batched,
    PerFile,
}

impl DeliveryMode {
    /// Map the boolean `loop` flag onto a mode.
    pub fn from_loop_flag(per_file: bool) -> Self {
        if per_file {
            DeliveryMode::PerFile
        } else {
            DeliveryMode::Batched
        }
    }
}

/// Where the monitor is within a cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MonitorPhase {
    /// Waiting to scan. Also the state before the first cycle.
    #[default]
    Idle,
    Scanning,
    Delivering,
    Updating,
    Sleeping,
    /// The loop observed cancellation and returned.
    Stopped,
}
