//! Per-run search counters.

use std::time::Duration;

/// Read-only counters updated by the driver during one run.
///
/// Reset at the start of every [`crate::search::Explorer::explore`] call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Decisions popped and processed (never exceeds `max_moves`).
    pub decisions: u64,
    /// Decisions whose move failed to execute.
    pub failed_decisions: u64,
    /// Decisions skipped because the closed set already held them.
    pub duplicates_suppressed: u64,
    /// States left unexpanded by the depth bound.
    pub depth_cutoffs: u64,
    /// States that entered the arena, root included.
    pub nodes_created: u64,
    /// Largest number of states held at once.
    pub live_nodes_high_water: u64,
    /// Largest frontier size seen.
    pub frontier_high_water: u64,
    /// Wall-clock time of the run.
    pub elapsed: Duration,
}

impl SearchStats {
    /// Decisions whose move executed.
    #[must_use]
    pub fn successful_decisions(&self) -> u64 {
        self.decisions - self.failed_decisions
    }

    /// JSON form for reports. `elapsed` is omitted so equal runs produce
    /// equal bytes.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "decisions": self.decisions,
            "depth_cutoffs": self.depth_cutoffs,
            "duplicates_suppressed": self.duplicates_suppressed,
            "failed_decisions": self.failed_decisions,
            "frontier_high_water": self.frontier_high_water,
            "live_nodes_high_water": self.live_nodes_high_water,
            "nodes_created": self.nodes_created,
        })
    }
}
