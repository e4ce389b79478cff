//! Tunables and bookkeeping for the hold expiry sweep.

use serde::Serialize;

/// Default seconds between sweeps. An expired hold is reclaimed within one
/// interval of its deadline.
pub const DEFAULT_SWEEP_INTERVAL_SECS: u64 = 60;

/// Default page size when scanning expired holds.
pub const DEFAULT_SWEEP_BATCH_SIZE: i64 = 100;

/// Hard cap on the batch size.
pub const MAX_SWEEP_BATCH_SIZE: i64 = 1000;

/// Clamp a configured batch size into `1..=MAX_SWEEP_BATCH_SIZE`.
pub fn clamp_batch_size(size: i64) -> i64 {
    size.clamp(1, MAX_SWEEP_BATCH_SIZE)
}

/// Result of one sweep pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SweepReport {
    /// Expired holds found by the pass.
    pub scanned: usize,
    /// Holds returned to the inventory by this pass.
    pub expired: usize,
    /// Holds already gone (confirmed, cancelled or reclaimed concurrently).
    pub skipped: usize,
    /// Holds whose expiry failed with a store error.
    pub failed: usize,
}

impl SweepReport {
    pub fn is_idle(&self) -> bool {
        self.scanned == 0
    }
}
