//! Atomic counters recorded by the tile load path.

use std::sync::atomic::{AtomicU64, Ordering};

use super::TelemetrySnapshot;

/// Counters for the tile retrieval tiers.
///
/// All counters are monotonically increasing for the lifetime of the vault;
/// `reset()` does not rewind them. Updates use relaxed ordering - the
/// counters are statistics, not synchronization points.
#[derive(Debug, Default)]
pub struct VaultMetrics {
    memory_hits: AtomicU64,
    disk_hits: AtomicU64,
    remote_fetches: AtomicU64,
    remote_failures: AtomicU64,
    placeholders_served: AtomicU64,
}

impl VaultMetrics {
    /// Creates a fresh metrics block with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a tile served straight from the memory cache.
    pub fn record_memory_hit(&self) {
        self.memory_hits.fetch_add(1, Ordering::Relaxed);
    }

    /// Records a tile satisfied by the disk mirror.
    pub fn record_disk_hit(&self) {
        self.disk_hits.fetch_add(1, Ordering::Relaxed);
    }

    /// Records a remote fetch attempt reaching the network.
    pub fn record_remote_fetch(&self) {
        self.remote_fetches.fetch_add(1, Ordering::Relaxed);
    }

    /// Records a remote fetch that came back with an error.
    pub fn record_remote_failure(&self) {
        self.remote_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Records a placeholder handed to the caller in place of a real tile.
    pub fn record_placeholder(&self) {
        self.placeholders_served.fetch_add(1, Ordering::Relaxed);
    }

    /// Takes a point-in-time copy of all counters.
    pub fn snapshot(&self) -> TelemetrySnapshot {
        TelemetrySnapshot {
            memory_hits: self.memory_hits.load(Ordering::Relaxed),
            disk_hits: self.disk_hits.load(Ordering::Relaxed),
            remote_fetches: self.remote_fetches.load(Ordering::Relaxed),
            remote_failures: self.remote_failures.load(Ordering::Relaxed),
            placeholders_served: self.placeholders_served.load(Ordering::Relaxed),
        }
    }
}
