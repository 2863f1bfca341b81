//! Point-in-time copies of the vault counters.

use std::fmt;

/// A point-in-time copy of the load-path counters.
///
/// Cheap to copy and safe to hold across await points; the live counters
/// keep moving after the snapshot is taken.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TelemetrySnapshot {
    /// Tiles served from the memory cache.
    pub memory_hits: u64,
    /// Tiles served from the disk mirror.
    pub disk_hits: u64,
    /// Remote fetch attempts issued.
    pub remote_fetches: u64,
    /// Remote fetch attempts that failed.
    pub remote_failures: u64,
    /// Placeholder tiles handed out in place of real ones.
    pub placeholders_served: u64,
}

impl TelemetrySnapshot {
    /// Total number of loads answered without touching the network.
    pub fn local_hits(&self) -> u64 {
        self.memory_hits + self.disk_hits
    }
}

impl fmt::Display for TelemetrySnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "memory {} | disk {} | remote {} ({} failed) | placeholders {}",
            self.memory_hits,
            self.disk_hits,
            self.remote_fetches,
            self.remote_failures,
            self.placeholders_served
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_hits_sums_tiers() {
        let snapshot = TelemetrySnapshot {
            memory_hits: 3,
            disk_hits: 4,
            ..Default::default()
        };
        assert_eq!(snapshot.local_hits(), 7);
    }

    #[test]
    fn test_display_contains_counters() {
        let snapshot = TelemetrySnapshot {
            memory_hits: 1,
            disk_hits: 2,
            remote_fetches: 3,
            remote_failures: 1,
            placeholders_served: 5,
        };
        let rendered = snapshot.to_string();
        assert!(rendered.contains("memory 1"));
        assert!(rendered.contains("disk 2"));
        assert!(rendered.contains("remote 3"));
        assert!(rendered.contains("placeholders 5"));
    }
}
