//! Load-path telemetry for observability and test instrumentation.
//!
//! This module counts which tier satisfied each tile request. It uses
//! lock-free atomic counters so the hot load path pays almost nothing for
//! instrumentation.
//!
//! # Architecture
//!
//! ```text
//! TileVault tiers ─────► VaultMetrics ─────► TelemetrySnapshot ─────► Views
//!                        (atomic counters)   (point-in-time copy)     (CLI, tests)
//! ```
//!
//! # Example
//!
//! ```
//! use tilevault::telemetry::VaultMetrics;
//!
//! let metrics = VaultMetrics::new();
//! metrics.record_memory_hit();
//! metrics.record_remote_fetch();
//!
//! let snapshot = metrics.snapshot();
//! assert_eq!(snapshot.memory_hits, 1);
//! assert_eq!(snapshot.remote_fetches, 1);
//! ```

mod metrics;
mod snapshot;

pub use metrics::VaultMetrics;
pub use snapshot::TelemetrySnapshot;
