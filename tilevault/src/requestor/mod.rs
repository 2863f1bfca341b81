//! Cooperative cancellation and progress reporting for batch loads.
//!
//! A caller redrawing a viewport issues one load per visible tile. Between
//! tiles (never mid-fetch) the vault polls [`should_continue`]; a `false`
//! abandons the rest of the batch while the in-flight tile is allowed to
//! finish. [`list_update`] fires after each produced tile so the caller can
//! render incrementally instead of waiting for the whole batch.
//!
//! [`should_continue`]: TileRequestor::should_continue
//! [`list_update`]: TileRequestor::list_update

/// Callback supplied by a caller issuing a batch of tile loads.
pub trait TileRequestor: Send + Sync {
    /// Polled between tile loads; `false` aborts the remainder of the batch.
    fn should_continue(&self) -> bool;

    /// Invoked after each tile (real or placeholder) is produced.
    fn list_update(&self);
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

    /// Requestor double that counts updates and can be told to stop after a
    /// fixed number of continue polls.
    #[derive(Default)]
    pub struct CountingRequestor {
        stop_after: Option<u64>,
        polls: AtomicU64,
        updates: AtomicU64,
        cancelled: AtomicBool,
    }

    impl CountingRequestor {
        pub fn new() -> Self {
            Self::default()
        }

        /// Answers `true` for the first `n` polls, then `false` forever.
        pub fn stop_after(n: u64) -> Self {
            Self {
                stop_after: Some(n),
                ..Self::default()
            }
        }

        /// Flip the requestor to cancelled from another task.
        pub fn cancel(&self) {
            self.cancelled.store(true, Ordering::SeqCst);
        }

        pub fn polls(&self) -> u64 {
            self.polls.load(Ordering::SeqCst)
        }

        pub fn updates(&self) -> u64 {
            self.updates.load(Ordering::SeqCst)
        }
    }

    impl TileRequestor for CountingRequestor {
        fn should_continue(&self) -> bool {
            let seen = self.polls.fetch_add(1, Ordering::SeqCst);
            if self.cancelled.load(Ordering::SeqCst) {
                return false;
            }
            match self.stop_after {
                Some(n) => seen < n,
                None => true,
            }
        }

        fn list_update(&self) {
            self.updates.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn test_counting_requestor_stops_after_n_polls() {
        let requestor = CountingRequestor::stop_after(2);

        assert!(requestor.should_continue());
        assert!(requestor.should_continue());
        assert!(!requestor.should_continue());
        assert_eq!(requestor.polls(), 3);
    }

    #[test]
    fn test_cancel_overrides_stop_after() {
        let requestor = CountingRequestor::new();
        assert!(requestor.should_continue());

        requestor.cancel();

        assert!(!requestor.should_continue());
    }

    #[test]
    fn test_list_update_counts() {
        let requestor = CountingRequestor::new();
        requestor.list_update();
        requestor.list_update();

        assert_eq!(requestor.updates(), 2);
    }
}
