//! Lock-free pipeline statistics

use std::sync::atomic::{AtomicUsize, Ordering};

/// Counters updated by the query pipeline
#[derive(Debug, Default)]
pub struct ControllerStats {
    pub searches_issued: AtomicUsize,
    pub detail_requests_issued: AtomicUsize,
    pub epochs_cancelled: AtomicUsize,
    pub quota_rejections: AtomicUsize,
    pub failures_swallowed: AtomicUsize,
}

impl ControllerStats {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub(crate) fn record(counter: &AtomicUsize, amount: usize) {
        counter.fetch_add(amount, Ordering::Relaxed);
    }

    /// Get snapshot of current statistics
    #[inline]
    #[must_use]
    pub fn snapshot(&self) -> ControllerStatsSnapshot {
        ControllerStatsSnapshot {
            searches_issued: self.searches_issued.load(Ordering::Relaxed),
            detail_requests_issued: self.detail_requests_issued.load(Ordering::Relaxed),
            epochs_cancelled: self.epochs_cancelled.load(Ordering::Relaxed),
            quota_rejections: self.quota_rejections.load(Ordering::Relaxed),
            failures_swallowed: self.failures_swallowed.load(Ordering::Relaxed),
        }
    }
}

/// Immutable snapshot of pipeline statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ControllerStatsSnapshot {
    pub searches_issued: usize,
    pub detail_requests_issued: usize,
    pub epochs_cancelled: usize,
    pub quota_rejections: usize,
    pub failures_swallowed: usize,
}
