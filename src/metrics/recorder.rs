//! Access metrics accumulator.
//!
//! Hit, miss, and total-latency counters for the cache engine. The counters
//! are relaxed atomics that live *outside* the structural lock: callers
//! record into them after an operation completes, and snapshot reads may
//! interleave with in-flight structural changes. Each field is internally
//! consistent; the set of fields is not jointly transactional.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use crate::metrics::snapshot::CacheMetricsSnapshot;

/// Monotonic hit/miss/latency counters, independently resettable.
#[derive(Debug, Default)]
pub struct AccessMetrics {
    hits: AtomicU64,
    misses: AtomicU64,
    total_access_ns: AtomicU64,
}

impl AccessMetrics {
    /// Creates a zeroed accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a lookup that found its key, with the wall-clock duration of
    /// the whole call.
    pub fn record_hit(&self, elapsed: Duration) {
        self.hits.fetch_add(1, Ordering::Relaxed);
        self.record_latency(elapsed);
    }

    /// Records a lookup that missed, with the wall-clock duration of the
    /// whole call.
    pub fn record_miss(&self, elapsed: Duration) {
        self.misses.fetch_add(1, Ordering::Relaxed);
        self.record_latency(elapsed);
    }

    /// Records the latency of a write without touching the hit/miss counters.
    pub fn record_write(&self, elapsed: Duration) {
        self.record_latency(elapsed);
    }

    /// Total recorded hits.
    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    /// Total recorded misses.
    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }

    /// Total accumulated access latency in nanoseconds.
    pub fn total_access_ns(&self) -> u64 {
        self.total_access_ns.load(Ordering::Relaxed)
    }

    /// Hit ratio over all recorded lookups, `0.0` when none have occurred.
    pub fn hit_ratio(&self) -> f64 {
        let hits = self.hits();
        let total = hits + self.misses();
        if total == 0 {
            0.0
        } else {
            hits as f64 / total as f64
        }
    }

    /// Mean latency per recorded lookup in nanoseconds, `0.0` when none
    /// have occurred.
    pub fn average_access_ns(&self) -> f64 {
        let total = self.hits() + self.misses();
        if total == 0 {
            0.0
        } else {
            self.total_access_ns() as f64 / total as f64
        }
    }

    /// Zeroes all counters. Entries held by the cache are unaffected.
    pub fn reset(&self) {
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
        self.total_access_ns.store(0, Ordering::Relaxed);
    }

    /// Builds a point-in-time snapshot, combining the counters with the
    /// caller-supplied size and capacity gauges.
    pub fn snapshot(&self, current_size: usize, capacity: usize) -> CacheMetricsSnapshot {
        CacheMetricsSnapshot {
            hits: self.hits(),
            misses: self.misses(),
            hit_ratio: self.hit_ratio(),
            average_access_time_ns: self.average_access_ns(),
            current_size,
            capacity,
        }
    }

    fn record_latency(&self, elapsed: Duration) {
        let ns = u64::try_from(elapsed.as_nanos()).unwrap_or(u64::MAX);
        self.total_access_ns.fetch_add(ns, Ordering::Relaxed);
    }
}
