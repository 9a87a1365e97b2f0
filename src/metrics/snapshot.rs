//! Point-in-time views of the access counters.

/// Snapshot of the cache's access metrics.
///
/// Composed from independently updated counters plus size/capacity gauges
/// captured at snapshot time; the fields are each internally consistent but
/// are not guaranteed to describe a single instant under concurrent use.
#[derive(Debug, Default, Clone, Copy)]
pub struct CacheMetricsSnapshot {
    /// Lookups that found their key.
    pub hits: u64,
    /// Lookups that did not.
    pub misses: u64,
    /// `hits / (hits + misses)`, `0.0` when no lookups have occurred.
    pub hit_ratio: f64,
    /// Mean wall-clock latency per lookup in nanoseconds, `0.0` when no
    /// lookups have occurred. Write latencies accumulate into the numerator.
    pub average_access_time_ns: f64,

    // gauges captured at snapshot time
    /// Number of live entries.
    pub current_size: usize,
    /// Configured maximum number of entries.
    pub capacity: usize,
}

impl CacheMetricsSnapshot {
    /// Total number of recorded lookups.
    pub fn total_accesses(&self) -> u64 {
        self.hits + self.misses
    }
}
