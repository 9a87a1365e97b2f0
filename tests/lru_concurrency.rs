// ==============================================
// LRU CONCURRENCY TESTS (integration)
// ==============================================
//
// Multi-threaded stress tests against one shared cache instance. These
// assert aggregate invariants only (size bound, counter conservation,
// ratio bounds), never exact interleavings.

#![cfg(feature = "concurrency")]

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;

use lrukit::policy::lru::LruCache;

/// Deterministic XorShift64 generator, seeded per worker.
struct XorShift64 {
    state: u64,
}

impl XorShift64 {
    fn new(seed: u64) -> Self {
        Self { state: seed.max(1) }
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }
}

// ==============================================
// Write Path
// ==============================================

mod concurrent_puts {
    use super::*;

    #[test]
    fn distinct_key_ranges_fill_to_capacity() {
        let cache: LruCache<u64, u64> = LruCache::new(1000).unwrap();
        let num_threads = 8u64;
        let per_thread = 1000u64;
        let barrier = Arc::new(Barrier::new(num_threads as usize));

        let handles: Vec<_> = (0..num_threads)
            .map(|t| {
                let cache = cache.clone();
                let barrier = barrier.clone();
                thread::spawn(move || {
                    barrier.wait();
                    let start = t * per_thread;
                    for i in 0..per_thread {
                        cache.put(start + i, (start + i) * 2);
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        // 8000 distinct inserts through a 1000-slot cache end exactly full.
        assert_eq!(cache.len(), 1000);

        // Every surviving entry still carries the value its writer stored.
        for t in 0..num_threads {
            for i in 0..per_thread {
                let key = t * per_thread + i;
                if let Some(value) = cache.peek(&key) {
                    assert_eq!(value, key * 2);
                }
            }
        }
    }
}

// ==============================================
// Read Path + Counter Conservation
// ==============================================

mod concurrent_gets {
    use super::*;

    #[test]
    fn every_get_is_counted_exactly_once() {
        let cache: LruCache<u64, u64> = LruCache::new(1000).unwrap();
        for i in 0..100u64 {
            cache.put(i, i * 10);
        }

        let num_threads = 16u64;
        let gets_per_thread = 1000u64;
        let barrier = Arc::new(Barrier::new(num_threads as usize));
        let matched = Arc::new(AtomicU64::new(0));

        let handles: Vec<_> = (0..num_threads)
            .map(|t| {
                let cache = cache.clone();
                let barrier = barrier.clone();
                let matched = matched.clone();
                thread::spawn(move || {
                    let mut rng = XorShift64::new(0x9E3779B9 + t);
                    barrier.wait();
                    for _ in 0..gets_per_thread {
                        let key = rng.next_u64() % 100;
                        if let Some(value) = cache.get(&key) {
                            if value == key * 10 {
                                matched.fetch_add(1, Ordering::Relaxed);
                            }
                        }
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        let snap = cache.metrics_snapshot();
        let issued = num_threads * gets_per_thread;
        assert_eq!(snap.hits + snap.misses, issued);
        // Nothing was evicted or removed, so every lookup was a clean hit.
        assert_eq!(snap.hits, issued);
        assert_eq!(matched.load(Ordering::Relaxed), issued);
    }
}

// ==============================================
// Mixed Workload
// ==============================================

mod mixed_operations {
    use super::*;

    #[test]
    fn aggregate_invariants_hold_after_a_stress_run() {
        let cache: LruCache<u64, u64> = LruCache::new(100).unwrap();
        let num_threads = 12u64;
        let ops_per_thread = 500u64;
        let barrier = Arc::new(Barrier::new(num_threads as usize));
        let gets_issued = Arc::new(AtomicU64::new(0));

        let handles: Vec<_> = (0..num_threads)
            .map(|t| {
                let cache = cache.clone();
                let barrier = barrier.clone();
                let gets_issued = gets_issued.clone();
                thread::spawn(move || {
                    let mut rng = XorShift64::new(0xDEADBEEF ^ (t << 32));
                    barrier.wait();
                    for _ in 0..ops_per_thread {
                        let key = rng.next_u64() % 2000;
                        match rng.next_u64() % 10 {
                            0..=3 => {
                                cache.put(key, key * 100);
                            },
                            4..=6 => {
                                cache.get(&key);
                                gets_issued.fetch_add(1, Ordering::Relaxed);
                            },
                            7..=8 => {
                                cache.contains(&key);
                            },
                            _ => {
                                cache.remove(&key);
                            },
                        }
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        let snap = cache.metrics_snapshot();
        assert!(cache.len() <= cache.capacity());
        assert_eq!(snap.hits + snap.misses, gets_issued.load(Ordering::Relaxed));
        assert!((0.0..=1.0).contains(&snap.hit_ratio));
        assert!(snap.average_access_time_ns >= 0.0);
    }
}

// ==============================================
// Metrics Under Concurrency
// ==============================================

mod metrics_concurrency {
    use super::*;

    #[test]
    fn snapshots_taken_during_mutation_are_internally_consistent() {
        let cache: LruCache<u64, u64> = LruCache::new(64).unwrap();
        let num_writers = 4u64;
        let barrier = Arc::new(Barrier::new(num_writers as usize + 1));

        let handles: Vec<_> = (0..num_writers)
            .map(|t| {
                let cache = cache.clone();
                let barrier = barrier.clone();
                thread::spawn(move || {
                    let mut rng = XorShift64::new(0xABCD + t);
                    barrier.wait();
                    for _ in 0..2000 {
                        let key = rng.next_u64() % 256;
                        cache.put(key, key);
                        cache.get(&key);
                    }
                })
            })
            .collect();

        barrier.wait();
        for _ in 0..500 {
            let snap = cache.metrics_snapshot();
            assert!(snap.current_size <= snap.capacity);
            assert!((0.0..=1.0).contains(&snap.hit_ratio));
            assert!(snap.hits <= snap.total_accesses());
        }

        for handle in handles {
            handle.join().unwrap();
        }
    }

    #[test]
    fn reset_after_workers_join_zeroes_counters_only() {
        let cache: LruCache<u64, u64> = LruCache::new(32).unwrap();
        let handles: Vec<_> = (0..8u64)
            .map(|t| {
                let cache = cache.clone();
                thread::spawn(move || {
                    for i in 0..100u64 {
                        cache.put(t * 100 + i, i);
                        cache.get(&(t * 100 + i));
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        let before = cache.len();
        cache.reset_metrics();

        let snap = cache.metrics_snapshot();
        assert_eq!(snap.hits, 0);
        assert_eq!(snap.misses, 0);
        assert_eq!(snap.average_access_time_ns, 0.0);
        assert_eq!(cache.len(), before);
    }
}
