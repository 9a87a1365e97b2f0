//! # Least Recently Used (LRU) cache engine
//!
//! A fixed-capacity key/value store that evicts the least recently accessed
//! entry when full, instrumented with hit/miss/latency metrics.
//!
//! ## Architecture
//!
//! ```text
//!   ┌───────────────────────────────────────────────────────────────┐
//!   │                        LruCache<K, V>                         │
//!   │                                                               │
//!   │   ┌──────────────────────────────┐  ┌───────────────────────┐ │
//!   │   │   RwLock<LruCore<K, V>>      │  │   AccessMetrics       │ │
//!   │   │                              │  │   hits / misses /     │ │
//!   │   │   FxHashMap<K, EntryId>      │  │   total_access_ns     │ │
//!   │   │        │ (index)             │  │   (relaxed atomics,   │ │
//!   │   │        ▼                     │  │    outside the lock)  │ │
//!   │   │   RecencyList<Entry<K, V>>   │  └───────────────────────┘ │
//!   │   │   head = MRU ... tail = LRU  │                            │
//!   │   └──────────────────────────────┘                            │
//!   └───────────────────────────────────────────────────────────────┘
//! ```
//!
//! The index and the recency order form one logical resource: every
//! operation that can reorder or resize them holds the write lock, so no
//! caller ever observes a partially updated index/order pair. A `get` is a
//! read-that-writes (it promotes the entry to the head), which is why it
//! takes the write lock too.
//!
//! | Method                       | Lock  | Metrics effect            |
//! |------------------------------|-------|---------------------------|
//! | `get`                        | Write | hit/miss + latency        |
//! | `put`                        | Write | latency only              |
//! | `remove`, `clear`, `touch`   | Write | none                      |
//! | `pop_lru`                    | Write | none                      |
//! | `contains`, `len`, `peek`    | Read  | none                      |
//! | `peek_lru`, `last_touched`   | Read  | none                      |
//! | `metrics_snapshot`           | Read  | none (reads the gauges)   |
//!
//! The metrics counters are relaxed atomics updated outside the structural
//! lock, so a snapshot can interleave with structural changes: each field is
//! individually consistent, the set of fields is not jointly transactional.
//!
//! ## Example
//!
//! ```
//! use lrukit::policy::lru::LruCache;
//!
//! let cache: LruCache<u32, String> = LruCache::new(2).unwrap();
//! cache.put(1, "one".to_string());
//! cache.put(2, "two".to_string());
//!
//! assert_eq!(cache.get(&1), Some("one".to_string()));
//!
//! // Key 2 is now the least recently used and gets evicted.
//! cache.put(3, "three".to_string());
//! assert!(!cache.contains(&2));
//!
//! let snap = cache.metrics_snapshot();
//! assert_eq!(snap.hits, 1);
//! assert_eq!(snap.current_size, 2);
//! ```

use std::fmt;
use std::hash::Hash;
use std::mem;
use std::time::Instant;

#[cfg(feature = "concurrency")]
use std::sync::Arc;

#[cfg(feature = "concurrency")]
use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::ds::{EntryId, RecencyList};
use crate::error::ConfigError;
#[cfg(feature = "concurrency")]
use crate::metrics::{AccessMetrics, CacheMetricsSnapshot};
#[cfg(feature = "concurrency")]
use crate::traits::ConcurrentCache;
use crate::traits::{CoreCache, LruCacheTrait, MutableCache};

/// One live cache entry: key, value, and the instant it was last accessed.
#[derive(Debug)]
struct Entry<K, V> {
    key: K,
    value: V,
    touched_at: Instant,
}

/// Single-threaded LRU engine: recency list plus key index.
///
/// Not internally synchronized; thread safety comes from the
/// [`LruCache`] wrapper. All operations are O(1) except
/// [`recency_rank`](LruCacheTrait::recency_rank) and `clear`.
pub struct LruCore<K, V>
where
    K: Eq + Hash + Clone,
{
    list: RecencyList<Entry<K, V>>,
    index: FxHashMap<K, EntryId>,
    capacity: usize,
}

impl<K, V> LruCore<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates an engine with the given capacity.
    ///
    /// Fails with [`ConfigError`] when `capacity` is zero; a cache that can
    /// never hold an entry is a configuration mistake, not a useful object.
    ///
    /// # Example
    ///
    /// ```
    /// use lrukit::policy::lru::LruCore;
    ///
    /// let cache: LruCore<u32, String> = LruCore::new(100).unwrap();
    /// assert!(LruCore::<u32, String>::new(0).is_err());
    /// ```
    pub fn new(capacity: usize) -> Result<Self, ConfigError> {
        if capacity == 0 {
            return Err(ConfigError::new("cache capacity must be greater than zero"));
        }
        Ok(LruCore {
            list: RecencyList::with_capacity(capacity),
            index: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            capacity,
        })
    }

    /// Read-only lookup that leaves the recency order untouched.
    ///
    /// # Example
    ///
    /// ```
    /// use lrukit::policy::lru::LruCore;
    /// use lrukit::traits::CoreCache;
    ///
    /// let mut cache = LruCore::new(2).unwrap();
    /// cache.insert(1, "first");
    /// cache.insert(2, "second");
    ///
    /// // Peek does not promote key 1, so it is still the eviction victim.
    /// assert_eq!(cache.peek(&1), Some(&"first"));
    /// cache.insert(3, "third");
    /// assert!(!cache.contains(&1));
    /// ```
    pub fn peek(&self, key: &K) -> Option<&V> {
        let id = *self.index.get(key)?;
        self.list.get(id).map(|entry| &entry.value)
    }

    /// Returns the instant at which `key` was last inserted, read, or
    /// touched.
    pub fn last_touched(&self, key: &K) -> Option<Instant> {
        let id = *self.index.get(key)?;
        self.list.get(id).map(|entry| entry.touched_at)
    }

    fn evict_to_fit(&mut self) {
        while self.list.len() >= self.capacity {
            match self.list.pop_back() {
                Some(evicted) => {
                    self.index.remove(&evicted.key);
                },
                None => break,
            }
        }
    }

    fn validate_invariants(&self) {
        #[cfg(debug_assertions)]
        {
            self.list.debug_validate_invariants();
            debug_assert_eq!(self.index.len(), self.list.len());
            debug_assert!(self.list.len() <= self.capacity);
            for (key, &id) in &self.index {
                match self.list.get(id) {
                    Some(entry) => debug_assert!(
                        entry.key == *key,
                        "index locator points at another key's entry"
                    ),
                    None => panic!("index locator refers to a freed slot"),
                }
            }
        }
    }
}

impl<K, V> CoreCache<K, V> for LruCore<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Inserts or overwrites, promoting the entry to most recently used.
    ///
    /// Overwriting never changes the size and never evicts; a genuinely new
    /// key evicts from the tail first if the cache is full.
    fn insert(&mut self, key: K, value: V) -> Option<V> {
        if let Some(&id) = self.index.get(&key) {
            if let Some(entry) = self.list.get_mut(id) {
                entry.touched_at = Instant::now();
                let previous = mem::replace(&mut entry.value, value);
                self.list.move_to_front(id);
                self.validate_invariants();
                return Some(previous);
            }
        }

        self.evict_to_fit();

        let id = self.list.push_front(Entry {
            key: key.clone(),
            value,
            touched_at: Instant::now(),
        });
        self.index.insert(key, id);
        self.validate_invariants();
        None
    }

    /// Looks up a value and promotes it to most recently used.
    fn get(&mut self, key: &K) -> Option<&V> {
        let id = *self.index.get(key)?;
        self.list.move_to_front(id);
        if let Some(entry) = self.list.get_mut(id) {
            entry.touched_at = Instant::now();
        }
        self.validate_invariants();
        self.list.get(id).map(|entry| &entry.value)
    }

    fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    fn len(&self) -> usize {
        self.list.len()
    }

    fn capacity(&self) -> usize {
        self.capacity
    }

    fn clear(&mut self) {
        self.list.clear();
        self.index.clear();
        self.validate_invariants();
    }
}

impl<K, V> MutableCache<K, V> for LruCore<K, V>
where
    K: Eq + Hash + Clone,
{
    fn remove(&mut self, key: &K) -> Option<V> {
        let id = self.index.remove(key)?;
        let removed = self.list.remove(id).map(|entry| entry.value);
        self.validate_invariants();
        removed
    }
}

impl<K, V> LruCacheTrait<K, V> for LruCore<K, V>
where
    K: Eq + Hash + Clone,
{
    fn pop_lru(&mut self) -> Option<(K, V)> {
        let entry = self.list.pop_back()?;
        self.index.remove(&entry.key);
        self.validate_invariants();
        Some((entry.key, entry.value))
    }

    fn peek_lru(&self) -> Option<(&K, &V)> {
        self.list.back().map(|entry| (&entry.key, &entry.value))
    }

    fn touch(&mut self, key: &K) -> bool {
        let id = match self.index.get(key) {
            Some(&id) => id,
            None => return false,
        };
        if let Some(entry) = self.list.get_mut(id) {
            entry.touched_at = Instant::now();
        }
        let moved = self.list.move_to_front(id);
        self.validate_invariants();
        moved
    }

    fn recency_rank(&self, key: &K) -> Option<usize> {
        let target = *self.index.get(key)?;
        self.list.ids().position(|id| id == target)
    }
}

impl<K, V> Extend<(K, V)> for LruCore<K, V>
where
    K: Eq + Hash + Clone,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K, V> fmt::Debug for LruCore<K, V>
where
    K: Eq + Hash + Clone,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruCore")
            .field("len", &self.list.len())
            .field("capacity", &self.capacity)
            .finish_non_exhaustive()
    }
}

#[cfg(feature = "concurrency")]
#[derive(Debug)]
struct Shared<K, V>
where
    K: Eq + Hash + Clone,
{
    core: RwLock<LruCore<K, V>>,
    metrics: AccessMetrics,
}

/// Thread-safe LRU cache: an [`LruCore`] behind a `parking_lot::RwLock`,
/// with hit/miss/latency counters kept outside the lock.
///
/// The handle is cheaply cloneable; every clone addresses the same cache.
/// Structural operations are fully serialized by the lock. Recorded
/// latencies span the whole call, including the time spent waiting for the
/// lock.
#[cfg(feature = "concurrency")]
pub struct LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    shared: Arc<Shared<K, V>>,
}

#[cfg(feature = "concurrency")]
impl<K, V> Clone for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn clone(&self) -> Self {
        LruCache {
            shared: Arc::clone(&self.shared),
        }
    }
}

#[cfg(feature = "concurrency")]
impl<K, V> fmt::Debug for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let core = self.shared.core.read();
        f.debug_struct("LruCache")
            .field("len", &core.len())
            .field("capacity", &core.capacity())
            .finish_non_exhaustive()
    }
}

#[cfg(feature = "concurrency")]
impl<K, V> LruCache<K, V>
where
    K: Eq + Hash + Clone + Send + Sync,
    V: Clone + Send + Sync,
{
    /// Creates a thread-safe cache with the given capacity.
    ///
    /// Fails with [`ConfigError`] when `capacity` is zero.
    ///
    /// # Example
    ///
    /// ```
    /// use lrukit::policy::lru::LruCache;
    ///
    /// let cache: LruCache<u32, String> = LruCache::new(100).unwrap();
    /// assert_eq!(cache.capacity(), 100);
    /// assert!(cache.is_empty());
    ///
    /// assert!(LruCache::<u32, String>::new(0).is_err());
    /// ```
    pub fn new(capacity: usize) -> Result<Self, ConfigError> {
        Ok(LruCache {
            shared: Arc::new(Shared {
                core: RwLock::new(LruCore::new(capacity)?),
                metrics: AccessMetrics::new(),
            }),
        })
    }

    /// Looks up a value, promoting it to most recently used.
    ///
    /// Counts a hit or a miss and adds the wall-clock duration of the call
    /// (lock wait included) to the latency accumulator. Returns a clone of
    /// the stored value.
    ///
    /// # Example
    ///
    /// ```
    /// use lrukit::policy::lru::LruCache;
    ///
    /// let cache: LruCache<u32, String> = LruCache::new(10).unwrap();
    /// cache.put(1, "value".to_string());
    ///
    /// assert_eq!(cache.get(&1), Some("value".to_string()));
    /// assert_eq!(cache.get(&999), None);
    /// ```
    pub fn get(&self, key: &K) -> Option<V> {
        let started = Instant::now();
        let mut core = self.shared.core.write();
        let value = core.get(key).cloned();
        if value.is_some() {
            self.shared.metrics.record_hit(started.elapsed());
        } else {
            self.shared.metrics.record_miss(started.elapsed());
        }
        value
    }

    /// Inserts or overwrites a value, promoting it to most recently used.
    ///
    /// Evicts from the tail first when a genuinely new key arrives at
    /// capacity. Adds the call's latency to the accumulator without touching
    /// the hit/miss counters. Always returns `true`; the return value is
    /// reserved for future rejection policies.
    ///
    /// # Example
    ///
    /// ```
    /// use lrukit::policy::lru::LruCache;
    ///
    /// let cache: LruCache<u32, String> = LruCache::new(1).unwrap();
    /// assert!(cache.put(1, "one".to_string()));
    /// assert!(cache.put(2, "two".to_string())); // evicts key 1
    /// assert!(!cache.contains(&1));
    /// ```
    pub fn put(&self, key: K, value: V) -> bool {
        let started = Instant::now();
        let mut core = self.shared.core.write();
        core.insert(key, value);
        self.shared.metrics.record_write(started.elapsed());
        true
    }

    /// Removes an entry. Returns `true` iff the key was present.
    ///
    /// No effect on the metrics counters.
    pub fn remove(&self, key: &K) -> bool {
        let mut core = self.shared.core.write();
        core.remove(key).is_some()
    }

    /// Membership test; does not reorder and does not count as an access.
    ///
    /// # Example
    ///
    /// ```
    /// use lrukit::policy::lru::LruCache;
    ///
    /// let cache: LruCache<u32, u32> = LruCache::new(10).unwrap();
    /// cache.put(1, 10);
    ///
    /// assert!(cache.contains(&1));
    /// assert!(!cache.contains(&2));
    /// assert_eq!(cache.metrics_snapshot().total_accesses(), 0);
    /// ```
    pub fn contains(&self, key: &K) -> bool {
        let core = self.shared.core.read();
        core.contains(key)
    }

    /// Read-only lookup under the shared lock; no reorder, no metrics.
    pub fn peek(&self, key: &K) -> Option<V> {
        let core = self.shared.core.read();
        core.peek(key).cloned()
    }

    /// Marks an entry as most recently used without reading its value.
    ///
    /// Returns `true` iff the key was present. No metrics effect.
    pub fn touch(&self, key: &K) -> bool {
        let mut core = self.shared.core.write();
        core.touch(key)
    }

    /// Removes and returns the least recently used entry.
    pub fn pop_lru(&self) -> Option<(K, V)> {
        let mut core = self.shared.core.write();
        core.pop_lru()
    }

    /// Observes the least recently used entry without removing it.
    ///
    /// # Example
    ///
    /// ```
    /// use lrukit::policy::lru::LruCache;
    ///
    /// let cache: LruCache<u32, &str> = LruCache::new(10).unwrap();
    /// cache.put(1, "first");
    /// cache.put(2, "second");
    ///
    /// assert_eq!(cache.peek_lru(), Some((1, "first")));
    /// assert_eq!(cache.len(), 2);
    /// ```
    pub fn peek_lru(&self) -> Option<(K, V)> {
        let core = self.shared.core.read();
        core.peek_lru().map(|(k, v)| (k.clone(), v.clone()))
    }

    /// Returns the instant at which `key` was last inserted, read, or
    /// touched.
    pub fn last_touched(&self, key: &K) -> Option<Instant> {
        let core = self.shared.core.read();
        core.last_touched(key)
    }

    /// Current number of entries.
    pub fn len(&self) -> usize {
        let core = self.shared.core.read();
        core.len()
    }

    /// Returns `true` if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Configured maximum number of entries.
    pub fn capacity(&self) -> usize {
        let core = self.shared.core.read();
        core.capacity()
    }

    /// Removes every entry. The metrics counters are unaffected.
    pub fn clear(&self) {
        let mut core = self.shared.core.write();
        core.clear();
    }

    /// Point-in-time metrics snapshot.
    ///
    /// Counters are relaxed atomic loads; size is read under the shared
    /// lock inside the same call. The fields are each internally consistent
    /// but may describe slightly different instants under concurrent use.
    ///
    /// # Example
    ///
    /// ```
    /// use lrukit::policy::lru::LruCache;
    ///
    /// let cache: LruCache<u32, u32> = LruCache::new(10).unwrap();
    /// cache.put(1, 10);
    /// cache.get(&1);
    /// cache.get(&2);
    ///
    /// let snap = cache.metrics_snapshot();
    /// assert_eq!(snap.hits, 1);
    /// assert_eq!(snap.misses, 1);
    /// assert_eq!(snap.hit_ratio, 0.5);
    /// assert_eq!(snap.current_size, 1);
    /// ```
    pub fn metrics_snapshot(&self) -> CacheMetricsSnapshot {
        let core = self.shared.core.read();
        self.shared.metrics.snapshot(core.len(), core.capacity())
    }

    /// Zeroes the hit, miss, and latency counters; entries are untouched.
    pub fn reset_metrics(&self) {
        self.shared.metrics.reset();
    }
}

#[cfg(feature = "concurrency")]
impl<K, V> ConcurrentCache for LruCache<K, V>
where
    K: Eq + Hash + Clone + Send + Sync,
    V: Clone + Send + Sync,
{
}
