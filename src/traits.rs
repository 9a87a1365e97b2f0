//! # Cache trait hierarchy
//!
//! Defines the interface layers for the cache engine, separating universal
//! operations from recency-specific ones.
//!
//! ```text
//!   ┌──────────────────────────────────┐
//!   │         CoreCache<K, V>          │
//!   │  insert / get / contains / len   │
//!   │  is_empty / capacity / clear     │
//!   └────────────────┬─────────────────┘
//!                    │
//!                    ▼
//!   ┌──────────────────────────────────┐
//!   │        MutableCache<K, V>        │
//!   │  remove / remove_batch           │
//!   └────────────────┬─────────────────┘
//!                    │
//!                    ▼
//!   ┌──────────────────────────────────┐
//!   │       LruCacheTrait<K, V>        │
//!   │  pop_lru / peek_lru / touch      │
//!   │  recency_rank                    │
//!   └──────────────────────────────────┘
//!
//!   ConcurrentCache: Send + Sync marker for thread-safe engines.
//! ```
//!
//! [`LruCore`](crate::policy::lru::LruCore) implements the full stack; the
//! thread-safe wrapper exposes the same operations as inherent methods
//! behind its lock and carries the [`ConcurrentCache`] marker.

/// Core cache operations every cache supports, regardless of policy.
///
/// # Example
///
/// ```
/// use lrukit::traits::CoreCache;
/// use lrukit::policy::lru::LruCore;
///
/// fn warm_cache<C: CoreCache<u64, String>>(cache: &mut C, data: &[(u64, String)]) {
///     for (key, value) in data {
///         cache.insert(*key, value.clone());
///     }
/// }
///
/// let mut cache = LruCore::new(100).unwrap();
/// warm_cache(&mut cache, &[(1, "one".to_string()), (2, "two".to_string())]);
/// assert_eq!(cache.len(), 2);
/// ```
pub trait CoreCache<K, V> {
    /// Inserts a key-value pair, returning the previous value if the key
    /// was already present.
    ///
    /// A present key is overwritten in place and marked most recently used;
    /// an absent key may trigger eviction first if the cache is full.
    fn insert(&mut self, key: K, value: V) -> Option<V>;

    /// Looks up a value by key.
    ///
    /// Updates recency state on a hit; use [`contains`](Self::contains) for
    /// a membership check that leaves the eviction order alone.
    fn get(&mut self, key: &K) -> Option<&V>;

    /// Checks if a key exists without updating recency state.
    fn contains(&self, key: &K) -> bool;

    /// Returns the current number of entries.
    fn len(&self) -> usize;

    /// Returns `true` if the cache holds no entries.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the maximum capacity.
    fn capacity(&self) -> usize;

    /// Removes all entries.
    fn clear(&mut self);
}

/// Caches that support arbitrary key-based removal.
///
/// # Example
///
/// ```
/// use lrukit::traits::{CoreCache, MutableCache};
/// use lrukit::policy::lru::LruCore;
///
/// let mut cache = LruCore::new(10).unwrap();
/// cache.insert(1, "one");
///
/// assert_eq!(cache.remove(&1), Some("one"));
/// assert_eq!(cache.remove(&1), None); // already gone
/// ```
pub trait MutableCache<K, V>: CoreCache<K, V> {
    /// Removes a key-value pair, returning the value if the key existed.
    fn remove(&mut self, key: &K) -> Option<V>;

    /// Removes multiple keys, returning each outcome in input order.
    ///
    /// The default implementation loops over [`remove`](Self::remove).
    fn remove_batch(&mut self, keys: &[K]) -> Vec<Option<V>> {
        keys.iter().map(|k| self.remove(k)).collect()
    }
}

/// LRU-specific operations over the recency order.
///
/// Entries are totally ordered by recency; the least recently accessed
/// entry is the eviction victim.
///
/// # Example
///
/// ```
/// use lrukit::traits::{CoreCache, LruCacheTrait};
/// use lrukit::policy::lru::LruCore;
///
/// let mut cache = LruCore::new(3).unwrap();
/// cache.insert(1, "first");
/// cache.insert(2, "second");
/// cache.insert(3, "third");
///
/// // Key 1 is the eviction victim until it is accessed again.
/// assert_eq!(cache.peek_lru().map(|(k, _)| *k), Some(1));
/// cache.get(&1);
/// assert_eq!(cache.peek_lru().map(|(k, _)| *k), Some(2));
///
/// let (key, _) = cache.pop_lru().unwrap();
/// assert_eq!(key, 2);
/// ```
pub trait LruCacheTrait<K, V>: MutableCache<K, V> {
    /// Removes and returns the least recently used entry.
    fn pop_lru(&mut self) -> Option<(K, V)>;

    /// Observes the least recently used entry without removing it or
    /// updating recency state.
    fn peek_lru(&self) -> Option<(&K, &V)>;

    /// Marks an entry as most recently used without reading its value.
    ///
    /// Returns `true` if the key was present.
    ///
    /// ```
    /// use lrukit::traits::{CoreCache, LruCacheTrait};
    /// use lrukit::policy::lru::LruCore;
    ///
    /// let mut cache = LruCore::new(2).unwrap();
    /// cache.insert(1, "a");
    /// cache.insert(2, "b");
    ///
    /// assert!(cache.touch(&1));
    /// cache.insert(3, "c"); // evicts key 2, not the touched key 1
    /// assert!(cache.contains(&1));
    /// assert!(!cache.contains(&2));
    /// assert!(!cache.touch(&99));
    /// ```
    fn touch(&mut self, key: &K) -> bool;

    /// Returns a key's position in the recency order (0 = most recent).
    ///
    /// O(n) scan over the order; intended for diagnostics and tests.
    fn recency_rank(&self, key: &K) -> Option<usize>;
}

/// Marker trait for engines that are safe to share across threads.
///
/// Implementors guarantee that every operation is internally synchronized.
pub trait ConcurrentCache: Send + Sync {}
