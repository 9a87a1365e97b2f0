pub use crate::ds::{EntryId, RecencyList};
pub use crate::error::ConfigError;
pub use crate::metrics::{AccessMetrics, CacheMetricsSnapshot};
#[cfg(feature = "concurrency")]
pub use crate::policy::lru::LruCache;
pub use crate::policy::lru::LruCore;
pub use crate::traits::{ConcurrentCache, CoreCache, LruCacheTrait, MutableCache};
