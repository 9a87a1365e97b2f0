pub mod lru;

#[cfg(feature = "concurrency")]
pub use lru::LruCache;
pub use lru::LruCore;
