//! Error types for the lrukit library.
//!
//! The cache exposes exactly one failure mode: invalid configuration at
//! construction time. Every steady-state operation is total; a missing key
//! is a normal `Option`/`bool` result, never an error.
//!
//! ```
//! use lrukit::error::ConfigError;
//! use lrukit::policy::lru::LruCore;
//!
//! let cache: Result<LruCore<u64, String>, ConfigError> = LruCore::new(100);
//! assert!(cache.is_ok());
//!
//! let err = LruCore::<u64, String>::new(0).unwrap_err();
//! assert!(err.to_string().contains("capacity"));
//! ```

use std::fmt;

/// Error returned when cache configuration parameters are invalid.
///
/// Produced only by fallible constructors (a zero capacity). Carries a
/// human-readable description of which parameter failed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError(String);

impl ConfigError {
    /// Creates a new `ConfigError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for ConfigError {}
