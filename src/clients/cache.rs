//! Pluggable response cache.
//!
//! The pipeline only talks to a cache through [`RequestCache`]. Keys are
//! opaque strings of the form `"<endpoint>:<METHOD>"`. Implementations
//! handle their own locking, since a client may be shared between tasks.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

/// Storage for raw response bodies.
///
/// `get` must return an owned copy so callers cannot corrupt stored entries.
///
/// # Example
///
/// ```rust
/// use shopify_rest::clients::{MemoryCache, RequestCache};
///
/// let cache = MemoryCache::new();
/// cache.set("/admin/api/2025-10/blogs.json:GET", b"{}".to_vec());
/// assert!(cache.contains("/admin/api/2025-10/blogs.json:GET"));
/// assert_eq!(cache.get("/admin/api/2025-10/blogs.json:GET"), Some(b"{}".to_vec()));
/// ```
pub trait RequestCache: Send + Sync {
    /// Returns `true` if an entry exists for `key`.
    fn contains(&self, key: &str) -> bool;

    /// Returns a copy of the entry for `key`.
    fn get(&self, key: &str) -> Option<Vec<u8>>;

    /// Stores `value` under `key`, replacing any existing entry.
    fn set(&self, key: &str, value: Vec<u8>);
}

/// An unbounded in-memory [`RequestCache`].
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Returns `true` if nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Removes every entry.
    pub fn clear(&self) {
        self.lock().clear();
    }

    // A panic while holding the lock cannot leave a half-written map entry.
    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, Vec<u8>>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl RequestCache for MemoryCache {
    fn contains(&self, key: &str) -> bool {
        self.lock().contains_key(key)
    }

    fn get(&self, key: &str) -> Option<Vec<u8>> {
        self.lock().get(key).cloned()
    }

    fn set(&self, key: &str, value: Vec<u8>) {
        self.lock().insert(key.to_string(), value);
    }
}
