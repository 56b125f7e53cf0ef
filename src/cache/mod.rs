//! Short-lived response cache.
//!
//! The connector keeps two families of entries (campaign list and per-campaign
//! reports) with independent lifetimes. Values are serialized JSON text so any
//! backing store that can hold strings with a TTL can stand in for
//! [`MemoryCache`].

use dashmap::DashMap;
use std::time::{Duration, Instant};
use tracing::debug;


/// Key-value store with a per-key time-to-live.
///
/// `get` must distinguish an absent key (`None`) from a key holding an empty
/// or falsy value (`Some("")`, `Some("[]")`, `Some("false")`).
pub trait CacheStore: Send + Sync {
    /// Returns the stored value, or `None` if the key is absent or expired.
    fn get(&self, key: &str) -> Option<String>;

    /// Stores `value` under `key` for `ttl`. Last writer wins.
    fn put(&self, key: &str, value: String, ttl: Duration);
}

struct CacheEntry {
    value: String,
    expires_at: Instant,
}

impl CacheEntry {
    fn is_live(&self, now: Instant) -> bool {
        now < self.expires_at
    }
}

/// In-memory [`CacheStore`] backed by a concurrent map.
///
/// Expired entries are evicted lazily on read and in bulk by
/// [`MemoryCache::cleanup_expired`].
pub struct MemoryCache {
    entries: DashMap<String, CacheEntry>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    /// Drops every expired entry. Returns how many were removed.
    pub fn cleanup_expired(&self) -> usize {
        let now = Instant::now();
        let before = self.entries.len();
        self.entries.retain(|_, entry| entry.is_live(now));
        let removed = before.saturating_sub(self.entries.len());
        if removed > 0 {
            debug!(removed, remaining = self.entries.len(), "Swept expired cache entries");
        }
        removed
    }

    /// Number of stored entries, including expired ones not yet swept.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&self) {
        self.entries.clear();
    }
}

impl Default for MemoryCache {
    fn default() -> Self {
        Self::new()
    }
}

impl CacheStore for MemoryCache {
    fn get(&self, key: &str) -> Option<String> {
        let now = Instant::now();
        if let Some(entry) = self.entries.get(key) {
            if entry.is_live(now) {
                return Some(entry.value.clone());
            }
        } else {
            return None;
        }

        // Guard dropped above; re-check so a concurrent fresh put is not evicted.
        self.entries.remove_if(key, |_, entry| !entry.is_live(now));
        None
    }

    fn put(&self, key: &str, value: String, ttl: Duration) {
        let expires_at = Instant::now() + ttl;
        self.entries
            .insert(key.to_string(), CacheEntry { value, expires_at });
    }
}
