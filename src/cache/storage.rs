//! In-memory TTL cache storage
//!
//! A single mutex guards the entry map. Expired entries stay in memory until
//! `clean_expired` runs, but `get` already treats them as absent.

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use super::clock::{Clock, SystemClock, add_saturating};

/// A cached value and the instant it stops being visible
#[derive(Debug, Clone)]
struct CacheEntry<V> {
    value: V,
    created_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
}

impl<V> CacheEntry<V> {
    fn is_live(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }
}

/// Thread-safe key/value store with per-entry expiry.
///
/// Keys are opaque strings; the only structure the store relies on is plain
/// string prefixes, for `delete_prefix`. Share it between tasks as
/// `Arc<CacheStore<V>>`.
pub struct CacheStore<V> {
    entries: Mutex<HashMap<String, CacheEntry<V>>>,
    clock: Arc<dyn Clock>,
}

impl<V: Clone> CacheStore<V> {
    /// Create an empty store on the system clock
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Create an empty store reading time from `clock`
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            clock,
        }
    }

    /// Get the cached value if present and not expired.
    ///
    /// Expired entries are left in place for the sweeper.
    pub fn get(&self, key: &str) -> Option<V> {
        let now = self.clock.now();
        self.lock()
            .get(key)
            .filter(|entry| entry.is_live(now))
            .map(|entry| entry.value.clone())
    }

    /// Store `value` under `key`, replacing any existing entry.
    ///
    /// A zero TTL stores an entry that `get` never returns.
    pub fn set(&self, key: impl Into<String>, value: V, ttl: Duration) {
        let now = self.clock.now();
        let entry = CacheEntry {
            value,
            created_at: now,
            expires_at: add_saturating(now, ttl),
        };
        self.lock().insert(key.into(), entry);
    }

    /// Delete a specific entry. Returns whether anything was removed.
    pub fn delete(&self, key: &str) -> bool {
        self.lock().remove(key).is_some()
    }

    /// Delete every entry whose key starts with `prefix`.
    ///
    /// Used to invalidate a whole subtree after mutations, e.g. all cached
    /// object listings under one bucket.
    pub fn delete_prefix(&self, prefix: &str) -> usize {
        let mut entries = self.lock();
        let before = entries.len();
        entries.retain(|key, _| !key.starts_with(prefix));
        before - entries.len()
    }

    /// Physically remove expired entries. Returns how many were dropped.
    pub fn clean_expired(&self) -> usize {
        let now = self.clock.now();
        let mut entries = self.lock();
        let before = entries.len();
        entries.retain(|_, entry| entry.is_live(now));
        before - entries.len()
    }

    /// Clear all cache entries
    pub fn clear_all(&self) -> ClearStats {
        let mut entries = self.lock();
        let entries_removed = entries.len();
        entries.clear();
        ClearStats { entries_removed }
    }

    /// Number of entries held, expired or not
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether the store holds no entries at all
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Get cache statistics
    pub fn stats(&self) -> CacheStats {
        let now = self.clock.now();
        let entries = self.lock();

        let live = entries.values().filter(|e| e.is_live(now));
        let mut valid_entries = 0;
        let mut oldest_entry: Option<DateTime<Utc>> = None;
        let mut newest_entry: Option<DateTime<Utc>> = None;
        for entry in live {
            valid_entries += 1;
            oldest_entry = Some(oldest_entry.map_or(entry.created_at, |o| o.min(entry.created_at)));
            newest_entry = Some(newest_entry.map_or(entry.created_at, |n| n.max(entry.created_at)));
        }

        CacheStats {
            total_entries: entries.len(),
            valid_entries,
            expired_entries: entries.len() - valid_entries,
            oldest_entry,
            newest_entry,
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, CacheEntry<V>>> {
        // Entries are inserted whole; a poisoned map is still consistent.
        self.entries.lock().unwrap_or_else(|poisoned| {
            log::warn!("Cache lock was poisoned, recovering");
            poisoned.into_inner()
        })
    }
}

impl<V: Clone> Default for CacheStore<V> {
    fn default() -> Self {
        Self::new()
    }
}

/// Statistics about cache clear operation
#[derive(Debug)]
pub struct ClearStats {
    pub entries_removed: usize,
}

/// Statistics about cache state
#[derive(Debug)]
pub struct CacheStats {
    pub total_entries: usize,
    pub valid_entries: usize,
    pub expired_entries: usize,
    pub oldest_entry: Option<DateTime<Utc>>,
    pub newest_entry: Option<DateTime<Utc>>,
}
