// SPDX-License-Identifier: Apache-2.0

//! In-memory, TTL-bounded caches held by a [`Session`](crate::Session).
//!
//! Nothing is written to disk; entries live for the lifetime of the
//! session value at most.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};

/// A cached value with the time it was stored.
#[derive(Debug, Clone)]
pub struct CacheEntry<T> {
    /// The cached data.
    pub data: T,
    /// When the entry was cached.
    pub cached_at: DateTime<Utc>,
}

impl<T> CacheEntry<T> {
    /// Create a new cache entry stamped with the current time.
    pub fn new(data: T) -> Self {
        Self {
            data,
            cached_at: Utc::now(),
        }
    }

    /// Check if this entry is still valid based on TTL.
    pub fn is_valid(&self, ttl: Duration) -> bool {
        Utc::now().signed_duration_since(self.cached_at) < ttl
    }
}

/// Keyed cache with an optional TTL. `None` means entries never expire.
#[derive(Debug)]
pub struct SessionCache<T> {
    entries: HashMap<String, CacheEntry<T>>,
    ttl: Option<Duration>,
}

impl<T: Clone> SessionCache<T> {
    /// Create a cache; a TTL of zero minutes disables expiry, as does a TTL
    /// too large to represent.
    #[must_use]
    pub fn new(ttl_minutes: u64) -> Self {
        let ttl = i64::try_from(ttl_minutes)
            .ok()
            .filter(|m| *m > 0)
            .and_then(Duration::try_minutes);
        Self {
            entries: HashMap::new(),
            ttl,
        }
    }

    /// Return a clone of the cached value when present and not expired.
    pub fn get(&self, key: &str) -> Option<T> {
        let entry = self.entries.get(key)?;
        match self.ttl {
            Some(ttl) if !entry.is_valid(ttl) => None,
            _ => Some(entry.data.clone()),
        }
    }

    /// Store a value, replacing any previous entry for the key.
    pub fn insert(&mut self, key: impl Into<String>, data: T) {
        self.entries.insert(key.into(), CacheEntry::new(data));
    }

    /// Number of stored entries, expired ones included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
