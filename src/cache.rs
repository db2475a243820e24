//! Recency-ordered result cache.
//!
//! The cache has no locking of its own; [`crate::Mecab`] keeps it behind a
//! mutex.

use std::borrow::Borrow;
use std::hash::Hash;
use std::num::NonZeroUsize;

use lru::LruCache;

fn bound(capacity: usize) -> NonZeroUsize {
    NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MAX)
}

/// Least-recently-used cache with a capacity that can change at runtime.
///
/// A capacity of `0` means unbounded.
pub struct ResultCache<K: Hash + Eq, V> {
    entries: LruCache<K, V>,
    capacity: usize,
}

impl<K: Hash + Eq, V> ResultCache<K, V> {
    /// Creates a cache holding at most `capacity` entries (`0` = unbounded).
    ///
    /// Storage grows with use; nothing is reserved for `capacity` up front.
    pub fn new(capacity: usize) -> Self {
        let mut entries = LruCache::unbounded();
        entries.resize(bound(capacity));
        Self { entries, capacity }
    }

    /// Returns the value for `key` and marks it most recently used.
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.get(key)
    }

    /// Inserts or overwrites `key`, then evicts least recently used entries
    /// while over capacity.
    pub fn set(&mut self, key: K, value: V) {
        self.entries.put(key, value);
    }

    /// Returns the value already stored for `key`, or stores and returns
    /// `value`. Either way the entry becomes most recently used.
    pub fn set_default(&mut self, key: K, value: V) -> &V {
        self.entries.get_or_insert(key, || value)
    }

    /// Changes the capacity, evicting the excess right away.
    pub fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity;
        self.entries.resize(bound(capacity));
    }

    /// Configured capacity (`0` = unbounded).
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Whether `key` is cached. Does not change recency.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.contains(key)
    }

    /// Number of cached entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keys from most to least recently used.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.entries.iter().map(|(key, _)| key)
    }

    /// Drops every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl<K: Hash + Eq, V> Default for ResultCache<K, V> {
    fn default() -> Self {
        Self::new(0)
    }
}
