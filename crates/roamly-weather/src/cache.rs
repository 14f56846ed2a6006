//! Time-bounded memoization keyed by call arguments.
//!
//! Entries expire after a fixed TTL; there is no other invalidation. The
//! map only ever holds a handful of entries (one per queried day), so no
//! eviction beyond expiry is needed.

use parking_lot::Mutex;
use std::collections::HashMap;
use std::hash::Hash;
use std::time::{Duration, Instant};

pub struct TtlCache<K, V> {
    ttl: Duration,
    entries: Mutex<HashMap<K, (V, Instant)>>,
}

impl<K: Eq + Hash, V: Clone> TtlCache<K, V> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Look up a live entry; expired entries are removed on access.
    pub fn get(&self, key: &K) -> Option<V> {
        let mut entries = self.entries.lock();
        if let Some((value, stored_at)) = entries.get(key) {
            if stored_at.elapsed() < self.ttl {
                return Some(value.clone());
            }
        } else {
            return None;
        }
        entries.remove(key);
        None
    }

    pub fn insert(&self, key: K, value: V) {
        self.entries.lock().insert(key, (value, Instant::now()));
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }
}
