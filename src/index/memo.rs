//! Small fixed-capacity lookup cache
//!
//! Keeps the most recently used entries of repeated index lookups within a
//! single run. Holds no correctness obligation; a miss simply repeats the
//! lookup.

use std::hash::Hash;

use indexmap::{Equivalent, IndexMap};

/// Least-recently-used map bounded to `capacity` entries
#[derive(Debug)]
pub struct Memo<K, V> {
    capacity: usize,
    entries: IndexMap<K, V>,
}

impl<K: Hash + Eq, V: Clone> Memo<K, V> {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: IndexMap::with_capacity(capacity),
        }
    }

    /// Returns a clone of the cached value and marks it most recently used
    pub fn get<Q>(&mut self, key: &Q) -> Option<V>
    where
        Q: ?Sized + Hash + Equivalent<K>,
    {
        let index = self.entries.get_index_of(key)?;
        let last = self.entries.len() - 1;
        self.entries.move_index(index, last);
        self.entries.get_index(last).map(|(_, value)| value.clone())
    }

    /// Inserts a value, evicting the least recently used entry when full
    pub fn insert(&mut self, key: K, value: V) {
        if self.capacity == 0 {
            return;
        }
        self.entries.shift_remove(&key);
        if self.entries.len() >= self.capacity {
            self.entries.shift_remove_index(0);
        }
        self.entries.insert(key, value);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
