use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};

/// A concurrent table of rows keyed by sequence-allocated `u64` ids.
///
/// Ids start at 1 and are never reused, so a deleted row's id stays dangling
/// rather than aliasing a newer row.
pub struct EntityMap<V> {
    rows: DashMap<u64, V>,
    next_id: AtomicU64,
}

impl<V> Default for EntityMap<V>
where
    V: Clone + Send + Sync,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<V> EntityMap<V>
where
    V: Clone + Send + Sync,
{
    pub fn new() -> Self {
        Self {
            rows: DashMap::new(),
            next_id: AtomicU64::new(1),
        }
    }

    /// Allocates the next id and inserts the row produced by `build`.
    pub fn insert_with<F>(&self, build: F) -> u64
    where
        F: FnOnce(u64) -> V,
    {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        self.rows.insert(id, build(id));
        id
    }

    pub fn get(&self, id: u64) -> Option<V> {
        self.rows.get(&id).map(|row| row.value().clone())
    }

    pub fn contains(&self, id: u64) -> bool {
        self.rows.contains_key(&id)
    }

    /// Mutates the row in place. `apply` runs under the row's shard lock and
    /// must not reach back into the same map.
    pub fn update<F>(&self, id: u64, apply: F) -> bool
    where
        F: FnOnce(&mut V),
    {
        match self.rows.get_mut(&id) {
            Some(mut row) => {
                apply(row.value_mut());
                true
            }
            None => false,
        }
    }

    pub fn remove(&self, id: u64) -> Option<V> {
        self.rows.remove(&id).map(|(_, value)| value)
    }

    /// Clones every row out, sorted by id so list endpoints are stable.
    pub fn snapshot(&self) -> Vec<(u64, V)> {
        let mut entries: Vec<(u64, V)> = self
            .rows
            .iter()
            .map(|entry| (*entry.key(), entry.value().clone()))
            .collect();
        entries.sort_by_key(|(id, _)| *id);
        entries
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
