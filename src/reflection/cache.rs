//! Reflection cache.
//!
//! Reflection results are deterministic for a fixed catalog snapshot, so a
//! caller may memoize them. The store is injected; this module only provides
//! the `compute(key, f)` contract on top of it and an in-memory store.
//!
//! Failed computations are never cached.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Mutex;

use super::unique::UniqueConstraint;

/// Cache key: which connection, which table, which schema.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ReflectionKey {
    pub connection: String,
    pub table: String,
    pub schema: Option<String>,
}

impl ReflectionKey {
    pub fn new(connection: &str, table: &str, schema: Option<&str>) -> Self {
        Self {
            connection: connection.to_string(),
            table: table.to_string(),
            schema: schema.map(str::to_string),
        }
    }
}

/// Backing storage for memoized values.
pub trait CacheStore<K, V>: Send + Sync {
    fn get(&self, key: &K) -> Option<V>;

    fn insert(&self, key: K, value: V);
}

/// Store backed by a mutex-guarded `HashMap`.
///
/// A poisoned lock degrades to a cache miss.
#[derive(Debug)]
pub struct MemoryStore<K, V> {
    entries: Mutex<HashMap<K, V>>,
}

impl<K, V> Default for MemoryStore<K, V> {
    fn default() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }
}

impl<K, V> MemoryStore<K, V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<K, V> CacheStore<K, V> for MemoryStore<K, V>
where
    K: Eq + Hash + Send,
    V: Clone + Send,
{
    fn get(&self, key: &K) -> Option<V> {
        self.entries.lock().ok()?.get(key).cloned()
    }

    fn insert(&self, key: K, value: V) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(key, value);
        }
    }
}

/// Memoization view over a store.
pub struct Memo<'s, K, V> {
    store: &'s dyn CacheStore<K, V>,
}

impl<'s, K, V: Clone> Memo<'s, K, V> {
    pub fn new(store: &'s dyn CacheStore<K, V>) -> Self {
        Self { store }
    }

    /// Return the stored value for `key`, or compute, store and return it.
    pub fn compute<E>(&self, key: K, f: impl FnOnce(&K) -> Result<V, E>) -> Result<V, E> {
        if let Some(value) = self.store.get(&key) {
            return Ok(value);
        }
        let value = f(&key)?;
        self.store.insert(key, value.clone());
        Ok(value)
    }
}

/// Per-scope reflection cache, passed to reflection calls as an opaque token.
///
/// Holds one store for resolved table oids and one for unique constraint
/// lists. Drop it to end the caching scope.
pub struct InfoCache {
    table_oids: Box<dyn CacheStore<ReflectionKey, u32>>,
    unique_constraints: Box<dyn CacheStore<ReflectionKey, Vec<UniqueConstraint>>>,
}

impl Default for InfoCache {
    fn default() -> Self {
        Self::with_stores(
            Box::new(MemoryStore::new()),
            Box::new(MemoryStore::new()),
        )
    }
}

impl InfoCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a cache over caller-supplied stores.
    pub fn with_stores(
        table_oids: Box<dyn CacheStore<ReflectionKey, u32>>,
        unique_constraints: Box<dyn CacheStore<ReflectionKey, Vec<UniqueConstraint>>>,
    ) -> Self {
        Self {
            table_oids,
            unique_constraints,
        }
    }

    pub fn table_oids(&self) -> Memo<'_, ReflectionKey, u32> {
        Memo::new(self.table_oids.as_ref())
    }

    pub fn unique_constraints(&self) -> Memo<'_, ReflectionKey, Vec<UniqueConstraint>> {
        Memo::new(self.unique_constraints.as_ref())
    }
}
