use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// Where sessions and rooms live between requests.
#[async_trait]
pub trait KeyValueStore<V>: Send + Sync
where
    V: Clone + Send + Sync + 'static,
{
    async fn get(&self, key: &str) -> Option<V>;
    async fn set(&self, key: &str, value: V);
    async fn delete(&self, key: &str) -> Option<V>;
    /// Drop entries untouched for longer than `max_idle`; returns how many went.
    async fn purge_idle(&self, max_idle: Duration) -> usize;
}

#[derive(Debug)]
struct StoredEntry<V> {
    value: V,
    last_activity: Instant,
}

#[derive(Debug)]
pub struct InMemoryStore<V> {
    entries: DashMap<String, StoredEntry<V>>,
}

impl<V> InMemoryStore<V> {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<V> Default for InMemoryStore<V> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<V> KeyValueStore<V> for InMemoryStore<V>
where
    V: Clone + Send + Sync + 'static,
{
    async fn get(&self, key: &str) -> Option<V> {
        let mut entry = self.entries.get_mut(key)?;
        entry.last_activity = Instant::now();
        Some(entry.value.clone())
    }

    async fn set(&self, key: &str, value: V) {
        self.entries.insert(
            key.to_string(),
            StoredEntry {
                value,
                last_activity: Instant::now(),
            },
        );
    }

    async fn delete(&self, key: &str) -> Option<V> {
        self.entries.remove(key).map(|(_, entry)| entry.value)
    }

    async fn purge_idle(&self, max_idle: Duration) -> usize {
        let before = self.entries.len();
        self.entries
            .retain(|_, entry| entry.last_activity.elapsed() <= max_idle);
        before.saturating_sub(self.entries.len())
    }
}

/// One async mutex per key, so a read-modify-write on a session or room never
/// interleaves with another on the same key.
#[derive(Debug, Default)]
pub struct KeyLocks {
    locks: DashMap<String, Arc<Mutex<()>>>,
}

impl KeyLocks {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn lock(&self, key: &str) -> OwnedMutexGuard<()> {
        let mutex = self.locks.entry(key.to_string()).or_default().clone();
        mutex.lock_owned().await
    }

    /// Forget locks nobody is holding or waiting on.
    pub fn prune(&self) -> usize {
        let before = self.locks.len();
        self.locks.retain(|_, mutex| Arc::strong_count(mutex) > 1);
        before.saturating_sub(self.locks.len())
    }

    pub fn len(&self) -> usize {
        self.locks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }
}
