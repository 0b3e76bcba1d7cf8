//! Process-local cache store.

use super::CacheStore;
use async_trait::async_trait;
use parking_lot::Mutex;
use relief_core::ReliefResult;
use std::collections::HashMap;
use std::time::Duration;
use tokio::time::Instant;

struct Entry {
    value: String,
    expires_at: Instant,
}

/// Cache store held in a map with per-entry deadlines.
///
/// Expired entries are dropped lazily when touched. Only coordinates
/// requests within one process.
#[derive(Default)]
pub struct InMemoryCacheStore {
    entries: Mutex<HashMap<String, Entry>>,
}

impl InMemoryCacheStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live entries.
    #[must_use]
    pub fn len(&self) -> usize {
        let now = Instant::now();
        self.entries
            .lock()
            .values()
            .filter(|entry| entry.expires_at > now)
            .count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl CacheStore for InMemoryCacheStore {
    fn is_enabled(&self) -> bool {
        true
    }

    async fn get(&self, key: &str) -> ReliefResult<Option<String>> {
        let now = Instant::now();
        let mut entries = self.entries.lock();
        match entries.get(key) {
            Some(entry) if entry.expires_at > now => Ok(Some(entry.value.clone())),
            Some(_) => {
                entries.remove(key);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn set_with_expiry(&self, key: &str, value: &str, ttl: Duration) -> ReliefResult<()> {
        self.entries.lock().insert(
            key.to_string(),
            Entry {
                value: value.to_string(),
                expires_at: Instant::now() + ttl,
            },
        );
        Ok(())
    }

    async fn set_if_not_exists(
        &self,
        key: &str,
        value: &str,
        ttl: Duration,
    ) -> ReliefResult<bool> {
        let now = Instant::now();
        let mut entries = self.entries.lock();
        if entries.get(key).is_some_and(|entry| entry.expires_at > now) {
            return Ok(false);
        }
        entries.insert(
            key.to_string(),
            Entry {
                value: value.to_string(),
                expires_at: now + ttl,
            },
        );
        Ok(true)
    }

    async fn delete(&self, key: &str) -> ReliefResult<bool> {
        let now = Instant::now();
        Ok(self
            .entries
            .lock()
            .remove(key)
            .is_some_and(|entry| entry.expires_at > now))
    }

    async fn refresh_expiry(&self, key: &str, ttl: Duration) -> ReliefResult<bool> {
        let now = Instant::now();
        let mut entries = self.entries.lock();
        match entries.get_mut(key) {
            Some(entry) if entry.expires_at > now => {
                entry.expires_at = now + ttl;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn delete_if_equals(&self, key: &str, value: &str) -> ReliefResult<bool> {
        let mut entries = self.entries.lock();
        Ok(take_if_held(&mut entries, key, value))
    }

    async fn store_and_release(
        &self,
        key: &str,
        value: &str,
        ttl: Duration,
        lock_key: &str,
        lock_token: &str,
    ) -> ReliefResult<()> {
        let mut entries = self.entries.lock();
        entries.insert(
            key.to_string(),
            Entry {
                value: value.to_string(),
                expires_at: Instant::now() + ttl,
            },
        );
        take_if_held(&mut entries, lock_key, lock_token);
        Ok(())
    }
}

/// Removes `key` if it is live and holds `value`.
fn take_if_held(entries: &mut HashMap<String, Entry>, key: &str, value: &str) -> bool {
    let now = Instant::now();
    let held = entries
        .get(key)
        .is_some_and(|entry| entry.expires_at > now && entry.value == value);
    if held {
        entries.remove(key);
    }
    held
}
