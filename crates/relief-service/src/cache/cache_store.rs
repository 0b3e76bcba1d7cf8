//! Cache store trait.

use relief_core::{Interface, ReliefResult};
use async_trait::async_trait;
use std::time::Duration;

/// Key/value store with expiry and an atomic test-and-set.
///
/// Values are opaque strings. TTLs are rounded up to whole seconds by
/// backends that only support second precision.
#[async_trait]
pub trait CacheStore: Interface + Send + Sync {
    /// Returns the value if present and unexpired.
    async fn get(&self, key: &str) -> ReliefResult<Option<String>>;

    /// Overwrites the value and sets its TTL.
    async fn set_with_expiry(&self, key: &str, value: &str, ttl: Duration) -> ReliefResult<()>;

    /// Sets the value only if the key is absent. Returns true if it was set.
    async fn set_if_not_exists(&self, key: &str, value: &str, ttl: Duration)
        -> ReliefResult<bool>;

    /// Deletes a key. Returns true if it existed.
    async fn delete(&self, key: &str) -> ReliefResult<bool>;

    /// Resets the TTL of an existing key without touching its value.
    ///
    /// Returns false if the key does not exist.
    async fn refresh_expiry(&self, key: &str, ttl: Duration) -> ReliefResult<bool>;

    /// Deletes `key` only while it still holds `value`. Returns true if it
    /// was deleted.
    async fn delete_if_equals(&self, key: &str, value: &str) -> ReliefResult<bool>;

    /// Writes `value` under `key` and, if `lock_key` still holds
    /// `lock_token`, deletes it, as one batch.
    ///
    /// Backends without server-side scripting fall back to two calls.
    async fn store_and_release(
        &self,
        key: &str,
        value: &str,
        ttl: Duration,
        lock_key: &str,
        lock_token: &str,
    ) -> ReliefResult<()> {
        self.set_with_expiry(key, value, ttl).await?;
        self.delete_if_equals(lock_key, lock_token).await?;
        Ok(())
    }

    /// Returns false for a no-op store.
    fn is_enabled(&self) -> bool;
}
