//! Redis-based cache store.

use super::CacheStore;
use async_trait::async_trait;
use deadpool_redis::{
    redis::{self, AsyncCommands},
    Pool,
};
use relief_core::{ReliefError, ReliefResult};
use shaku::Component;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Redis-based cache store.
#[derive(Component)]
#[shaku(interface = CacheStore)]
pub struct RedisCacheStore {
    /// Redis connection pool; `None` when caching is disabled.
    pool: Option<Arc<Pool>>,
}

impl RedisCacheStore {
    /// Create a new Redis cache store.
    #[must_use]
    pub fn new(pool: Arc<Pool>) -> Self {
        Self { pool: Some(pool) }
    }

    /// Create a no-op cache store (for when Redis is disabled).
    #[must_use]
    pub fn disabled() -> Self {
        Self { pool: None }
    }

    async fn get_conn(&self) -> ReliefResult<deadpool_redis::Connection> {
        match &self.pool {
            Some(pool) => pool.get().await.map_err(|e| {
                ReliefError::Cache(format!("Failed to get Redis connection: {}", e))
            }),
            None => Err(ReliefError::Cache("Cache is disabled".to_string())),
        }
    }
}

/// Deletes KEYS[1] only if it holds ARGV[1].
const COMPARE_AND_DELETE: &str = r"
if redis.call('GET', KEYS[1]) == ARGV[1] then
    return redis.call('DEL', KEYS[1])
end
return 0
";

/// Sets KEYS[1] to ARGV[1] for ARGV[2] seconds, then deletes KEYS[2] if it
/// holds ARGV[3]. Runs atomically on the server.
const STORE_AND_RELEASE: &str = r"
redis.call('SET', KEYS[1], ARGV[1], 'EX', ARGV[2])
if redis.call('GET', KEYS[2]) == ARGV[3] then
    return redis.call('DEL', KEYS[2])
end
return 0
";

/// Redis expiries are whole seconds; never round a TTL down to zero.
fn ttl_secs(ttl: Duration) -> u64 {
    let secs = ttl.as_secs();
    if ttl.subsec_nanos() > 0 {
        secs + 1
    } else {
        secs.max(1)
    }
}

#[async_trait]
impl CacheStore for RedisCacheStore {
    fn is_enabled(&self) -> bool {
        self.pool.is_some()
    }

    async fn get(&self, key: &str) -> ReliefResult<Option<String>> {
        if !self.is_enabled() {
            return Ok(None);
        }

        let mut conn = self.get_conn().await?;
        let value: Option<String> = conn.get(key).await.map_err(|e| {
            ReliefError::Cache(format!("Failed to get key '{}': {}", key, e))
        })?;

        match &value {
            Some(_) => debug!("Cache hit for key '{}'", key),
            None => debug!("Cache miss for key '{}'", key),
        }

        Ok(value)
    }

    async fn set_with_expiry(&self, key: &str, value: &str, ttl: Duration) -> ReliefResult<()> {
        if !self.is_enabled() {
            return Ok(());
        }

        let mut conn = self.get_conn().await?;
        let ttl_secs = ttl_secs(ttl);

        conn.set_ex::<_, _, ()>(key, value, ttl_secs).await.map_err(|e| {
            ReliefError::Cache(format!("Failed to set key '{}': {}", key, e))
        })?;

        debug!("Cached key '{}' with TTL {}s", key, ttl_secs);
        Ok(())
    }

    async fn set_if_not_exists(
        &self,
        key: &str,
        value: &str,
        ttl: Duration,
    ) -> ReliefResult<bool> {
        if !self.is_enabled() {
            return Ok(false);
        }

        let mut conn = self.get_conn().await?;

        // SET NX replies nil when the key already exists
        let result: Option<String> = redis::cmd("SET")
            .arg(key)
            .arg(value)
            .arg("NX")
            .arg("EX")
            .arg(ttl_secs(ttl))
            .query_async(&mut *conn)
            .await
            .map_err(|e| ReliefError::Cache(format!("Failed to lock key '{}': {}", key, e)))?;

        Ok(result.is_some())
    }

    async fn delete(&self, key: &str) -> ReliefResult<bool> {
        if !self.is_enabled() {
            return Ok(false);
        }

        let mut conn = self.get_conn().await?;
        let deleted: i64 = conn.del(key).await.map_err(|e| {
            ReliefError::Cache(format!("Failed to delete key '{}': {}", key, e))
        })?;

        Ok(deleted > 0)
    }

    async fn refresh_expiry(&self, key: &str, ttl: Duration) -> ReliefResult<bool> {
        if !self.is_enabled() {
            return Ok(false);
        }

        let mut conn = self.get_conn().await?;
        let refreshed: bool = conn
            .expire(key, ttl_secs(ttl) as i64)
            .await
            .map_err(|e| ReliefError::Cache(format!("Failed to expire key '{}': {}", key, e)))?;

        Ok(refreshed)
    }

    async fn delete_if_equals(&self, key: &str, value: &str) -> ReliefResult<bool> {
        if !self.is_enabled() {
            return Ok(false);
        }

        let mut conn = self.get_conn().await?;
        let deleted: i64 = redis::cmd("EVAL")
            .arg(COMPARE_AND_DELETE)
            .arg(1)
            .arg(key)
            .arg(value)
            .query_async(&mut *conn)
            .await
            .map_err(|e| {
                ReliefError::Cache(format!("Failed to release key '{}': {}", key, e))
            })?;

        Ok(deleted > 0)
    }

    async fn store_and_release(
        &self,
        key: &str,
        value: &str,
        ttl: Duration,
        lock_key: &str,
        lock_token: &str,
    ) -> ReliefResult<()> {
        if !self.is_enabled() {
            return Ok(());
        }

        let mut conn = self.get_conn().await?;

        let released: i64 = redis::cmd("EVAL")
            .arg(STORE_AND_RELEASE)
            .arg(2)
            .arg(key)
            .arg(lock_key)
            .arg(value)
            .arg(ttl_secs(ttl))
            .arg(lock_token)
            .query_async(&mut *conn)
            .await
            .map_err(|e| {
                ReliefError::Cache(format!("Failed to store key '{}': {}", key, e))
            })?;

        debug!(
            "Cached key '{}', lock '{}' released: {}",
            key,
            lock_key,
            released > 0
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_disabled_cache() {
        let cache = RedisCacheStore::disabled();
        assert!(!cache.is_enabled());
        assert!(cache.get("k").await.unwrap().is_none());
        assert!(!cache
            .set_if_not_exists("k", "v", Duration::from_secs(1))
            .await
            .unwrap());
        assert!(!cache.delete_if_equals("k", "v").await.unwrap());
        cache
            .store_and_release("k", "v", Duration::from_secs(1), "lock", "token")
            .await
            .unwrap();
    }

    #[test]
    fn test_ttl_rounds_up() {
        assert_eq!(ttl_secs(Duration::from_secs(60)), 60);
        assert_eq!(ttl_secs(Duration::from_millis(1500)), 2);
        assert_eq!(ttl_secs(Duration::ZERO), 1);
    }
}
