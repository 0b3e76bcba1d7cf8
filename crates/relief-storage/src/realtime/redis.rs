//! Redis-backed key/value adapter.

use super::KeyValueBackend;
use async_trait::async_trait;
use deadpool_redis::{redis::AsyncCommands, Pool};
use relief_core::{ReliefError, ReliefResult};
use std::sync::Arc;

/// Realtime backend storing each path as a plain Redis string.
#[derive(Clone)]
pub struct RedisKeyValue {
    pool: Arc<Pool>,
}

impl RedisKeyValue {
    #[must_use]
    pub fn new(pool: Arc<Pool>) -> Self {
        Self { pool }
    }

    async fn get_conn(&self) -> ReliefResult<deadpool_redis::Connection> {
        self.pool.get().await.map_err(|e| {
            ReliefError::Database(format!("Failed to get Redis connection: {}", e))
        })
    }
}

#[async_trait]
impl KeyValueBackend for RedisKeyValue {
    async fn get(&self, key: &str) -> ReliefResult<Option<String>> {
        let mut conn = self.get_conn().await?;
        conn.get(key)
            .await
            .map_err(|e| ReliefError::Database(format!("Failed to get key '{}': {}", key, e)))
    }

    async fn set(&self, key: &str, value: &str) -> ReliefResult<()> {
        let mut conn = self.get_conn().await?;
        conn.set::<_, _, ()>(key, value)
            .await
            .map_err(|e| ReliefError::Database(format!("Failed to set key '{}': {}", key, e)))
    }

    async fn delete(&self, key: &str) -> ReliefResult<bool> {
        let mut conn = self.get_conn().await?;
        let deleted: i64 = conn.del(key).await.map_err(|e| {
            ReliefError::Database(format!("Failed to delete key '{}': {}", key, e))
        })?;
        Ok(deleted > 0)
    }
}
