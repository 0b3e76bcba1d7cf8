//! Dependency injection module using Shaku.
//!
//! The cache store is a Shaku component so the Redis pool is handed over as
//! a component parameter. Services are plain `Arc<dyn Trait>` values wired in
//! [`crate::app`].

use deadpool_redis::{Pool, PoolConfig, Runtime};
use relief_config::{CacheConfig, RedisConfig};
use relief_core::{ReliefError, ReliefResult};
use relief_service::{CacheStore, InMemoryCacheStore, RedisCacheStore, RedisCacheStoreParameters};
use shaku::{module, HasComponent};
use std::sync::Arc;
use tracing::{info, warn};

// Response cache backed by Redis, or a disabled store when no pool is given.
module! {
    pub CacheModule {
        components = [RedisCacheStore],
        providers = [],
    }
}

/// Creates the shared Redis pool, or `None` when Redis is disabled.
pub fn create_redis_pool(config: &RedisConfig) -> ReliefResult<Option<Arc<Pool>>> {
    if !config.enabled {
        info!("Redis disabled");
        return Ok(None);
    }

    let mut redis_cfg = deadpool_redis::Config::from_url(&config.url);
    redis_cfg.pool = Some(PoolConfig::new(config.pool_size));
    let pool = redis_cfg
        .create_pool(Some(Runtime::Tokio1))
        .map_err(|e| ReliefError::Cache(format!("Failed to create Redis pool: {}", e)))?;

    info!(pool_size = config.pool_size, "Redis pool created");
    Ok(Some(Arc::new(pool)))
}

/// Builds the cache module around an optional Redis pool.
#[must_use]
pub fn build_cache_module(pool: Option<Arc<Pool>>) -> Arc<CacheModule> {
    let module = CacheModule::builder()
        .with_component_parameters::<RedisCacheStore>(RedisCacheStoreParameters { pool })
        .build();
    Arc::new(module)
}

/// Resolves the cache store.
pub trait CacheResolver {
    fn cache_store(&self) -> Arc<dyn CacheStore>;
}

impl CacheResolver for CacheModule {
    fn cache_store(&self) -> Arc<dyn CacheStore> {
        self.resolve()
    }
}

/// Picks the cache store for the response cache.
///
/// Without Redis an enabled cache falls back to a process-local store, which
/// only gives single-flight within this instance.
#[must_use]
pub fn cache_store(pool: Option<Arc<Pool>>, config: &CacheConfig) -> Arc<dyn CacheStore> {
    match pool {
        Some(pool) => build_cache_module(Some(pool)).cache_store(),
        None if config.enabled => {
            warn!("Redis disabled, response cache is process-local");
            Arc::new(InMemoryCacheStore::new())
        }
        None => build_cache_module(None).cache_store(),
    }
}
