//! Key/value cache backends.
//!
//! The response cache talks to [`CacheStore`] only; Redis is the production
//! backend and the in-memory store serves local development and tests.

mod cache_store;
pub mod cache_keys;
mod memory_cache;
mod redis_cache;

pub use cache_store::CacheStore;
pub use memory_cache::InMemoryCacheStore;
pub use redis_cache::{RedisCacheStore, RedisCacheStoreParameters};
