//! HTTP middleware.

pub mod cache_metrics;
mod logging;
mod response_cache;

pub use logging::logging_middleware;
pub use response_cache::{
    response_cache_middleware, CachePolicy, CachePopulator, ResponseCache, ResponseHook,
    MAX_CACHED_BODY_BYTES, X_CACHE,
};
