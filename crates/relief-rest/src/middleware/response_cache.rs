//! Read-through response cache with single-flight population.
//!
//! Eligible requests (GET without a bearer token) are fingerprinted from
//! method and URL. The flow per request:
//!
//! 1. Cached body present: serve it and refresh its TTL in the background.
//! 2. Otherwise try to take the lock for the fingerprint under a fresh token.
//!    The winner runs the handler and stores its 200 response while releasing
//!    the lock, provided the lock still carries its token.
//! 3. Losers poll the cache `max_retries` times, `retry_delay` apart. If the
//!    body still has not appeared they run the handler themselves and store
//!    the result, leaving the lock to its owner or its TTL.
//!
//! Cache backend failures are logged and the request is served uncached.
//!
//! ```ignore
//! let cache = ResponseCache::new(store, CachePolicy::default());
//! let api = Router::new()
//!     .route("/requests", get(list_requests))
//!     .layer(middleware::from_fn_with_state(cache, response_cache_middleware));
//! ```

use super::cache_metrics;
use crate::responses::AppError;
use async_trait::async_trait;
use axum::{
    body::{Body, Bytes, HttpBody},
    extract::{OriginalUri, Request, State},
    http::{
        header::{self, HeaderName, HeaderValue},
        response::Parts,
        Method, StatusCode,
    },
    middleware::Next,
    response::{IntoResponse, Response},
};
use relief_config::CacheConfig;
use relief_core::{ReliefError, ReliefResult};
use relief_service::{cache_keys, CacheStore};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, warn};
use uuid::Uuid;

/// Largest response body the cache will buffer and store.
pub const MAX_CACHED_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Response header reporting how the response cache handled a request.
pub const X_CACHE: HeaderName = HeaderName::from_static("x-cache");

/// TTL and polling budget of the response cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CachePolicy {
    /// Lifetime of cached bodies and of population locks.
    pub ttl: Duration,
    /// Polls a waiter makes before running the handler itself.
    pub max_retries: u32,
    /// Delay before each poll.
    pub retry_delay: Duration,
}

impl Default for CachePolicy {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(60),
            max_retries: 5,
            retry_delay: Duration::from_millis(100),
        }
    }
}

impl From<&CacheConfig> for CachePolicy {
    fn from(config: &CacheConfig) -> Self {
        Self {
            ttl: config.ttl(),
            max_retries: config.max_retries,
            retry_delay: config.retry_delay(),
        }
    }
}

/// Shared state of the response cache middleware.
#[derive(Clone)]
pub struct ResponseCache {
    store: Arc<dyn CacheStore>,
    policy: CachePolicy,
    enabled: bool,
}

impl ResponseCache {
    pub fn new(store: Arc<dyn CacheStore>, policy: CachePolicy) -> Self {
        let enabled = store.is_enabled();
        Self {
            store,
            policy,
            enabled,
        }
    }

    /// Builds the cache from the `[cache]` section; `enabled = false` turns the
    /// middleware into a pass-through.
    pub fn from_config(store: Arc<dyn CacheStore>, config: &CacheConfig) -> Self {
        let mut cache = Self::new(store, CachePolicy::from(config));
        cache.enabled &= config.enabled;
        cache
    }

    #[must_use]
    pub fn policy(&self) -> CachePolicy {
        self.policy
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn populator(&self, cache_key: String, lock: Option<HeldLock>) -> CachePopulator {
        CachePopulator {
            store: Arc::clone(&self.store),
            cache_key,
            lock,
            ttl: self.policy.ttl,
        }
    }

    /// Extends a hit entry to the full TTL without holding up the response.
    fn spawn_refresh(&self, cache_key: String) {
        let store = Arc::clone(&self.store);
        let ttl = self.policy.ttl;
        tokio::spawn(async move {
            if let Err(e) = store.refresh_expiry(&cache_key, ttl).await {
                cache_metrics::record_error("refresh_expiry");
                warn!(key = %cache_key, error = %e, "Failed to refresh cache entry TTL");
            }
        });
    }

    /// Polls for a body populated by the lock holder. Stops at the first
    /// backend error.
    async fn wait_for_population(&self, cache_key: &str) -> ReliefResult<Option<String>> {
        for attempt in 1..=self.policy.max_retries {
            tokio::time::sleep(self.policy.retry_delay).await;
            if let Some(body) = self.store.get(cache_key).await? {
                debug!(key = %cache_key, attempt, "Cache populated while waiting");
                return Ok(Some(body));
            }
        }
        Ok(None)
    }
}

/// Called with the finalized response of a request the cache let through.
///
/// `body` is `None` when the body was not buffered because it is larger than
/// [`MAX_CACHED_BODY_BYTES`] or of unknown length.
#[async_trait]
pub trait ResponseHook: Send + Sync {
    async fn on_response(&self, head: &Parts, body: Option<&Bytes>);
}

/// Population lock taken by this request, identified by its token.
struct HeldLock {
    key: String,
    token: String,
}

/// Hook that writes a cacheable response and releases the population lock.
pub struct CachePopulator {
    store: Arc<dyn CacheStore>,
    cache_key: String,
    lock: Option<HeldLock>,
    ttl: Duration,
}

impl CachePopulator {
    async fn release(&self) {
        let Some(lock) = &self.lock else {
            return;
        };
        match self.store.delete_if_equals(&lock.key, &lock.token).await {
            Ok(true) => {}
            Ok(false) => debug!(key = %lock.key, "Cache lock expired before release"),
            Err(e) => {
                cache_metrics::record_error("delete");
                warn!(key = %lock.key, error = %e, "Failed to release cache lock");
            }
        }
    }
}

/// Only complete 200 responses with a UTF-8 body are stored.
fn cacheable_body<'a>(head: &Parts, body: Option<&'a Bytes>) -> Option<&'a str> {
    if head.status != StatusCode::OK {
        return None;
    }
    body.and_then(|bytes| std::str::from_utf8(bytes).ok())
}

#[async_trait]
impl ResponseHook for CachePopulator {
    async fn on_response(&self, head: &Parts, body: Option<&Bytes>) {
        let Some(value) = cacheable_body(head, body) else {
            debug!(key = %self.cache_key, status = head.status.as_u16(), "Response not cacheable");
            self.release().await;
            return;
        };

        let result = match &self.lock {
            Some(lock) => {
                self.store
                    .store_and_release(&self.cache_key, value, self.ttl, &lock.key, &lock.token)
                    .await
            }
            None => {
                self.store
                    .set_with_expiry(&self.cache_key, value, self.ttl)
                    .await
            }
        };

        match result {
            Ok(()) => {
                cache_metrics::record_store();
                debug!(key = %self.cache_key, ttl_secs = self.ttl.as_secs(), "Response cached");
            }
            Err(e) => {
                cache_metrics::record_error("store");
                warn!(key = %self.cache_key, error = %e, "Failed to cache response");
                self.release().await;
            }
        }
    }
}

/// Response cache middleware.
pub async fn response_cache_middleware(
    State(cache): State<ResponseCache>,
    request: Request,
    next: Next,
) -> Response {
    if !cache.is_enabled() || !is_cacheable_request(&request) {
        return next.run(request).await;
    }

    // nested routers strip their prefix from the request uri
    let uri = request
        .extensions()
        .get::<OriginalUri>()
        .map_or_else(|| request.uri(), |original| &original.0);
    let url = uri
        .path_and_query()
        .map_or_else(|| uri.path(), |pq| pq.as_str());
    let fingerprint = cache_keys::request_fingerprint(request.method().as_str(), url);
    let cache_key = cache_keys::response_key(&fingerprint);
    let lock_key = cache_keys::lock_key(&fingerprint);

    match cache.store.get(&cache_key).await {
        Ok(Some(body)) => {
            cache_metrics::record_hit("direct");
            debug!(key = %cache_key, "Serving cached response");
            cache.spawn_refresh(cache_key);
            return cached_response(body);
        }
        Ok(None) => cache_metrics::record_miss(),
        Err(e) => {
            cache_metrics::record_error("get");
            warn!(key = %cache_key, error = %e, "Cache read failed, serving uncached");
            return next.run(request).await;
        }
    }

    let token = Uuid::new_v4().to_string();
    match cache
        .store
        .set_if_not_exists(&lock_key, &token, cache.policy.ttl)
        .await
    {
        Ok(true) => {
            cache_metrics::record_lock("acquired");
            let lock = HeldLock {
                key: lock_key,
                token,
            };
            let populator = cache.populator(cache_key, Some(lock));
            return run_with_hook(request, next, &populator).await;
        }
        Ok(false) => cache_metrics::record_lock("contended"),
        Err(e) => {
            cache_metrics::record_error("set_if_not_exists");
            warn!(key = %lock_key, error = %e, "Cache lock failed, serving uncached");
            return next.run(request).await;
        }
    }

    match cache.wait_for_population(&cache_key).await {
        Ok(Some(body)) => {
            cache_metrics::record_hit("waited");
            cached_response(body)
        }
        Ok(None) => {
            cache_metrics::record_fallback();
            debug!(
                key = %cache_key,
                retries = cache.policy.max_retries,
                "Cache not populated in time, running handler"
            );
            let populator = cache.populator(cache_key, None);
            run_with_hook(request, next, &populator).await
        }
        Err(e) => {
            cache_metrics::record_error("get");
            warn!(key = %cache_key, error = %e, "Cache read failed while waiting, serving uncached");
            next.run(request).await
        }
    }
}

/// GET requests without a non-empty bearer token.
fn is_cacheable_request(request: &Request) -> bool {
    request.method() == Method::GET && !has_bearer_token(request)
}

fn has_bearer_token(request: &Request) -> bool {
    request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .and_then(|rest| rest.split(' ').next())
        .is_some_and(|token| !token.is_empty())
}

fn cached_response(body: String) -> Response {
    (
        StatusCode::OK,
        [
            (
                header::CONTENT_TYPE,
                HeaderValue::from_static("application/json"),
            ),
            (X_CACHE, HeaderValue::from_static("HIT")),
        ],
        body,
    )
        .into_response()
}

/// Runs the handler, buffers its body when small enough, and hands both to
/// `hook` before returning the response unchanged.
async fn run_with_hook(request: Request, next: Next, hook: &dyn ResponseHook) -> Response {
    let response = next.run(request).await;
    let (mut head, body) = response.into_parts();
    head.headers.insert(X_CACHE, HeaderValue::from_static("MISS"));

    let bufferable = body
        .size_hint()
        .upper()
        .is_some_and(|upper| upper <= MAX_CACHED_BODY_BYTES as u64);
    if !bufferable {
        hook.on_response(&head, None).await;
        return Response::from_parts(head, body);
    }

    match axum::body::to_bytes(body, MAX_CACHED_BODY_BYTES).await {
        Ok(bytes) => {
            hook.on_response(&head, Some(&bytes)).await;
            Response::from_parts(head, Body::from(bytes))
        }
        Err(e) => {
            error!(error = %e, "Failed to read response body");
            hook.on_response(&head, None).await;
            let mut response =
                AppError(ReliefError::internal("Failed to read response body")).into_response();
            response
                .headers_mut()
                .insert(X_CACHE, HeaderValue::from_static("MISS"));
            response
        }
    }
}
