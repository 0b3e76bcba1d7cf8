//! Metrics emitted by the response cache.

use metrics::{counter, describe_counter};

/// Metric names for the response cache.
pub mod names {
    /// Requests answered from the cache, labelled by `path` (`direct` or `waited`).
    pub const CACHE_HITS_TOTAL: &str = "relief_cache_hits_total";
    /// Eligible requests that found no cached response.
    pub const CACHE_MISSES_TOTAL: &str = "relief_cache_misses_total";
    /// Lock acquisition attempts, labelled by `outcome` (`acquired` or `contended`).
    pub const CACHE_LOCKS_TOTAL: &str = "relief_cache_locks_total";
    /// Waiters that exhausted their retries and ran the handler themselves.
    pub const CACHE_FALLBACKS_TOTAL: &str = "relief_cache_fallbacks_total";
    /// Cache backend failures, labelled by `operation`.
    pub const CACHE_ERRORS_TOTAL: &str = "relief_cache_errors_total";
    /// Responses written to the cache.
    pub const CACHE_STORES_TOTAL: &str = "relief_cache_stores_total";
}

/// Register all metric descriptions.
pub fn register_metrics() {
    describe_counter!(names::CACHE_HITS_TOTAL, "Responses served from the cache");
    describe_counter!(names::CACHE_MISSES_TOTAL, "Cacheable requests with no cached response");
    describe_counter!(names::CACHE_LOCKS_TOTAL, "Single-flight lock attempts");
    describe_counter!(
        names::CACHE_FALLBACKS_TOTAL,
        "Waiters that gave up polling and ran the handler"
    );
    describe_counter!(names::CACHE_ERRORS_TOTAL, "Cache backend failures");
    describe_counter!(names::CACHE_STORES_TOTAL, "Responses written to the cache");
}

pub(crate) fn record_hit(path: &'static str) {
    counter!(names::CACHE_HITS_TOTAL, "path" => path).increment(1);
}

pub(crate) fn record_miss() {
    counter!(names::CACHE_MISSES_TOTAL).increment(1);
}

pub(crate) fn record_lock(outcome: &'static str) {
    counter!(names::CACHE_LOCKS_TOTAL, "outcome" => outcome).increment(1);
}

pub(crate) fn record_fallback() {
    counter!(names::CACHE_FALLBACKS_TOTAL).increment(1);
}

pub(crate) fn record_error(operation: &'static str) {
    counter!(names::CACHE_ERRORS_TOTAL, "operation" => operation).increment(1);
}

pub(crate) fn record_store() {
    counter!(names::CACHE_STORES_TOTAL).increment(1);
}
