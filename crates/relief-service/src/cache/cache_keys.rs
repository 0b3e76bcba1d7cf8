//! Cache key generators for consistent key naming.

use sha2::{Digest, Sha256};

/// Prefix for all cache keys to namespace them.
const CACHE_PREFIX: &str = "relief:cache";

/// Deterministic fingerprint of a request: hex SHA-256 of `<METHOD>::<URL>`.
#[must_use]
pub fn request_fingerprint(method: &str, url: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(method.as_bytes());
    hasher.update(b"::");
    hasher.update(url.as_bytes());
    hex::encode(hasher.finalize())
}

/// Key holding a cached response body.
#[must_use]
pub fn response_key(fingerprint: &str) -> String {
    format!("{}:response:{}", CACHE_PREFIX, fingerprint)
}

/// Key of the single-flight lock guarding the population of a response.
#[must_use]
pub fn lock_key(fingerprint: &str) -> String {
    format!("{}:lock:{}", CACHE_PREFIX, fingerprint)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fingerprint_is_stable() {
        let a = request_fingerprint("GET", "/api/requests?page=1");
        let b = request_fingerprint("GET", "/api/requests?page=1");
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
    }

    #[test]
    fn test_fingerprint_distinguishes_requests() {
        let base = request_fingerprint("GET", "/api/requests");
        assert_ne!(base, request_fingerprint("GET", "/api/requests?page=2"));
        assert_ne!(base, request_fingerprint("HEAD", "/api/requests"));
        assert_ne!(base, request_fingerprint("GET", "/api/tasks"));
    }

    #[test]
    fn test_fingerprint_known_value() {
        // sha256("GET::/")
        assert_eq!(
            request_fingerprint("GET", "/"),
            hex::encode(Sha256::digest(b"GET::/"))
        );
    }

    #[test]
    fn test_namespaces_differ() {
        let fp = request_fingerprint("GET", "/api/tasks");
        assert_eq!(response_key(&fp), format!("relief:cache:response:{}", fp));
        assert_eq!(lock_key(&fp), format!("relief:cache:lock:{}", fp));
    }
}
