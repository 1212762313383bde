//! Request routing rules for the cache gateway.
//!
//! A pure classifier keyed by (HTTP method, URL path) so the precedence
//! order is testable on its own: catalog data is never cached, the app
//! shell is network-first, everything else is cache-first, and non-GET
//! traffic is proxied untouched.

use axum::http::Method;

/// Path of the catalog data endpoint. Requests touching it bypass the cache
/// entirely so the storefront never serves stale pricing.
pub const CATALOG_DATA_PATH: &str = "/assets/data/cards.json";

/// Routing strategy for one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Non-GET traffic: proxy upstream, no cache reads or writes.
    PassThrough,
    /// Always fetch live; never cached, never falls back to cache.
    NetworkOnly,
    /// Try the network, refresh the cache on success, fall back to the
    /// cached root document when offline.
    NetworkFirst,
    /// Serve a cached hit when present, otherwise fetch and cache.
    CacheFirst,
}

/// Classify a request by method and URL path, in precedence order.
#[must_use]
pub fn classify(method: &Method, path: &str) -> Strategy {
    if method != Method::GET {
        return Strategy::PassThrough;
    }

    if path.contains(CATALOG_DATA_PATH) {
        return Strategy::NetworkOnly;
    }

    if path == "/" || path.ends_with("/index.html") || path.ends_with("/scripts/app.js") {
        return Strategy::NetworkFirst;
    }

    Strategy::CacheFirst
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_get_passes_through() {
        assert_eq!(classify(&Method::POST, "/cart/add"), Strategy::PassThrough);
        assert_eq!(
            classify(&Method::POST, CATALOG_DATA_PATH),
            Strategy::PassThrough
        );
        assert_eq!(classify(&Method::HEAD, "/"), Strategy::PassThrough);
    }

    #[test]
    fn test_catalog_data_is_network_only() {
        assert_eq!(
            classify(&Method::GET, CATALOG_DATA_PATH),
            Strategy::NetworkOnly
        );
    }

    #[test]
    fn test_app_shell_is_network_first() {
        assert_eq!(classify(&Method::GET, "/"), Strategy::NetworkFirst);
        assert_eq!(classify(&Method::GET, "/index.html"), Strategy::NetworkFirst);
        assert_eq!(
            classify(&Method::GET, "/id/index.html"),
            Strategy::NetworkFirst
        );
        assert_eq!(
            classify(&Method::GET, "/scripts/app.js"),
            Strategy::NetworkFirst
        );
    }

    #[test]
    fn test_everything_else_is_cache_first() {
        assert_eq!(
            classify(&Method::GET, "/assets/img/starter.webp"),
            Strategy::CacheFirst
        );
        assert_eq!(classify(&Method::GET, "/styles/main.css"), Strategy::CacheFirst);
    }

    #[test]
    fn test_catalog_rule_wins_over_cache_first() {
        // Same URL would be cache-first by the fallthrough rule; the
        // catalog rule must take precedence.
        let path = "/assets/data/cards.json?t=1700000000";
        assert_eq!(classify(&Method::GET, path), Strategy::NetworkOnly);
    }
}
