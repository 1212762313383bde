//! Cache generations.
//!
//! A generation is a named bucket of cached responses with a max-age policy.
//! Exactly one generation name per purpose is authoritative at a time; the
//! activation sweep deletes any generation whose name is not in the declared
//! valid set, which is how prior-version caches are evicted after an asset
//! manifest bump.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use tokio::sync::RwLock;

/// Logical purpose of a cache generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CachePurpose {
    /// App shell and long-lived assets.
    Static,
    /// Short-lived responses.
    Dynamic,
}

/// Configuration of one cache generation.
#[derive(Debug, Clone, Copy)]
pub struct GenerationConfig {
    /// Versioned generation name; bumped to force eviction of prior caches.
    pub name: &'static str,
    pub purpose: CachePurpose,
    /// Entries older than this are no longer served.
    pub max_age: Duration,
}

/// The static (app shell) generation.
pub const STATIC_GENERATION: GenerationConfig = GenerationConfig {
    name: "saka-static-v3",
    purpose: CachePurpose::Static,
    max_age: Duration::from_secs(7 * 24 * 60 * 60),
};

/// The dynamic generation.
pub const DYNAMIC_GENERATION: GenerationConfig = GenerationConfig {
    name: "saka-dynamic",
    purpose: CachePurpose::Dynamic,
    max_age: Duration::from_secs(24 * 60 * 60),
};

/// Generation names that survive the activation sweep.
#[must_use]
pub const fn valid_generation_names() -> [&'static str; 2] {
    [STATIC_GENERATION.name, DYNAMIC_GENERATION.name]
}

/// A cached or freshly fetched asset response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Arc<[u8]>,
    /// Whether the response came from the storefront's own origin. Only
    /// same-origin 200s are eligible for opportunistic caching.
    pub same_origin: bool,
}

impl AssetResponse {
    /// 2xx response.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// Eligible for opportunistic caching: a same-origin plain 200.
    #[must_use]
    pub const fn is_cacheable(&self) -> bool {
        self.status == 200 && self.same_origin
    }
}

/// Shared cache storage holding all generations.
///
/// Per-key put/lookup within a generation is atomic; each generation's
/// max-age is enforced as a time-to-live on its bucket.
#[derive(Clone, Default)]
pub struct CacheStore {
    generations: Arc<RwLock<HashMap<String, Cache<String, AssetResponse>>>>,
}

impl CacheStore {
    /// Create an empty store with no generations.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a generation, creating its bucket if absent.
    pub async fn open(&self, config: &GenerationConfig) {
        let mut generations = self.generations.write().await;
        generations.entry(config.name.to_string()).or_insert_with(|| {
            Cache::builder()
                .max_capacity(1_000)
                .time_to_live(config.max_age)
                .build()
        });
    }

    /// Store a response under `url` in the given generation, opening the
    /// generation if needed.
    pub async fn put(&self, config: &GenerationConfig, url: &str, response: AssetResponse) {
        self.open(config).await;
        let generations = self.generations.read().await;
        if let Some(bucket) = generations.get(config.name) {
            bucket.insert(url.to_string(), response).await;
        }
    }

    /// Look up a cached response for `url` across all generations, the
    /// static generation first.
    pub async fn lookup(&self, url: &str) -> Option<AssetResponse> {
        let generations = self.generations.read().await;

        if let Some(bucket) = generations.get(STATIC_GENERATION.name)
            && let Some(hit) = bucket.get(url).await
        {
            return Some(hit);
        }

        for (name, bucket) in generations.iter() {
            if name == STATIC_GENERATION.name {
                continue;
            }
            if let Some(hit) = bucket.get(url).await {
                return Some(hit);
            }
        }

        None
    }

    /// Names of all existing generations.
    pub async fn generation_names(&self) -> Vec<String> {
        let generations = self.generations.read().await;
        generations.keys().cloned().collect()
    }

    /// Delete a whole generation. Returns whether it existed.
    pub async fn delete_generation(&self, name: &str) -> bool {
        let mut generations = self.generations.write().await;
        generations.remove(name).is_some()
    }

    /// Whether a generation holds an entry for `url` (test support).
    pub async fn contains(&self, generation: &str, url: &str) -> bool {
        let generations = self.generations.read().await;
        match generations.get(generation) {
            Some(bucket) => bucket.contains_key(url),
            None => false,
        }
    }
}
