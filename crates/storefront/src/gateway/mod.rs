//! Offline-asset cache gateway.
//!
//! Proxies GET traffic for the widget's static assets and keeps an offline
//! copy of the app shell. Lifecycle mirrors a service worker: `install`
//! populates the static generation all-or-nothing, `activate` sweeps
//! stale-named generations and claims interception, and `serve` routes each
//! request through the strategy its URL class selects. Cache writes are
//! best-effort and never block a response.

mod cache;
mod router;
mod upstream;

use std::sync::atomic::{AtomicBool, Ordering};

use axum::http::Method;
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

pub use cache::{
    AssetResponse, CachePurpose, CacheStore, DYNAMIC_GENERATION, GenerationConfig,
    STATIC_GENERATION, valid_generation_names,
};
pub use router::{CATALOG_DATA_PATH, Strategy, classify};
pub use upstream::{FetchError, HttpUpstream, Upstream};

/// App-shell manifest pre-populated at install time.
pub const APP_SHELL: &[&str] = &[
    "/",
    "/index.html",
    "/scripts/app.js",
    "/styles/main.css",
    "/assets/img/logo.webp",
];

/// Cached document served when the network is down and nothing better is
/// cached for the requested URL.
const ROOT_DOCUMENT: &str = "/index.html";

/// Gateway failures surfaced to the serving layer.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The matched routing rule had no fallback for a failed fetch.
    #[error("upstream fetch failed: {0}")]
    Fetch(#[from] FetchError),

    /// Offline with no cached fallback available.
    #[error("offline and nothing cached for this request")]
    Offline,
}

/// Request-routing cache proxy over one upstream origin.
pub struct CacheGateway<U: Upstream> {
    cache: CacheStore,
    upstream: U,
    active: AtomicBool,
}

impl<U: Upstream> CacheGateway<U> {
    /// Create an inactive gateway. Until [`activate`](Self::activate) runs,
    /// requests are proxied straight upstream.
    #[must_use]
    pub fn new(upstream: U) -> Self {
        Self {
            cache: CacheStore::new(),
            upstream,
            active: AtomicBool::new(false),
        }
    }

    /// The shared cache storage (test support).
    #[must_use]
    pub const fn cache(&self) -> &CacheStore {
        &self.cache
    }

    /// The upstream origin (test support).
    #[must_use]
    pub const fn upstream(&self) -> &U {
        &self.upstream
    }

    /// Whether interception has been claimed.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    /// Pre-populate the static generation with the app shell.
    ///
    /// All-or-nothing: every manifest entry is fetched before anything is
    /// committed, and a single failure fails the whole install with the
    /// static generation left unpopulated.
    ///
    /// # Errors
    ///
    /// Returns the first fetch failure.
    #[instrument(skip(self))]
    pub async fn install(&self) -> Result<(), GatewayError> {
        let mut shell = Vec::with_capacity(APP_SHELL.len());
        for target in APP_SHELL {
            let response = self.upstream.fetch(target).await?;
            shell.push((*target, response));
        }

        self.cache.open(&STATIC_GENERATION).await;
        for (target, response) in shell {
            self.cache.put(&STATIC_GENERATION, target, response).await;
        }

        info!(assets = APP_SHELL.len(), "app shell installed");
        Ok(())
    }

    /// Sweep stale generations and claim interception.
    ///
    /// Any generation whose name is outside the declared valid set is
    /// deleted (prior-version eviction); afterwards the gateway applies its
    /// routing policy to every subsequent request without a restart.
    #[instrument(skip(self))]
    pub async fn activate(&self) {
        let valid = valid_generation_names();
        for name in self.cache.generation_names().await {
            if !valid.contains(&name.as_str()) {
                self.cache.delete_generation(&name).await;
                info!(generation = %name, "evicted stale cache generation");
            }
        }

        self.active.store(true, Ordering::Release);
    }

    /// Serve one request through the routing policy.
    ///
    /// `target` is the request path with its query string, if any.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Fetch`] when a rule without a cache fallback
    /// hits a network failure, and [`GatewayError::Offline`] when a fallback
    /// branch finds nothing cached.
    pub async fn serve(&self, method: &Method, target: &str) -> Result<AssetResponse, GatewayError> {
        if !self.is_active() {
            return Ok(self.upstream.fetch(target).await?);
        }

        let path = target.split('?').next().unwrap_or(target);
        match classify(method, path) {
            // No cache participation either way; fetch failures propagate.
            Strategy::PassThrough | Strategy::NetworkOnly => {
                Ok(self.upstream.fetch(target).await?)
            }
            Strategy::NetworkFirst => self.network_first(target).await,
            Strategy::CacheFirst => self.cache_first(target).await,
        }
    }

    /// Live fetch with cache refresh; stale shell beats a blank page.
    async fn network_first(&self, target: &str) -> Result<AssetResponse, GatewayError> {
        match self.upstream.fetch(target).await {
            Ok(response) => {
                if response.is_success() {
                    self.cache
                        .put(&STATIC_GENERATION, target, response.clone())
                        .await;
                }
                Ok(response)
            }
            Err(err) => {
                debug!(%target, "network-first fetch failed, falling back to cached shell: {err}");
                self.root_fallback().await
            }
        }
    }

    /// Cached hit first; opportunistically cache same-origin 200s on miss.
    async fn cache_first(&self, target: &str) -> Result<AssetResponse, GatewayError> {
        if let Some(hit) = self.cache.lookup(target).await {
            return Ok(hit);
        }

        match self.upstream.fetch(target).await {
            Ok(response) => {
                if response.is_cacheable() {
                    self.cache
                        .put(&STATIC_GENERATION, target, response.clone())
                        .await;
                }
                Ok(response)
            }
            Err(err) => {
                debug!(%target, "cache-first fetch failed, falling back to cached shell: {err}");
                self.root_fallback().await
            }
        }
    }

    async fn root_fallback(&self) -> Result<AssetResponse, GatewayError> {
        match self.cache.lookup(ROOT_DOCUMENT).await {
            Some(cached) => Ok(cached),
            None => {
                warn!("offline with no cached root document");
                Err(GatewayError::Offline)
            }
        }
    }
}
