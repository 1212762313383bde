//! Catalog loading.
//!
//! The catalog is fetched from the upstream data endpoint with cache-busting
//! and no-store semantics so pricing is never stale, retried with a short
//! backoff, and validated to be non-empty. A failed load is terminal: the
//! storefront refuses to serve with partial or fabricated data.

use std::time::Duration;

use reqwest::header::{CACHE_CONTROL, HeaderValue};
use thiserror::Error;
use tracing::{instrument, warn};
use url::Url;

use saka_core::Catalog;

use crate::config::StorefrontConfig;

/// Total fetch attempts before giving up.
const RETRY_ATTEMPTS: u32 = 3;

/// Base delay between attempts; attempt `n` waits `n * BACKOFF_STEP`.
const BACKOFF_STEP: Duration = Duration::from_secs(1);

/// Errors from catalog loading.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Transport failure or non-2xx status, after exhausting retries.
    #[error("catalog request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The endpoint answered but the payload was empty or malformed.
    #[error("catalog data is empty or malformed")]
    LoadFailure,
}

/// Client for the external catalog data endpoint.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    client: reqwest::Client,
    endpoint: Url,
}

impl CatalogClient {
    /// Create a client for the configured upstream catalog endpoint.
    #[must_use]
    pub fn new(config: &StorefrontConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: config.catalog_endpoint(),
        }
    }

    /// Fetch and validate the catalog.
    ///
    /// Transport failures and non-2xx statuses are retried up to three
    /// attempts with a 1s/2s backoff between them. The payload must carry a
    /// non-empty `packaging` array.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Http` when all attempts fail, and
    /// `CatalogError::LoadFailure` when the payload is empty or malformed.
    #[instrument(skip(self), fields(endpoint = %self.endpoint))]
    pub async fn load(&self) -> Result<Catalog, CatalogError> {
        let response = self.fetch_with_retry().await?;

        let catalog: Catalog = response
            .json()
            .await
            .map_err(|_| CatalogError::LoadFailure)?;

        if catalog.is_empty() {
            return Err(CatalogError::LoadFailure);
        }

        tracing::info!(packs = catalog.packaging.len(), "catalog loaded");
        Ok(catalog)
    }

    async fn fetch_with_retry(&self) -> Result<reqwest::Response, reqwest::Error> {
        let mut attempt = 0;
        loop {
            match self.fetch_once().await {
                Ok(response) => return Ok(response),
                Err(err) => {
                    attempt += 1;
                    if attempt >= RETRY_ATTEMPTS {
                        return Err(err);
                    }
                    warn!(attempt, "catalog fetch failed, retrying: {err}");
                    tokio::time::sleep(BACKOFF_STEP * attempt).await;
                }
            }
        }
    }

    async fn fetch_once(&self) -> Result<reqwest::Response, reqwest::Error> {
        // Cache-busting timestamp mirrors the no-store contract of the
        // endpoint; intermediaries must never serve stale pricing.
        let timestamp = chrono::Utc::now().timestamp_millis();

        self.client
            .get(self.endpoint.clone())
            .query(&[("t", timestamp.to_string())])
            .header(CACHE_CONTROL, HeaderValue::from_static("no-store"))
            .send()
            .await?
            .error_for_status()
    }
}
