//! Upstream asset origin.
//!
//! The gateway is a proxy: everything it serves ultimately comes from the
//! upstream origin hosting the widget's static assets. The trait keeps the
//! strategy logic testable against a scripted fake.

use std::sync::Arc;

use thiserror::Error;
use url::Url;

use super::cache::AssetResponse;

/// A failed upstream fetch. Triggers the fallback branch of whichever
/// routing rule matched; the gateway itself never retries.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("network unreachable: {0}")]
    Network(String),

    #[error("invalid request target: {0}")]
    InvalidTarget(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network(err.to_string())
    }
}

/// Source of live asset responses.
pub trait Upstream: Send + Sync {
    /// Fetch `target` (a path with optional query) from the origin.
    fn fetch(
        &self,
        target: &str,
    ) -> impl Future<Output = Result<AssetResponse, FetchError>> + Send;
}

/// Real upstream over HTTP.
#[derive(Debug, Clone)]
pub struct HttpUpstream {
    client: reqwest::Client,
    base: Url,
}

impl HttpUpstream {
    /// Create an upstream rooted at `base`.
    #[must_use]
    pub fn new(base: Url) -> Self {
        Self {
            client: reqwest::Client::new(),
            base,
        }
    }
}

impl Upstream for HttpUpstream {
    async fn fetch(&self, target: &str) -> Result<AssetResponse, FetchError> {
        let url = self
            .base
            .join(target)
            .map_err(|err| FetchError::InvalidTarget(err.to_string()))?;

        let response = self.client.get(url).send().await?;

        // Redirects may land on another origin; those responses are
        // served but never cached.
        let same_origin = response.url().origin() == self.base.origin();
        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(ToString::to_string);
        let body = response.bytes().await?;

        Ok(AssetResponse {
            status,
            content_type,
            body: Arc::from(body.as_ref()),
            same_origin,
        })
    }
}
