//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `SAKA_UPSTREAM_URL` - Origin hosting the widget's static assets and
//!   the catalog data file
//!
//! ## Optional
//! - `SAKA_HOST` - Bind address (default: 127.0.0.1)
//! - `SAKA_PORT` - Listen port (default: 3000)
//! - `SAKA_CATALOG_PATH` - Catalog data path on the upstream origin
//!   (default: /assets/data/cards.json)
//! - `SAKA_WHATSAPP_NUMBER` - Checkout hand-off number (default: the shop's
//!   published number)
//! - `SAKA_DATA_DIR` - Directory for the persistent store (default: ./data)

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use thiserror::Error;
use url::Url;

/// Default checkout hand-off number published by the shop.
const DEFAULT_WHATSAPP_NUMBER: &str = "6285179882669";

/// Default catalog data path on the upstream origin.
const DEFAULT_CATALOG_PATH: &str = "/assets/data/cards.json";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Upstream origin for assets and catalog data
    pub upstream_url: Url,
    /// Catalog data path on the upstream origin
    pub catalog_path: String,
    /// WhatsApp number receiving the checkout hand-off
    pub whatsapp_number: String,
    /// Directory holding the persistent store
    pub data_dir: PathBuf,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("SAKA_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("SAKA_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("SAKA_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("SAKA_PORT".to_string(), e.to_string()))?;
        let upstream_url = get_required_env("SAKA_UPSTREAM_URL")?
            .parse::<Url>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("SAKA_UPSTREAM_URL".to_string(), e.to_string())
            })?;
        let catalog_path = get_env_or_default("SAKA_CATALOG_PATH", DEFAULT_CATALOG_PATH);
        let whatsapp_number = get_env_or_default("SAKA_WHATSAPP_NUMBER", DEFAULT_WHATSAPP_NUMBER);
        let data_dir = PathBuf::from(get_env_or_default("SAKA_DATA_DIR", "./data"));

        Ok(Self {
            host,
            port,
            upstream_url,
            catalog_path,
            whatsapp_number,
            data_dir,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Full URL of the catalog data endpoint.
    ///
    /// Falls back to the bare upstream origin if the configured path does
    /// not join cleanly; `from_env` has already validated the base URL.
    #[must_use]
    pub fn catalog_endpoint(&self) -> Url {
        self.upstream_url
            .join(&self.catalog_path)
            .unwrap_or_else(|_| self.upstream_url.clone())
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn config() -> StorefrontConfig {
        StorefrontConfig {
            host: "127.0.0.1".parse().unwrap(),
            port: 3000,
            upstream_url: "https://sakacards.id".parse().unwrap(),
            catalog_path: DEFAULT_CATALOG_PATH.to_string(),
            whatsapp_number: DEFAULT_WHATSAPP_NUMBER.to_string(),
            data_dir: PathBuf::from("./data"),
        }
    }

    #[test]
    fn test_socket_addr() {
        let addr = config().socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 3000);
    }

    #[test]
    fn test_catalog_endpoint() {
        let endpoint = config().catalog_endpoint();
        assert_eq!(
            endpoint.as_str(),
            "https://sakacards.id/assets/data/cards.json"
        );
    }
}
