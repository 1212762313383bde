//! SAKA Storefront - cart, checkout hand-off, and offline asset cache.
//!
//! # Architecture
//!
//! - Axum JSON API for cart and checkout operations
//! - File-backed key/value store for the cart ledger and the
//!   first-purchase flag
//! - Catalog snapshot loaded once at startup from the upstream data
//!   endpoint; a failed load is terminal
//! - Cache gateway proxying asset traffic with offline support
//!
//! The gateway's install/activate lifecycle completes before the server
//! takes traffic; a failed install downgrades to plain proxying instead of
//! refusing to start.

#![cfg_attr(not(test), forbid(unsafe_code))]

use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use saka_storefront::catalog::CatalogClient;
use saka_storefront::config::StorefrontConfig;
use saka_storefront::gateway::{CacheGateway, HttpUpstream};
use saka_storefront::routes;
use saka_storefront::state::AppState;
use saka_storefront::store::FileStore;

#[tokio::main]
async fn main() {
    // Load configuration from environment
    let config = StorefrontConfig::from_env().expect("Failed to load configuration");

    // Initialize tracing with EnvFilter
    // Defaults to info level for our crate if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "saka_storefront=info,tower_http=debug".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Open the persistent store
    let store = FileStore::open(&config.data_dir).expect("Failed to open persistent store");
    tracing::info!(dir = %config.data_dir.display(), "persistent store ready");

    // Load the catalog snapshot. A failed load is terminal: the storefront
    // must not serve with partial or fabricated data.
    let catalog = CatalogClient::new(&config)
        .load()
        .await
        .expect("Failed to load catalog");

    // Bring up the cache gateway before taking traffic
    let gateway = CacheGateway::new(HttpUpstream::new(config.upstream_url.clone()));
    match gateway.install().await {
        Ok(()) => gateway.activate().await,
        Err(err) => {
            tracing::error!("app shell install failed, serving without offline support: {err}");
        }
    }

    let addr = config.socket_addr();
    let state = AppState::new(config, catalog, store, gateway);

    let app = routes::router()
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    tracing::info!(%addr, "storefront listening");
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listen address");
    axum::serve(listener, app)
        .await
        .expect("Server error");
}
