//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health             - Health check
//! GET  /catalog            - Catalog snapshot with display prices
//!
//! # Cart (JSON)
//! GET  /cart               - Cart view with totals
//! GET  /cart/count         - Cart badge count
//! POST /cart/add           - Add a pack by catalog id
//! POST /cart/increment     - Increase a line quantity
//! POST /cart/decrement     - Decrease a line quantity (0 removes the line)
//! POST /cart/remove        - Delete a line
//! POST /cart/clear         - Empty the cart
//!
//! # Checkout
//! POST /checkout           - Produce the WhatsApp hand-off link
//!
//! # Assets
//! fallback                 - Offline cache gateway (GET proxied per policy,
//!                            non-GET passed through)
//! ```

pub mod assets;
pub mod cart;
pub mod catalog;
pub mod checkout;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the application router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/catalog", get(catalog::show))
        .route("/cart", get(cart::show))
        .route("/cart/count", get(cart::count))
        .route("/cart/add", post(cart::add))
        .route("/cart/increment", post(cart::increment))
        .route("/cart/decrement", post(cart::decrement))
        .route("/cart/remove", post(cart::remove))
        .route("/cart/clear", post(cart::clear))
        .route("/checkout", post(checkout::create))
        .fallback(assets::serve)
}

/// Liveness probe.
async fn health() -> &'static str {
    "OK"
}
