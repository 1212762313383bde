//! Checkout route handler.

use axum::{Json, extract::State};
use serde::Serialize;
use tracing::instrument;

use saka_core::pricing::compute_totals;

use crate::checkout::{checkout_url, complete_checkout, format_order};
use crate::error::Result;
use crate::state::AppState;
use crate::store::first_purchase_used;

/// Checkout hand-off data.
#[derive(Debug, Clone, Serialize)]
pub struct CheckoutResponse {
    /// WhatsApp deep link carrying the url-encoded order summary.
    pub url: String,
    /// The plain-text order summary, for display alongside the link.
    pub summary: String,
}

/// Produce the WhatsApp hand-off for the current cart.
///
/// Fails with 400 when the cart is empty. On success the first-purchase
/// discount is consumed if the cart holds the starter pack. This happens
/// at hand-off time; no completion signal exists. The cart is deliberately
/// left as-is.
#[instrument(skip(state))]
pub async fn create(State(state): State<AppState>) -> Result<Json<CheckoutResponse>> {
    let ledger = state.ledger();

    let discount_used = first_purchase_used(state.store());
    let totals = compute_totals(ledger.items(), state.catalog(), discount_used);
    let summary = format_order(ledger.items(), &totals)?;
    let url = checkout_url(&state.config().whatsapp_number, &summary);

    complete_checkout(state.store(), ledger.items());
    tracing::info!(total = %totals.total, "checkout hand-off produced");

    Ok(Json(CheckoutResponse { url, summary }))
}
