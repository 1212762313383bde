//! Cart route handlers.
//!
//! Every mutation returns the refreshed cart view so the caller can
//! re-render without a second round trip. Totals are recomputed live
//! against the catalog snapshot and the current first-purchase flag.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use saka_core::pricing::compute_totals;
use saka_core::{CartItem, CartTotals, Rupiah};

use crate::cart::CartLedger;
use crate::error::{AppError, Result};
use crate::state::AppState;
use crate::store::{FileStore, first_purchase_used};

/// Cart line display data.
#[derive(Debug, Clone, Serialize)]
pub struct CartItemView {
    pub id: String,
    pub name: String,
    pub price: Rupiah,
    pub price_display: String,
    pub quantity_per_pack: u32,
    pub qty: u32,
    pub line_subtotal: Rupiah,
}

impl From<&CartItem> for CartItemView {
    fn from(item: &CartItem) -> Self {
        Self {
            id: item.id.clone(),
            name: item.name.clone(),
            price: item.price,
            price_display: format!("Rp {}", item.price),
            quantity_per_pack: item.quantity_per_pack,
            qty: item.qty,
            line_subtotal: item.line_subtotal(),
        }
    }
}

/// Cart display data.
#[derive(Debug, Clone, Serialize)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub totals: CartTotals,
    pub total_display: String,
    pub unit_count: u64,
}

/// Cart badge count.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct CartCountView {
    pub count: u64,
}

/// Add-to-cart request body.
#[derive(Debug, Deserialize)]
pub struct AddToCartRequest {
    pub pack_id: String,
}

/// Request body addressing one cart line.
#[derive(Debug, Deserialize)]
pub struct CartLineRequest {
    pub id: String,
}

/// Build the cart view from a locked ledger.
fn view(state: &AppState, ledger: &CartLedger<FileStore>) -> CartView {
    let discount_used = first_purchase_used(state.store());
    let totals = compute_totals(ledger.items(), state.catalog(), discount_used);

    CartView {
        items: ledger.items().iter().map(CartItemView::from).collect(),
        totals,
        total_display: format!("Rp {}", totals.total),
        unit_count: ledger.unit_count(),
    }
}

/// Display the cart.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>) -> Json<CartView> {
    let ledger = state.ledger();
    Json(view(&state, &ledger))
}

/// Cart badge count.
#[instrument(skip(state))]
pub async fn count(State(state): State<AppState>) -> Json<CartCountView> {
    let count = state.ledger().unit_count();
    Json(CartCountView { count })
}

/// Add a pack to the cart by catalog id.
///
/// The pack is resolved against the catalog snapshot; the ledger rejects
/// entries without an id, a name, or a non-zero price.
#[instrument(skip(state))]
pub async fn add(
    State(state): State<AppState>,
    Json(request): Json<AddToCartRequest>,
) -> Result<Json<CartView>> {
    let mut ledger = state.ledger();

    let pack = state
        .catalog()
        .find(&request.pack_id)
        .ok_or_else(|| AppError::NotFound(format!("pack {}", request.pack_id)))?;
    ledger.add(pack)?;

    Ok(Json(view(&state, &ledger)))
}

/// Increase a line's quantity.
#[instrument(skip(state))]
pub async fn increment(
    State(state): State<AppState>,
    Json(request): Json<CartLineRequest>,
) -> Json<CartView> {
    let mut ledger = state.ledger();
    ledger.increment(&request.id);
    Json(view(&state, &ledger))
}

/// Decrease a line's quantity; the line disappears at zero.
#[instrument(skip(state))]
pub async fn decrement(
    State(state): State<AppState>,
    Json(request): Json<CartLineRequest>,
) -> Json<CartView> {
    let mut ledger = state.ledger();
    ledger.decrement(&request.id);
    Json(view(&state, &ledger))
}

/// Delete a line.
#[instrument(skip(state))]
pub async fn remove(
    State(state): State<AppState>,
    Json(request): Json<CartLineRequest>,
) -> Json<CartView> {
    let mut ledger = state.ledger();
    ledger.remove(&request.id);
    Json(view(&state, &ledger))
}

/// Empty the cart (explicit action; checkout never does this).
#[instrument(skip(state))]
pub async fn clear(State(state): State<AppState>) -> Json<CartView> {
    let mut ledger = state.ledger();
    ledger.clear();
    Json(view(&state, &ledger))
}
