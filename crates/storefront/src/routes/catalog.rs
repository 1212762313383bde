//! Catalog route handler.

use axum::{Json, extract::State};
use serde::Serialize;
use tracing::instrument;

use saka_core::pricing::display_price;
use saka_core::{CatalogPack, Rupiah};

use crate::state::AppState;
use crate::store::first_purchase_used;

/// Gallery display data for one pack.
#[derive(Debug, Clone, Serialize)]
pub struct PackView {
    pub id: String,
    pub name: String,
    pub price: Rupiah,
    /// Price after the first-purchase discount, equal to `price` when no
    /// discount applies.
    pub final_price: Rupiah,
    pub discounted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub promo_text: Option<String>,
    pub quantity: u32,
    pub image: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl PackView {
    fn build(pack: &CatalogPack, discount_used: bool) -> Self {
        let preview = display_price(pack, discount_used);

        Self {
            id: pack.id.clone(),
            name: pack.name.clone(),
            price: preview.base,
            final_price: preview.final_price,
            discounted: preview.discounted,
            promo_text: pack.promo.as_ref().and_then(|p| p.promo_text.clone()),
            quantity: pack.quantity,
            image: pack.image.clone(),
            description: pack.description.clone(),
        }
    }
}

/// Catalog display data.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogView {
    pub packaging: Vec<PackView>,
}

/// The catalog snapshot with live display prices.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>) -> Json<CatalogView> {
    let discount_used = first_purchase_used(state.store());

    let packaging = state
        .catalog()
        .packaging
        .iter()
        .map(|pack| PackView::build(pack, discount_used))
        .collect();

    Json(CatalogView { packaging })
}
