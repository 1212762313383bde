//! Cart line item and totals types.
//!
//! Serialized field names match the legacy persisted cart
//! (`saka_cart_v1`), so an existing store file deserializes unchanged.

use serde::{Deserialize, Serialize};

use super::catalog::{CatalogPack, PackPromo};
use super::price::Rupiah;

/// A single cart line.
///
/// Invariants: at most one line per `id`; `qty >= 1` while the line exists
/// (the ledger removes a line instead of letting it reach zero).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    /// Catalog key of the pack.
    pub id: String,
    /// Display name captured at add time.
    pub name: String,
    /// Unit price captured at add time.
    pub price: Rupiah,
    /// Cards per pack captured at add time.
    pub quantity_per_pack: u32,
    /// Promo metadata captured at add time. Not trusted for discount
    /// computation; the catalog snapshot is authoritative there.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub promo: Option<PackPromo>,
    /// Number of packs.
    pub qty: u32,
}

impl CartItem {
    /// Create a fresh line for a catalog pack with `qty = 1`.
    #[must_use]
    pub fn from_pack(pack: &CatalogPack) -> Self {
        Self {
            id: pack.id.clone(),
            name: pack.name.clone(),
            price: pack.price,
            quantity_per_pack: pack.quantity,
            promo: pack.promo.clone(),
            qty: 1,
        }
    }

    /// Price-at-add-time extended over the line quantity.
    #[must_use]
    pub fn line_subtotal(&self) -> Rupiah {
        self.price.saturating_mul(u64::from(self.qty))
    }

    /// Number of cards this line contributes.
    #[must_use]
    pub fn card_count(&self) -> u64 {
        u64::from(self.quantity_per_pack) * u64::from(self.qty)
    }
}

/// Computed cart totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartTotals {
    /// Sum of line subtotals at price-at-add-time.
    pub subtotal: Rupiah,
    /// First-purchase discount, zero when not eligible.
    pub discount: Rupiah,
    /// `subtotal - discount`, clamped at zero.
    pub total: Rupiah,
    /// Total number of cards across all lines.
    pub total_cards: u64,
}
