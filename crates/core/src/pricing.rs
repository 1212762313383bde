//! Promotion eligibility and cart total computation.
//!
//! Stateless rules over an explicitly-passed catalog snapshot. The catalog is
//! the source of truth for promo configuration and the discount base price;
//! the cart snapshot is only trusted for the price captured at add time,
//! which is what the subtotal reflects.

use crate::types::{Catalog, CatalogPack, CartItem, CartTotals, Rupiah};

/// Catalog key of the introductory pack the first-purchase discount applies to.
pub const STARTER_PACK_ID: &str = "starter";

/// A gallery price preview for one pack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayPrice {
    /// Undiscounted base price.
    pub base: Rupiah,
    /// Price after the first-purchase discount, equal to `base` when the
    /// discount does not apply.
    pub final_price: Rupiah,
    /// Whether a discount is applied.
    pub discounted: bool,
}

/// First-purchase discount fraction for a catalog pack.
///
/// Non-zero only for the starter pack while the discount is unused. Always
/// query this against the catalog pack; cart snapshots may carry stale promo
/// metadata.
#[must_use]
pub fn eligible_discount(pack: &CatalogPack, discount_used: bool) -> f64 {
    if pack.id != STARTER_PACK_ID || discount_used {
        return 0.0;
    }
    pack.promo.as_ref().map_or(0.0, |p| p.first_time_discount)
}

/// Discount amount for the whole cart.
///
/// Zero unless the cart holds a starter line and the catalog still grants the
/// first-purchase discount. The amount is computed from the catalog's current
/// base price and fraction, not the cart's stored price.
#[must_use]
pub fn discount_amount(items: &[CartItem], catalog: &Catalog, discount_used: bool) -> Rupiah {
    let Some(line) = items.iter().find(|i| i.id == STARTER_PACK_ID) else {
        return Rupiah::ZERO;
    };
    let Some(pack) = catalog.find(STARTER_PACK_ID) else {
        return Rupiah::ZERO;
    };

    let fraction = eligible_discount(pack, discount_used);
    if fraction <= 0.0 {
        return Rupiah::ZERO;
    }

    round_rupiah(to_f64(pack.price.as_u64()) * fraction * f64::from(line.qty))
}

/// Compute subtotal, discount, total, and card count for a cart.
///
/// The subtotal uses each line's price-at-add-time while the discount is
/// recalculated live from the catalog. Degenerates to all zeros on an empty
/// cart.
#[must_use]
pub fn compute_totals(items: &[CartItem], catalog: &Catalog, discount_used: bool) -> CartTotals {
    let subtotal = items
        .iter()
        .fold(Rupiah::ZERO, |acc, item| acc.saturating_add(item.line_subtotal()));
    let discount = if discount_used {
        Rupiah::ZERO
    } else {
        discount_amount(items, catalog, discount_used)
    };

    CartTotals {
        subtotal,
        discount,
        total: subtotal.saturating_sub(discount),
        total_cards: items.iter().map(CartItem::card_count).sum(),
    }
}

/// Gallery price preview for a pack, with the first-purchase discount
/// applied when eligible.
#[must_use]
pub fn display_price(pack: &CatalogPack, discount_used: bool) -> DisplayPrice {
    let fraction = eligible_discount(pack, discount_used);
    if fraction > 0.0 {
        DisplayPrice {
            base: pack.price,
            final_price: round_rupiah(to_f64(pack.price.as_u64()) * (1.0 - fraction)),
            discounted: true,
        }
    } else {
        DisplayPrice {
            base: pack.price,
            final_price: pack.price,
            discounted: false,
        }
    }
}

#[allow(clippy::cast_precision_loss)] // rupiah amounts stay far below 2^53
const fn to_f64(amount: u64) -> f64 {
    amount as f64
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn round_rupiah(value: f64) -> Rupiah {
    Rupiah::new(value.round().max(0.0) as u64)
}
