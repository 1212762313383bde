//! Checkout hand-off.
//!
//! Checkout is a one-way hand-off: the cart is rendered into the order
//! summary text the shop receives over WhatsApp, and the first-purchase
//! discount is consumed at hand-off time. There is no confirmation that the
//! conversation was opened or the order completed; the responsibility here
//! ends at producing the deep link.

use std::fmt::Write as _;

use thiserror::Error;

use saka_core::pricing::STARTER_PACK_ID;
use saka_core::{CartItem, CartTotals};

use crate::store::{PersistentStore, mark_first_purchase_used};

/// Checkout errors reported back to the caller.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CheckoutError {
    /// Checkout attempted with no items in the cart.
    #[error("checkout attempted with an empty cart")]
    EmptyCart,
}

/// Render the order summary text sent over the messaging hand-off.
///
/// One block per cart line (name, pack size × quantity, unit price) under a
/// fixed header, with a trailing total line.
///
/// # Errors
///
/// Returns [`CheckoutError::EmptyCart`] when the cart has no items.
pub fn format_order(items: &[CartItem], totals: &CartTotals) -> Result<String, CheckoutError> {
    if items.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }

    let mut blocks = Vec::with_capacity(items.len());
    for item in items {
        let mut block = String::new();
        let _ = writeln!(block, "{}", item.name);
        let _ = writeln!(block, "{} kartu × {}", item.quantity_per_pack, item.qty);
        let _ = writeln!(block, "Rp {}", item.price);
        blocks.push(block);
    }

    Ok(format!(
        "*Order SAKA Trading Card*\n\n{}\nTotal: Rp {}",
        blocks.join("\n"),
        totals.total
    ))
}

/// Build the WhatsApp deep link carrying the order summary.
#[must_use]
pub fn checkout_url(whatsapp_number: &str, summary: &str) -> String {
    format!(
        "https://wa.me/{whatsapp_number}?text={}",
        urlencoding::encode(summary)
    )
}

/// Consume the first-purchase discount if the order contains the starter
/// pack. Fire-and-forget: runs at hand-off time, not at confirmed purchase.
pub fn complete_checkout<S: PersistentStore>(store: &S, items: &[CartItem]) {
    if items.iter().any(|i| i.id == STARTER_PACK_ID) {
        mark_first_purchase_used(store);
    }
}
