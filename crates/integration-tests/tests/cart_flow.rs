//! End-to-end cart, pricing, and checkout scenarios.
//!
//! Everything runs against an in-memory store; the catalog snapshot comes
//! from the shared fixture.

use saka_core::pricing::compute_totals;
use saka_core::Rupiah;
use saka_integration_tests::catalog;
use saka_storefront::cart::CartLedger;
use saka_storefront::checkout::{
    CheckoutError, checkout_url, complete_checkout, format_order,
};
use saka_storefront::store::{MemoryStore, first_purchase_used};

// =============================================================================
// Cart + Pricing
// =============================================================================

#[test]
fn test_totals_follow_cart_mutations() {
    let catalog = catalog();
    let mut ledger = CartLedger::load(MemoryStore::new());

    let starter = catalog.find("starter").expect("fixture pack");
    let booster = catalog.find("booster").expect("fixture pack");

    ledger.add(starter).expect("valid pack");
    ledger.add(starter).expect("valid pack");
    ledger.add(booster).expect("valid pack");

    let totals = compute_totals(ledger.items(), &catalog, false);
    assert_eq!(totals.subtotal, Rupiah::new(250_000));
    assert_eq!(totals.discount, Rupiah::new(20_000));
    assert_eq!(totals.total, Rupiah::new(230_000));
    assert_eq!(totals.total_cards, 13);

    // Dropping the starter lines removes the discount with them.
    ledger.decrement("starter");
    ledger.decrement("starter");
    let totals = compute_totals(ledger.items(), &catalog, false);
    assert_eq!(totals.subtotal, Rupiah::new(50_000));
    assert_eq!(totals.discount, Rupiah::ZERO);
    assert_eq!(totals.total, Rupiah::new(50_000));
}

#[test]
fn test_cart_survives_reload_through_store() {
    let catalog = catalog();
    let store = MemoryStore::new();

    let mut ledger = CartLedger::load(store.clone());
    ledger.add(catalog.find("starter").expect("fixture pack")).expect("valid pack");
    ledger.add(catalog.find("booster").expect("fixture pack")).expect("valid pack");
    ledger.increment("booster");
    drop(ledger);

    // A fresh page load reads the same persisted ledger.
    let ledger = CartLedger::load(store);
    assert_eq!(ledger.items().len(), 2);
    assert_eq!(ledger.unit_count(), 3);

    let totals = compute_totals(ledger.items(), &catalog, false);
    assert_eq!(totals.subtotal, Rupiah::new(200_000));
}

// =============================================================================
// Checkout Hand-off
// =============================================================================

#[test]
fn test_checkout_flow_consumes_discount_once() {
    let catalog = catalog();
    let store = MemoryStore::new();
    let mut ledger = CartLedger::load(store.clone());

    ledger.add(catalog.find("starter").expect("fixture pack")).expect("valid pack");

    let totals = compute_totals(ledger.items(), &catalog, first_purchase_used(&store));
    assert_eq!(totals.total, Rupiah::new(90_000));

    let summary = format_order(ledger.items(), &totals).expect("non-empty cart");
    assert!(summary.contains("Starter Pack"));
    assert!(summary.ends_with("Total: Rp 90.000"));

    let url = checkout_url("6285179882669", &summary);
    assert!(url.starts_with("https://wa.me/6285179882669?text=%2AOrder%20SAKA"));

    complete_checkout(&store, ledger.items());
    assert!(first_purchase_used(&store));

    // The cart is deliberately not cleared by checkout; a second hand-off
    // re-sends the same order, now without the discount.
    assert_eq!(ledger.items().len(), 1);
    let totals = compute_totals(ledger.items(), &catalog, first_purchase_used(&store));
    assert_eq!(totals.discount, Rupiah::ZERO);
    assert_eq!(totals.total, Rupiah::new(100_000));

    let summary = format_order(ledger.items(), &totals).expect("non-empty cart");
    assert!(summary.ends_with("Total: Rp 100.000"));
}

#[test]
fn test_checkout_without_starter_keeps_discount_available() {
    let catalog = catalog();
    let store = MemoryStore::new();
    let mut ledger = CartLedger::load(store.clone());

    ledger.add(catalog.find("booster").expect("fixture pack")).expect("valid pack");

    let totals = compute_totals(ledger.items(), &catalog, first_purchase_used(&store));
    format_order(ledger.items(), &totals).expect("non-empty cart");
    complete_checkout(&store, ledger.items());

    // No starter pack in the order, so the discount survives for later.
    assert!(!first_purchase_used(&store));
    let starter = catalog.find("starter").expect("fixture pack");
    let preview = saka_core::pricing::display_price(starter, first_purchase_used(&store));
    assert!(preview.discounted);
}

#[test]
fn test_checkout_empty_cart_is_rejected() {
    let catalog = catalog();
    let store = MemoryStore::new();
    let ledger = CartLedger::load(store.clone());

    let totals = compute_totals(ledger.items(), &catalog, false);
    assert_eq!(
        format_order(ledger.items(), &totals),
        Err(CheckoutError::EmptyCart)
    );

    // A rejected checkout never consumes the discount.
    complete_checkout(&store, ledger.items());
    assert!(!first_purchase_used(&store));
}

#[test]
fn test_discount_consumed_in_one_session_is_gone_in_the_next() {
    let catalog = catalog();
    let store = MemoryStore::new();

    {
        let mut ledger = CartLedger::load(store.clone());
        ledger.add(catalog.find("starter").expect("fixture pack")).expect("valid pack");
        complete_checkout(&store, ledger.items());
    }

    // New session, same shopper: the flag persisted.
    let mut ledger = CartLedger::load(store.clone());
    ledger.clear();
    ledger.add(catalog.find("starter").expect("fixture pack")).expect("valid pack");

    let totals = compute_totals(ledger.items(), &catalog, first_purchase_used(&store));
    assert_eq!(totals.discount, Rupiah::ZERO);
}
