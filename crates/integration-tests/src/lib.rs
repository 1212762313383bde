//! Integration tests for the SAKA storefront.
//!
//! Scenario tests run against the library surface with in-memory fakes:
//! [`saka_storefront::store::MemoryStore`] stands in for the file store and
//! [`ScriptedUpstream`] for the asset origin, so the full cart → totals →
//! checkout flow and the offline cache policy are exercised without a
//! network or a filesystem.
//!
//! # Test Categories
//!
//! - `cart_flow` - Cart mutations, pricing, and the checkout hand-off
//! - `offline_cache` - Gateway routing, fallbacks, and generation lifecycle

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use saka_core::{Catalog, CatalogPack, PackPromo, Rupiah};
use saka_storefront::gateway::{AssetResponse, FetchError, Upstream};

/// The shop's catalog as the tests know it: a discounted starter pack and a
/// plain booster pack.
#[must_use]
pub fn catalog() -> Catalog {
    Catalog {
        packaging: vec![
            CatalogPack {
                id: "starter".to_string(),
                name: "Starter Pack".to_string(),
                price: Rupiah::new(100_000),
                quantity: 5,
                image: "assets/img/starter.webp".to_string(),
                description: Some("Paket perdana berisi 5 kartu acak.".to_string()),
                promo: Some(PackPromo {
                    promo_text: Some("Diskon 10% pembeli pertama".to_string()),
                    first_time_discount: 0.1,
                }),
            },
            CatalogPack {
                id: "booster".to_string(),
                name: "Booster Pack".to_string(),
                price: Rupiah::new(50_000),
                quantity: 3,
                image: "assets/img/booster.webp".to_string(),
                description: None,
                promo: None,
            },
        ],
    }
}

/// A 200 same-origin asset response.
#[must_use]
pub fn asset(body: &str, content_type: &str) -> AssetResponse {
    AssetResponse {
        status: 200,
        content_type: Some(content_type.to_string()),
        body: Arc::from(body.as_bytes()),
        same_origin: true,
    }
}

/// Scripted asset origin.
///
/// Serves a fixed response per target, counts fetches, and can be taken
/// offline mid-test.
#[derive(Debug, Default)]
pub struct ScriptedUpstream {
    responses: Mutex<HashMap<String, AssetResponse>>,
    fetches: AtomicUsize,
}

impl ScriptedUpstream {
    /// An upstream serving the given targets.
    #[must_use]
    pub fn serving(targets: &[(&str, AssetResponse)]) -> Self {
        let responses = targets
            .iter()
            .map(|(target, response)| ((*target).to_string(), response.clone()))
            .collect();
        Self {
            responses: Mutex::new(responses),
            fetches: AtomicUsize::new(0),
        }
    }

    /// Total fetches observed.
    #[must_use]
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    /// Drop the network: every subsequent fetch fails.
    pub fn go_offline(&self) {
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl Upstream for ScriptedUpstream {
    async fn fetch(&self, target: &str) -> Result<AssetResponse, FetchError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(target)
            .cloned()
            .ok_or_else(|| FetchError::Network(format!("unreachable: {target}")))
    }
}
