//! Application state shared across handlers.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use saka_core::Catalog;

use crate::cart::CartLedger;
use crate::config::StorefrontConfig;
use crate::gateway::{CacheGateway, HttpUpstream};
use crate::store::FileStore;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`. The cart ledger sits behind a mutex: the UI
/// is the sole mutation source and mutations are serialized, matching the
/// ledger's single-mutator contract.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: Catalog,
    store: FileStore,
    ledger: Mutex<CartLedger<FileStore>>,
    gateway: CacheGateway<HttpUpstream>,
}

impl AppState {
    /// Create a new application state.
    ///
    /// Loads the persisted cart from `store`; the catalog snapshot is
    /// immutable for the process lifetime.
    #[must_use]
    pub fn new(
        config: StorefrontConfig,
        catalog: Catalog,
        store: FileStore,
        gateway: CacheGateway<HttpUpstream>,
    ) -> Self {
        let ledger = Mutex::new(CartLedger::load(store.clone()));

        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                store,
                ledger,
                gateway,
            }),
        }
    }

    /// Application configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// The immutable catalog snapshot.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    /// The persistent store.
    #[must_use]
    pub fn store(&self) -> &FileStore {
        &self.inner.store
    }

    /// Lock the cart ledger for a mutation or a consistent read.
    pub fn ledger(&self) -> MutexGuard<'_, CartLedger<FileStore>> {
        self.inner
            .ledger
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// The offline-asset cache gateway.
    #[must_use]
    pub fn gateway(&self) -> &CacheGateway<HttpUpstream> {
        &self.inner.gateway
    }
}
