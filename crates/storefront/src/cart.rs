//! Cart ledger.
//!
//! Owns the ordered list of cart lines and persists the full list after
//! every mutation. Mutators are synchronous and expected to run under the
//! caller's single mutation lock; persistence failures are logged and
//! swallowed, leaving the in-memory ledger authoritative.

use thiserror::Error;

use saka_core::{CartItem, CatalogPack};

use crate::store::{PersistentStore, keys};

/// Cart mutation errors reported back to the caller.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CartError {
    /// The pack is missing an id, a name, or a non-zero price.
    #[error("invalid item: id, name, and a non-zero price are required")]
    InvalidItem,
}

/// The mutable list of items a shopper intends to purchase.
#[derive(Debug)]
pub struct CartLedger<S: PersistentStore> {
    store: S,
    items: Vec<CartItem>,
}

impl<S: PersistentStore> CartLedger<S> {
    /// Load the persisted cart, or start empty when nothing parseable is
    /// stored.
    pub fn load(store: S) -> Self {
        let items = match store.get_json::<Vec<CartItem>>(keys::CART) {
            Ok(Some(items)) => items,
            Ok(None) => Vec::new(),
            Err(err) => {
                tracing::warn!("failed to read persisted cart: {err}; starting empty");
                Vec::new()
            }
        };

        Self { store, items }
    }

    /// Cart lines in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total pack count across all lines, shown on the cart badge.
    #[must_use]
    pub fn unit_count(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.qty)).sum()
    }

    /// Add one pack.
    ///
    /// An existing line for the same id gets `qty += 1`; its captured name,
    /// price, and promo are left untouched rather than refreshed from the
    /// catalog. A new line starts at `qty = 1`.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::InvalidItem`] when the pack id or name is empty
    /// or the price is zero.
    pub fn add(&mut self, pack: &CatalogPack) -> Result<(), CartError> {
        if pack.id.is_empty() || pack.name.is_empty() || pack.price.is_zero() {
            return Err(CartError::InvalidItem);
        }

        if let Some(existing) = self.items.iter_mut().find(|i| i.id == pack.id) {
            existing.qty += 1;
        } else {
            self.items.push(CartItem::from_pack(pack));
        }

        self.persist();
        Ok(())
    }

    /// Increase a line's quantity by one. Unknown ids are a no-op.
    pub fn increment(&mut self, id: &str) {
        if let Some(item) = self.items.iter_mut().find(|i| i.id == id) {
            item.qty += 1;
            self.persist();
        }
    }

    /// Decrease a line's quantity by one, removing the line when it reaches
    /// zero. Unknown ids are a no-op.
    pub fn decrement(&mut self, id: &str) {
        let Some(index) = self.items.iter().position(|i| i.id == id) else {
            return;
        };

        let remove = self
            .items
            .get_mut(index)
            .is_some_and(|item| {
                item.qty = item.qty.saturating_sub(1);
                item.qty == 0
            });
        if remove {
            self.items.remove(index);
        }

        self.persist();
    }

    /// Delete a line unconditionally. Unknown ids are a no-op.
    pub fn remove(&mut self, id: &str) {
        let before = self.items.len();
        self.items.retain(|i| i.id != id);
        if self.items.len() != before {
            self.persist();
        }
    }

    /// Empty the cart. Only ever triggered by an explicit caller action,
    /// never automatically after checkout.
    pub fn clear(&mut self) {
        self.items.clear();
        self.persist();
    }

    /// Write the full ledger snapshot. Failures are logged, never surfaced;
    /// the in-memory list remains authoritative for this process.
    fn persist(&self) {
        if let Err(err) = self.store.set_json(keys::CART, &self.items) {
            tracing::warn!("failed to persist cart: {err}");
        }
    }
}
