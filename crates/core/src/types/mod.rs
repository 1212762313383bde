//! Core types for the SAKA storefront.
//!
//! This module provides the catalog, cart, and money types shared by the
//! pricing rules and the storefront service.

pub mod cart;
pub mod catalog;
pub mod price;

pub use cart::{CartItem, CartTotals};
pub use catalog::{Catalog, CatalogPack, PackPromo};
pub use price::Rupiah;
